//! Explicit field decoders.
//!
//! Every multi-byte read goes through `bytemuck::pod_read_unaligned`, so
//! decoding never depends on the engine allocating its buffers with any
//! particular alignment. Values are read in host byte order because the
//! buffer is the engine's own in-memory representation.

use bytemuck::Pod;

use crate::layout::FieldSpec;

/// Reads a one-byte flag. Any non-zero byte is `true`.
#[inline]
pub(crate) fn read_flag(record: &[u8], field: FieldSpec) -> bool {
    record[field.offset] != 0
}

/// Reads a single byte.
#[inline]
pub(crate) fn read_u8(record: &[u8], field: FieldSpec) -> u8 {
    record[field.offset]
}

/// Reads a plain-old-data value spanning `field`.
///
/// The field size must equal `size_of::<T>()`; layouts are validated
/// before any view is built, so this holds for every bound view.
#[inline]
pub(crate) fn read_pod<T: Pod>(record: &[u8], field: FieldSpec) -> T {
    bytemuck::pod_read_unaligned(&record[field.offset..field.end()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unaligned_f32() {
        let mut bytes = vec![0u8; 9];
        bytes[1..5].copy_from_slice(&1.5f32.to_ne_bytes());
        bytes[5..9].copy_from_slice(&(-2.25f32).to_ne_bytes());
        assert_eq!(read_pod::<f32>(&bytes, FieldSpec::new(1, 4)), 1.5);
        assert_eq!(read_pod::<f32>(&bytes, FieldSpec::new(5, 4)), -2.25);
    }

    #[test]
    fn test_flag_any_nonzero() {
        let bytes = [0u8, 1, 7];
        assert!(!read_flag(&bytes, FieldSpec::new(0, 1)));
        assert!(read_flag(&bytes, FieldSpec::new(1, 1)));
        assert!(read_flag(&bytes, FieldSpec::new(2, 1)));
        assert_eq!(read_u8(&bytes, FieldSpec::new(2, 1)), 7);
    }
}
