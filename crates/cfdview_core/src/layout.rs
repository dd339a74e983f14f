//! Cell record layouts.
//!
//! A layout names every field of a packed cell record with its byte offset
//! and size. The engine build decides the layout once; views and renderers
//! are handed the same value for every frame instead of recomputing offsets
//! per cell.
//!
//! # Rich record (16 bytes)
//!
//! ```text
//! offset  0: alive       u8 (0 = false)
//! offset  1: _pad        [u8; 3]
//! offset  4: velocity_x  f32
//! offset  8: velocity_y  f32
//! offset 12: tag         [u8; 3]
//! offset 15: _pad        u8
//! ```
//!
//! # Legacy record (6 bytes)
//!
//! ```text
//! offset 0: alive, 1: velocity_x, 2: velocity_y, 3..6: color rgb
//! ```
//!
//! The legacy producer sized its exposed region as if records were 5 bytes.
//! That figure is kept separately in [`LegacyLayout::region_record_bytes`]
//! so it can never silently become the stride.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};

/// Named interpretation of the per-cell byte layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// Float velocity records plus separate pressure and obstacle arrays.
    #[default]
    Rich,
    /// Byte-sized velocity and precomputed color, no auxiliary arrays.
    Legacy,
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rich => f.write_str("rich"),
            Self::Legacy => f.write_str("legacy"),
        }
    }
}

/// Byte range of one field inside a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Offset from the start of the record.
    pub offset: usize,
    /// Size of the field in bytes.
    pub size: usize,
}

impl FieldSpec {
    /// Creates a field spec.
    #[must_use]
    pub const fn new(offset: usize, size: usize) -> Self {
        Self { offset, size }
    }

    /// One past the last byte of the field.
    #[inline]
    #[must_use]
    pub const fn end(self) -> usize {
        self.offset + self.size
    }

    const fn overlaps(self, other: Self) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

/// Layout of a rich-schema cell record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RichLayout {
    /// Distance in bytes between consecutive records.
    pub stride: usize,
    /// Alive flag, one byte.
    pub alive: FieldSpec,
    /// Horizontal velocity, f32.
    pub velocity_x: FieldSpec,
    /// Vertical velocity, f32.
    pub velocity_y: FieldSpec,
    /// Reserved annotation bytes.
    pub tag: FieldSpec,
}

impl RichLayout {
    /// The `#[repr(C)]` layout produced by the reference engine.
    pub const STANDARD: Self = Self {
        stride: 16,
        alive: FieldSpec::new(0, 1),
        velocity_x: FieldSpec::new(4, 4),
        velocity_y: FieldSpec::new(8, 4),
        tag: FieldSpec::new(12, 3),
    };

    /// Checks sizes, bounds and overlap of every field.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidLayout`] describing the first problem found.
    pub fn validate(&self) -> ViewResult<()> {
        let fields = [
            ("alive", self.alive, 1),
            ("velocity_x", self.velocity_x, 4),
            ("velocity_y", self.velocity_y, 4),
            ("tag", self.tag, 3),
        ];
        validate_fields(Schema::Rich, self.stride, &fields)
    }
}

impl Default for RichLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Layout of a legacy-schema cell record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegacyLayout {
    /// Distance in bytes between consecutive records.
    pub stride: usize,
    /// Per-cell byte count the producer used when sizing its region.
    ///
    /// Not used for decoding. Kept so the producer's figure can be
    /// compared against [`LegacyLayout::stride`].
    pub region_record_bytes: usize,
    /// Alive flag.
    pub alive: FieldSpec,
    /// Horizontal velocity magnitude, u8.
    pub velocity_x: FieldSpec,
    /// Vertical velocity magnitude, u8.
    pub velocity_y: FieldSpec,
    /// Precomputed color bytes, rgb.
    pub color: FieldSpec,
}

impl LegacyLayout {
    /// The byte-per-field layout of the legacy producer.
    pub const STANDARD: Self = Self {
        stride: 6,
        region_record_bytes: 5,
        alive: FieldSpec::new(0, 1),
        velocity_x: FieldSpec::new(1, 1),
        velocity_y: FieldSpec::new(2, 1),
        color: FieldSpec::new(3, 3),
    };

    /// Checks sizes, bounds and overlap of every field.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidLayout`] describing the first problem found.
    pub fn validate(&self) -> ViewResult<()> {
        let fields = [
            ("alive", self.alive, 1),
            ("velocity_x", self.velocity_x, 1),
            ("velocity_y", self.velocity_y, 1),
            ("color", self.color, 3),
        ];
        validate_fields(Schema::Legacy, self.stride, &fields)
    }

    /// Returns true if the producer's region sizing agrees with the stride.
    #[must_use]
    pub const fn region_matches_stride(&self) -> bool {
        self.region_record_bytes == self.stride
    }

    /// Bytes the producer exposes for `cells` records.
    #[must_use]
    pub const fn producer_region_len(&self, cells: usize) -> usize {
        cells * self.region_record_bytes
    }
}

impl Default for LegacyLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// The layout an engine build commits to for its whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaLayout {
    /// Rich records plus pressure and obstacle arrays.
    Rich(RichLayout),
    /// Legacy records only.
    Legacy(LegacyLayout),
}

impl SchemaLayout {
    /// Standard layout for a schema.
    #[must_use]
    pub const fn standard(schema: Schema) -> Self {
        match schema {
            Schema::Rich => Self::Rich(RichLayout::STANDARD),
            Schema::Legacy => Self::Legacy(LegacyLayout::STANDARD),
        }
    }

    /// Schema this layout belongs to.
    #[must_use]
    pub const fn schema(&self) -> Schema {
        match self {
            Self::Rich(_) => Schema::Rich,
            Self::Legacy(_) => Schema::Legacy,
        }
    }

    /// Record stride in bytes.
    #[must_use]
    pub const fn stride(&self) -> usize {
        match self {
            Self::Rich(layout) => layout.stride,
            Self::Legacy(layout) => layout.stride,
        }
    }

    /// Validates the wrapped layout.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidLayout`] if the layout is inconsistent.
    pub fn validate(&self) -> ViewResult<()> {
        match self {
            Self::Rich(layout) => layout.validate(),
            Self::Legacy(layout) => layout.validate(),
        }
    }
}

fn validate_fields(
    schema: Schema,
    stride: usize,
    fields: &[(&'static str, FieldSpec, usize)],
) -> ViewResult<()> {
    let invalid = |reason: String| ViewError::InvalidLayout { schema, reason };

    if stride == 0 {
        return Err(invalid("stride is zero".to_string()));
    }

    for (i, &(name, spec, expected_size)) in fields.iter().enumerate() {
        if spec.size != expected_size {
            return Err(invalid(format!(
                "{name} is {} bytes, expected {expected_size}",
                spec.size
            )));
        }
        if spec.end() > stride {
            return Err(invalid(format!(
                "{name} ends at byte {} past stride {stride}",
                spec.end()
            )));
        }
        for &(other_name, other, _) in &fields[i + 1..] {
            if spec.overlaps(other) {
                return Err(invalid(format!("{name} overlaps {other_name}")));
            }
        }
    }

    Ok(())
}
