//! # Shadow Record Integration Test
//!
//! Writes random records into byte buffers with an independent encoder and
//! checks every in-bounds cell decodes back to the same values.

use cfdview_core::{
    CellFields, EngineBuffers, FrameViews, Grid, LegacyCell, LegacyLayout, Region, RichCell,
    ScalarKind, Schema, SchemaLayout, ViewError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Independent encoder for the 16-byte rich record.
fn encode_rich(cell: &RichCell, out: &mut Vec<u8>) {
    out.push(u8::from(cell.alive));
    out.extend_from_slice(&[0xEE; 3]);
    out.extend_from_slice(&cell.velocity_x.to_ne_bytes());
    out.extend_from_slice(&cell.velocity_y.to_ne_bytes());
    out.extend_from_slice(&cell.tag);
    out.push(0xEE);
}

fn encode_legacy(cell: &LegacyCell, out: &mut Vec<u8>) {
    out.push(u8::from(cell.alive));
    out.push(cell.velocity_x);
    out.push(cell.velocity_y);
    out.extend_from_slice(&cell.color);
}

/// Test: every rich cell and auxiliary value matches its shadow.
#[test]
fn test_rich_views_match_shadow_records() {
    let mut rng = StdRng::seed_from_u64(42);
    let grid = Grid::new(17, 9).unwrap();

    let shadow_cells: Vec<RichCell> = (0..grid.cell_count())
        .map(|_| RichCell {
            alive: rng.gen(),
            velocity_x: rng.gen_range(-50.0..50.0),
            velocity_y: rng.gen_range(-50.0..50.0),
            tag: rng.gen(),
        })
        .collect();
    let shadow_pressure: Vec<f32> = (0..grid.cell_count()).map(|_| rng.gen_range(-40.0..40.0)).collect();
    let shadow_obstacle: Vec<bool> = (0..grid.cell_count()).map(|_| rng.gen_bool(0.2)).collect();

    // Place all three arrays in one linear memory at odd offsets, like a
    // foreign heap would.
    let mut memory = vec![0u8; 3];
    let cells_offset = memory.len();
    for cell in &shadow_cells {
        encode_rich(cell, &mut memory);
    }
    memory.push(0);
    let pressure_offset = memory.len();
    for p in &shadow_pressure {
        memory.extend_from_slice(&p.to_ne_bytes());
    }
    let obstacle_offset = memory.len();
    memory.extend(shadow_obstacle.iter().map(|&o| u8::from(o)));

    let buffers = EngineBuffers::rich(
        Region::new(&memory, cells_offset),
        Region::new(&memory, pressure_offset),
        Region::new(&memory, obstacle_offset),
    );
    let views = FrameViews::bind(&buffers, grid, &SchemaLayout::standard(Schema::Rich)).unwrap();

    for (row, col) in grid.cells() {
        let idx = grid.index(row, col).unwrap();
        assert_eq!(
            views.read_cell_at(row, col).unwrap(),
            CellFields::Rich(shadow_cells[idx]),
            "cell mismatch at ({row}, {col})"
        );
        assert_eq!(
            views.read_scalar_array_at(ScalarKind::Pressure, row, col).unwrap(),
            shadow_pressure[idx]
        );
        assert_eq!(views.is_obstacle_at(row, col).unwrap(), shadow_obstacle[idx]);
    }
}

/// Test: every legacy cell matches its shadow when the region uses the stride.
#[test]
fn test_legacy_views_match_shadow_records() {
    let mut rng = StdRng::seed_from_u64(7);
    let grid = Grid::new(8, 5).unwrap();
    let shadow: Vec<LegacyCell> = (0..grid.cell_count())
        .map(|_| LegacyCell {
            alive: rng.gen(),
            velocity_x: rng.gen(),
            velocity_y: rng.gen(),
            color: rng.gen(),
        })
        .collect();

    let mut bytes = Vec::new();
    for cell in &shadow {
        encode_legacy(cell, &mut bytes);
    }

    let buffers = EngineBuffers::legacy(Region::whole(&bytes));
    let views = FrameViews::bind(&buffers, grid, &SchemaLayout::standard(Schema::Legacy)).unwrap();

    for (row, col) in grid.cells() {
        let idx = grid.index(row, col).unwrap();
        assert_eq!(views.read_cell_at(row, col).unwrap(), CellFields::Legacy(shadow[idx]));
    }
}

/// Test: a legacy region sized at the producer's 5 bytes per cell cannot be
/// bound with the 6-byte stride. The mismatch is reported, not masked.
#[test]
fn test_legacy_producer_region_sizing_is_detected() {
    let layout = LegacyLayout::STANDARD;
    let grid = Grid::new(4, 4).unwrap();
    let bytes = vec![0u8; layout.producer_region_len(grid.cell_count())];

    let buffers = EngineBuffers::legacy(Region::whole(&bytes));
    let err = FrameViews::bind(&buffers, grid, &SchemaLayout::Legacy(layout)).unwrap_err();

    assert_eq!(
        err,
        ViewError::LengthMismatch {
            array: "cells",
            required: 96,
            available: 80,
        }
    );
}
