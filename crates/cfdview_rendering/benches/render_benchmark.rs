//! # Render Benchmark
//!
//! Full-frame paint of a 256x256 rich grid into a pixel buffer at the
//! default cell size, plus the bare color transfer for comparison.

#![allow(missing_docs)]

use cfdview_core::{EngineBuffers, FrameViews, Grid, Region, Schema, SchemaLayout};
use cfdview_rendering::{rich_color, ColorScale, FrameRenderer, PixelBuffer, Rgb};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_frame(grid: Grid) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut rng = StdRng::seed_from_u64(0xCFD);
    let mut cells = Vec::with_capacity(grid.cell_count() * 16);
    let mut pressure = Vec::with_capacity(grid.cell_count() * 4);
    let mut obstacle = Vec::with_capacity(grid.cell_count());
    for _ in 0..grid.cell_count() {
        cells.extend_from_slice(&[1, 0, 0, 0]);
        cells.extend_from_slice(&rng.gen_range(-40.0f32..40.0).to_ne_bytes());
        cells.extend_from_slice(&rng.gen_range(-40.0f32..40.0).to_ne_bytes());
        cells.extend_from_slice(&[0; 4]);
        pressure.extend_from_slice(&rng.gen_range(-30.0f32..30.0).to_ne_bytes());
        obstacle.push(u8::from(rng.gen_bool(0.05)));
    }
    (cells, pressure, obstacle)
}

fn bench_render_frame(c: &mut Criterion) {
    let grid = Grid::new(256, 256).unwrap();
    let (cells, pressure, obstacle) = random_frame(grid);
    let layout = SchemaLayout::standard(Schema::Rich);

    let mut renderer = FrameRenderer::new(grid, 3, Schema::Rich, ColorScale::default()).unwrap();
    let geometry = *renderer.geometry();
    let mut surface = PixelBuffer::new(geometry.surface_width(), geometry.surface_height(), Rgb::BLACK);

    let mut group = c.benchmark_group("render");
    group.throughput(Throughput::Elements(grid.cell_count() as u64));

    group.bench_function("rich_256x256_cs3", |b| {
        b.iter(|| {
            let buffers = EngineBuffers::rich(
                Region::whole(&cells),
                Region::whole(&pressure),
                Region::whole(&obstacle),
            );
            let views = FrameViews::bind(&buffers, grid, &layout).unwrap();
            black_box(renderer.render(&views, &mut surface).unwrap())
        });
    });

    group.finish();
}

fn bench_color_transfer(c: &mut Criterion) {
    let scale = ColorScale::default();
    c.bench_function("rich_color", |b| {
        b.iter(|| {
            rich_color(
                black_box(false),
                black_box(12.5),
                black_box(-3.0),
                black_box(4.2),
                &scale,
            )
        });
    });
}

criterion_group!(benches, bench_render_frame, bench_color_transfer);
criterion_main!(benches);
