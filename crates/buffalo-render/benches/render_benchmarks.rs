//! Render benchmarks: scene composition and CPU rasterization.
//!
//! An interactive frame at 60 Hz has ~16.67ms. Scene building should be
//! negligible next to that; the CPU rasterizer is what headless runs pay per
//! frame.
//!
//! Run with: `cargo bench --bench render_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use buffalo_render::prelude::*;

// ---------------------------------------------------------------------------
// Benchmark 1: board_scene for the starting position
// ---------------------------------------------------------------------------

fn bench_board_scene(c: &mut Criterion) {
    let board = new_starting_board();

    c.bench_function("board_scene_starting_80px", |b| {
        b.iter(|| board_scene(black_box(&board), black_box(80)));
    });
}

// ---------------------------------------------------------------------------
// Benchmark 2: PixelSurface::present at several square sizes
// ---------------------------------------------------------------------------

fn bench_pixel_present(c: &mut Criterion) {
    let board = new_starting_board();
    let mut group = c.benchmark_group("pixel_present");

    for square_size in [20u32, 40, 80] {
        let config = RenderConfig {
            square_size,
            frame_limit: None,
        };
        let commands = board_scene(&board, square_size);
        let mut surface = PixelSurface::new(config.surface_size(&board));

        group.bench_with_input(
            BenchmarkId::from_parameter(square_size),
            &commands,
            |b, commands| {
                b.iter(|| surface.present(black_box(commands)));
            },
        );
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark 3: full headless frame (scene + raster)
// ---------------------------------------------------------------------------

fn bench_headless_frame(c: &mut Criterion) {
    let board = new_starting_board();
    let config = RenderConfig::default();
    let mut surface = PixelSurface::new(config.surface_size(&board));

    c.bench_function("headless_frame_80px", |b| {
        b.iter(|| render(black_box(&board), &mut surface, &config));
    });
}

// ---------------------------------------------------------------------------
// Criterion groups and main
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_board_scene,
    bench_pixel_present,
    bench_headless_frame
);
criterion_main!(benches);
