//! Interaction Benchmarks
//!
//! Performance benchmarks for the per-event hot paths using Criterion.

use board3d_chess::board::{
    all_squares, position_to_square, square_to_position, Position3D, Square,
};
use board3d_chess::game::resources::GameStore;
use board3d_chess::input::DragController;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

fn bench_position_to_square(c: &mut Criterion) {
    let positions: Vec<Position3D> = all_squares().into_iter().map(square_to_position).collect();

    c.bench_function("position_to_square_all", |b| {
        b.iter(|| {
            for position in &positions {
                black_box(position_to_square(black_box(*position)));
            }
        })
    });
}

fn bench_select_square(c: &mut Criterion) {
    let store = GameStore::new();
    let e2: Square = "e2".parse().unwrap();

    c.bench_function("select_and_deselect_e2", |b| {
        b.iter(|| {
            store.select_square(e2);
            store.select_square(e2);
        })
    });
}

fn bench_drag_updates(c: &mut Criterion) {
    let g1: Square = "g1".parse().unwrap();
    let path: Vec<Position3D> = (0..60)
        .map(|i| Position3D::new(2.5 - i as f32 * 0.02, 0.0, -3.5 + i as f32 * 0.035))
        .collect();

    for (name, coalesce) in [("drag_60_updates_coalesced", true), ("drag_60_updates_eager", false)] {
        let mut drag = DragController::with_coalescing(Arc::new(GameStore::new()), coalesce);
        c.bench_function(name, |b| {
            b.iter(|| {
                drag.start_drag(g1, square_to_position(g1), Position3D::default());
                for position in &path {
                    drag.update_drag(*position);
                }
                drag.flush_frame();
                black_box(drag.is_valid_drop());
                drag.reset_drag();
            })
        });
    }
}

criterion_group!(
    benches,
    bench_position_to_square,
    bench_select_square,
    bench_drag_updates
);
criterion_main!(benches);
