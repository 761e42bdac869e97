//! Benchmarks for the placement solver.
//!
//! Run with: cargo bench -p gridboard-layout

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use gridboard_core::{GridRect, PointerEvent, WidgetId};
use gridboard_layout::{
    GridConfig, GridMetrics, GridModel, InteractionController, LayoutRecord, Placement,
    PositionMap, WidgetSeed, first_free_slot, nearest_open_slot, reconcile, records,
    shift_widgets,
};
use std::hint::black_box;

/// A tightly packed dashboard of `n` widgets, four per row.
fn packed(n: usize) -> Vec<Placement> {
    let config = GridConfig::default();
    let bounds = config.bounds();
    (0..n)
        .map(|i| {
            let x = (i % 4) as u16 * 3;
            let y = (i / 4) as u16 * 2;
            WidgetSeed::new(format!("w{i}")).at(x, y).size(3, 2).resolve(&bounds)
        })
        .collect()
}

fn packed_model(n: usize) -> GridModel {
    let mut model = GridModel::new(GridConfig::default());
    model.set_widgets((0..n).map(|i| {
        let x = (i % 4) as u16 * 3;
        let y = (i / 4) as u16 * 2;
        WidgetSeed::new(format!("w{i}")).at(x, y).size(3, 2)
    }));
    model
}

fn bench_first_free_slot(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver/first_free_slot");
    let config = GridConfig::default();
    for n in [8, 32, 128] {
        let occupied: Vec<GridRect> = packed(n).iter().map(|p| p.rect).collect();
        group.bench_with_input(BenchmarkId::new("packed", n), &occupied, |b, occupied| {
            b.iter(|| black_box(first_free_slot(6, 2, occupied, &config)))
        });
    }
    group.finish();
}

fn bench_nearest_open_slot(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver/nearest_open_slot");
    let config = GridConfig::default();
    for n in [8, 32, 128] {
        let positions = PositionMap::from_placements(&packed(n));
        let probe = WidgetId::new("probe");
        group.bench_with_input(BenchmarkId::new("packed", n), &positions, |b, positions| {
            b.iter(|| {
                black_box(nearest_open_slot(
                    &probe,
                    GridRect::new(0, 0, 6, 2),
                    positions,
                    &config,
                ))
            })
        });
    }
    group.finish();
}

fn bench_shift_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver/shift_widgets");
    let config = GridConfig::default();
    for n in [8, 32, 128] {
        let placements = packed(n);
        let moved = WidgetId::new("w0");
        // A full-width drop onto the top row displaces four widgets, which
        // cascade down the packed columns.
        let candidate = GridRect::new(0, 0, 12, 2);
        group.bench_with_input(BenchmarkId::new("top_row", n), &placements, |b, placements| {
            b.iter(|| black_box(shift_widgets(placements, &moved, candidate, &config)))
        });
    }
    group.finish();
}

fn bench_drag_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("interaction/drag");
    let metrics = GridMetrics::default();
    let col = metrics.col_pitch_px(100.0);
    for n in [8, 32] {
        group.bench_function(BenchmarkId::new("sweep", n), |b| {
            b.iter_batched(
                || {
                    let mut controller = InteractionController::new(metrics, 100.0);
                    controller.set_edit_mode(true);
                    (packed_model(n), controller)
                },
                |(mut model, mut controller)| {
                    controller.handle(&mut model, &PointerEvent::down("w0", 0.0, 0.0));
                    for step in 1..=9 {
                        let x = f64::from(step) * col;
                        controller.handle(&mut model, &PointerEvent::moved("w0", x, 0.0));
                    }
                    controller.handle(&mut model, &PointerEvent::up("w0", 9.0 * col, 0.0));
                    black_box(model)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("record/reconcile");
    for n in [8, 64] {
        let catalog = packed(n);
        let saved: Vec<LayoutRecord> = records(&catalog)
            .into_iter()
            .rev()
            .map(|mut r| {
                r.y += 1;
                r
            })
            .collect();
        group.bench_with_input(BenchmarkId::new("reversed", n), &saved, |b, saved| {
            b.iter(|| black_box(reconcile(&catalog, saved)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_first_free_slot,
    bench_nearest_open_slot,
    bench_shift_cascade,
    bench_drag_gesture,
    bench_reconcile,
);
criterion_main!(benches);
