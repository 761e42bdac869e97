#![no_main]

use gridboard_core::GridRect;
use gridboard_layout::{GridConfig, GridModel, WidgetSeed, shift_widgets};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Bytes 0..3 shape the grid, the last 5 bytes pick the moved widget and
    // its candidate, and every byte pair in between sizes one widget.
    if data.len() < 8 {
        return;
    }
    let cols = u16::from(data[0] % 16).max(2);
    let config = GridConfig {
        cols,
        min_w: 1,
        max_w: cols,
        min_h: 1,
        max_h: 6,
        max_scan_rows: 48,
        search_radius: u16::from(data[1] % 8),
        max_cascade_iterations: u32::from(data[2]).max(1),
    };
    let body = &data[3..data.len() - 5];
    let tail = &data[data.len() - 5..];

    let mut model = GridModel::new(config);
    model.set_widgets(body.chunks_exact(2).take(24).enumerate().map(|(i, pair)| {
        WidgetSeed::new(format!("w{i}"))
            .size(u16::from(pair[0] % 8) + 1, u16::from(pair[1] % 4) + 1)
    }));
    if model.is_empty() {
        return;
    }
    assert!(model.validate().is_valid(), "seeded layout invalid");

    let placements = model.placements().to_vec();
    let moved = &placements[usize::from(tail[0]) % placements.len()];
    let bounds = config.bounds();
    let candidate = bounds.clamp_rect(GridRect::new(
        u16::from(tail[1] % 20),
        u16::from(tail[2] % 20),
        u16::from(tail[3] % 10),
        u16::from(tail[4] % 8),
    ));

    let outcome = shift_widgets(&placements, &moved.id, candidate, &config);

    // Post-conditions that must always hold:
    assert_eq!(outcome.positions.len(), placements.len(), "widget lost");
    assert_eq!(
        outcome.positions.get(&moved.id),
        Some(candidate),
        "moved widget relocated"
    );
    assert_eq!(outcome.unresolved, outcome.positions.overlapping_ids());
    assert!(outcome.iterations <= config.max_cascade_iterations);
    for placement in &placements {
        let rect = outcome
            .positions
            .get(&placement.id)
            .expect("every placement has a position");
        assert!(bounds.contains(&rect), "{} out of bounds: {rect:?}", placement.id);
        if placement.id != moved.id {
            assert_eq!(
                (rect.w, rect.h),
                (placement.rect.w, placement.rect.h),
                "{} resized by the cascade",
                placement.id
            );
        }
    }

    // Committing a clean outcome keeps the model valid.
    if !outcome.is_degraded() {
        model.apply_positions(&outcome.positions);
        assert!(model.validate().is_valid(), "clean outcome left issues");
    }
});
