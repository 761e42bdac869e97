#![no_main]

use gridboard_layout::{
    GridConfig, GridModel, LayoutIssue, WidgetSeed, decode_records, encode_records, reconcile,
    records,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Cap length to keep fuzzing fast.
    if text.len() > 4096 {
        return;
    }

    // Malformed saved data must be an error, never a panic.
    let Ok(saved) = decode_records(text) else {
        return;
    };

    let encoded = encode_records(&saved).expect("decoded records re-encode");
    assert_eq!(decode_records(&encoded).expect("re-decode"), saved);

    let mut model = GridModel::new(GridConfig {
        max_scan_rows: 64,
        ..GridConfig::default()
    });
    model.set_widgets([
        WidgetSeed::new("revenue").size(4, 2),
        WidgetSeed::new("orders").size(4, 2),
        WidgetSeed::new("churn").size(6, 3),
    ]);
    model.apply_saved(&saved);

    // Post-conditions that must always hold:
    for issue in model.validate().issues {
        assert!(
            matches!(issue, LayoutIssue::Overlap { .. }),
            "saved data produced {issue:?}"
        );
    }
    let snapshot = records(model.placements());
    assert_eq!(
        reconcile(model.defaults(), &snapshot),
        model.placements(),
        "reconcile is not idempotent"
    );
});
