#![no_main]

use arbitrary::Arbitrary;
use gridboard_core::{PointerEvent, ResizeHandle};
use gridboard_layout::{GridConfig, GridMetrics, GridModel, InteractionController, WidgetSeed};
use libfuzzer_sys::fuzz_target;

const WIDGETS: usize = 6;

#[derive(Debug, Arbitrary)]
struct Stream {
    sizes: [(u8, u8); WIDGETS],
    steps: Vec<Step>,
}

#[derive(Debug, Arbitrary)]
enum Step {
    Down { widget: u8 },
    Grab { widget: u8, handle: u8 },
    Move { widget: u8, dx: i8, dy: i8 },
    Up { widget: u8, dx: i8, dy: i8 },
    EditMode(bool),
}

/// Index `WIDGETS` names a widget the model does not know.
fn widget_name(index: u8) -> String {
    format!("w{}", usize::from(index) % (WIDGETS + 1))
}

fn pixels(delta: i8) -> f64 {
    f64::from(delta) * 12.0
}

fuzz_target!(|stream: Stream| {
    if stream.steps.len() > 256 {
        return;
    }

    let config = GridConfig {
        max_scan_rows: 32,
        search_radius: 6,
        max_cascade_iterations: 256,
        ..GridConfig::default()
    };
    let mut model = GridModel::new(config);
    model.set_widgets(stream.sizes.iter().enumerate().map(|(i, &(w, h))| {
        WidgetSeed::new(format!("w{i}")).size(2 + u16::from(w) % 5, 1 + u16::from(h) % 3)
    }));
    assert!(model.validate().is_valid(), "seeded layout invalid");

    let mut controller = InteractionController::new(GridMetrics::default(), 85.0);
    controller.set_edit_mode(true);
    let mut last_id = 0u64;

    for step in &stream.steps {
        let event = match *step {
            Step::Down { widget } => PointerEvent::down(widget_name(widget), 0.0, 0.0),
            Step::Grab { widget, handle } => {
                let handle = ResizeHandle::ALL[usize::from(handle) % ResizeHandle::ALL.len()];
                PointerEvent::down(widget_name(widget), 0.0, 0.0).on_handle(handle)
            }
            Step::Move { widget, dx, dy } => {
                PointerEvent::moved(widget_name(widget), pixels(dx), pixels(dy))
            }
            Step::Up { widget, dx, dy } => {
                PointerEvent::up(widget_name(widget), pixels(dx), pixels(dy))
            }
            Step::EditMode(enabled) => {
                controller.set_edit_mode(enabled);
                continue;
            }
        };
        let transition = controller.handle(&mut model, &event);

        // Post-conditions that must always hold:
        assert!(transition.transition_id > last_id, "transition ids must increase");
        last_id = transition.transition_id;
        assert!(
            model.validate().is_valid(),
            "model invalid after {:?}",
            transition.effect
        );
        assert_eq!(model.len(), WIDGETS, "widget count changed");
        if !controller.is_active() {
            assert!(controller.preview().is_none(), "preview outlived gesture");
        }
    }
});
