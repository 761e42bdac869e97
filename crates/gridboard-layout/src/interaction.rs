//! Drag and resize interaction controller.
//!
//! ```text
//! Idle -> Dragging -> Idle
//! Idle -> Resizing(handle) -> Idle
//! ```
//!
//! The controller consumes [`PointerEvent`]s and never mutates the
//! [`GridModel`] until pointer-up. While a gesture is active it keeps the
//! latest [`ShiftOutcome`] and exposes a [`Preview`]: pixel offsets that let
//! every displaced widget glide toward its prospective cell.
//!
//! # Commit and cancel
//!
//! - Pointer-up commits the last outcome that satisfies the no-overlap
//!   invariant. Degraded previews are shown but never committed; if a gesture
//!   produced no clean outcome at all, pointer-up reverts.
//! - [`InteractionController::cancel`] (lost pointer capture, ended input
//!   stream, leaving edit mode) reverts: the model keeps its pre-gesture
//!   rectangles and the preview is dropped.
//!
//! Every step returns an [`InteractionTransition`] with a monotonically
//! increasing id. Malformed input (unknown widgets, stray moves, events for
//! a different widget) produces a `Noop` effect rather than an error.

use gridboard_core::{
    EventOrigin, GridBounds, GridRect, PointerEvent, PointerKind, ResizeHandle, WidgetId,
    pixel_delta_to_cell_delta,
};
use serde::{Deserialize, Serialize};

use crate::config::GridMetrics;
use crate::grid::GridModel;
use crate::solver::{ShiftOutcome, shift_widgets};

// ============================================================================
// Public state and effects
// ============================================================================

/// What an active gesture does to its widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "handle", rename_all = "snake_case")]
pub enum InteractionMode {
    Drag,
    Resize(ResizeHandle),
}

/// Observable controller state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InteractionPhase {
    Idle,
    Dragging {
        widget: WidgetId,
    },
    Resizing {
        widget: WidgetId,
        handle: ResizeHandle,
    },
}

/// Why an event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopReason {
    EditModeOff,
    UnknownWidget,
    NestedControl,
    InteractionInProgress,
    NoActiveInteraction,
    TargetMismatch,
}

/// Why an active gesture ended without committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// The host aborted the gesture (pointer capture lost, stream ended).
    Programmatic,
    /// Edit mode was switched off mid-gesture.
    EditModeDisabled,
    /// The widget under the pointer disappeared from the model.
    WidgetRemoved,
    /// A pointer-down on another widget arrived mid-gesture.
    Superseded,
    /// Every candidate produced overlaps the solver could not resolve.
    Unresolvable,
}

/// Effect of one controller step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum InteractionEffect {
    Started {
        widget: WidgetId,
        mode: InteractionMode,
        original: GridRect,
    },
    Previewed {
        widget: WidgetId,
        candidate: GridRect,
        /// True when the preview still contains overlaps.
        degraded: bool,
        unresolved: Vec<WidgetId>,
    },
    Committed {
        widget: WidgetId,
        /// Ids whose committed rectangle changed, in model order.
        changed: Vec<WidgetId>,
    },
    Canceled {
        widget: WidgetId,
        reason: CancelReason,
    },
    Noop {
        reason: NoopReason,
    },
}

/// One controller step with deterministic bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionTransition {
    pub transition_id: u64,
    pub from: InteractionPhase,
    pub to: InteractionPhase,
    pub effect: InteractionEffect,
}

impl InteractionTransition {
    /// Whether this step changed the committed layout.
    #[must_use]
    pub fn is_commit(&self) -> bool {
        matches!(&self.effect, InteractionEffect::Committed { changed, .. } if !changed.is_empty())
    }
}

// ============================================================================
// Preview
// ============================================================================

/// Visual state of one widget during a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewEntry {
    /// Prospective cell rectangle.
    pub rect: GridRect,
    /// Translation from the committed position, in pixels.
    pub offset_x_px: f64,
    pub offset_y_px: f64,
}

/// Id-to-offset mapping for every widget that looks different mid-gesture.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Preview {
    entries: Vec<(WidgetId, PreviewEntry)>,
}

impl Preview {
    #[must_use]
    pub fn entry(&self, id: &WidgetId) -> Option<&PreviewEntry> {
        self.entries
            .iter()
            .find_map(|(entry_id, entry)| (entry_id == id).then_some(entry))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&WidgetId, &PreviewEntry)> {
        self.entries.iter().map(|(id, entry)| (id, entry))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Candidate geometry
// ============================================================================

/// Drag candidate: `original` shifted by a cell delta, kept inside
/// `[0, cols - w] x [0, inf)`.
#[must_use]
pub fn drag_candidate(
    original: GridRect,
    d_cols: i32,
    d_rows: i32,
    bounds: &GridBounds,
) -> GridRect {
    bounds.clamp_rect(bounds.clamp_rect(original).offset(d_cols, d_rows))
}

/// Resize candidate for one handle.
///
/// Right and bottom edges grow with the delta; left and top edges move with
/// it while the opposite edge stays anchored. Each dimension is clamped to
/// its size bounds and to the grid's column bound, so a corner handle
/// changes two edges at once and never pushes the widget off the grid.
#[must_use]
pub fn resize_candidate(
    original: GridRect,
    handle: ResizeHandle,
    d_cols: i32,
    d_rows: i32,
    bounds: &GridBounds,
) -> GridRect {
    let original = bounds.clamp_rect(original);
    let mut rect = original;

    match handle.horizontal_edge() {
        Some(true) => {
            let room = u32::from(bounds.cols()) - u32::from(original.x);
            let max = clamp_u16(room).min(bounds.max_w());
            rect.w = grow(original.w, d_cols, bounds.min_w(), max);
        }
        Some(false) => {
            let right = original.right();
            let max = clamp_u16(right).min(bounds.max_w());
            rect.w = grow(original.w, -i64::from(d_cols), bounds.min_w(), max);
            rect.x = clamp_u16(right.saturating_sub(u32::from(rect.w)));
        }
        None => {}
    }

    match handle.vertical_edge() {
        Some(true) => {
            rect.h = grow(original.h, d_rows, bounds.min_h(), bounds.max_h());
        }
        Some(false) => {
            let bottom = original.bottom();
            let max = clamp_u16(bottom).min(bounds.max_h());
            rect.h = grow(original.h, -i64::from(d_rows), bounds.min_h(), max);
            rect.y = clamp_u16(bottom.saturating_sub(u32::from(rect.h)));
        }
        None => {}
    }

    bounds.clamp_rect(rect)
}

fn grow(size: u16, delta: impl Into<i64>, min: u16, max: u16) -> u16 {
    let max = max.max(min);
    (i64::from(size) + delta.into()).clamp(i64::from(min), i64::from(max)) as u16
}

fn clamp_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

// ============================================================================
// Controller
// ============================================================================

#[derive(Debug, Clone)]
struct ActiveInteraction {
    widget: WidgetId,
    mode: InteractionMode,
    pointer_origin: (f64, f64),
    original: GridRect,
    candidate: GridRect,
    latest: Option<ShiftOutcome>,
    last_clean: Option<ShiftOutcome>,
}

impl ActiveInteraction {
    fn phase(&self) -> InteractionPhase {
        match self.mode {
            InteractionMode::Drag => InteractionPhase::Dragging {
                widget: self.widget.clone(),
            },
            InteractionMode::Resize(handle) => InteractionPhase::Resizing {
                widget: self.widget.clone(),
                handle,
            },
        }
    }
}

/// Pointer-driven drag/resize state machine for one grid.
#[derive(Debug, Clone)]
pub struct InteractionController {
    metrics: GridMetrics,
    col_width_px: f64,
    edit_mode: bool,
    active: Option<ActiveInteraction>,
    preview: Option<Preview>,
    transition_counter: u64,
}

impl InteractionController {
    /// Controller for a grid whose columns are `col_width_px` wide.
    #[must_use]
    pub fn new(metrics: GridMetrics, col_width_px: f64) -> Self {
        Self {
            metrics,
            col_width_px,
            edit_mode: false,
            active: None,
            preview: None,
            transition_counter: 0,
        }
    }

    #[must_use]
    pub const fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Toggle layout edit mode. Leaving edit mode cancels an active gesture.
    pub fn set_edit_mode(&mut self, enabled: bool) -> Option<InteractionTransition> {
        self.edit_mode = enabled;
        if enabled {
            None
        } else {
            self.cancel(CancelReason::EditModeDisabled)
        }
    }

    /// Update the column width after the container was resized.
    pub fn set_col_width_px(&mut self, col_width_px: f64) {
        self.col_width_px = col_width_px;
    }

    #[must_use]
    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn phase(&self) -> InteractionPhase {
        self.active
            .as_ref()
            .map_or(InteractionPhase::Idle, ActiveInteraction::phase)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Widget under the active gesture.
    #[must_use]
    pub fn active_widget(&self) -> Option<&WidgetId> {
        self.active.as_ref().map(|a| &a.widget)
    }

    /// Live preview, present only while a gesture is active.
    #[must_use]
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Latest solver outcome of the active gesture.
    #[must_use]
    pub fn latest_outcome(&self) -> Option<&ShiftOutcome> {
        self.active.as_ref().and_then(|a| a.latest.as_ref())
    }

    /// Abort the active gesture and revert. `None` when idle.
    pub fn cancel(&mut self, reason: CancelReason) -> Option<InteractionTransition> {
        let active = self.active.take()?;
        self.preview = None;
        let from = active.phase();
        Some(self.transition(
            from,
            InteractionEffect::Canceled {
                widget: active.widget,
                reason,
            },
        ))
    }

    /// Feed one pointer event.
    pub fn handle(&mut self, model: &mut GridModel, event: &PointerEvent) -> InteractionTransition {
        let from = self.phase();
        let effect = match event.kind {
            PointerKind::Down => self.on_down(model, event),
            PointerKind::Move => self.on_move(model, event),
            PointerKind::Up => self.on_up(model, event),
        };
        self.transition(from, effect)
    }

    fn on_down(&mut self, model: &GridModel, event: &PointerEvent) -> InteractionEffect {
        if !self.edit_mode {
            return noop(NoopReason::EditModeOff);
        }
        if let Some(active) = &self.active {
            if active.widget == event.widget {
                return noop(NoopReason::InteractionInProgress);
            }
            return self.abort(CancelReason::Superseded);
        }
        let mode = match event.origin {
            EventOrigin::Body => InteractionMode::Drag,
            EventOrigin::ResizeHandle(handle) => InteractionMode::Resize(handle),
            EventOrigin::ViewToggle => return noop(NoopReason::NestedControl),
        };
        let Some(placement) = model.get(&event.widget) else {
            return noop(NoopReason::UnknownWidget);
        };

        let original = placement.rect;
        self.active = Some(ActiveInteraction {
            widget: event.widget.clone(),
            mode,
            pointer_origin: event.position(),
            original,
            candidate: original,
            latest: None,
            last_clean: None,
        });
        self.preview = Some(Preview::default());
        InteractionEffect::Started {
            widget: event.widget.clone(),
            mode,
            original,
        }
    }

    fn on_move(&mut self, model: &GridModel, event: &PointerEvent) -> InteractionEffect {
        let Some(active) = self.active.as_ref() else {
            return noop(NoopReason::NoActiveInteraction);
        };
        if active.widget != event.widget {
            return noop(NoopReason::TargetMismatch);
        }
        if !model.contains(&event.widget) {
            return self.abort(CancelReason::WidgetRemoved);
        }
        self.update_candidate(model, event)
    }

    fn on_up(&mut self, model: &mut GridModel, event: &PointerEvent) -> InteractionEffect {
        let Some(active) = self.active.as_ref() else {
            return noop(NoopReason::NoActiveInteraction);
        };
        if active.widget != event.widget {
            return noop(NoopReason::TargetMismatch);
        }
        if !model.contains(&event.widget) {
            return self.abort(CancelReason::WidgetRemoved);
        }
        self.update_candidate(model, event);

        let Some(active) = self.active.take() else {
            return noop(NoopReason::NoActiveInteraction);
        };
        self.preview = None;
        match active.last_clean {
            Some(outcome) => InteractionEffect::Committed {
                widget: active.widget,
                changed: model.apply_positions(&outcome.positions),
            },
            None if active.latest.is_none() => InteractionEffect::Committed {
                widget: active.widget,
                changed: Vec::new(),
            },
            None => InteractionEffect::Canceled {
                widget: active.widget,
                reason: CancelReason::Unresolvable,
            },
        }
    }

    fn abort(&mut self, reason: CancelReason) -> InteractionEffect {
        self.preview = None;
        match self.active.take() {
            Some(active) => InteractionEffect::Canceled {
                widget: active.widget,
                reason,
            },
            None => noop(NoopReason::NoActiveInteraction),
        }
    }

    fn update_candidate(&mut self, model: &GridModel, event: &PointerEvent) -> InteractionEffect {
        let col_pitch = self.metrics.col_pitch_px(self.col_width_px);
        let row_pitch = self.metrics.row_pitch_px();
        let bounds = model.bounds();
        let Some(active) = self.active.as_mut() else {
            return noop(NoopReason::NoActiveInteraction);
        };

        let dx = event.x - active.pointer_origin.0;
        let dy = event.y - active.pointer_origin.1;
        let (d_cols, d_rows) = pixel_delta_to_cell_delta(dx, dy, col_pitch, row_pitch);
        let candidate = match active.mode {
            InteractionMode::Drag => drag_candidate(active.original, d_cols, d_rows, &bounds),
            InteractionMode::Resize(handle) => {
                resize_candidate(active.original, handle, d_cols, d_rows, &bounds)
            }
        };

        // A gesture that never left its original cells has nothing to solve.
        if candidate != active.candidate {
            let outcome = shift_widgets(model.placements(), &active.widget, candidate, model.config());
            if !outcome.is_degraded() {
                active.last_clean = Some(outcome.clone());
            }
            active.latest = Some(outcome);
        }
        active.candidate = candidate;

        // The dragged widget follows the pointer inside its cell too.
        let sub_cell = match active.mode {
            InteractionMode::Drag => (
                finite_or_zero(dx - f64::from(d_cols) * col_pitch),
                finite_or_zero(dy - f64::from(d_rows) * row_pitch),
            ),
            InteractionMode::Resize(_) => (0.0, 0.0),
        };

        let mut entries = Vec::new();
        if let Some(outcome) = &active.latest {
            for placement in model.placements() {
                let Some(rect) = outcome.positions.get(&placement.id) else {
                    continue;
                };
                let is_target = placement.id == active.widget;
                if rect == placement.rect && !is_target {
                    continue;
                }
                let (extra_x, extra_y) = if is_target { sub_cell } else { (0.0, 0.0) };
                entries.push((
                    placement.id.clone(),
                    PreviewEntry {
                        rect,
                        offset_x_px: cell_offset(placement.rect.x, rect.x, col_pitch) + extra_x,
                        offset_y_px: cell_offset(placement.rect.y, rect.y, row_pitch) + extra_y,
                    },
                ));
            }
        }
        self.preview = Some(Preview { entries });

        match &active.latest {
            Some(outcome) => InteractionEffect::Previewed {
                widget: active.widget.clone(),
                candidate,
                degraded: outcome.is_degraded(),
                unresolved: outcome.unresolved.clone(),
            },
            None => InteractionEffect::Previewed {
                widget: active.widget.clone(),
                candidate,
                degraded: false,
                unresolved: Vec::new(),
            },
        }
    }

    fn transition(&mut self, from: InteractionPhase, effect: InteractionEffect) -> InteractionTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        InteractionTransition {
            transition_id: self.transition_counter,
            from,
            to: self.phase(),
            effect,
        }
    }
}

fn noop(reason: NoopReason) -> InteractionEffect {
    InteractionEffect::Noop { reason }
}

fn cell_offset(from: u16, to: u16, pitch: f64) -> f64 {
    finite_or_zero((f64::from(to) - f64::from(from)) * pitch)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
