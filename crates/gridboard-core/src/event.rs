#![forbid(unsafe_code)]

//! Pointer input as seen by the layout engine.
//!
//! Hosts translate whatever their UI toolkit delivers (DOM pointer events,
//! canvas hit tests, synthetic test streams) into [`PointerEvent`] values.
//! Coordinates are in pixels relative to any fixed origin; only deltas between
//! events of one gesture matter.

use serde::{Deserialize, Serialize};

use crate::widget::WidgetId;

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// One of the eight resize handles around a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeHandle {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [Self; 8] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Which vertical edge this handle moves: `Some(false)` for the left edge,
    /// `Some(true)` for the right edge, `None` if it leaves width alone.
    #[must_use]
    pub const fn horizontal_edge(self) -> Option<bool> {
        match self {
            Self::Left | Self::TopLeft | Self::BottomLeft => Some(false),
            Self::Right | Self::TopRight | Self::BottomRight => Some(true),
            Self::Top | Self::Bottom => None,
        }
    }

    /// Which horizontal edge this handle moves: `Some(false)` for the top
    /// edge, `Some(true)` for the bottom edge, `None` if it leaves height
    /// alone.
    #[must_use]
    pub const fn vertical_edge(self) -> Option<bool> {
        match self {
            Self::Top | Self::TopLeft | Self::TopRight => Some(false),
            Self::Bottom | Self::BottomLeft | Self::BottomRight => Some(true),
            Self::Left | Self::Right => None,
        }
    }

    #[must_use]
    pub const fn is_corner(self) -> bool {
        self.horizontal_edge().is_some() && self.vertical_edge().is_some()
    }
}

/// The element inside a widget's frame that received the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "element", content = "handle", rename_all = "snake_case")]
pub enum EventOrigin {
    /// The widget body. Starts a drag.
    #[default]
    Body,
    /// The number/chart toggle. Never starts a drag.
    ViewToggle,
    /// A resize handle. Starts a resize.
    ResizeHandle(ResizeHandle),
}

impl EventOrigin {
    /// Whether the event landed on a nested control rather than the body.
    #[must_use]
    pub const fn is_nested_control(self) -> bool {
        !matches!(self, Self::Body)
    }
}

/// A pointer sample targeting one widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Horizontal position in pixels.
    pub x: f64,
    /// Vertical position in pixels.
    pub y: f64,
    #[serde(default)]
    pub origin: EventOrigin,
    pub widget: WidgetId,
}

impl PointerEvent {
    #[must_use]
    pub fn new(kind: PointerKind, widget: impl Into<WidgetId>, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            origin: EventOrigin::Body,
            widget: widget.into(),
        }
    }

    #[must_use]
    pub fn down(widget: impl Into<WidgetId>, x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, widget, x, y)
    }

    #[must_use]
    pub fn moved(widget: impl Into<WidgetId>, x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, widget, x, y)
    }

    #[must_use]
    pub fn up(widget: impl Into<WidgetId>, x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, widget, x, y)
    }

    /// Set the originating element.
    #[must_use]
    pub fn with_origin(mut self, origin: EventOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Shorthand for `with_origin(EventOrigin::ResizeHandle(handle))`.
    #[must_use]
    pub fn on_handle(self, handle: ResizeHandle) -> Self {
        self.with_origin(EventOrigin::ResizeHandle(handle))
    }

    #[must_use]
    pub const fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_move_two_edges() {
        for handle in ResizeHandle::ALL {
            let edges = usize::from(handle.horizontal_edge().is_some())
                + usize::from(handle.vertical_edge().is_some());
            assert_eq!(edges, if handle.is_corner() { 2 } else { 1 }, "{handle:?}");
        }
        assert_eq!(ResizeHandle::TopLeft.horizontal_edge(), Some(false));
        assert_eq!(ResizeHandle::TopLeft.vertical_edge(), Some(false));
        assert_eq!(ResizeHandle::BottomRight.vertical_edge(), Some(true));
    }

    #[test]
    fn nested_controls() {
        assert!(!EventOrigin::Body.is_nested_control());
        assert!(EventOrigin::ViewToggle.is_nested_control());
        assert!(EventOrigin::ResizeHandle(ResizeHandle::Left).is_nested_control());
    }

    #[test]
    fn event_json_shape() {
        let event = PointerEvent::down("sales", 10.0, 20.0).on_handle(ResizeHandle::BottomRight);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "down");
        assert_eq!(json["origin"]["element"], "resize_handle");
        assert_eq!(json["origin"]["handle"], "bottom_right");
        let back: PointerEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
