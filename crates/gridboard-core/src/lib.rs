#![forbid(unsafe_code)]

//! Core: grid geometry, widget identities, and pointer input.
//!
//! # Role in gridboard
//! `gridboard-core` holds the stateless vocabulary every other crate speaks:
//! cell rectangles and their overlap test, size bounds and clamping, size
//! classes, pixel-to-cell conversion, widget ids/types/view modes, and the
//! pointer event shape hosts feed into the interaction controller.
//!
//! # How it fits in the system
//! `gridboard-layout` builds the grid model, solver, and interaction machine
//! on these types. `gridboard-runtime` wires them to storage and timers.

pub mod event;
pub mod geometry;
pub mod widget;

pub use event::{EventOrigin, PointerEvent, PointerKind, ResizeHandle};
pub use geometry::{
    GridBounds, GridRect, SizeClass, overlaps, pixel_delta_to_cell_delta, size_class,
};
pub use widget::{ViewMode, WidgetId, WidgetType};
