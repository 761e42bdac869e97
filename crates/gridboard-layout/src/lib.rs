#![forbid(unsafe_code)]

//! Grid model, placement solver, and interaction controller.
//!
//! # Role in gridboard
//! `gridboard-layout` owns every layout decision. A [`GridModel`] holds the
//! committed placements; the [`solver`] finds free slots and cascades
//! displaced widgets out of the way; the [`InteractionController`] turns
//! pointer events into previews and commits; [`record`] defines the saved
//! shape and how it merges with a fresh catalog; [`bridge`] produces render
//! instructions for a host.
//!
//! Everything here is synchronous and side-effect free. Timers, storage, and
//! logging live in `gridboard-runtime`.
//!
//! # Invariant
//! After any committed operation no two placements overlap and every
//! placement satisfies the [`GridConfig`] bounds. The solver reports, rather
//! than hides, the rare outcomes that cannot satisfy this
//! ([`ShiftOutcome::is_degraded`]); those are never committed.

pub mod bridge;
pub mod config;
pub mod grid;
pub mod interaction;
pub mod record;
pub mod solver;

pub use bridge::{
    CatalogEntry, CellSpan, RenderInstruction, StaticCatalog, WidgetCatalog, render_plan,
};
pub use config::{GridConfig, GridConfigError, GridMetrics};
pub use grid::{AddWidgetError, GridModel, LayoutIssue, LayoutReport, Placement, WidgetSeed};
pub use interaction::{
    CancelReason, InteractionController, InteractionEffect, InteractionMode, InteractionPhase,
    InteractionTransition, NoopReason, Preview, PreviewEntry, drag_candidate, resize_candidate,
};
pub use record::{
    LayoutRecord, RecordCodecError, decode_records, encode_records, reconcile, records,
};
pub use solver::{
    PositionMap, SearchMethod, ShiftOutcome, SlotSearch, first_free_slot, nearest_open_slot,
    settle_overlaps, shift_widgets,
};
