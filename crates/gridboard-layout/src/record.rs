//! Persisted layout records and the reconciliation policy.
//!
//! The only persisted shape is an ordered JSON array of
//! `{id, type, x, y, w, h, view}` objects:
//!
//! ```json
//! [
//!   { "id": "revenue", "type": "revenue", "x": 0, "y": 0, "w": 6, "h": 2, "view": "chart" },
//!   { "id": "orders",  "type": "orders",  "x": 6, "y": 0, "w": 6, "h": 2, "view": "number" }
//! ]
//! ```
//!
//! Storage mechanics live in `gridboard-runtime`; this module only decides
//! what a saved layout means when it meets a fresh widget catalog.

use std::fmt;

use gridboard_core::{GridRect, ViewMode, WidgetId, WidgetType};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::grid::Placement;

/// One saved widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRecord {
    pub id: WidgetId,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
    #[serde(default)]
    pub view: ViewMode,
}

impl LayoutRecord {
    #[must_use]
    pub const fn rect(&self) -> GridRect {
        GridRect::new(self.x, self.y, self.w, self.h)
    }
}

impl From<&Placement> for LayoutRecord {
    fn from(placement: &Placement) -> Self {
        Self {
            id: placement.id.clone(),
            widget_type: placement.widget_type.clone(),
            x: placement.rect.x,
            y: placement.rect.y,
            w: placement.rect.w,
            h: placement.rect.h,
            view: placement.view,
        }
    }
}

impl From<&LayoutRecord> for Placement {
    fn from(record: &LayoutRecord) -> Self {
        Self {
            id: record.id.clone(),
            widget_type: record.widget_type.clone(),
            rect: record.rect(),
            view: record.view,
        }
    }
}

/// Snapshot `placements` as records, keeping order.
#[must_use]
pub fn records(placements: &[Placement]) -> Vec<LayoutRecord> {
    placements.iter().map(LayoutRecord::from).collect()
}

/// Serialize records to the persisted JSON array.
pub fn encode_records(records: &[LayoutRecord]) -> Result<String, RecordCodecError> {
    serde_json::to_string(records).map_err(|err| RecordCodecError::Encode(err.to_string()))
}

/// Parse the persisted JSON array.
///
/// Callers loading saved layouts should treat any error as "nothing saved".
pub fn decode_records(payload: &str) -> Result<Vec<LayoutRecord>, RecordCodecError> {
    serde_json::from_str(payload).map_err(|err| RecordCodecError::Decode(err.to_string()))
}

/// Failures converting records to and from their persisted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordCodecError {
    Encode(String),
    Decode(String),
}

impl fmt::Display for RecordCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode(msg) => write!(f, "failed to encode layout records: {msg}"),
            Self::Decode(msg) => write!(f, "malformed saved layout: {msg}"),
        }
    }
}

impl std::error::Error for RecordCodecError {}

/// Merge a saved layout into a catalog-derived widget list.
///
/// - A catalog widget whose id appears in `saved` with the same type takes
///   the saved `x, y, w, h, view`.
/// - A saved entry whose type differs from the catalog widget is ignored and
///   the catalog default is kept.
/// - Saved entries whose id is not in the catalog list are appended in saved
///   order, so widgets the catalog temporarily omits survive.
/// - Repeated saved ids: the first one wins.
///
/// Reconciling a list against its own records is a fixed point, so the merge
/// is idempotent.
#[must_use]
pub fn reconcile(catalog: &[Placement], saved: &[LayoutRecord]) -> Vec<Placement> {
    let mut by_id: FxHashMap<&WidgetId, &LayoutRecord> = FxHashMap::default();
    for record in saved {
        by_id.entry(&record.id).or_insert(record);
    }

    let mut merged: Vec<Placement> = catalog
        .iter()
        .map(|widget| match by_id.get(&widget.id) {
            Some(record) if record.widget_type == widget.widget_type => Placement {
                rect: record.rect(),
                view: record.view,
                ..widget.clone()
            },
            _ => widget.clone(),
        })
        .collect();

    let mut present: FxHashSet<&WidgetId> = catalog.iter().map(|w| &w.id).collect();
    for record in saved {
        if present.insert(&record.id) {
            merged.push(Placement::from(record));
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(id: &str, ty: &str, x: u16, y: u16) -> Placement {
        Placement {
            id: WidgetId::new(id),
            widget_type: WidgetType::new(ty),
            rect: GridRect::new(x, y, 4, 2),
            view: ViewMode::Number,
        }
    }

    fn record(id: &str, ty: &str, x: u16, y: u16, view: ViewMode) -> LayoutRecord {
        LayoutRecord {
            id: WidgetId::new(id),
            widget_type: WidgetType::new(ty),
            x,
            y,
            w: 6,
            h: 3,
            view,
        }
    }

    #[test]
    fn saved_positions_override_matching_catalog_entries() {
        let catalog = [widget("a", "a", 0, 0), widget("b", "b", 4, 0)];
        let saved = [record("b", "b", 0, 5, ViewMode::Chart)];
        let merged = reconcile(&catalog, &saved);
        assert_eq!(merged[0], catalog[0]);
        assert_eq!(merged[1].rect, GridRect::new(0, 5, 6, 3));
        assert_eq!(merged[1].view, ViewMode::Chart);
    }

    #[test]
    fn type_mismatch_keeps_catalog_default() {
        let catalog = [widget("a", "sales", 0, 0)];
        let saved = [record("a", "orders", 3, 3, ViewMode::Chart)];
        assert_eq!(reconcile(&catalog, &saved), catalog.to_vec());
    }

    #[test]
    fn unknown_saved_widgets_are_appended_once() {
        let catalog = [widget("a", "a", 0, 0)];
        let saved = [
            record("z", "z", 0, 4, ViewMode::Number),
            record("y", "y", 6, 4, ViewMode::Chart),
            record("z", "z", 9, 9, ViewMode::Chart),
        ];
        let merged = reconcile(&catalog, &saved);
        let ids: Vec<&str> = merged.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "z", "y"]);
        assert_eq!(merged[1].rect, GridRect::new(0, 4, 6, 3));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let catalog = [widget("a", "a", 0, 0), widget("b", "b", 4, 0), widget("c", "c", 8, 0)];
        let saved = [
            record("b", "b", 0, 2, ViewMode::Chart),
            record("c", "wrong", 0, 8, ViewMode::Chart),
            record("x", "x", 6, 2, ViewMode::Number),
        ];
        let once = reconcile(&catalog, &saved);
        let twice = reconcile(&catalog, &records(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_saved_layout_is_catalog() {
        let catalog = [widget("a", "a", 0, 0)];
        assert_eq!(reconcile(&catalog, &[]), catalog.to_vec());
    }

    #[test]
    fn codec_round_trip_and_malformed_input() {
        let recs = vec![record("a", "a", 1, 2, ViewMode::Chart)];
        let json = encode_records(&recs).unwrap();
        assert_eq!(
            json,
            r#"[{"id":"a","type":"a","x":1,"y":2,"w":6,"h":3,"view":"chart"}]"#
        );
        assert_eq!(decode_records(&json).unwrap(), recs);

        assert!(decode_records("{not json").is_err());
        assert!(decode_records(r#"{"id":"a"}"#).is_err());
        assert!(decode_records(r#"[{"id":"a","type":"a","x":-1,"y":0,"w":1,"h":1}]"#).is_err());
    }

    #[test]
    fn missing_view_defaults_to_number() {
        let recs = decode_records(r#"[{"id":"a","type":"a","x":0,"y":0,"w":2,"h":2}]"#).unwrap();
        assert_eq!(recs[0].view, ViewMode::Number);
    }
}
