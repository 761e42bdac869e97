//! The authoritative widget list for one dashboard.
//!
//! [`GridModel`] owns placements in insertion order with an id index on the
//! side. Only explicit calls mutate it: [`GridModel::set_widgets`],
//! [`GridModel::add_widget`], [`GridModel::remove_widget`],
//! [`GridModel::reset_to_defaults`], [`GridModel::apply_positions`] (the
//! interaction commit path) and [`GridModel::apply_saved`]
//! (reconciliation). Previews never touch it.

use std::fmt;

use gridboard_core::{GridBounds, GridRect, ViewMode, WidgetId, WidgetType};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::bridge::WidgetCatalog;
use crate::config::GridConfig;
use crate::record::{LayoutRecord, reconcile};
use crate::solver::{PositionMap, first_free_slot, nearest_open_slot, settle_overlaps};

/// A widget's rectangle plus identity and display mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub id: WidgetId,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    #[serde(flatten)]
    pub rect: GridRect,
    #[serde(default)]
    pub view: ViewMode,
}

/// One entry of a widget list handed to [`GridModel::set_widgets`].
///
/// Unset fields fall back to: id = type, `w`/`h` = the grid's minimum size,
/// view = [`ViewMode::Number`], a single missing coordinate = `0`. A seed
/// with neither `x` nor `y` is placed by the model at the first free slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSeed {
    #[serde(default)]
    pub id: Option<WidgetId>,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    #[serde(default)]
    pub x: Option<u16>,
    #[serde(default)]
    pub y: Option<u16>,
    #[serde(default)]
    pub w: Option<u16>,
    #[serde(default)]
    pub h: Option<u16>,
    #[serde(default)]
    pub view: Option<ViewMode>,
}

impl WidgetSeed {
    #[must_use]
    pub fn new(widget_type: impl Into<WidgetType>) -> Self {
        Self {
            id: None,
            widget_type: widget_type.into(),
            x: None,
            y: None,
            w: None,
            h: None,
            view: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<WidgetId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn at(mut self, x: u16, y: u16) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    #[must_use]
    pub fn size(mut self, w: u16, h: u16) -> Self {
        self.w = Some(w);
        self.h = Some(h);
        self
    }

    #[must_use]
    pub fn with_view(mut self, view: ViewMode) -> Self {
        self.view = Some(view);
        self
    }

    /// Resolve defaults and clamp into `bounds`.
    #[must_use]
    pub fn resolve(&self, bounds: &GridBounds) -> Placement {
        let rect = GridRect::new(
            self.x.unwrap_or(0),
            self.y.unwrap_or(0),
            self.w.unwrap_or(bounds.min_w()),
            self.h.unwrap_or(bounds.min_h()),
        );
        Placement {
            id: self
                .id
                .clone()
                .unwrap_or_else(|| WidgetId::from(&self.widget_type)),
            widget_type: self.widget_type.clone(),
            rect: bounds.clamp_rect(rect),
            view: self.view.unwrap_or_default(),
        }
    }
}

/// Why [`GridModel::add_widget`] refused a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddWidgetError {
    /// A placement of this type already exists.
    DuplicateType { widget_type: WidgetType },
    /// Another placement already uses the id the new widget would get.
    DuplicateId { id: WidgetId },
}

impl fmt::Display for AddWidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateType { widget_type } => {
                write!(f, "widget type {widget_type} is already on the dashboard")
            }
            Self::DuplicateId { id } => write!(f, "widget id {id} is already in use"),
        }
    }
}

impl std::error::Error for AddWidgetError {}

/// One invariant violation found by [`GridModel::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutIssue {
    Overlap { first: WidgetId, second: WidgetId },
    OutOfBounds { id: WidgetId, rect: GridRect },
    DuplicateId { id: WidgetId },
}

/// Structural validation report for a model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutReport {
    pub issues: Vec<LayoutIssue>,
}

impl LayoutReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// First free slot, or column 0 directly below the lowest rectangle when
/// the bounded scan finds nothing.
fn free_slot_or_below(w: u16, h: u16, occupied: &[GridRect], config: &GridConfig) -> (u16, u16) {
    first_free_slot(w, h, occupied, config).unwrap_or_else(|| {
        let below = occupied.iter().map(GridRect::bottom).max().unwrap_or(0);
        (0, u16::try_from(below).unwrap_or(u16::MAX))
    })
}

/// Placements of one dashboard plus the defaults snapshot used by reset.
#[derive(Debug, Clone, Default)]
pub struct GridModel {
    config: GridConfig,
    placements: Vec<Placement>,
    index: FxHashMap<WidgetId, usize>,
    defaults: Vec<Placement>,
}

impl GridModel {
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[must_use]
    pub fn bounds(&self) -> GridBounds {
        self.config.bounds()
    }

    /// Current placements in insertion order.
    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// The list recorded by the most recent [`GridModel::set_widgets`].
    #[must_use]
    pub fn defaults(&self) -> &[Placement] {
        &self.defaults
    }

    #[must_use]
    pub fn get(&self, id: &WidgetId) -> Option<&Placement> {
        self.index.get(id).map(|&slot| &self.placements[slot])
    }

    #[must_use]
    pub fn contains(&self, id: &WidgetId) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn contains_type(&self, widget_type: &WidgetType) -> bool {
        self.placements.iter().any(|p| &p.widget_type == widget_type)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Current rectangles as a solver position map.
    #[must_use]
    pub fn positions(&self) -> PositionMap {
        PositionMap::from_placements(&self.placements)
    }

    /// Replace every placement with `seeds` and record them as the defaults.
    ///
    /// Seeds are deduplicated by type (first occurrence wins) and by id.
    /// Rectangles are clamped into the grid bounds. A missing `x` or `y`
    /// defaults to `0` on its own; a seed with neither goes to the first free
    /// slot among the seeds before it. Overlapping seeds are then settled in
    /// list order, so earlier seeds keep their cells.
    ///
    /// Returns the ids moved by settling.
    pub fn set_widgets(&mut self, seeds: impl IntoIterator<Item = WidgetSeed>) -> Vec<WidgetId> {
        let bounds = self.bounds();
        let mut seen_types = FxHashSet::default();
        let mut seen_ids = FxHashSet::default();
        let mut placements: Vec<Placement> = Vec::new();
        for seed in seeds {
            let mut placement = seed.resolve(&bounds);
            if !seen_types.insert(placement.widget_type.clone()) {
                continue;
            }
            if !seen_ids.insert(placement.id.clone()) {
                continue;
            }
            if seed.x.is_none() && seed.y.is_none() {
                let occupied: Vec<GridRect> = placements.iter().map(|p| p.rect).collect();
                let rect = placement.rect;
                let (x, y) = free_slot_or_below(rect.w, rect.h, &occupied, &self.config);
                placement.rect = rect.at(x, y);
            }
            placements.push(placement);
        }
        let settled = settle_overlaps(&mut placements, &self.config);
        self.defaults = placements.clone();
        self.replace(placements);
        settled
    }

    /// [`GridModel::set_widgets`], with sizes the seeds leave out taken from
    /// `catalog`.
    pub fn set_widgets_from_catalog<C>(
        &mut self,
        seeds: impl IntoIterator<Item = WidgetSeed>,
        catalog: &C,
    ) -> Vec<WidgetId>
    where
        C: WidgetCatalog + ?Sized,
    {
        self.set_widgets(seeds.into_iter().map(|mut seed| {
            if let Some((w, h)) = catalog.default_size(&seed.widget_type) {
                seed.w.get_or_insert(w);
                seed.h.get_or_insert(h);
            }
            seed
        }))
    }

    /// Add a widget of `widget_type` at the first free slot.
    ///
    /// The size comes from `catalog`, clamped to the grid bounds; unknown
    /// types get the minimum size. When the bounded row scan finds nothing
    /// the widget goes directly below the lowest placement.
    pub fn add_widget<C>(
        &mut self,
        widget_type: impl Into<WidgetType>,
        catalog: &C,
    ) -> Result<WidgetId, AddWidgetError>
    where
        C: WidgetCatalog + ?Sized,
    {
        let widget_type = widget_type.into();
        if self.contains_type(&widget_type) {
            return Err(AddWidgetError::DuplicateType { widget_type });
        }
        let id = WidgetId::from(&widget_type);
        if self.contains(&id) {
            return Err(AddWidgetError::DuplicateId { id });
        }

        let bounds = self.bounds();
        let (w, h) = catalog
            .default_size(&widget_type)
            .unwrap_or((bounds.min_w(), bounds.min_h()));
        let (w, h) = (bounds.clamp_w(w), bounds.clamp_h(h));

        let occupied: Vec<GridRect> = self.placements.iter().map(|p| p.rect).collect();
        let (x, y) = free_slot_or_below(w, h, &occupied, &self.config);

        self.push(Placement {
            id: id.clone(),
            widget_type,
            rect: GridRect::new(x, y, w, h),
            view: ViewMode::default(),
        });
        Ok(id)
    }

    /// Remove a placement. Removing an absent id is a no-op.
    pub fn remove_widget(&mut self, id: &WidgetId) -> Option<Placement> {
        let slot = self.index.get(id).copied()?;
        let removed = self.placements.remove(slot);
        self.reindex();
        Some(removed)
    }

    /// Restore every placement's rectangle and view from the defaults
    /// snapshot, matched by id and then by type.
    ///
    /// Each default is claimed at most once. Placements with no default
    /// (added after the last `set_widgets`) keep their rectangle unless it
    /// now overlaps a restored widget, in which case they move to the
    /// nearest open slot.
    pub fn reset_to_defaults(&mut self) {
        let mut claimed = vec![false; self.defaults.len()];
        let mut matches: Vec<Option<usize>> = self
            .placements
            .iter()
            .map(|placement| {
                let found = self
                    .defaults
                    .iter()
                    .enumerate()
                    .position(|(i, d)| !claimed[i] && d.id == placement.id);
                if let Some(i) = found {
                    claimed[i] = true;
                }
                found
            })
            .collect();
        for (slot, matched) in matches.iter_mut().enumerate() {
            if matched.is_some() {
                continue;
            }
            let widget_type = &self.placements[slot].widget_type;
            *matched = self
                .defaults
                .iter()
                .enumerate()
                .position(|(i, d)| !claimed[i] && &d.widget_type == widget_type);
            if let Some(i) = *matched {
                claimed[i] = true;
            }
        }

        let mut restored = PositionMap::new();
        let mut loose = Vec::new();
        for (slot, matched) in matches.into_iter().enumerate() {
            let Some(i) = matched else {
                loose.push(slot);
                continue;
            };
            let default = &self.defaults[i];
            let placement = &mut self.placements[slot];
            placement.rect = default.rect;
            placement.view = default.view;
            restored.set(placement.id.clone(), placement.rect);
        }
        for slot in loose {
            let placement = &mut self.placements[slot];
            if restored.collides(&placement.rect, Some(&placement.id)) {
                placement.rect =
                    nearest_open_slot(&placement.id, placement.rect, &restored, &self.config).rect;
            }
            restored.set(placement.id.clone(), placement.rect);
        }
    }

    /// Commit solver output. Unknown ids are ignored and rectangles are
    /// clamped. Returns the ids whose rectangle changed.
    pub fn apply_positions(&mut self, positions: &PositionMap) -> Vec<WidgetId> {
        let bounds = self.bounds();
        let mut changed = Vec::new();
        for placement in &mut self.placements {
            let Some(rect) = positions.get(&placement.id) else {
                continue;
            };
            let rect = bounds.clamp_rect(rect);
            if rect != placement.rect {
                placement.rect = rect;
                changed.push(placement.id.clone());
            }
        }
        changed
    }

    /// Merge a saved layout into the defaults snapshot and adopt the result.
    ///
    /// See [`reconcile`]. Saved rectangles are clamped, duplicate ids are
    /// dropped, and overlaps left by stale or hand-edited data are settled in
    /// list order. Returns the ids moved by settling.
    pub fn apply_saved(&mut self, saved: &[LayoutRecord]) -> Vec<WidgetId> {
        let mut placements = reconcile(&self.defaults, saved);
        let mut seen = FxHashSet::default();
        placements.retain(|p| seen.insert(p.id.clone()));
        let moved = settle_overlaps(&mut placements, &self.config);
        self.replace(placements);
        moved
    }

    /// Set a widget's view mode. Returns `false` for unknown ids.
    pub fn set_view(&mut self, id: &WidgetId, view: ViewMode) -> bool {
        match self.index.get(id) {
            Some(&slot) => {
                self.placements[slot].view = view;
                true
            }
            None => false,
        }
    }

    /// Flip a widget between number and chart view. Returns the new mode.
    pub fn toggle_view(&mut self, id: &WidgetId) -> Option<ViewMode> {
        let slot = *self.index.get(id)?;
        let placement = &mut self.placements[slot];
        placement.view = placement.view.toggled();
        Some(placement.view)
    }

    /// Check the no-overlap, bounds, and unique-id invariants.
    #[must_use]
    pub fn validate(&self) -> LayoutReport {
        let bounds = self.bounds();
        let mut issues = Vec::new();
        let mut seen = FxHashSet::default();
        for (i, placement) in self.placements.iter().enumerate() {
            if !seen.insert(&placement.id) {
                issues.push(LayoutIssue::DuplicateId {
                    id: placement.id.clone(),
                });
            }
            if !bounds.contains(&placement.rect) {
                issues.push(LayoutIssue::OutOfBounds {
                    id: placement.id.clone(),
                    rect: placement.rect,
                });
            }
            for other in &self.placements[i + 1..] {
                if placement.rect.overlaps(&other.rect) {
                    issues.push(LayoutIssue::Overlap {
                        first: placement.id.clone(),
                        second: other.id.clone(),
                    });
                }
            }
        }
        LayoutReport { issues }
    }

    fn push(&mut self, placement: Placement) {
        self.index
            .insert(placement.id.clone(), self.placements.len());
        self.placements.push(placement);
    }

    fn replace(&mut self, placements: Vec<Placement>) {
        self.placements = placements;
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (slot, placement) in self.placements.iter().enumerate() {
            self.index.insert(placement.id.clone(), slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{CatalogEntry, StaticCatalog};

    fn catalog() -> StaticCatalog {
        StaticCatalog::new()
            .with_entry("C", CatalogEntry::new("Customers", 6, 2))
            .with_entry("D", CatalogEntry::new("Deals", 6, 2))
            .with_entry("E", CatalogEntry::new("Expenses", 30, 0))
    }

    fn rects(model: &GridModel) -> Vec<(String, GridRect)> {
        model
            .placements()
            .iter()
            .map(|p| (p.id.to_string(), p.rect))
            .collect()
    }

    #[test]
    fn set_widgets_dedupes_and_defaults() {
        let mut model = GridModel::new(GridConfig::default());
        model.set_widgets([
            WidgetSeed::new("A").at(0, 0).size(4, 2),
            WidgetSeed::new("A").at(4, 0).size(4, 2),
            WidgetSeed::new("B"),
        ]);
        assert_eq!(model.len(), 2);
        let a = model.get(&WidgetId::new("A")).unwrap();
        assert_eq!(a.rect, GridRect::new(0, 0, 4, 2));
        let b = model.get(&WidgetId::new("B")).unwrap();
        assert_eq!(b.rect, GridRect::new(4, 0, 2, 1));
        assert_eq!(b.view, ViewMode::Number);
        assert_eq!(model.defaults(), model.placements());
    }

    #[test]
    fn set_widgets_from_catalog_fills_sizes() {
        let mut model = GridModel::new(GridConfig::default());
        model.set_widgets_from_catalog(
            [
                WidgetSeed::new("C"),
                WidgetSeed::new("D"),
                WidgetSeed::new("unknown").size(3, 3),
            ],
            &catalog(),
        );
        assert_eq!(
            rects(&model),
            vec![
                ("C".to_string(), GridRect::new(0, 0, 6, 2)),
                ("D".to_string(), GridRect::new(6, 0, 6, 2)),
                ("unknown".to_string(), GridRect::new(0, 2, 3, 3)),
            ]
        );
        assert!(model.validate().is_valid());
    }

    #[test]
    fn set_widgets_clamps_geometry() {
        let mut model = GridModel::new(GridConfig::default());
        model.set_widgets([WidgetSeed::new("wide").at(10, 3).size(20, 0)]);
        assert_eq!(model.placements()[0].rect, GridRect::new(0, 3, 12, 1));
    }

    #[test]
    fn add_widget_uses_first_free_slot() {
        let mut model = GridModel::new(GridConfig::default());
        let catalog = catalog();
        assert_eq!(model.add_widget("C", &catalog), Ok(WidgetId::new("C")));
        assert_eq!(model.add_widget("D", &catalog), Ok(WidgetId::new("D")));
        assert_eq!(
            rects(&model),
            vec![
                ("C".to_string(), GridRect::new(0, 0, 6, 2)),
                ("D".to_string(), GridRect::new(6, 0, 6, 2)),
            ]
        );
    }

    #[test]
    fn add_widget_clamps_catalog_size_and_handles_unknown_types() {
        let mut model = GridModel::new(GridConfig::default());
        let catalog = catalog();
        model.add_widget("E", &catalog).unwrap();
        assert_eq!(model.placements()[0].rect, GridRect::new(0, 0, 12, 1));
        model.add_widget("mystery", &catalog).unwrap();
        assert_eq!(model.placements()[1].rect, GridRect::new(0, 1, 2, 1));
    }

    #[test]
    fn duplicate_add_is_rejected_without_mutation() {
        let mut model = GridModel::new(GridConfig::default());
        let catalog = catalog();
        model.add_widget("C", &catalog).unwrap();
        let before = model.placements().to_vec();
        assert_eq!(
            model.add_widget("C", &catalog),
            Err(AddWidgetError::DuplicateType {
                widget_type: WidgetType::new("C")
            })
        );
        assert_eq!(model.placements(), before.as_slice());
    }

    #[test]
    fn duplicate_id_from_explicit_seed_is_rejected() {
        let mut model = GridModel::new(GridConfig::default());
        model.set_widgets([WidgetSeed::new("sales").with_id("C")]);
        assert_eq!(
            model.add_widget("C", &catalog()),
            Err(AddWidgetError::DuplicateId {
                id: WidgetId::new("C")
            })
        );
    }

    #[test]
    fn add_falls_below_when_scan_exhausted() {
        let config = GridConfig {
            max_scan_rows: 2,
            ..GridConfig::default()
        };
        let mut model = GridModel::new(config);
        model.set_widgets([WidgetSeed::new("wall").at(0, 0).size(12, 4)]);
        model.add_widget("C", &catalog()).unwrap();
        assert_eq!(
            model.get(&WidgetId::new("C")).unwrap().rect,
            GridRect::new(0, 4, 6, 2)
        );
        assert!(model.validate().is_valid());
    }

    #[test]
    fn add_then_remove_round_trips() {
        let mut model = GridModel::new(GridConfig::default());
        model.set_widgets([
            WidgetSeed::new("A").at(0, 0).size(4, 2),
            WidgetSeed::new("B").at(4, 0).size(4, 2),
        ]);
        let before = model.placements().to_vec();
        let id = model.add_widget("C", &catalog()).unwrap();
        assert!(model.remove_widget(&id).is_some());
        assert_eq!(model.placements(), before.as_slice());
        assert!(model.remove_widget(&id).is_none());
        assert_eq!(model.get(&WidgetId::new("B")).unwrap().rect.x, 4);
    }

    #[test]
    fn reset_restores_defaults_and_views() {
        let mut model = GridModel::new(GridConfig::default());
        model.set_widgets([
            WidgetSeed::new("A").at(0, 0).size(4, 2),
            WidgetSeed::new("B").at(4, 0).size(4, 2),
        ]);
        let defaults = model.defaults().to_vec();
        let mut moved = model.positions();
        moved.set(WidgetId::new("A"), GridRect::new(0, 5, 6, 3));
        moved.set(WidgetId::new("B"), GridRect::new(0, 0, 4, 2));
        model.apply_positions(&moved);
        model.toggle_view(&WidgetId::new("A"));

        model.reset_to_defaults();
        assert_eq!(model.placements(), defaults.as_slice());
    }

    #[test]
    fn reset_moves_added_widgets_off_restored_ones() {
        let mut model = GridModel::new(GridConfig::default());
        model.set_widgets([WidgetSeed::new("A").at(0, 1).size(4, 2)]);
        let mut moved = model.positions();
        moved.set(WidgetId::new("A"), GridRect::new(6, 0, 4, 2));
        model.apply_positions(&moved);
        model.add_widget("C", &catalog()).unwrap();
        assert_eq!(model.get(&WidgetId::new("C")).unwrap().rect, GridRect::new(0, 0, 6, 2));

        model.reset_to_defaults();
        assert_eq!(model.get(&WidgetId::new("A")).unwrap().rect, GridRect::new(0, 1, 4, 2));
        assert_eq!(model.get(&WidgetId::new("C")).unwrap().rect, GridRect::new(0, 3, 6, 2));
        assert!(model.validate().is_valid());
    }

    #[test]
    fn set_widgets_settles_overlapping_seeds() {
        let mut model = GridModel::new(GridConfig::default());
        let settled = model.set_widgets([
            WidgetSeed::new("A").at(0, 0).size(4, 2),
            WidgetSeed::new("B").at(2, 0).size(4, 2),
            WidgetSeed::new("C").at(8, 0).size(4, 2),
        ]);
        assert_eq!(settled, vec![WidgetId::new("B")]);
        assert_eq!(
            rects(&model),
            vec![
                ("A".to_string(), GridRect::new(0, 0, 4, 2)),
                ("B".to_string(), GridRect::new(4, 0, 4, 2)),
                ("C".to_string(), GridRect::new(8, 0, 4, 2)),
            ]
        );
        assert!(model.validate().is_valid());
        assert_eq!(model.defaults(), model.placements());
    }

    #[test]
    fn set_widgets_keeps_a_lone_coordinate() {
        let mut model = GridModel::new(GridConfig::default());
        let mut only_x = WidgetSeed::new("A").size(4, 2);
        only_x.x = Some(6);
        let mut only_y = WidgetSeed::new("B").size(4, 2);
        only_y.y = Some(3);
        model.set_widgets([only_x, only_y]);
        assert_eq!(
            rects(&model),
            vec![
                ("A".to_string(), GridRect::new(6, 0, 4, 2)),
                ("B".to_string(), GridRect::new(0, 3, 4, 2)),
            ]
        );
    }

    #[test]
    fn validate_reports_overlaps_and_bounds() {
        let mut model = GridModel::new(GridConfig::default());
        model.set_widgets([
            WidgetSeed::new("A").at(0, 0).size(4, 2),
            WidgetSeed::new("B").at(6, 0).size(4, 2),
        ]);
        let mut positions = model.positions();
        positions.set(WidgetId::new("B"), GridRect::new(2, 1, 4, 2));
        model.apply_positions(&positions);
        let report = model.validate();
        assert_eq!(
            report.issues,
            vec![LayoutIssue::Overlap {
                first: WidgetId::new("A"),
                second: WidgetId::new("B"),
            }]
        );
    }

    #[test]
    fn toggle_view_unknown_is_none() {
        let mut model = GridModel::new(GridConfig::default());
        model.set_widgets([WidgetSeed::new("A")]);
        assert_eq!(model.toggle_view(&WidgetId::new("A")), Some(ViewMode::Chart));
        assert_eq!(model.toggle_view(&WidgetId::new("zzz")), None);
        assert!(!model.set_view(&WidgetId::new("zzz"), ViewMode::Chart));
    }

    #[test]
    fn placement_serializes_flat() {
        let placement = Placement {
            id: WidgetId::new("A"),
            widget_type: WidgetType::new("sales"),
            rect: GridRect::new(1, 2, 3, 4),
            view: ViewMode::Chart,
        };
        let json = serde_json::to_value(&placement).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "A", "type": "sales", "x": 1, "y": 2, "w": 3, "h": 4, "view": "chart"})
        );
    }
}
