//! Placement solver: free-slot search and cascading relocation.
//!
//! # Searches
//!
//! - [`first_free_slot`] scans rows top to bottom, columns left to right, and
//!   returns the first position where a `w x h` rectangle touches nothing.
//!   It is used for brand-new widgets only.
//! - [`nearest_open_slot`] searches outward from a desired origin in
//!   Chebyshev rings (radius 0, 1, 2, ...). Inside a ring, candidates are
//!   visited by Manhattan distance, then vertical distance, then `dy`, then
//!   `dx`, so horizontal nudges win ties and results are reproducible. When
//!   the rings are exhausted it falls back to the row-major scan.
//!
//! # Cascade
//!
//! [`shift_widgets`] places one widget at a candidate rectangle and moves
//! every widget it displaces, transitively, to that widget's nearest open
//! slot. The result is a [`ShiftOutcome`] that has not been applied to any
//! model. The number of relocations is capped; when the cap is hit or a
//! search finds nothing, the leftover overlaps are listed in
//! [`ShiftOutcome::unresolved`] instead of being hidden.

use std::collections::VecDeque;

use gridboard_core::{GridRect, WidgetId};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::GridConfig;
use crate::grid::Placement;

// ============================================================================
// PositionMap
// ============================================================================

/// Ordered map from widget id to rectangle.
///
/// Iteration follows insertion order so every solver pass is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionMap {
    entries: Vec<(WidgetId, GridRect)>,
    index: FxHashMap<WidgetId, usize>,
}

impl PositionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the rectangles of `placements`, keeping their order.
    #[must_use]
    pub fn from_placements(placements: &[Placement]) -> Self {
        let mut map = Self::default();
        for placement in placements {
            map.set(placement.id.clone(), placement.rect);
        }
        map
    }

    #[must_use]
    pub fn get(&self, id: &WidgetId) -> Option<GridRect> {
        self.index.get(id).map(|&slot| self.entries[slot].1)
    }

    #[must_use]
    pub fn contains(&self, id: &WidgetId) -> bool {
        self.index.contains_key(id)
    }

    /// Update `id`, appending it if unknown.
    pub fn set(&mut self, id: WidgetId, rect: GridRect) {
        match self.index.get(&id) {
            Some(&slot) => self.entries[slot].1 = rect,
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push((id, rect));
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&WidgetId, GridRect)> {
        self.entries.iter().map(|(id, rect)| (id, *rect))
    }

    /// Whether `rect` overlaps any entry other than `exclude`.
    #[must_use]
    pub fn collides(&self, rect: &GridRect, exclude: Option<&WidgetId>) -> bool {
        self.entries
            .iter()
            .any(|(id, other)| Some(id) != exclude && rect.overlaps(other))
    }

    /// Ids of entries overlapping `rect`, skipping `exclude`, in map order.
    #[must_use]
    pub fn colliders(&self, rect: &GridRect, exclude: Option<&WidgetId>) -> Vec<WidgetId> {
        self.entries
            .iter()
            .filter(|(id, other)| Some(id) != exclude && rect.overlaps(other))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Ids that overlap at least one other entry, in map order.
    #[must_use]
    pub fn overlapping_ids(&self) -> Vec<WidgetId> {
        self.entries
            .iter()
            .filter(|(id, rect)| self.collides(rect, Some(id)))
            .map(|(id, _)| id.clone())
            .collect()
    }
}

// ============================================================================
// Searches
// ============================================================================

/// How a [`nearest_open_slot`] result was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMethod {
    /// Found in the ring of this Chebyshev radius.
    Ring { radius: u16 },
    /// Found by the row-major fallback scan.
    Scan,
    /// Nothing free within the search limits; the rectangle is the clamped
    /// request and may still collide.
    Exhausted,
}

/// Result of a nearest-slot search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSearch {
    pub rect: GridRect,
    pub method: SearchMethod,
}

impl SlotSearch {
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.method, SearchMethod::Exhausted)
    }
}

/// First `(x, y)` in row-major order where a `w x h` rectangle overlaps none
/// of `occupied`.
///
/// Rows `0..config.max_scan_rows` are scanned. `w` and `h` are clamped to the
/// grid bounds first. Returns `None` when every scanned row is blocked.
#[must_use]
pub fn first_free_slot(
    w: u16,
    h: u16,
    occupied: &[GridRect],
    config: &GridConfig,
) -> Option<(u16, u16)> {
    scan_row_major(w, h, config, |rect| !occupied.iter().any(|o| rect.overlaps(o)))
}

fn scan_row_major(
    w: u16,
    h: u16,
    config: &GridConfig,
    mut is_free: impl FnMut(&GridRect) -> bool,
) -> Option<(u16, u16)> {
    let bounds = config.bounds();
    let w = bounds.clamp_w(w);
    let h = bounds.clamp_h(h);
    let max_x = bounds.max_x(w);
    for y in 0..config.max_scan_rows.max(1) {
        for x in 0..=max_x {
            if is_free(&GridRect::new(x, y, w, h)) {
                return Some((x, y));
            }
        }
    }
    None
}

/// Ring offsets of Chebyshev radius `radius`, in search order.
fn ring_offsets(radius: i32) -> Vec<(i32, i32)> {
    let mut ring = Vec::new();
    if radius == 0 {
        ring.push((0, 0));
        return ring;
    }
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx.abs().max(dy.abs()) == radius {
                ring.push((dx, dy));
            }
        }
    }
    ring.sort_by_key(|&(dx, dy)| (dx.abs() + dy.abs(), dy.abs(), dy, dx));
    ring
}

/// Nearest position for a `rect`-sized widget `id` that overlaps nothing in
/// `positions` except, possibly, `id` itself.
///
/// Width and height are kept. Candidate `x` is clamped to `[0, cols - w]`
/// and `y` to `>= 0`, so several ring offsets can map to the same cell near
/// the grid edges; the first one wins.
#[must_use]
pub fn nearest_open_slot(
    id: &WidgetId,
    rect: GridRect,
    positions: &PositionMap,
    config: &GridConfig,
) -> SlotSearch {
    let bounds = config.bounds();
    let rect = bounds.clamp_rect(rect);
    let max_x = i64::from(bounds.max_x(rect.w));

    for radius in 0..=config.search_radius {
        for (dx, dy) in ring_offsets(i32::from(radius)) {
            let x = (i64::from(rect.x) + i64::from(dx)).clamp(0, max_x) as u16;
            let y = (i64::from(rect.y) + i64::from(dy)).clamp(0, i64::from(u16::MAX)) as u16;
            let candidate = rect.at(x, y);
            if !positions.collides(&candidate, Some(id)) {
                return SlotSearch {
                    rect: candidate,
                    method: SearchMethod::Ring { radius },
                };
            }
        }
    }

    match scan_row_major(rect.w, rect.h, config, |candidate| {
        !positions.collides(candidate, Some(id))
    }) {
        Some((x, y)) => SlotSearch {
            rect: rect.at(x, y),
            method: SearchMethod::Scan,
        },
        None => SlotSearch {
            rect,
            method: SearchMethod::Exhausted,
        },
    }
}

// ============================================================================
// Cascade
// ============================================================================

/// Result of one [`shift_widgets`] pass. Nothing here is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftOutcome {
    /// The widget being moved or resized.
    pub moved: WidgetId,
    /// Its candidate rectangle, always present in `positions` unchanged.
    pub candidate: GridRect,
    /// Every widget's resulting rectangle, in model order.
    pub positions: PositionMap,
    /// Relocation steps performed.
    pub iterations: u32,
    /// Whether the relocation cap stopped the cascade early.
    pub iteration_cap_hit: bool,
    /// Searches that found no free slot at all.
    pub exhausted_searches: u32,
    /// Widgets still overlapping another widget.
    pub unresolved: Vec<WidgetId>,
}

impl ShiftOutcome {
    /// True when the outcome violates the no-overlap invariant.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.iteration_cap_hit || !self.unresolved.is_empty()
    }

    /// Ids whose rectangle differs from `placements`, in model order.
    #[must_use]
    pub fn changed(&self, placements: &[Placement]) -> Vec<WidgetId> {
        placements
            .iter()
            .filter(|p| self.positions.get(&p.id).is_some_and(|rect| rect != p.rect))
            .map(|p| p.id.clone())
            .collect()
    }
}

/// Place `moved` at `candidate` and relocate everything it displaces.
///
/// 1. Start from every placement's current rectangle, with `moved` replaced
///    by `candidate`.
/// 2. Queue every other widget overlapping `candidate`.
/// 3. Pop a widget, find its nearest open slot against the current map, and
///    if that differs from where it is, move it and queue any widget (not
///    already queued) overlapping its new rectangle.
///
/// `moved` is never relocated. At most `config.max_cascade_iterations`
/// widgets are popped.
#[must_use]
pub fn shift_widgets(
    placements: &[Placement],
    moved: &WidgetId,
    candidate: GridRect,
    config: &GridConfig,
) -> ShiftOutcome {
    let mut positions = PositionMap::from_placements(placements);
    positions.set(moved.clone(), candidate);

    let mut queue: VecDeque<WidgetId> = positions.colliders(&candidate, Some(moved)).into();
    let mut queued: FxHashSet<WidgetId> = queue.iter().cloned().collect();

    let mut iterations = 0u32;
    let mut iteration_cap_hit = false;
    let mut exhausted_searches = 0u32;

    while let Some(id) = queue.pop_front() {
        if iterations >= config.max_cascade_iterations {
            iteration_cap_hit = true;
            break;
        }
        iterations += 1;
        queued.remove(&id);

        let Some(current) = positions.get(&id) else {
            continue;
        };
        let search = nearest_open_slot(&id, current, &positions, config);
        if search.is_exhausted() {
            exhausted_searches += 1;
        }
        if search.rect == current {
            continue;
        }
        positions.set(id.clone(), search.rect);
        for other in positions.colliders(&search.rect, Some(&id)) {
            if &other != moved && queued.insert(other.clone()) {
                queue.push_back(other);
            }
        }
    }

    let unresolved = positions.overlapping_ids();
    ShiftOutcome {
        moved: moved.clone(),
        candidate,
        positions,
        iterations,
        iteration_cap_hit,
        exhausted_searches,
        unresolved,
    }
}

/// Move placements that overlap an earlier placement to their nearest open
/// slot, in order. Rectangles are clamped to the grid first.
///
/// Returns the ids that moved. Earlier placements take priority, so a layout
/// without overlaps is returned untouched. When the bounded search finds
/// nothing, the placement goes directly below the lowest settled one, so the
/// result never overlaps.
pub fn settle_overlaps(placements: &mut [Placement], config: &GridConfig) -> Vec<WidgetId> {
    let bounds = config.bounds();
    let mut settled = PositionMap::new();
    let mut moved = Vec::new();
    for placement in placements.iter_mut() {
        let rect = bounds.clamp_rect(placement.rect);
        let target = if settled.collides(&rect, None) {
            let search = nearest_open_slot(&placement.id, rect, &settled, config);
            if search.is_exhausted() {
                let below = settled.iter().map(|(_, r)| r.bottom()).max().unwrap_or(0);
                rect.at(rect.x, u16::try_from(below).unwrap_or(u16::MAX))
            } else {
                search.rect
            }
        } else {
            rect
        };
        if target != placement.rect {
            placement.rect = target;
            moved.push(placement.id.clone());
        }
        settled.set(placement.id.clone(), target);
    }
    moved
}
