#![forbid(unsafe_code)]

//! Grid-cell geometry.
//!
//! Everything here is pure: rectangles are integer cell spans, sizes are
//! clamped instead of rejected, and arithmetic saturates instead of wrapping.

use serde::{Deserialize, Serialize};

/// A rectangle on the dashboard grid, measured in cells.
///
/// Origin is the top-left cell. Rows grow downward without a fixed limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridRect {
    /// Left column (inclusive).
    pub x: u16,
    /// Top row (inclusive).
    pub y: u16,
    /// Width in columns.
    pub w: u16,
    /// Height in rows.
    pub h: u16,
}

impl GridRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x as u32 + self.w as u32
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y as u32 + self.h as u32
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.w as u32 * self.h as u32
    }

    /// Size class of this rectangle's area.
    #[inline]
    pub const fn size_class(&self) -> SizeClass {
        size_class(self.w, self.h)
    }

    /// Same size, different origin.
    #[inline]
    #[must_use]
    pub const fn at(self, x: u16, y: u16) -> Self {
        Self { x, y, ..self }
    }

    /// Shift by a signed cell delta, saturating at zero and `u16::MAX`.
    #[must_use]
    pub fn offset(self, d_cols: i32, d_rows: i32) -> Self {
        self.at(
            saturating_offset(self.x, d_cols),
            saturating_offset(self.y, d_rows),
        )
    }

    /// Whether this rectangle overlaps `other`. See [`overlaps`].
    #[inline]
    pub const fn overlaps(&self, other: &GridRect) -> bool {
        overlaps(self, other)
    }

    /// Chebyshev distance between the origins of two rectangles.
    #[inline]
    pub fn origin_distance(&self, other: &GridRect) -> u32 {
        let dx = u32::from(self.x.abs_diff(other.x));
        let dy = u32::from(self.y.abs_diff(other.y));
        dx.max(dy)
    }

    /// Manhattan distance between the origins of two rectangles.
    #[inline]
    pub fn manhattan_distance(&self, other: &GridRect) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }
}

/// Exact rectangle overlap test on integer cells.
///
/// Rectangles that only share an edge do not overlap.
#[inline]
pub const fn overlaps(a: &GridRect, b: &GridRect) -> bool {
    !(a.right() <= b.x as u32
        || b.right() <= a.x as u32
        || a.bottom() <= b.y as u32
        || b.bottom() <= a.y as u32)
}

/// Coarse content-density bucket derived from a widget's area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// Classify a `w x h` span: area up to 6 is small, up to 12 medium, else large.
#[inline]
pub const fn size_class(w: u16, h: u16) -> SizeClass {
    let area = w as u32 * h as u32;
    if area <= 6 {
        SizeClass::Small
    } else if area <= 12 {
        SizeClass::Medium
    } else {
        SizeClass::Large
    }
}

/// Convert a pointer delta in pixels to the nearest whole-cell delta.
///
/// `col_width_px` and `row_height_px` are the per-cell pitches (cell size plus
/// gap). A pitch that is zero, negative, or not finite yields a zero delta on
/// that axis.
#[must_use]
pub fn pixel_delta_to_cell_delta(
    dx_px: f64,
    dy_px: f64,
    col_width_px: f64,
    row_height_px: f64,
) -> (i32, i32) {
    (axis_cells(dx_px, col_width_px), axis_cells(dy_px, row_height_px))
}

fn axis_cells(delta_px: f64, pitch_px: f64) -> i32 {
    if !pitch_px.is_finite() || pitch_px <= 0.0 || !delta_px.is_finite() {
        return 0;
    }
    // `as` saturates for out-of-range floats.
    (delta_px / pitch_px).round() as i32
}

fn saturating_offset(value: u16, delta: i32) -> u16 {
    let moved = i64::from(value) + i64::from(delta);
    moved.clamp(0, i64::from(u16::MAX)) as u16
}

/// Column count and per-widget size bounds for one grid.
///
/// Construction normalizes contradictory inputs so clamping is always total:
/// at least one column, every minimum at least 1, `max_w <= cols`, and each
/// minimum no larger than its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBounds {
    cols: u16,
    min_w: u16,
    max_w: u16,
    min_h: u16,
    max_h: u16,
}

impl GridBounds {
    #[must_use]
    pub fn new(cols: u16, min_w: u16, max_w: u16, min_h: u16, max_h: u16) -> Self {
        let cols = cols.max(1);
        let max_w = max_w.clamp(1, cols);
        let min_w = min_w.clamp(1, max_w);
        let max_h = max_h.max(1);
        let min_h = min_h.clamp(1, max_h);
        Self {
            cols,
            min_w,
            max_w,
            min_h,
            max_h,
        }
    }

    #[must_use]
    pub const fn cols(&self) -> u16 {
        self.cols
    }

    #[must_use]
    pub const fn min_w(&self) -> u16 {
        self.min_w
    }

    #[must_use]
    pub const fn max_w(&self) -> u16 {
        self.max_w
    }

    #[must_use]
    pub const fn min_h(&self) -> u16 {
        self.min_h
    }

    #[must_use]
    pub const fn max_h(&self) -> u16 {
        self.max_h
    }

    /// Clamp a width into `[min_w, max_w]`.
    #[must_use]
    pub fn clamp_w(&self, w: u16) -> u16 {
        w.clamp(self.min_w, self.max_w)
    }

    /// Clamp a height into `[min_h, max_h]`.
    #[must_use]
    pub fn clamp_h(&self, h: u16) -> u16 {
        h.clamp(self.min_h, self.max_h)
    }

    /// Largest legal `x` for a widget of width `w`.
    #[must_use]
    pub fn max_x(&self, w: u16) -> u16 {
        self.cols.saturating_sub(w)
    }

    /// Clamp a rectangle into the grid: size bounds first, then the column
    /// bound. Rows are unbounded so `y` is left alone.
    #[must_use]
    pub fn clamp_rect(&self, rect: GridRect) -> GridRect {
        let w = self.clamp_w(rect.w);
        let h = self.clamp_h(rect.h);
        GridRect::new(rect.x.min(self.max_x(w)), rect.y, w, h)
    }

    /// Whether `rect` already satisfies every bound.
    #[must_use]
    pub fn contains(&self, rect: &GridRect) -> bool {
        (self.min_w..=self.max_w).contains(&rect.w)
            && (self.min_h..=self.max_h).contains(&rect.h)
            && rect.right() <= u32::from(self.cols)
    }
}

impl Default for GridBounds {
    /// Twelve columns, widths 2..=12, heights 1..=8.
    fn default() -> Self {
        Self::new(12, 2, 12, 1, 8)
    }
}
