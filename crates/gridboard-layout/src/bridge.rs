//! Rendering bridge: turns model state into placement instructions.
//!
//! The engine never looks at widget content. A [`WidgetCatalog`] supplies
//! default sizes and renders content for a size class and view mode; this
//! module pairs that content with a CSS-grid style [`CellSpan`] and any
//! live preview offset.

use std::collections::BTreeMap;

use gridboard_core::{GridRect, SizeClass, ViewMode, WidgetId, WidgetType};
use serde::{Deserialize, Serialize};

use crate::grid::GridModel;
use crate::interaction::Preview;

/// The host's registry of widget types.
pub trait WidgetCatalog {
    /// Whatever the host renders (markup, a view tree, chart options...).
    type Content;

    /// Default `(w, h)` in cells for a new widget of this type.
    fn default_size(&self, widget_type: &WidgetType) -> Option<(u16, u16)>;

    /// Content for a widget of this type at the given density and view.
    fn render(
        &self,
        widget_type: &WidgetType,
        size: SizeClass,
        view: ViewMode,
    ) -> Option<Self::Content>;
}

/// One entry of a [`StaticCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    pub default_w: u16,
    pub default_h: u16,
}

impl CatalogEntry {
    #[must_use]
    pub fn new(title: impl Into<String>, default_w: u16, default_h: u16) -> Self {
        Self {
            title: title.into(),
            default_w,
            default_h,
        }
    }
}

/// A fixed catalog that renders a one-line text summary per widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticCatalog {
    entries: BTreeMap<WidgetType, CatalogEntry>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(mut self, widget_type: impl Into<WidgetType>, entry: CatalogEntry) -> Self {
        self.insert(widget_type, entry);
        self
    }

    pub fn insert(&mut self, widget_type: impl Into<WidgetType>, entry: CatalogEntry) {
        self.entries.insert(widget_type.into(), entry);
    }

    #[must_use]
    pub fn get(&self, widget_type: &WidgetType) -> Option<&CatalogEntry> {
        self.entries.get(widget_type)
    }

    pub fn types(&self) -> impl Iterator<Item = &WidgetType> {
        self.entries.keys()
    }
}

impl WidgetCatalog for StaticCatalog {
    type Content = String;

    fn default_size(&self, widget_type: &WidgetType) -> Option<(u16, u16)> {
        self.get(widget_type)
            .map(|entry| (entry.default_w, entry.default_h))
    }

    fn render(
        &self,
        widget_type: &WidgetType,
        size: SizeClass,
        view: ViewMode,
    ) -> Option<String> {
        self.get(widget_type)
            .map(|entry| format!("{} [{} {}]", entry.title, size.as_str(), view.as_str()))
    }
}

/// 1-based grid lines covered by a rectangle, as CSS grid expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellSpan {
    pub column_start: u32,
    pub column_end: u32,
    pub row_start: u32,
    pub row_end: u32,
}

impl CellSpan {
    #[must_use]
    pub fn from_rect(rect: GridRect) -> Self {
        Self {
            column_start: u32::from(rect.x) + 1,
            column_end: rect.right() + 1,
            row_start: u32::from(rect.y) + 1,
            row_end: rect.bottom() + 1,
        }
    }

    /// `grid-column` / `grid-row` declarations for this span.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "grid-column: {} / {}; grid-row: {} / {};",
            self.column_start, self.column_end, self.row_start, self.row_end
        )
    }
}

/// Everything a host needs to draw one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInstruction<C> {
    pub id: WidgetId,
    pub widget_type: WidgetType,
    pub span: CellSpan,
    pub size_class: SizeClass,
    pub view: ViewMode,
    pub content: Option<C>,
    /// Visual translation in pixels while a drag or resize is previewed.
    pub offset_px: Option<(f64, f64)>,
}

/// Build render instructions for every placement, in model order.
pub fn render_plan<C>(
    model: &GridModel,
    catalog: &C,
    preview: Option<&Preview>,
) -> Vec<RenderInstruction<C::Content>>
where
    C: WidgetCatalog + ?Sized,
{
    model
        .placements()
        .iter()
        .map(|placement| {
            let size_class = placement.rect.size_class();
            RenderInstruction {
                id: placement.id.clone(),
                widget_type: placement.widget_type.clone(),
                span: CellSpan::from_rect(placement.rect),
                size_class,
                view: placement.view,
                content: catalog.render(&placement.widget_type, size_class, placement.view),
                offset_px: preview
                    .and_then(|p| p.entry(&placement.id))
                    .map(|entry| (entry.offset_x_px, entry.offset_y_px)),
            }
        })
        .collect()
}
