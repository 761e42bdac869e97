#![forbid(unsafe_code)]

//! One user's editing session on one dashboard.
//!
//! [`DashboardSession`] owns the grid model, the interaction controller, the
//! widget catalog, a storage backend, and the debounced writer. It is the
//! only place where the pure layout engine meets time and I/O:
//!
//! - Every committed change (pointer commit, add, remove, view toggle) fires
//!   the `on_layout_changed` listeners with the ordered placement list and
//!   schedules a debounced save.
//! - [`DashboardSession::tick`] writes saves whose quiet period elapsed;
//!   [`DashboardSession::flush`] writes everything now.
//! - Storage failures are logged and reported but never roll back the
//!   in-memory layout.
//!
//! API mutations (load, add, remove, reset) cancel an active drag or resize
//! first, so a preview never outlives the layout it was computed from.

use std::fmt;

use gridboard_core::{PointerEvent, ViewMode, WidgetId, WidgetType};
use gridboard_layout::{
    AddWidgetError, CancelReason, GridModel, InteractionController, InteractionEffect,
    InteractionPhase, InteractionTransition, LayoutRecord, Placement, Preview, RenderInstruction,
    WidgetCatalog, WidgetSeed, decode_records, encode_records, records, render_plan,
};
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::config::{SessionConfig, SessionConfigError};
use crate::debounce::{DebouncedWriter, SaveReport};
use crate::storage::{StorageBackend, StorageResult, storage_key};

const TARGET: &str = "gridboard.session";

/// What produced a layout change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCause {
    Loaded,
    Added,
    Removed,
    ViewToggled,
    Reset,
    Interaction,
}

/// Handle returned by [`DashboardSession::on_layout_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(ChangeCause, &[Placement])>;

/// Where a loaded layout came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    /// A saved layout was reconciled with the catalog.
    Saved,
    /// Nothing was saved; catalog defaults are in place.
    NothingSaved,
    /// The saved payload did not parse; catalog defaults are in place.
    Malformed,
    /// The store could not be read; catalog defaults are in place.
    StorageFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub source: LoadSource,
    /// Widgets moved to resolve overlaps in the saved data.
    pub settled: Vec<WidgetId>,
}

pub struct DashboardSession<C, S> {
    config: SessionConfig,
    model: GridModel,
    controller: InteractionController,
    catalog: C,
    storage: S,
    writer: DebouncedWriter,
    key: String,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    degraded_preview: bool,
}

impl<C, S> fmt::Debug for DashboardSession<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardSession")
            .field("key", &self.key)
            .field("widgets", &self.model.len())
            .field("phase", &self.controller.phase())
            .field("pending_writes", &self.writer.pending_len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<C, S> DashboardSession<C, S>
where
    C: WidgetCatalog,
    S: StorageBackend,
{
    /// Start an empty session for `user` on `dashboard`. Call
    /// [`DashboardSession::load`] to populate it.
    pub fn new(
        config: SessionConfig,
        catalog: C,
        storage: S,
        user: &str,
        dashboard: &str,
    ) -> Result<Self, SessionConfigError> {
        config.validate()?;
        let controller = InteractionController::new(config.metrics, config.col_width_px());
        Ok(Self {
            model: GridModel::new(config.grid),
            controller,
            catalog,
            storage,
            writer: DebouncedWriter::new(config.save_debounce()),
            key: storage_key(user, dashboard),
            listeners: Vec::new(),
            next_listener: 0,
            degraded_preview: false,
            config,
        })
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> &GridModel {
        &self.model
    }

    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        self.model.placements()
    }

    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub fn writer(&self) -> &DebouncedWriter {
        &self.writer
    }

    #[must_use]
    pub fn phase(&self) -> InteractionPhase {
        self.controller.phase()
    }

    #[must_use]
    pub fn preview(&self) -> Option<&Preview> {
        self.controller.preview()
    }

    #[must_use]
    pub fn edit_mode(&self) -> bool {
        self.controller.edit_mode()
    }

    /// Register a listener for committed layout changes.
    pub fn on_layout_changed(
        &mut self,
        listener: impl FnMut(ChangeCause, &[Placement]) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Replace the layout with the catalog `seeds`, then reconcile any saved
    /// layout into it. Seeds without a size get the catalog default.
    ///
    /// A pending save for this dashboard is written first so the saved
    /// layout is current. Malformed or unreadable saved data means catalog
    /// defaults; it is logged, never returned as an error.
    pub fn load(&mut self, seeds: impl IntoIterator<Item = WidgetSeed>) -> LoadReport {
        let _span = tracing::debug_span!("gridboard.session.load", key = %self.key).entered();
        self.cancel_for_mutation(None);
        let flushed = self.writer.flush_key(&self.key, &mut self.storage);
        self.log_save_report(&flushed);

        let seeded = self.model.set_widgets_from_catalog(seeds, &self.catalog);
        if !seeded.is_empty() {
            tracing::debug!(
                target: TARGET,
                key = %self.key,
                settled = seeded.len(),
                "catalog seeds overlapped; settled"
            );
        }
        let report = match self.storage.get(&self.key) {
            Err(err) => {
                tracing::warn!(
                    target: TARGET,
                    key = %self.key,
                    backend = self.storage.name(),
                    error = %err,
                    "saved layout unreadable; using defaults"
                );
                LoadReport {
                    source: LoadSource::StorageFailed,
                    settled: Vec::new(),
                }
            }
            Ok(None) => LoadReport {
                source: LoadSource::NothingSaved,
                settled: Vec::new(),
            },
            Ok(Some(payload)) => match decode_records(&payload) {
                Err(err) => {
                    tracing::warn!(
                        target: TARGET,
                        key = %self.key,
                        error = %err,
                        "saved layout malformed; using defaults"
                    );
                    LoadReport {
                        source: LoadSource::Malformed,
                        settled: Vec::new(),
                    }
                }
                Ok(saved) => {
                    let settled = self.model.apply_saved(&saved);
                    if !settled.is_empty() {
                        tracing::debug!(
                            target: TARGET,
                            key = %self.key,
                            settled = settled.len(),
                            "saved layout had overlaps; settled"
                        );
                    }
                    LoadReport {
                        source: LoadSource::Saved,
                        settled,
                    }
                }
            },
        };

        tracing::debug!(
            target: TARGET,
            key = %self.key,
            widgets = self.model.len(),
            source = ?report.source,
            "layout loaded"
        );
        self.notify(ChangeCause::Loaded);
        report
    }

    /// Add a widget of `widget_type` at the first free slot.
    pub fn add_widget(
        &mut self,
        widget_type: impl Into<WidgetType>,
        now: Instant,
    ) -> Result<WidgetId, AddWidgetError> {
        self.cancel_for_mutation(None);
        match self.model.add_widget(widget_type, &self.catalog) {
            Ok(id) => {
                tracing::debug!(target: TARGET, widget = %id, "widget added");
                self.commit_change(ChangeCause::Added, now);
                Ok(id)
            }
            Err(err) => {
                tracing::debug!(target: TARGET, error = %err, "widget add rejected");
                Err(err)
            }
        }
    }

    /// Remove a widget. Unknown ids are a no-op.
    pub fn remove_widget(&mut self, id: &WidgetId, now: Instant) -> Option<Placement> {
        self.cancel_for_mutation(Some(id));
        let removed = self.model.remove_widget(id)?;
        tracing::debug!(target: TARGET, widget = %id, "widget removed");
        self.commit_change(ChangeCause::Removed, now);
        Some(removed)
    }

    /// Flip a widget between number and chart view.
    pub fn toggle_view(&mut self, id: &WidgetId, now: Instant) -> Option<ViewMode> {
        let view = self.model.toggle_view(id)?;
        tracing::debug!(target: TARGET, widget = %id, view = view.as_str(), "view toggled");
        self.commit_change(ChangeCause::ViewToggled, now);
        Some(view)
    }

    /// Restore catalog defaults and forget the saved layout.
    ///
    /// The model is reset even when removing the stored key fails; the
    /// failure is logged and returned.
    pub fn reset_to_defaults(&mut self) -> StorageResult<()> {
        self.cancel_for_mutation(None);
        self.model.reset_to_defaults();
        self.writer.cancel(&self.key);
        let removed = self.storage.remove(&self.key);
        if let Err(err) = &removed {
            tracing::warn!(
                target: TARGET,
                key = %self.key,
                backend = self.storage.name(),
                error = %err,
                "failed to clear saved layout"
            );
        }
        tracing::debug!(target: TARGET, key = %self.key, "layout reset to defaults");
        self.notify(ChangeCause::Reset);
        removed
    }

    /// Toggle layout edit mode. Leaving it cancels an active gesture.
    pub fn set_edit_mode(&mut self, enabled: bool) -> Option<InteractionTransition> {
        let transition = self.controller.set_edit_mode(enabled);
        if transition.is_some() {
            self.degraded_preview = false;
        }
        transition
    }

    /// Update the grid container width after a host resize.
    pub fn set_container_width(&mut self, width_px: f64) {
        if width_px.is_finite() && width_px >= 0.0 {
            self.config.container_width_px = width_px;
            self.controller.set_col_width_px(self.config.col_width_px());
        }
    }

    /// Feed one pointer event to the interaction controller.
    pub fn handle_pointer(&mut self, event: &PointerEvent, now: Instant) -> InteractionTransition {
        let transition = self.controller.handle(&mut self.model, event);
        match &transition.effect {
            InteractionEffect::Committed { widget, changed } if !changed.is_empty() => {
                tracing::debug!(
                    target: TARGET,
                    widget = %widget,
                    changed = changed.len(),
                    transition_id = transition.transition_id,
                    "interaction committed"
                );
                self.commit_change(ChangeCause::Interaction, now);
            }
            InteractionEffect::Previewed {
                widget,
                degraded: true,
                unresolved,
                ..
            } => {
                if !self.degraded_preview {
                    tracing::warn!(
                        target: TARGET,
                        widget = %widget,
                        unresolved = unresolved.len(),
                        "cascade could not resolve every overlap; preview is degraded"
                    );
                }
                self.degraded_preview = true;
            }
            InteractionEffect::Previewed { .. } => self.degraded_preview = false,
            InteractionEffect::Canceled {
                widget,
                reason: CancelReason::Unresolvable,
            } => {
                tracing::warn!(
                    target: TARGET,
                    widget = %widget,
                    "gesture ended without a clean layout; reverted"
                );
            }
            _ => {}
        }
        if !self.controller.is_active() {
            self.degraded_preview = false;
        }
        transition
    }

    /// Abort an active drag or resize, reverting to the committed layout.
    pub fn cancel_interaction(&mut self) -> Option<InteractionTransition> {
        self.degraded_preview = false;
        self.controller.cancel(CancelReason::Programmatic)
    }

    /// Write saves whose quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> SaveReport {
        let report = self.writer.poll(now, &mut self.storage);
        self.log_save_report(&report);
        report
    }

    /// Write every pending save now.
    pub fn flush(&mut self) -> SaveReport {
        let report = self.writer.flush(&mut self.storage);
        self.log_save_report(&report);
        report
    }

    /// Render instructions for the current layout and live preview.
    pub fn render_plan(&self) -> Vec<RenderInstruction<C::Content>> {
        render_plan(&self.model, &self.catalog, self.controller.preview())
    }

    /// The persisted form of the current layout.
    #[must_use]
    pub fn records(&self) -> Vec<LayoutRecord> {
        records(self.model.placements())
    }

    fn cancel_for_mutation(&mut self, removing: Option<&WidgetId>) {
        let reason = match (removing, self.controller.active_widget()) {
            (Some(id), Some(active)) if id == active => CancelReason::WidgetRemoved,
            _ => CancelReason::Programmatic,
        };
        if let Some(transition) = self.controller.cancel(reason) {
            tracing::debug!(
                target: TARGET,
                transition_id = transition.transition_id,
                reason = ?reason,
                "gesture canceled by layout mutation"
            );
        }
        self.degraded_preview = false;
    }

    fn commit_change(&mut self, cause: ChangeCause, now: Instant) {
        self.notify(cause);
        match encode_records(&self.records()) {
            Ok(payload) => self.writer.schedule(self.key.clone(), payload, now),
            Err(err) => tracing::warn!(
                target: TARGET,
                key = %self.key,
                error = %err,
                "failed to encode layout; save skipped"
            ),
        }
    }

    fn notify(&mut self, cause: ChangeCause) {
        let placements = self.model.placements();
        for (_, listener) in &mut self.listeners {
            listener(cause, placements);
        }
    }

    fn log_save_report(&self, report: &SaveReport) {
        for key in &report.written {
            tracing::debug!(target: TARGET, key = %key, "layout saved");
        }
        for (key, err) in &report.failed {
            tracing::warn!(
                target: TARGET,
                key = %key,
                backend = self.storage.name(),
                error = %err,
                "layout save failed; in-memory layout kept"
            );
        }
    }
}
