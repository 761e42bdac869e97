#![forbid(unsafe_code)]

//! gridboard public facade crate.
//!
//! Re-exports the types most hosts need from the internal crates and offers
//! a prelude. The `runtime` feature (on by default) adds sessions, storage,
//! and debounced saves; without it only the pure layout engine is exposed.
//!
//! ```rust,ignore
//! use gridboard::prelude::*;
//!
//! let catalog = StaticCatalog::new().with_entry("revenue", CatalogEntry::new("Revenue", 6, 2));
//! let mut session = DashboardSession::new(
//!     SessionConfig::default(), catalog, MemoryStorage::new(), "ada", "sales",
//! )?;
//! session.load([WidgetSeed::new("revenue")]);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use gridboard_core::{
    EventOrigin, GridBounds, GridRect, PointerEvent, PointerKind, ResizeHandle, SizeClass,
    ViewMode, WidgetId, WidgetType, overlaps,
};

// --- Layout re-exports -----------------------------------------------------

pub use gridboard_layout::{
    AddWidgetError, CancelReason, CatalogEntry, CellSpan, GridConfig, GridConfigError,
    GridMetrics, GridModel, InteractionController, InteractionEffect, InteractionPhase,
    InteractionTransition, LayoutRecord, Placement, Preview, RecordCodecError, RenderInstruction,
    ShiftOutcome, StaticCatalog, WidgetCatalog, WidgetSeed, reconcile, render_plan,
    shift_widgets,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use gridboard_runtime::{
    ChangeCause, DashboardSession, DebouncedWriter, FileStorage, LoadReport, LoadSource,
    MemoryStorage, SaveReport, SessionConfig, SessionConfigError, StorageBackend, StorageError,
    storage_key,
};

// --- Errors ---------------------------------------------------------------

/// Any error a gridboard API can return.
#[derive(Debug)]
pub enum Error {
    AddWidget(AddWidgetError),
    GridConfig(GridConfigError),
    Records(RecordCodecError),
    #[cfg(feature = "runtime")]
    Storage(StorageError),
    #[cfg(feature = "runtime")]
    SessionConfig(SessionConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddWidget(err) => write!(f, "{err}"),
            Self::GridConfig(err) => write!(f, "{err}"),
            Self::Records(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Storage(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::SessionConfig(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AddWidget(err) => Some(err),
            Self::GridConfig(err) => Some(err),
            Self::Records(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Storage(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::SessionConfig(err) => Some(err),
        }
    }
}

impl From<AddWidgetError> for Error {
    fn from(err: AddWidgetError) -> Self {
        Self::AddWidget(err)
    }
}

impl From<GridConfigError> for Error {
    fn from(err: GridConfigError) -> Self {
        Self::GridConfig(err)
    }
}

impl From<RecordCodecError> for Error {
    fn from(err: RecordCodecError) -> Self {
        Self::Records(err)
    }
}

#[cfg(feature = "runtime")]
impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

#[cfg(feature = "runtime")]
impl From<SessionConfigError> for Error {
    fn from(err: SessionConfigError) -> Self {
        Self::SessionConfig(err)
    }
}

/// Standard result type for gridboard APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CatalogEntry, Error, GridConfig, GridModel, GridRect, InteractionController,
        PointerEvent, ResizeHandle, Result, StaticCatalog, ViewMode, WidgetCatalog, WidgetId,
        WidgetSeed,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{DashboardSession, FileStorage, MemoryStorage, SessionConfig, StorageBackend};

    pub use crate::{core, layout};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use gridboard_core as core;
pub use gridboard_layout as layout;
#[cfg(feature = "runtime")]
pub use gridboard_runtime as runtime;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn errors_convert_and_keep_source() {
        let err: Error = AddWidgetError::DuplicateType {
            widget_type: WidgetType::new("revenue"),
        }
        .into();
        assert!(matches!(err, Error::AddWidget(_)));
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            AddWidgetError::DuplicateType {
                widget_type: WidgetType::new("revenue"),
            }
            .to_string()
        );
    }

    #[cfg(feature = "runtime")]
    #[test]
    fn prelude_builds_a_session() -> Result<()> {
        use crate::prelude::*;

        let catalog =
            StaticCatalog::new().with_entry("revenue", CatalogEntry::new("Revenue", 6, 2));
        let mut session = DashboardSession::new(
            SessionConfig::default(),
            catalog,
            MemoryStorage::new(),
            "ada",
            "sales",
        )?;
        session.load([WidgetSeed::new("revenue")]);
        let plan = session.render_plan();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].content.as_deref(), Some("Revenue [medium number]"));
        Ok(())
    }
}
