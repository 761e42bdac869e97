#![forbid(unsafe_code)]

//! Runtime: sessions, storage, and debounced saves.
//!
//! # Role in gridboard
//! `gridboard-layout` is pure: it never sleeps, logs, or touches storage.
//! This crate adds those concerns around it. A [`DashboardSession`] routes
//! host calls and pointer events into the layout engine, notifies
//! listeners, and persists committed layouts through a [`StorageBackend`]
//! via a [`DebouncedWriter`].
//!
//! # Time
//! Nothing here owns a timer. Operations that can schedule a save take a
//! `web_time::Instant`, and the host calls [`DashboardSession::tick`] from
//! its own loop, so the same code runs natively and in the browser.

pub mod config;
pub mod debounce;
pub mod session;
pub mod storage;

pub use config::{SessionConfig, SessionConfigError};
pub use debounce::{DebouncedWriter, SaveReport};
pub use session::{ChangeCause, DashboardSession, ListenerId, LoadReport, LoadSource};
pub use storage::{
    FileStorage, MemoryStorage, StorageBackend, StorageError, StorageResult, storage_key,
};
