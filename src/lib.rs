//! Live directory browser.
//!
//! The core is [`snapshot::DirectorySnapshotService`]: it lists a directory,
//! publishes the listing to a [`snapshot::ListingSink`], and keeps it in sync
//! through a [`watcher::DirectoryWatcher`]. The terminal UI in [`app`] and
//! [`ui`] is one such sink.

pub mod app;
pub mod config;
pub mod error;
pub mod launcher;
pub mod listing;
pub mod logging;
pub mod snapshot;
pub mod types;
pub mod ui;
pub mod watcher;

pub use error::{OpenError, SnapshotError, WatchError};
pub use snapshot::{DirectorySnapshotService, ListingSink, ServiceState};
pub use types::{DirectoryEntry, EntryKind};
pub use watcher::{Backend, DirectoryWatcher, EventSource, NotifySource};
