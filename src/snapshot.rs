//! Keeps a published directory listing in sync with the filesystem.
//!
//! [`DirectorySnapshotService`] is the single entry point the display layer
//! talks to. It lists a directory, publishes the listing, and arms a
//! [`DirectoryWatcher`] whose callback only posts a [`ReloadRequest`]. The
//! thread that owns the service drains those requests and does the actual
//! re-listing, so the listing is only ever mutated on that thread.

use std::fs;
use std::path::{Path, PathBuf};

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info, trace, warn};

use crate::error::SnapshotError;
use crate::listing::list_directory;
use crate::types::{DirectoryEntry, ReloadRequest};
use crate::watcher::{DirectoryWatcher, EventSource, NotifySource};

/// Where listings and errors go.
pub trait ListingSink {
    /// Replace the displayed listing wholesale.
    fn listing_changed(&mut self, directory: &Path, entries: &[DirectoryEntry]);

    fn report_error(&mut self, title: &str, message: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServiceState {
    Idle,
    Watching { directory: PathBuf, generation: u64 },
    Stopped,
}

pub struct DirectorySnapshotService<K: ListingSink, S: EventSource = NotifySource> {
    sink: K,
    watcher: DirectoryWatcher<S>,
    state: ServiceState,
    listing: Vec<DirectoryEntry>,
    next_generation: u64,
    reload_tx: Sender<ReloadRequest>,
    reload_rx: Receiver<ReloadRequest>,
}

impl<K: ListingSink> DirectorySnapshotService<K, NotifySource> {
    pub fn new(sink: K, source: NotifySource) -> Self {
        Self::with_watcher(sink, DirectoryWatcher::new(source))
    }
}

impl<K: ListingSink, S: EventSource> DirectorySnapshotService<K, S> {
    pub fn with_watcher(sink: K, watcher: DirectoryWatcher<S>) -> Self {
        let (reload_tx, reload_rx) = crossbeam_channel::unbounded();
        Self {
            sink,
            watcher,
            state: ServiceState::Idle,
            listing: Vec::new(),
            next_generation: 1,
            reload_tx,
            reload_rx,
        }
    }

    /// Make `path` the active directory.
    ///
    /// If the directory can't be listed, the error is reported to the sink and
    /// the previous directory and listing stay as they were. If the listing
    /// succeeds but the watch can't be armed, the new listing stays published
    /// (it just won't update live) and the error is reported. Either way the
    /// sink has already been told when this returns `Err`.
    pub fn set_active_directory(&mut self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        if self.state == ServiceState::Stopped {
            return self.fail(SnapshotError::Stopped);
        }

        let directory = match fs::canonicalize(path) {
            Ok(directory) => directory,
            Err(source) => {
                return self.fail(SnapshotError::DirectoryUnreadable {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let entries = match list_directory(&directory) {
            Ok(entries) => entries,
            Err(e) => return self.fail(e),
        };

        let generation = self.next_generation;
        self.next_generation += 1;
        self.state = ServiceState::Watching {
            directory: directory.clone(),
            generation,
        };
        self.publish(entries);
        info!("Active directory: {} ({} entries)", directory.display(), self.listing.len());

        let reload_tx = self.reload_tx.clone();
        let request = ReloadRequest {
            generation,
            directory: directory.clone(),
        };
        let armed = self.watcher.arm(&directory, move || {
            // Only fails once the service is gone.
            let _ = reload_tx.send(request.clone());
        });

        if let Err(source) = armed {
            return self.fail(SnapshotError::WatchArmFailure {
                path: directory,
                source,
            });
        }
        Ok(())
    }

    /// Handle one reload posted by the watch thread.
    ///
    /// Returns `true` if the listing was republished. Requests from a
    /// directory that is no longer active are dropped.
    pub fn process(&mut self, request: ReloadRequest) -> bool {
        match &self.state {
            ServiceState::Watching { generation, .. }
                if *generation == request.generation && self.watcher.is_armed() => {}
            _ => {
                trace!("Dropping stale reload for {}", request.directory.display());
                return false;
            }
        }
        self.reload(&request.directory)
    }

    /// Drain every queued reload without blocking.
    ///
    /// Bursts collapse: if several requests for the active directory are
    /// queued, the directory is listed once.
    pub fn process_pending(&mut self) -> usize {
        let mut latest = None;
        let mut drained = 0;
        while let Ok(request) = self.reload_rx.try_recv() {
            drained += 1;
            latest = Some(request);
        }
        if let Some(request) = latest {
            self.process(request);
        }
        drained
    }

    /// Re-list the active directory on demand.
    ///
    /// If the watch was lost, the directory is activated again from scratch so
    /// a directory recreated at the same path is picked up and watched.
    pub fn refresh(&mut self) -> bool {
        let directory = match &self.state {
            ServiceState::Watching { directory, .. } => directory.clone(),
            _ => return false,
        };
        if self.watcher.is_armed() {
            self.reload(&directory)
        } else {
            self.set_active_directory(&directory).is_ok()
        }
    }

    /// Release the watch and stop accepting directories. Idempotent.
    pub fn shutdown(&mut self) {
        if self.state == ServiceState::Stopped {
            return;
        }
        self.watcher.release();
        let dropped = self.reload_rx.try_iter().count();
        self.state = ServiceState::Stopped;
        debug!("Snapshot service stopped ({} queued reloads dropped)", dropped);
    }

    /// Receiver for reload requests, for callers that `select!` over several sources.
    pub fn reload_requests(&self) -> &Receiver<ReloadRequest> {
        &self.reload_rx
    }

    pub fn active_directory(&self) -> Option<&Path> {
        match &self.state {
            ServiceState::Watching { directory, .. } => Some(directory.as_path()),
            _ => None,
        }
    }

    pub fn listing(&self) -> &[DirectoryEntry] {
        &self.listing
    }

    pub fn state(&self) -> &ServiceState {
        &self.state
    }

    /// Whether changes to the active directory are currently being watched.
    pub fn is_watching(&self) -> bool {
        self.watcher.is_armed()
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    fn reload(&mut self, directory: &Path) -> bool {
        match list_directory(directory) {
            Ok(entries) => {
                debug!("Reconciled {} ({} entries)", directory.display(), entries.len());
                self.publish(entries);
                true
            }
            Err(e) => {
                // The subscription died with the directory. Reloads already
                // queued for it are dropped so the failure is reported once.
                self.watcher.release();
                let dropped = self.reload_rx.try_iter().count();
                trace!("Dropped {} reloads for lost watch", dropped);
                let _ = self.fail(e);
                false
            }
        }
    }

    fn publish(&mut self, entries: Vec<DirectoryEntry>) {
        self.listing = entries;
        if let ServiceState::Watching { directory, .. } = &self.state {
            self.sink.listing_changed(directory, &self.listing);
        }
    }

    fn fail(&mut self, err: SnapshotError) -> Result<(), SnapshotError> {
        warn!("{}", err);
        self.sink.report_error(err.title(), &err.to_string());
        Err(err)
    }
}

impl<K: ListingSink, S: EventSource> Drop for DirectorySnapshotService<K, S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
