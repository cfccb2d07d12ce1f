//! Shared helpers for integration tests

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use dirwatch::{DirectoryEntry, DirectorySnapshotService, EventSource, ListingSink};

/// Upper bound on how long a watch backend may take to report a change.
pub const WAKE_LATENCY: Duration = Duration::from_secs(5);

#[derive(Default)]
pub struct RecordingSink {
    pub listings: Vec<(PathBuf, Vec<DirectoryEntry>)>,
    pub errors: Vec<(String, String)>,
}

impl ListingSink for RecordingSink {
    fn listing_changed(&mut self, directory: &Path, entries: &[DirectoryEntry]) {
        self.listings.push((directory.to_path_buf(), entries.to_vec()));
    }

    fn report_error(&mut self, title: &str, message: &str) {
        self.errors.push((title.to_string(), message.to_string()));
    }
}

pub fn names(entries: &[DirectoryEntry]) -> HashSet<String> {
    entries.iter().map(|e| e.name().to_string()).collect()
}

pub fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Pump reload requests until the listing's names equal `expected`.
pub fn wait_for_listing<S: EventSource>(
    service: &mut DirectorySnapshotService<RecordingSink, S>,
    expected: &HashSet<String>,
) -> bool {
    let deadline = Instant::now() + WAKE_LATENCY;
    while Instant::now() < deadline {
        if let Ok(request) = service.reload_requests().recv_timeout(Duration::from_millis(100)) {
            service.process(request);
        }
        if &names(service.listing()) == expected {
            return true;
        }
    }
    false
}
