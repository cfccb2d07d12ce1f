//! Enumeration of a directory's immediate children.

use std::fs;
use std::path::Path;

use tracing::trace;
use walkdir::WalkDir;

use crate::error::SnapshotError;
use crate::types::{DirectoryEntry, EntryKind};

/// List the immediate children of `dir`.
///
/// Order is whatever the platform's directory enumeration yields. Any error
/// while reading fails the whole listing so callers never publish a partial one.
pub fn list_directory(dir: &Path) -> Result<Vec<DirectoryEntry>, SnapshotError> {
    let metadata = fs::metadata(dir).map_err(|source| SnapshotError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(SnapshotError::NotADirectory(dir.to_path_buf()));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(false) {
        let entry = entry?;
        let path = entry.path();

        // Symlinks are classified by their target; dangling ones show up as files.
        let is_dir = if entry.file_type().is_symlink() {
            path.is_dir()
        } else {
            entry.file_type().is_dir()
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        let kind = if is_dir { EntryKind::Directory } else { EntryKind::File };
        entries.push(DirectoryEntry::new(name, path, kind));
    }

    trace!("Listed {} entries in {}", entries.len(), dir.display());
    Ok(entries)
}
