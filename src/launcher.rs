use std::path::Path;

use tracing::info;

use crate::error::OpenError;
use crate::types::DirectoryEntry;

/// Open a file with the system's default application.
pub fn open_entry(entry: &DirectoryEntry) -> Result<(), OpenError> {
    if entry.is_dir() {
        return Err(OpenError::NotAFile(entry.path().to_path_buf()));
    }
    open_path(entry.path())
}

pub fn open_path(path: &Path) -> Result<(), OpenError> {
    if !path.is_file() {
        return Err(OpenError::NotAFile(path.to_path_buf()));
    }
    opener::open(path).map_err(|source| OpenError::Launch {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Opened {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryKind;
    use tempfile::TempDir;

    #[test]
    fn test_directories_are_not_opened() {
        let temp_dir = TempDir::new().unwrap();
        let entry = DirectoryEntry::new("sub", temp_dir.path(), EntryKind::Directory);

        let err = open_entry(&entry).unwrap_err();
        assert!(matches!(err, OpenError::NotAFile(_)));
        assert_eq!(err.title(), "Cannot open file");
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let err = open_path(&temp_dir.path().join("vanished.txt")).unwrap_err();
        assert!(matches!(err, OpenError::NotAFile(_)));
    }
}
