use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while (re)arming a directory watch.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("Cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to watch {path}: {source}")]
    Subscribe {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("Failed to start watch thread: {0}")]
    Spawn(#[source] io::Error),
}

/// Errors surfaced by the snapshot service to the display layer.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Cannot read directory {path}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("Live updates unavailable for {path}: {source}")]
    WatchArmFailure {
        path: PathBuf,
        #[source]
        source: WatchError,
    },

    #[error("Directory service has been shut down")]
    Stopped,
}

impl SnapshotError {
    /// Short title for an error dialog.
    pub fn title(&self) -> &'static str {
        match self {
            Self::DirectoryUnreadable { .. } | Self::NotADirectory(_) => "Cannot open folder",
            Self::WatchArmFailure { .. } => "Cannot watch folder",
            Self::Stopped => "Shutting down",
        }
    }
}

impl From<walkdir::Error> for SnapshotError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
        Self::DirectoryUnreadable { path, source }
    }
}

/// Errors from opening a file with the system's default handler.
#[derive(Error, Debug)]
pub enum OpenError {
    #[error("{0} is not a regular file")]
    NotAFile(PathBuf),

    #[error("Failed to open {path}: {source}")]
    Launch {
        path: PathBuf,
        #[source]
        source: opener::OpenError,
    },
}

impl OpenError {
    pub fn title(&self) -> &'static str {
        "Cannot open file"
    }
}
