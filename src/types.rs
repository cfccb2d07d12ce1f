use std::path::{Path, PathBuf};

/// What a directory entry points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

/// One child of the active directory, as shown in the listing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DirectoryEntry {
    name: String,
    path: PathBuf,
    kind: EntryKind,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Kind of filesystem change reported by a watch subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Create,
    Modify,
    Remove,
    /// The backend lost track (error, queue overflow). Forces a full reload.
    Rescan,
}

#[derive(Clone, Debug)]
pub struct ChangeNotice {
    pub kind: ChangeKind,
    pub paths: Vec<PathBuf>,
}

impl ChangeNotice {
    pub fn rescan() -> Self {
        Self {
            kind: ChangeKind::Rescan,
            paths: Vec::new(),
        }
    }
}

/// Posted from the watch thread to whoever owns the listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReloadRequest {
    pub generation: u64,
    pub directory: PathBuf,
}
