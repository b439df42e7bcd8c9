//! File events from directory watching.

use std::fs::Metadata;
use std::path::{Path, PathBuf};

use bitflags::bitflags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

bitflags! {
    /// Set of change kinds a watch reports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ChangeMask: u8 {
        const CREATED = 0b0001;
        const DELETED = 0b0010;
        const RENAMED = 0b0100;
        const MODIFIED = 0b1000;
    }
}

impl Default for ChangeMask {
    fn default() -> Self {
        Self::CREATED | Self::DELETED | Self::RENAMED
    }
}

/// Kind of file event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Entry was created.
    Created,

    /// Entry was deleted.
    Deleted,

    /// Entry was renamed (either side of the rename).
    Renamed,

    /// Entry contents or metadata changed.
    Modified,
}

impl ChangeKind {
    /// Map a notify event kind; access and unclassified events map to `None`.
    pub fn from_notify(kind: &notify::EventKind) -> Option<Self> {
        use notify::event::ModifyKind;

        match kind {
            notify::EventKind::Create(_) => Some(Self::Created),
            notify::EventKind::Remove(_) => Some(Self::Deleted),
            notify::EventKind::Modify(ModifyKind::Name(_)) => Some(Self::Renamed),
            notify::EventKind::Modify(_) => Some(Self::Modified),
            _ => None,
        }
    }

    /// The mask bit for this kind.
    pub fn mask(self) -> ChangeMask {
        match self {
            Self::Created => ChangeMask::CREATED,
            Self::Deleted => ChangeMask::DELETED,
            Self::Renamed => ChangeMask::RENAMED,
            Self::Modified => ChangeMask::MODIFIED,
        }
    }
}

/// A resolved description of the entry an event is about.
///
/// Captured when the event is dispatched. The filesystem may have moved on
/// by the time a callback looks at it; use [`FileEntry::still_exists`] to
/// re-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Full path to the entry.
    pub path: PathBuf,

    /// Last path component.
    pub name: String,

    /// Whether the entry existed when resolved.
    pub exists: bool,

    /// Whether the entry is a regular file.
    pub is_file: bool,

    /// Whether the entry is a directory.
    pub is_directory: bool,

    /// Whether the entry is hidden (dot-prefixed, or the platform hidden attribute).
    pub is_hidden: bool,

    /// When the entry was resolved.
    pub observed_at: DateTime<Utc>,
}

impl FileEntry {
    /// Describe the entry at `path`.
    pub fn resolve(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let metadata = std::fs::symlink_metadata(&path).ok();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            is_hidden: is_hidden(&name, metadata.as_ref()),
            exists: metadata.is_some(),
            is_file: path.is_file(),
            is_directory: path.is_dir(),
            name,
            path,
            observed_at: Utc::now(),
        }
    }

    /// Re-check existence against the filesystem.
    pub fn still_exists(&self) -> bool {
        self.path.exists()
    }
}

/// Whether an entry named `name` with `metadata` is hidden.
pub fn is_hidden(name: &str, metadata: Option<&Metadata>) -> bool {
    name.starts_with('.') || metadata.is_some_and(hidden_attribute)
}

/// Whether `path` itself is hidden.
pub fn is_hidden_path(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    is_hidden(&name, std::fs::symlink_metadata(path).ok().as_ref())
}

/// Whether `path` or any directory between `root` and it is hidden.
///
/// Paths outside `root` only have their own name checked.
pub fn is_hidden_under(root: &Path, path: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return is_hidden_path(path);
    };
    let mut current = root.to_path_buf();
    relative.components().any(|component| {
        current.push(component);
        is_hidden_path(&current)
    })
}

#[cfg(windows)]
fn hidden_attribute(metadata: &Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(not(windows))]
fn hidden_attribute(_metadata: &Metadata) -> bool {
    false
}

/// A file system event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEvent {
    /// The kind of event.
    pub kind: ChangeKind,

    /// The affected entry.
    pub entry: FileEntry,
}

impl FileEvent {
    /// Create a new file event.
    pub fn new(kind: ChangeKind, entry: FileEntry) -> Self {
        Self { kind, entry }
    }

    /// Resolve `path` and wrap it in an event.
    pub fn for_path(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        Self::new(kind, FileEntry::resolve(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_notify_kind_mapping() {
        assert_eq!(
            ChangeKind::from_notify(&notify::EventKind::Create(CreateKind::File)),
            Some(ChangeKind::Created)
        );
        assert_eq!(
            ChangeKind::from_notify(&notify::EventKind::Remove(RemoveKind::Any)),
            Some(ChangeKind::Deleted)
        );
        assert_eq!(
            ChangeKind::from_notify(&notify::EventKind::Modify(ModifyKind::Name(
                RenameMode::Both
            ))),
            Some(ChangeKind::Renamed)
        );
        assert_eq!(
            ChangeKind::from_notify(&notify::EventKind::Modify(ModifyKind::Any)),
            Some(ChangeKind::Modified)
        );
        assert_eq!(ChangeKind::from_notify(&notify::EventKind::Any), None);
    }

    #[test]
    fn test_mask_contains_kind() {
        let mask = ChangeMask::default();
        assert!(mask.contains(ChangeKind::Renamed.mask()));
        assert!(!mask.contains(ChangeKind::Modified.mask()));
    }

    #[test]
    fn test_entry_resolution() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Shows Desktop.lnk");
        std::fs::write(&path, "").unwrap();

        let entry = FileEntry::resolve(&path);
        assert!(entry.exists);
        assert!(entry.is_file);
        assert!(!entry.is_hidden);
        assert_eq!(entry.name, "Shows Desktop.lnk");

        std::fs::remove_file(&path).unwrap();
        assert!(entry.exists);
        assert!(!entry.still_exists());
    }

    #[test]
    fn test_dot_files_hidden() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".cache");
        std::fs::write(&path, "").unwrap();

        assert!(FileEntry::resolve(&path).is_hidden);
        assert!(is_hidden_path(&path));
    }

    #[test]
    fn test_hidden_ancestors_below_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        assert!(is_hidden_under(root, &root.join(".git").join("HEAD")));
        assert!(is_hidden_under(root, &root.join("a").join(".b").join("c")));
        assert!(!is_hidden_under(root, &root.join("tools").join("run.sh")));
        assert!(!is_hidden_under(&root.join(".config"), &root.join(".config").join("app")));
    }

    #[test]
    fn test_missing_entry() {
        let entry = FileEntry::resolve("/nonexistent/azimuth/entry.txt");
        assert!(!entry.exists);
        assert!(!entry.is_file);
        assert!(!entry.is_hidden);
    }
}
