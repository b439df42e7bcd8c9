//! Directory enumeration.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::ScanConfig;
use crate::error::{Result, WatcherError};
use crate::event::is_hidden;

/// Lists the files a directory currently holds.
#[derive(Debug, Clone, Default)]
pub struct DirectoryScanner {
    config: ScanConfig,
}

impl DirectoryScanner {
    /// Create a scanner.
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// The scan configuration.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Regular files under `root`, sorted by name within each directory.
    ///
    /// Symlinks to files count as files. Unreadable entries and dangling
    /// links are skipped.
    pub fn files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(WatcherError::DirectoryNotFound(root.display().to_string()));
        }

        let include_hidden = self.config.include_hidden;
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(self.config.max_depth.max(1))
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| include_hidden || e.depth() == 0 || !hidden_entry(e));

        let mut files = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) if is_file_entry(&entry) => files.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => debug!("Skipping unreadable entry under {}: {e}", root.display()),
            }
        }

        debug!("Scanned {} files in {}", files.len(), root.display());
        Ok(files)
    }
}

fn is_file_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn hidden_entry(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    is_hidden(&name, entry.metadata().ok().as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_lists_immediate_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("b.lnk"), "").unwrap();
        std::fs::write(temp_dir.path().join("a.lnk"), "").unwrap();
        std::fs::write(temp_dir.path().join(".secret"), "").unwrap();
        std::fs::create_dir(temp_dir.path().join("nested")).unwrap();
        std::fs::write(temp_dir.path().join("nested").join("c.lnk"), "").unwrap();

        let files = DirectoryScanner::default().files(temp_dir.path()).unwrap();
        assert_eq!(names(&files), vec!["a.lnk", "b.lnk"]);
    }

    #[test]
    fn test_deeper_scan_skips_hidden_directories() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("nested")).unwrap();
        std::fs::write(temp_dir.path().join("nested").join("c.lnk"), "").unwrap();
        std::fs::create_dir(temp_dir.path().join(".git")).unwrap();
        std::fs::write(temp_dir.path().join(".git").join("HEAD"), "").unwrap();

        let scanner = DirectoryScanner::new(ScanConfig::new().with_max_depth(2));
        let files = scanner.files(temp_dir.path()).unwrap();
        assert_eq!(names(&files), vec!["c.lnk"]);
    }

    #[test]
    fn test_include_hidden() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(".secret"), "").unwrap();

        let scanner = DirectoryScanner::new(ScanConfig::new().include_hidden());
        let files = scanner.files(temp_dir.path()).unwrap();
        assert_eq!(names(&files), vec![".secret"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_listed() {
        let temp_dir = TempDir::new().unwrap();
        let targets = TempDir::new().unwrap();
        std::fs::write(targets.path().join("firefox"), "").unwrap();
        std::fs::create_dir(targets.path().join("bin")).unwrap();

        let root = temp_dir.path();
        std::fs::write(root.join("Plain.lnk"), "").unwrap();
        std::os::unix::fs::symlink(targets.path().join("firefox"), root.join("Firefox")).unwrap();
        std::os::unix::fs::symlink(targets.path().join("bin"), root.join("bin")).unwrap();
        std::os::unix::fs::symlink(targets.path().join("missing"), root.join("Dangling")).unwrap();

        let files = DirectoryScanner::default().files(root).unwrap();
        assert_eq!(names(&files), vec!["Firefox", "Plain.lnk"]);
    }

    #[test]
    fn test_missing_root() {
        let result = DirectoryScanner::default().files(Path::new("/nonexistent/path/12345"));
        assert!(matches!(result, Err(WatcherError::DirectoryNotFound(_))));
    }
}
