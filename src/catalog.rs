//! The set of directories images can be moved into.
//!
//! A [`DestinationSet`] is seeded once, either from an explicit list or by
//! scanning the subdirectories of a target, and grows during the session when
//! the user types a directory name that is not on the menu. Paths are kept in
//! insertion order and never duplicated. The menu shown at the prompt is
//! rebuilt whenever a destination is added.

use crate::config::CatalogMode;
use crate::error::{SortError, SortResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Ordered destinations, the prompt menu and pending warnings.
#[derive(Debug, Default)]
pub struct DestinationSet {
    directories: Vec<PathBuf>,
    menu: String,
    warnings: Vec<String>,
}

impl DestinationSet {
    /// Builds the initial set for the given mode.
    ///
    /// `allow_empty` permits a scan target without subdirectories, which is
    /// only useful when new directories can be created during the session.
    pub fn from_mode(mode: &CatalogMode, allow_empty: bool) -> SortResult<Self> {
        match mode {
            CatalogMode::Explicit(paths) => Self::from_explicit(paths),
            CatalogMode::Scan(target) => {
                let set = Self::from_scan(target)?;
                if set.is_empty() && !allow_empty {
                    return Err(SortError::EmptyScanTarget(target.clone()));
                }
                Ok(set)
            }
        }
    }

    /// Uses every path as a destination, creating the ones that are missing.
    ///
    /// Directories that already exist are recorded as warnings. Repeated
    /// paths are only added once.
    ///
    /// # Errors
    ///
    /// Fails if a directory cannot be created or a path names a file.
    pub fn from_explicit(paths: &[PathBuf]) -> SortResult<Self> {
        let mut set = Self::default();
        for path in paths {
            if set.position(path).is_some() {
                continue;
            }
            set.ensure_directory(path)?;
            set.directories.push(path.clone());
        }
        set.rebuild_menu();
        Ok(set)
    }

    /// Uses every direct subdirectory of `target` as a destination, ordered
    /// by name. Other entries are ignored and nothing is created.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::ReadScanTarget`] if `target` cannot be listed.
    pub fn from_scan(target: &Path) -> SortResult<Self> {
        let read_error = |e| SortError::ReadScanTarget {
            path: target.to_path_buf(),
            source: e,
        };

        let mut directories = Vec::new();
        for entry in fs::read_dir(target).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            if entry.file_type().map_err(read_error)?.is_dir() {
                directories.push(entry.path());
            }
        }
        directories.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let mut set = Self {
            directories,
            ..Self::default()
        };
        set.rebuild_menu();
        Ok(set)
    }

    /// Resolves a typed directory name to a menu index (0-based).
    ///
    /// A destination with an equal path is reused. Otherwise the directory is
    /// created if needed and appended to the end of the set.
    pub fn find_or_create(&mut self, name: &str) -> SortResult<usize> {
        let path = PathBuf::from(name);
        if let Some(index) = self.position(&path) {
            return Ok(index);
        }

        self.ensure_directory(&path)?;
        self.directories.push(path);
        self.rebuild_menu();
        tracing::debug!("added destination {}", name);
        Ok(self.directories.len() - 1)
    }

    /// Destination at a 0-based index.
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.directories.get(index).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    /// All destinations in menu order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Prompt text listing every destination as `[n] path`.
    pub fn menu(&self) -> &str {
        &self.menu
    }

    /// Queues a warning for the next prompt.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Warnings not yet shown.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Hands out pending warnings and clears them.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    fn position(&self, path: &Path) -> Option<usize> {
        self.directories.iter().position(|d| d == path)
    }

    fn ensure_directory(&mut self, path: &Path) -> SortResult<()> {
        if path.is_dir() {
            self.warn(format!(
                "directory {} already exists, continuing without an error",
                path.display()
            ));
            return Ok(());
        }
        if path.exists() {
            return Err(SortError::NotADirectory(path.to_path_buf()));
        }

        fs::create_dir_all(path).map_err(|e| SortError::CreateDirectory {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn rebuild_menu(&mut self) {
        let mut menu = String::from("where do you want to move the image?\n");
        for (i, directory) in self.directories.iter().enumerate() {
            menu.push_str(&format!("[{}] {}\n", i + 1, directory.display()));
        }
        self.menu = menu;
    }
}
