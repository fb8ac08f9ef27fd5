//! Ordered list of displayed fonts
//!
//! List order is display order. Entries are unique by file path.

use crate::constants::SCANNED_EXTENSIONS;
use crate::error::{FontViewError, FontViewResult};
use crate::store::{has_extension, ExternalPathList, FontStore};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontEntry {
    file_path: PathBuf,
    display_name: String,
}

impl FontEntry {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        let display_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.to_string_lossy().into_owned());
        Self { file_path, display_name }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Whether an entry's file lives in the managed directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Internal,
    External,
}

impl EntryKind {
    pub fn classify(path: &Path, managed_dir: &Path) -> Self {
        if path.parent() == Some(managed_dir) {
            EntryKind::Internal
        } else {
            EntryKind::External
        }
    }

    /// Removing an internal entry deletes the file itself.
    pub fn deletes_file(self) -> bool {
        self == EntryKind::Internal
    }

    pub fn removal_label(self) -> &'static str {
        match self {
            EntryKind::Internal => "Delete font file",
            EntryKind::External => "Remove shortcut",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FontList {
    entries: Vec<FontEntry>,
}

impl FontList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry for `path` unless one already exists. Returns true when added.
    pub fn add_entry(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            debug!("Font path {:?} already listed, skipping", path);
            return false;
        }
        self.entries.push(FontEntry::new(path));
        true
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.position(path).is_some()
    }

    pub fn position(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|entry| entry.file_path == path)
    }

    pub fn get(&self, index: usize) -> Option<&FontEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[FontEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove the entry for `path`.
    ///
    /// With `delete_underlying_file` the file is deleted first, and the entry
    /// stays when that fails. A path that is a member of `external` is also
    /// dropped from it and the list is persisted; a failed save is logged.
    pub fn remove_entry(
        &mut self,
        path: &Path,
        delete_underlying_file: bool,
        external: &mut ExternalPathList,
        store: &FontStore,
    ) -> FontViewResult<Option<FontEntry>> {
        let Some(index) = self.position(path) else {
            debug!("No list entry for {:?}", path);
            return Ok(None);
        };

        if delete_underlying_file {
            fs::remove_file(path).map_err(|source| FontViewError::Deletion {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Deleted font file {:?}", path);
        }

        let entry = self.entries.remove(index);

        if external.remove(path) {
            if let Err(e) = store.save_external_paths(external) {
                warn!("{}", e);
            }
        }
        Ok(Some(entry))
    }
}

/// Font files found directly in the managed directory at startup.
///
/// Only ttf and otf are picked up; collections must be added by hand. Results
/// are grouped by extension in that order, then sorted by name.
pub fn scan_managed_directory(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot scan {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let group = |path: &Path| {
        SCANNED_EXTENSIONS
            .iter()
            .position(|ext| has_extension(path, &[*ext]))
            .unwrap_or(SCANNED_EXTENSIONS.len())
    };

    let mut fonts: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_extension(path, &SCANNED_EXTENSIONS))
        .collect();
    fonts.sort_by(|a, b| group(a).cmp(&group(b)).then_with(|| a.cmp(b)));
    fonts
}
