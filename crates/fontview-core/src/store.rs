//! Managed font directory and the persisted list of external font paths
//!
//! The managed directory (`<app_dir>/fonts`) physically holds installed
//! fonts. Fonts the user merely references from elsewhere are remembered in
//! `saved_paths.json` inside that directory.

use crate::config::ViewerConfig;
use crate::constants::INSTALLABLE_EXTENSIONS;
use crate::error::{FontViewError, FontViewResult};
use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Case-insensitive extension check against `extensions`.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|candidate| ext.eq_ignore_ascii_case(candidate)))
        .unwrap_or(false)
}

/// Whether `path` names a file accepted for install or drop (ttf, otf, ttc).
pub fn is_font_file(path: &Path) -> bool {
    has_extension(path, &INSTALLABLE_EXTENSIONS)
}

/// Ordered set of font paths living outside the managed directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalPathList {
    paths: Vec<PathBuf>,
}

impl ExternalPathList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a sequence, keeping the first occurrence of each path.
    pub fn from_paths<I: IntoIterator<Item = PathBuf>>(paths: I) -> Self {
        let mut list = Self::new();
        for path in paths {
            list.insert(path);
        }
        list
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Append `path` unless already present. Returns true when it was added.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        if self.contains(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    /// Returns true when `path` was a member.
    pub fn remove(&mut self, path: &Path) -> bool {
        let before = self.paths.len();
        self.paths.retain(|p| p != path);
        self.paths.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Result of preparing the managed directory at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagedDir {
    Existing,
    Created { seeded: usize },
}

/// Result of installing one dropped file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The file was copied to this destination.
    Installed(PathBuf),
    /// A same-named file was already present; nothing was written.
    AlreadyInstalled(PathBuf),
}

impl InstallOutcome {
    pub fn destination(&self) -> &Path {
        match self {
            InstallOutcome::Installed(path) | InstallOutcome::AlreadyInstalled(path) => path,
        }
    }
}

/// On-disk side of the viewer: managed directory plus persisted path list.
#[derive(Debug, Clone)]
pub struct FontStore {
    fonts_dir: PathBuf,
    saved_paths_file: PathBuf,
    default_fonts_dir: Option<PathBuf>,
}

impl FontStore {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            fonts_dir: config.fonts_dir(),
            saved_paths_file: config.saved_paths_file(),
            default_fonts_dir: config.default_fonts_dir.clone(),
        }
    }

    pub fn fonts_dir(&self) -> &Path {
        &self.fonts_dir
    }

    pub fn saved_paths_file(&self) -> &Path {
        &self.saved_paths_file
    }

    /// True when `path` sits directly inside the managed directory.
    pub fn is_managed(&self, path: &Path) -> bool {
        path.parent() == Some(self.fonts_dir.as_path())
    }

    /// Read the persisted external paths, dropping entries that no longer exist.
    ///
    /// A missing or corrupt file yields an empty list; startup never fails here.
    pub fn load_external_paths(&self) -> ExternalPathList {
        let contents = match fs::read_to_string(&self.saved_paths_file) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved font paths at {:?}", self.saved_paths_file);
                return ExternalPathList::new();
            }
            Err(e) => {
                warn!("Failed to read {:?}: {}", self.saved_paths_file, e);
                return ExternalPathList::new();
            }
        };

        let paths: Vec<PathBuf> = match serde_json::from_str(&contents) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Ignoring corrupt {:?}: {}", self.saved_paths_file, e);
                return ExternalPathList::new();
            }
        };

        let total = paths.len();
        let list = ExternalPathList::from_paths(paths.into_iter().filter(|p| p.exists()));
        if list.len() != total {
            debug!("Dropped {} stale saved font paths", total - list.len());
        }
        list
    }

    /// Overwrite the persisted list through a temp file and rename.
    pub fn save_external_paths(&self, paths: &ExternalPathList) -> FontViewResult<()> {
        self.write_paths(paths.as_slice())
            .map_err(|source| FontViewError::Persistence {
                path: self.saved_paths_file.clone(),
                source,
            })?;
        debug!("Saved {} font paths to {:?}", paths.len(), self.saved_paths_file);
        Ok(())
    }

    fn write_paths(&self, paths: &[PathBuf]) -> std::io::Result<()> {
        let dir = self.saved_paths_file.parent().unwrap_or(&self.fonts_dir);
        fs::create_dir_all(dir)?;

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut file, formatter);
        paths.serialize(&mut serializer)?;
        file.flush()?;
        file.persist(&self.saved_paths_file)?;
        Ok(())
    }

    /// Create the managed directory if missing, seeding it with bundled fonts.
    ///
    /// Seed copies are best effort: each failure is logged and the rest continue.
    pub fn ensure_managed_directory(&self) -> FontViewResult<ManagedDir> {
        if self.fonts_dir.exists() {
            return Ok(ManagedDir::Existing);
        }

        fs::create_dir_all(&self.fonts_dir).map_err(|source| FontViewError::Persistence {
            path: self.fonts_dir.clone(),
            source,
        })?;
        info!("Created managed font directory {:?}", self.fonts_dir);

        let seeded = match &self.default_fonts_dir {
            Some(dir) => self.seed_from(dir),
            None => 0,
        };
        Ok(ManagedDir::Created { seeded })
    }

    fn seed_from(&self, source_dir: &Path) -> usize {
        let entries = match fs::read_dir(source_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Default fonts unavailable at {:?}: {}", source_dir, e);
                return 0;
            }
        };

        let mut seeded = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || !is_font_file(&path) {
                continue;
            }
            let Some(name) = path.file_name() else { continue };
            match fs::copy(&path, self.fonts_dir.join(name)) {
                Ok(_) => seeded += 1,
                Err(e) => warn!("Failed to copy default font {:?}: {}", path, e),
            }
        }
        seeded
    }

    /// Copy a dropped font into the managed directory.
    ///
    /// An existing file with the same name is never overwritten.
    pub fn install_dropped_file(&self, source: &Path) -> FontViewResult<InstallOutcome> {
        if !is_font_file(source) {
            return Err(FontViewError::UnsupportedFile { path: source.to_path_buf() });
        }
        let name = source
            .file_name()
            .ok_or_else(|| FontViewError::UnsupportedFile { path: source.to_path_buf() })?;

        let destination = self.fonts_dir.join(name);
        if destination.exists() {
            info!("Font {:?} already installed, skipping", name);
            return Ok(InstallOutcome::AlreadyInstalled(destination));
        }

        fs::copy(source, &destination).map_err(|source_err| FontViewError::Install {
            file: source.to_path_buf(),
            source: source_err,
        })?;
        info!("Installed {:?} into {:?}", name, self.fonts_dir);
        Ok(InstallOutcome::Installed(destination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FontStore {
        FontStore::new(&ViewerConfig::for_app_dir(dir.path()))
    }

    #[test]
    fn test_font_extension_is_case_insensitive() {
        assert!(is_font_file(Path::new("/tmp/A.TTF")));
        assert!(is_font_file(Path::new("/tmp/b.Otf")));
        assert!(is_font_file(Path::new("c.ttc")));
        assert!(!is_font_file(Path::new("d.woff2")));
        assert!(!is_font_file(Path::new("ttf")));
    }

    #[test]
    fn test_external_list_keeps_first_occurrence() {
        let list = ExternalPathList::from_paths(vec![
            PathBuf::from("/a.ttf"),
            PathBuf::from("/b.ttf"),
            PathBuf::from("/a.ttf"),
        ]);
        assert_eq!(list.as_slice(), &[PathBuf::from("/a.ttf"), PathBuf::from("/b.ttf")]);
    }

    #[test]
    fn test_missing_saved_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load_external_paths().is_empty());
    }

    #[test]
    fn test_corrupt_saved_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.fonts_dir()).unwrap();
        fs::write(store.saved_paths_file(), "{ not json").unwrap();
        assert!(store.load_external_paths().is_empty());

        fs::write(store.saved_paths_file(), "[1, 2, 3]").unwrap();
        assert!(store.load_external_paths().is_empty());
    }

    #[test]
    fn test_stale_paths_are_dropped_in_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let elsewhere = TempDir::new().unwrap();
        let first = elsewhere.path().join("first.ttf");
        let gone = elsewhere.path().join("gone.otf");
        let last = elsewhere.path().join("last.ttc");
        fs::write(&first, b"x").unwrap();
        fs::write(&last, b"x").unwrap();

        let saved = ExternalPathList::from_paths(vec![first.clone(), gone, last.clone()]);
        store.save_external_paths(&saved).unwrap();

        let loaded = store.load_external_paths();
        assert_eq!(loaded.as_slice(), &[first, last]);
    }

    #[test]
    fn test_saved_file_is_a_json_array_of_strings() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let list = ExternalPathList::from_paths(vec![PathBuf::from("/fonts/x.ttf")]);
        store.save_external_paths(&list).unwrap();

        let raw = fs::read_to_string(store.saved_paths_file()).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, vec!["/fonts/x.ttf".to_string()]);
    }

    #[test]
    fn test_managed_directory_seeded_once() {
        let app = TempDir::new().unwrap();
        let seeds = TempDir::new().unwrap();
        fs::write(seeds.path().join("One.ttf"), b"one").unwrap();
        fs::write(seeds.path().join("Two.OTF"), b"two").unwrap();
        fs::write(seeds.path().join("readme.txt"), b"skip").unwrap();

        let config = ViewerConfig::for_app_dir(app.path()).with_default_fonts_dir(seeds.path());
        let store = FontStore::new(&config);

        assert_eq!(store.ensure_managed_directory().unwrap(), ManagedDir::Created { seeded: 2 });
        assert!(store.fonts_dir().join("One.ttf").exists());
        assert!(!store.fonts_dir().join("readme.txt").exists());
        assert_eq!(store.ensure_managed_directory().unwrap(), ManagedDir::Existing);
    }

    #[test]
    fn test_missing_seed_directory_is_not_fatal() {
        let app = TempDir::new().unwrap();
        let config = ViewerConfig::for_app_dir(app.path())
            .with_default_fonts_dir(app.path().join("nowhere"));
        let store = FontStore::new(&config);
        assert_eq!(store.ensure_managed_directory().unwrap(), ManagedDir::Created { seeded: 0 });
        assert!(store.fonts_dir().is_dir());
    }

    #[test]
    fn test_install_rejects_non_fonts() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let result = store.install_dropped_file(Path::new("/tmp/notes.txt"));
        assert!(matches!(result, Err(FontViewError::UnsupportedFile { .. })));
    }

    #[test]
    fn test_install_copy_failure_reports_install_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.ensure_managed_directory().unwrap();
        let result = store.install_dropped_file(&dir.path().join("missing.ttf"));
        match result {
            Err(e) => assert_eq!(e.kind(), crate::error::FailureKind::InstallFailure),
            Ok(outcome) => panic!("unexpected install: {:?}", outcome),
        }
    }

    #[test]
    fn test_managed_classification() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.is_managed(&store.fonts_dir().join("a.ttf")));
        assert!(!store.is_managed(&dir.path().join("a.ttf")));
        assert!(!store.is_managed(&store.fonts_dir().join("nested").join("a.ttf")));
    }
}
