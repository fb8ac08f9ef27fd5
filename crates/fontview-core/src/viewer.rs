//! Application state and the handlers the shell calls for each gesture

use crate::config::ViewerConfig;
use crate::constants::REFERENCE_POINT_SIZE;
use crate::error::{FontViewError, FontViewResult};
use crate::font::FontRegistry;
use crate::list::{scan_managed_directory, EntryKind, FontEntry, FontList};
use crate::preview::{PreviewImage, PreviewRenderer, PreviewState, RenderTarget};
use crate::store::{is_font_file, ExternalPathList, FontStore, InstallOutcome};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Everything the info panel shows for the selected font
#[derive(Debug, Clone, PartialEq)]
pub struct FontDetails {
    pub family: String,
    pub style: String,
    pub weight: u16,
    pub italic: bool,
    pub path: PathBuf,
    pub file_size_bytes: Option<u64>,
}

impl FontDetails {
    pub fn file_size_label(&self) -> String {
        match self.file_size_bytes {
            Some(bytes) => format!("{:.1} KB", bytes as f64 / 1024.0),
            None => "unknown size".to_string(),
        }
    }

    pub fn italic_label(&self) -> &'static str {
        if self.italic {
            "yes"
        } else {
            "no"
        }
    }
}

/// Per-file result of a drop
#[derive(Debug)]
pub enum DropOutcome {
    /// Copied into the managed directory and listed.
    Installed(PathBuf),
    /// Same-named file already in the managed directory; left untouched.
    AlreadyInstalled(PathBuf),
    /// Not a ttf/otf/ttc file.
    Ignored(PathBuf),
    Failed(FontViewError),
}

/// What the shell needs to offer removal of an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalPrompt {
    pub kind: EntryKind,
    pub label: &'static str,
    pub needs_confirmation: bool,
    pub file_name: String,
}

/// Top-level controller owning all core state.
///
/// Single owner, driven from the UI thread: every method corresponds to one
/// user gesture.
pub struct FontViewer {
    store: FontStore,
    list: FontList,
    external: ExternalPathList,
    registry: FontRegistry,
    renderer: PreviewRenderer,
    preview: PreviewState,
}

impl FontViewer {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            store: FontStore::new(config),
            list: FontList::new(),
            external: ExternalPathList::new(),
            registry: FontRegistry::new(),
            renderer: PreviewRenderer::new(config),
            preview: PreviewState::new(config.initial_font_size),
        }
    }

    /// Prepare the managed directory, then list its fonts followed by the saved external ones.
    pub fn startup(config: &ViewerConfig) -> Self {
        let mut viewer = Self::new(config);
        if let Err(e) = viewer.store.ensure_managed_directory() {
            warn!("{}", e);
        }
        viewer.external = viewer.store.load_external_paths();

        for path in scan_managed_directory(viewer.store.fonts_dir()) {
            viewer.list.add_entry(path);
        }
        for path in viewer.external.as_slice() {
            viewer.list.add_entry(path.clone());
        }
        info!("Listed {} fonts", viewer.list.len());
        viewer
    }

    pub fn store(&self) -> &FontStore {
        &self.store
    }

    pub fn entries(&self) -> &[FontEntry] {
        self.list.entries()
    }

    pub fn external_paths(&self) -> &ExternalPathList {
        &self.external
    }

    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    pub fn preview_state(&self) -> &PreviewState {
        &self.preview
    }

    pub fn classify(&self, path: &Path) -> EntryKind {
        EntryKind::classify(path, self.store.fonts_dir())
    }

    /// Add `path` to the list; a no-op when already listed.
    pub fn add_entry(&mut self, path: impl Into<PathBuf>) -> bool {
        self.list.add_entry(path)
    }

    /// Files picked in the "add font" dialog.
    ///
    /// Managed files are only listed. Others are remembered as external
    /// references, and the reference list is persisted once for the batch.
    pub fn add_files_from_dialog<I>(&mut self, paths: I) -> FontViewResult<Vec<PathBuf>>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut added = Vec::new();
        for path in paths {
            if self.store.is_managed(&path) {
                if self.list.add_entry(path.clone()) {
                    added.push(path);
                }
                continue;
            }
            if self.external.insert(path.clone()) && self.list.add_entry(path.clone()) {
                added.push(path);
            }
        }
        self.store.save_external_paths(&self.external)?;
        Ok(added)
    }

    /// Install each dropped file into the managed directory.
    ///
    /// Failures are reported per file and never stop the rest of the batch.
    pub fn install_dropped_files<I>(&mut self, paths: I) -> Vec<DropOutcome>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        paths
            .into_iter()
            .map(|source| {
                if !is_font_file(&source) {
                    debug!("Ignoring dropped non-font {:?}", source);
                    return DropOutcome::Ignored(source);
                }
                match self.store.install_dropped_file(&source) {
                    Ok(InstallOutcome::Installed(destination)) => {
                        self.list.add_entry(destination.clone());
                        DropOutcome::Installed(destination)
                    }
                    Ok(InstallOutcome::AlreadyInstalled(destination)) => {
                        DropOutcome::AlreadyInstalled(destination)
                    }
                    Err(e) => {
                        warn!("{}", e);
                        DropOutcome::Failed(e)
                    }
                }
            })
            .collect()
    }

    /// Make `path` the active font and describe it.
    ///
    /// The previous registration is always released first. On any failure
    /// no registration stays live and no family stays active.
    pub fn select_font(&mut self, path: &Path) -> FontViewResult<FontDetails> {
        self.renderer.forget_font();
        self.preview.set_active_family(None);

        let family = self.registry.register(path)?.family;
        let style = self.registry.default_style(&family);
        let metrics = match self
            .registry
            .query_style_metrics(&family, &style, REFERENCE_POINT_SIZE)
        {
            Ok(metrics) => metrics,
            Err(e) => {
                self.registry.release_active();
                return Err(e);
            }
        };

        self.preview.set_active_family(Some(family.clone()));
        Ok(FontDetails {
            family,
            style,
            weight: metrics.weight,
            italic: metrics.italic,
            path: path.to_path_buf(),
            file_size_bytes: std::fs::metadata(path).ok().map(|meta| meta.len()),
        })
    }

    pub fn set_preview_text(&mut self, text: &str) {
        self.preview.set_preview_text(text);
    }

    /// Store the slider value, clamped to its range.
    pub fn set_font_size(&mut self, size: u32) -> u32 {
        self.preview.set_font_size(size)
    }

    /// Rasterize the current preview, or `None` when no font is active.
    pub fn render_preview(&mut self, target: RenderTarget) -> Option<FontViewResult<PreviewImage>> {
        let family = self.preview.active_family()?.to_string();
        Some(self.renderer.render(
            &self.registry,
            &family,
            self.preview.font_size(),
            self.preview.preview_text(),
            target,
        ))
    }

    pub fn removal_prompt(&self, path: &Path) -> RemovalPrompt {
        let kind = self.classify(path);
        RemovalPrompt {
            kind,
            label: kind.removal_label(),
            needs_confirmation: kind.deletes_file(),
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// Remove an entry: internal files are deleted from disk, external ones only unlisted.
    pub fn remove_entry(&mut self, path: &Path) -> FontViewResult<Option<FontEntry>> {
        let delete_file = self.classify(path).deletes_file();
        self.list
            .remove_entry(path, delete_file, &mut self.external, &self.store)
    }

    /// Release the active registration.
    pub fn shutdown(&mut self) {
        self.renderer.forget_font();
        if let Some(handle) = self.registry.release_active() {
            debug!("Released {:?} on shutdown", handle);
        }
        self.preview.set_active_family(None);
    }
}

impl Drop for FontViewer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use crate::fixtures::{self, DEJAVU};

    #[test]
    fn test_details_labels() {
        let mut details = FontDetails {
            family: "F".into(),
            style: "Book".into(),
            weight: 400,
            italic: false,
            path: PathBuf::from("/f.ttf"),
            file_size_bytes: Some(1536),
        };
        assert_eq!(details.file_size_label(), "1.5 KB");
        assert_eq!(details.italic_label(), "no");
        details.file_size_bytes = None;
        assert_eq!(details.file_size_label(), "unknown size");
    }

    #[test]
    fn test_select_font_reports_details() {
        let app = TempDir::new().unwrap();
        let mut viewer = FontViewer::startup(&ViewerConfig::for_app_dir(app.path()));
        let details = viewer.select_font(Path::new(DEJAVU)).unwrap();

        assert_eq!(details.family, "DejaVu Sans");
        assert_eq!(details.style, "Book");
        assert_eq!(details.weight, 400);
        assert!(!details.italic);
        assert_eq!(details.file_size_bytes, Some(fs::metadata(DEJAVU).unwrap().len()));
        assert_eq!(viewer.preview_state().active_family(), Some("DejaVu Sans"));
    }

    #[test]
    fn test_failed_selection_clears_active_family() {
        let app = TempDir::new().unwrap();
        let bogus = app.path().join("bogus.otf");
        fs::write(&bogus, b"nope").unwrap();

        let mut viewer = FontViewer::startup(&ViewerConfig::for_app_dir(app.path()));
        viewer.select_font(Path::new(DEJAVU)).unwrap();
        let err = viewer.select_font(&bogus).unwrap_err();

        assert_eq!(err.kind(), crate::error::FailureKind::UnreadableFont);
        assert_eq!(viewer.preview_state().active_family(), None);
        assert_eq!(viewer.registry().live_registrations(), 0);
        assert!(viewer.render_preview(RenderTarget::new(100.0, 100.0, 1.0)).is_none());
    }

    #[test]
    fn test_switch_to_family_with_outer_spaces() {
        let app = TempDir::new().unwrap();
        let spaced = fixtures::dejavu_with_family(app.path(), "Spaced.ttf", " ejaVu Sans");

        let mut viewer = FontViewer::startup(&ViewerConfig::for_app_dir(app.path()));
        viewer.select_font(Path::new(DEJAVU)).unwrap();
        let details = viewer.select_font(&spaced).unwrap();

        assert_eq!(details.family, " ejaVu Sans");
        assert_eq!(viewer.preview_state().active_family(), Some(" ejaVu Sans"));
        assert_eq!(viewer.registry().live_registrations(), 1);
        let image = viewer.render_preview(RenderTarget::new(200.0, 100.0, 1.0)).unwrap();
        assert!(image.is_ok());
    }

    #[test]
    fn test_failed_selection_after_blank_family_leaves_nothing_live() {
        let app = TempDir::new().unwrap();
        let blank = fixtures::dejavu_with_family(app.path(), "Blank.ttf", "           ");

        let mut viewer = FontViewer::startup(&ViewerConfig::for_app_dir(app.path()));
        viewer.select_font(Path::new(DEJAVU)).unwrap();
        let err = viewer.select_font(&blank).unwrap_err();

        assert_eq!(err.kind(), crate::error::FailureKind::NoFamilyName);
        assert_eq!(viewer.preview_state().active_family(), None);
        assert_eq!(viewer.registry().live_registrations(), 0);
        assert_eq!(viewer.registry().loaded_face_count(), 0);
        assert!(viewer.render_preview(RenderTarget::new(100.0, 100.0, 1.0)).is_none());
    }

    #[test]
    fn test_preview_follows_text_and_size() {
        let app = TempDir::new().unwrap();
        let mut viewer = FontViewer::startup(&ViewerConfig::for_app_dir(app.path()));
        assert!(viewer.render_preview(RenderTarget::new(200.0, 100.0, 1.0)).is_none());

        viewer.select_font(Path::new(DEJAVU)).unwrap();
        viewer.set_preview_text("Sphinx");
        assert_eq!(viewer.set_font_size(500), 300);
        assert_eq!(viewer.set_font_size(48), 48);

        let image = viewer
            .render_preview(RenderTarget::new(400.0, 200.0, 1.0))
            .unwrap()
            .unwrap();
        assert!(!image.is_blank());
    }

    #[test]
    fn test_removal_prompt_wording() {
        let app = TempDir::new().unwrap();
        let viewer = FontViewer::new(&ViewerConfig::for_app_dir(app.path()));

        let internal = viewer.removal_prompt(&viewer.store().fonts_dir().join("A.ttf"));
        assert_eq!(internal.kind, EntryKind::Internal);
        assert!(internal.needs_confirmation);
        assert_eq!(internal.file_name, "A.ttf");

        let external = viewer.removal_prompt(Path::new("/home/someone/B.otf"));
        assert_eq!(external.label, "Remove shortcut");
        assert!(!external.needs_confirmation);
    }

    #[test]
    fn test_shutdown_releases_registration() {
        let app = TempDir::new().unwrap();
        let mut viewer = FontViewer::startup(&ViewerConfig::for_app_dir(app.path()));
        viewer.select_font(Path::new(DEJAVU)).unwrap();
        assert_eq!(viewer.registry().live_registrations(), 1);
        viewer.shutdown();
        assert_eq!(viewer.registry().live_registrations(), 0);
        assert_eq!(viewer.registry().loaded_face_count(), 0);
    }
}
