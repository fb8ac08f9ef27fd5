// src/config.rs
use crate::constants::{
    FONTS_DIR_NAME, INITIAL_FONT_SIZE, MAX_FONT_SIZE, MIN_FONT_SIZE, PLACEHOLDER_TEXT,
    PREVIEW_MARGIN, SAVED_PATHS_FILE, TEXT_COLOR,
};
use crate::preview::Rgba;
use std::path::{Path, PathBuf};

/// Canonical form of an existing directory, else its absolute form.
fn absolute_dir(dir: PathBuf) -> PathBuf {
    dir.canonicalize()
        .or_else(|_| std::path::absolute(&dir))
        .unwrap_or(dir)
}

#[derive(Clone, Debug)]
pub struct ViewerConfig {
    /// Directory that holds the managed `fonts/` folder.
    pub app_dir: PathBuf,
    /// Bundled fonts copied into a freshly created managed directory.
    pub default_fonts_dir: Option<PathBuf>,
    pub initial_font_size: u32,
    pub placeholder_text: String,
    pub preview_margin: f32,
    pub text_color: Rgba,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            app_dir: absolute_dir(PathBuf::from(".")),
            default_fonts_dir: None,
            initial_font_size: INITIAL_FONT_SIZE,
            placeholder_text: PLACEHOLDER_TEXT.to_string(),
            preview_margin: PREVIEW_MARGIN,
            text_color: TEXT_COLOR,
        }
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_app_dir(app_dir: impl Into<PathBuf>) -> Self {
        Self::default().with_app_dir(app_dir)
    }

    /// The directory is stored absolute, so managed paths compare equal to
    /// the absolute paths handed back by file dialogs.
    pub fn with_app_dir(mut self, app_dir: impl Into<PathBuf>) -> Self {
        self.app_dir = absolute_dir(app_dir.into());
        self
    }

    pub fn with_default_fonts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.default_fonts_dir = Some(dir.into());
        self
    }

    pub fn with_initial_font_size(mut self, size: u32) -> Self {
        self.initial_font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self
    }

    pub fn with_placeholder_text(mut self, text: &str) -> Self {
        self.placeholder_text = text.to_string();
        self
    }

    pub fn with_preview_margin(mut self, margin: f32) -> Self {
        self.preview_margin = margin.max(0.0);
        self
    }

    pub fn with_text_color(mut self, color: Rgba) -> Self {
        self.text_color = color;
        self
    }

    /// `<app_dir>/fonts`
    pub fn fonts_dir(&self) -> PathBuf {
        self.app_dir.join(FONTS_DIR_NAME)
    }

    /// `<app_dir>/fonts/saved_paths.json`
    pub fn saved_paths_file(&self) -> PathBuf {
        self.fonts_dir().join(SAVED_PATHS_FILE)
    }

    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_paths() {
        let config = ViewerConfig::for_app_dir("/opt/fontview");
        assert_eq!(config.fonts_dir(), PathBuf::from("/opt/fontview/fonts"));
        assert_eq!(
            config.saved_paths_file(),
            PathBuf::from("/opt/fontview/fonts/saved_paths.json")
        );
    }

    #[test]
    fn test_relative_app_dir_is_made_absolute() {
        let config = ViewerConfig::for_app_dir("some/relative/app");
        assert!(config.app_dir().is_absolute());
        assert!(config.app_dir().ends_with("some/relative/app"));
        assert!(config.fonts_dir().is_absolute());
        assert!(ViewerConfig::default().app_dir().is_absolute());
    }

    #[test]
    fn test_existing_app_dir_is_canonical() {
        let cwd = std::env::current_dir().unwrap();
        let config = ViewerConfig::for_app_dir("./src/..");
        assert_eq!(config.app_dir(), cwd.canonicalize().unwrap());
    }

    #[test]
    fn test_initial_size_is_clamped() {
        assert_eq!(ViewerConfig::new().with_initial_font_size(2).initial_font_size, MIN_FONT_SIZE);
        assert_eq!(ViewerConfig::new().with_initial_font_size(999).initial_font_size, MAX_FONT_SIZE);
        assert_eq!(ViewerConfig::new().initial_font_size, 32);
    }
}
