//! Command line interface

use anyhow::{bail, Context, Result};
use clap::Parser;
use fontview_core::constants::DEFAULT_FONTS_DIR_NAME;
use fontview_core::ViewerConfig;
use std::path::{Path, PathBuf};

/// Source tree copy of the bundled fonts, used when none ship next to the binary.
const SOURCE_DEFAULT_FONTS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/default_fonts");

/// Fontview CLI arguments
///
/// Examples:
///   fontview                              # Fonts live next to the executable
///   fontview --app-dir ~/.local/fontview  # Keep the managed fonts elsewhere
///   fontview --log-filter debug           # Verbose logging
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "fontview",
    version,
    about = "Preview local font files in real time"
)]
pub struct CliArgs {
    /// Directory holding the managed `fonts/` folder
    #[clap(long = "app-dir", help = "Application directory (default: next to the executable)")]
    pub app_dir: Option<PathBuf>,

    /// Fonts copied into a freshly created managed folder
    #[clap(long = "default-fonts", help = "Directory of fonts to seed a new managed folder with")]
    pub default_fonts: Option<PathBuf>,

    /// Overrides RUST_LOG
    #[clap(long = "log-filter", help = "Tracing filter, e.g. `info` or `fontview_core=debug`")]
    pub log_filter: Option<String>,
}

impl CliArgs {
    /// Reject directories given explicitly that do not exist.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.default_fonts {
            if !dir.is_dir() {
                bail!("Default fonts directory does not exist: {}", dir.display());
            }
        }
        if let Some(dir) = &self.app_dir {
            if dir.exists() && !dir.is_dir() {
                bail!("Application directory is not a directory: {}", dir.display());
            }
        }
        Ok(())
    }

    /// Absolute application directory. An explicit `--app-dir` is created when missing.
    pub fn resolve_app_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.app_dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create application directory {}", dir.display()))?;
            return dir
                .canonicalize()
                .with_context(|| format!("Cannot resolve application directory {}", dir.display()));
        }
        let exe = std::env::current_exe().context("Cannot locate the running executable")?;
        exe.parent()
            .map(Path::to_path_buf)
            .context("Executable has no parent directory")
    }

    pub fn to_config(&self) -> Result<ViewerConfig> {
        let app_dir = self.resolve_app_dir()?;
        let config = ViewerConfig::for_app_dir(&app_dir);
        Ok(match self.default_fonts_dir(&app_dir) {
            Some(dir) => config.with_default_fonts_dir(dir),
            None => config,
        })
    }

    /// `--default-fonts`, else the first existing of `<app_dir>/default_fonts` and the source tree's copy.
    pub fn default_fonts_dir(&self, app_dir: &Path) -> Option<PathBuf> {
        if let Some(dir) = &self.default_fonts {
            return Some(dir.clone());
        }
        [app_dir.join(DEFAULT_FONTS_DIR_NAME), PathBuf::from(SOURCE_DEFAULT_FONTS)]
            .into_iter()
            .find(|dir| dir.is_dir())
    }
}
