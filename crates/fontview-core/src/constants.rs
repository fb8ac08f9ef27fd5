// src/constants.rs
use crate::preview::Rgba;

// Managed directory layout
pub const FONTS_DIR_NAME: &str = "fonts";
pub const SAVED_PATHS_FILE: &str = "saved_paths.json";
pub const DEFAULT_FONTS_DIR_NAME: &str = "default_fonts";

/// Extensions accepted for manual install and drag-and-drop.
pub const INSTALLABLE_EXTENSIONS: [&str; 3] = ["ttf", "otf", "ttc"];
/// Extensions picked up by the startup scan. Collections are left out on purpose.
pub const SCANNED_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

// Preview size slider
pub const INITIAL_FONT_SIZE: u32 = 32;
pub const MIN_FONT_SIZE: u32 = 8;
pub const MAX_FONT_SIZE: u32 = 300;

// Preview layout
pub const PREVIEW_MARGIN: f32 = 10.0;
pub const PLACEHOLDER_TEXT: &str = "Pick a font from the list on the left to start previewing!";
pub const TEXT_COLOR: Rgba = Rgba { r: 0x22, g: 0x22, b: 0x22, a: 0xff };

// Style metadata
pub const REFERENCE_POINT_SIZE: f32 = 12.0;
pub const FALLBACK_STYLE_NAME: &str = "Normal";
