//! Fontview GTK4 - GTK4 shell for the fontview-core viewer
//!
//! This crate owns the widget tree: the font list panel, the text entry and
//! size slider, the cairo-painted preview and the info panel. Every gesture is
//! forwarded to [`fontview_core::FontViewer`] and its failures are shown as
//! modal notices.

mod cairo_preview;
mod dialogs;
mod info_panel;
mod input;
mod window;

pub use cairo_preview::{paint_preview, preview_surface};
pub use window::{install_stylesheet, FontViewerWindow};

// Re-export fontview-core types for convenience
pub use fontview_core::*;
