//! Fontview Core - GTK-agnostic font viewer core
//!
//! This crate provides the font management workflow of the viewer,
//! independent of any specific UI backend: the managed font directory and
//! persisted external paths, font registration, the displayed font list and
//! preview rasterization.

pub mod config;
pub mod constants;
pub mod error;
pub mod font;
pub mod list;
pub mod preview;
pub mod store;
pub mod viewer;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export main types
pub use config::ViewerConfig;
pub use error::{FailureKind, FontViewError, FontViewResult};
pub use font::{FontRegistry, FontStyle, RegistrationHandle, RegistrationResult, StyleMetrics};
pub use list::{scan_managed_directory, EntryKind, FontEntry, FontList};
pub use preview::{PreviewImage, PreviewRenderer, PreviewState, RenderTarget, Rgba};
pub use store::{is_font_file, ExternalPathList, FontStore, InstallOutcome, ManagedDir};
pub use viewer::{DropOutcome, FontDetails, FontViewer, RemovalPrompt};
