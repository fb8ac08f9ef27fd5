//! Fontview - desktop font viewer
//!
//! The binary glue lives here: command line parsing and logging setup.
//! The viewer itself is split between `fontview-core` (state and font
//! handling) and `fontview-gtk4` (the window).

pub mod cli;
pub mod logging;

pub use cli::CliArgs;
pub use fontview_core as viewer;
pub use fontview_gtk4 as shell;
