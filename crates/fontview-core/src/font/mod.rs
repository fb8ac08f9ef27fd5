//! Font registration with the rendering subsystem
//!
//! The registry owns a font database holding only the faces this
//! application registered for its preview session, and hands out opaque
//! handles for them.

pub mod registry;
pub mod style;

pub use registry::{FontRegistry, RegistrationHandle, RegistrationResult};
pub use style::{style_name_for, FontStyle, StyleMetrics};
