//! Font registry holding at most one live registration
//!
//! Switching fonts is always release-then-acquire: `register` drops whatever
//! is active before loading the new file, so the same file can be reselected
//! without its family name colliding with a stale copy.

use crate::constants::FALLBACK_STYLE_NAME;
use crate::error::{FontViewError, FontViewResult};
use crate::font::style::{self, FontStyle, StyleMetrics};
use fontdb::{Database, Family, FaceInfo, Query, Source, Stretch, Style, Weight, ID};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Opaque handle to a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationHandle(u64);

/// Outcome of a successful registration
#[derive(Debug, Clone)]
pub struct RegistrationResult {
    pub family: String,
    pub available_styles: Vec<String>,
    pub handle: RegistrationHandle,
}

#[derive(Debug)]
struct LiveRegistration {
    handle: RegistrationHandle,
    path: PathBuf,
    family: String,
    faces: Vec<ID>,
}

pub struct FontRegistry {
    db: Database,
    active: Option<LiveRegistration>,
    next_handle: u64,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    pub fn new() -> Self {
        Self {
            db: Database::new(),
            active: None,
            next_handle: 1,
        }
    }

    /// Register `path`, releasing the current registration first.
    ///
    /// Fails with `UnreadableFont` when the file cannot be read or holds no
    /// parsable face, and with `NoFamilyName` when no usable family name is
    /// reported. In the latter case the freshly loaded faces are removed
    /// before returning.
    pub fn register(&mut self, path: &Path) -> FontViewResult<RegistrationResult> {
        self.release_active();

        let data = std::fs::read(path).map_err(|e| FontViewError::UnreadableFont {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let faces: Vec<ID> = self
            .db
            .load_font_source(Source::Binary(Arc::new(data)))
            .into_iter()
            .collect();
        if faces.is_empty() {
            return Err(FontViewError::UnreadableFont {
                path: path.to_path_buf(),
                reason: "no usable font face".to_string(),
            });
        }

        let family = faces
            .iter()
            .filter_map(|id| self.db.face(*id))
            .flat_map(|face| face.families.iter())
            .map(|(name, _)| name)
            .find(|name| !name.trim().is_empty())
            .cloned();

        let Some(family) = family else {
            for id in faces {
                self.db.remove_face(id);
            }
            warn!("Released faces of {:?}: no family name", path);
            return Err(FontViewError::NoFamilyName { path: path.to_path_buf() });
        };

        let handle = RegistrationHandle(self.next_handle);
        self.next_handle += 1;

        info!("Registered {:?} as '{}' ({} faces)", path, family, faces.len());
        self.active = Some(LiveRegistration {
            handle,
            path: path.to_path_buf(),
            family: family.clone(),
            faces,
        });

        Ok(RegistrationResult {
            available_styles: self.available_styles(&family),
            family,
            handle,
        })
    }

    /// Release `handle` if it is the live registration; otherwise a no-op.
    pub fn unregister(&mut self, handle: RegistrationHandle) -> bool {
        if self.active_handle() != Some(handle) {
            debug!("Ignoring release of inactive handle {:?}", handle);
            return false;
        }
        self.release_active().is_some()
    }

    /// Release whatever is registered. Safe to call when nothing is.
    pub fn release_active(&mut self) -> Option<RegistrationHandle> {
        let live = self.active.take()?;
        for id in &live.faces {
            self.db.remove_face(*id);
        }
        debug!("Released '{}' from {:?}", live.family, live.path);
        Some(live.handle)
    }

    pub fn active_handle(&self) -> Option<RegistrationHandle> {
        self.active.as_ref().map(|live| live.handle)
    }

    pub fn active_family(&self) -> Option<&str> {
        self.active.as_ref().map(|live| live.family.as_str())
    }

    pub fn active_path(&self) -> Option<&Path> {
        self.active.as_ref().map(|live| live.path.as_path())
    }

    pub fn is_live(&self, handle: RegistrationHandle) -> bool {
        self.active_handle() == Some(handle)
    }

    /// Number of live registrations; never more than one.
    pub fn live_registrations(&self) -> usize {
        usize::from(self.active.is_some())
    }

    /// Faces currently loaded in the underlying database.
    pub fn loaded_face_count(&self) -> usize {
        self.db.len()
    }

    fn family_faces<'a>(&'a self, family: &'a str) -> impl Iterator<Item = &'a FaceInfo> + 'a {
        self.db
            .faces()
            .filter(move |face| face.families.iter().any(|(name, _)| name == family))
    }

    fn style_of(&self, face: &FaceInfo) -> FontStyle {
        let name = self
            .db
            .with_face_data(face.id, |data, index| {
                ttf_parser::Face::parse(data, index)
                    .ok()
                    .and_then(|parsed| style::subfamily_name(&parsed))
            })
            .flatten()
            .unwrap_or_else(|| style::style_name_for(face.weight, face.style));

        FontStyle {
            name,
            weight: face.weight.0,
            italic: face.style != Style::Normal,
        }
    }

    /// Styles offered by `family`, in load order, without duplicates.
    pub fn styles(&self, family: &str) -> Vec<FontStyle> {
        let mut styles: Vec<FontStyle> = Vec::new();
        for face in self.family_faces(family) {
            let candidate = self.style_of(face);
            if !styles.iter().any(|s| s.name == candidate.name) {
                styles.push(candidate);
            }
        }
        styles
    }

    pub fn available_styles(&self, family: &str) -> Vec<String> {
        self.styles(family).into_iter().map(|s| s.name).collect()
    }

    /// First style of `family`, or the generic fallback name when none is known.
    pub fn default_style(&self, family: &str) -> String {
        self.available_styles(family)
            .into_iter()
            .next()
            .unwrap_or_else(|| FALLBACK_STYLE_NAME.to_string())
    }

    /// Resolve the concrete face for `family`/`style`.
    ///
    /// An unavailable style falls back to the nearest face by weight and
    /// slant, so the reported metrics may differ from the nominal style.
    fn resolve(&self, family: &str, style_name: &str) -> Option<ID> {
        if let Some(face) = self
            .family_faces(family)
            .find(|face| self.style_of(face).name.eq_ignore_ascii_case(style_name))
        {
            return Some(face.id);
        }

        let lowered = style_name.to_ascii_lowercase();
        let weight = if lowered.contains("bold") || lowered.contains("black") || lowered.contains("heavy") {
            Weight::BOLD
        } else if lowered.contains("light") || lowered.contains("thin") {
            Weight::LIGHT
        } else {
            Weight::NORMAL
        };
        let style = if lowered.contains("italic") {
            Style::Italic
        } else if lowered.contains("oblique") {
            Style::Oblique
        } else {
            Style::Normal
        };

        let families = [Family::Name(family)];
        self.db.query(&Query {
            families: &families,
            weight,
            stretch: Stretch::Normal,
            style,
        })
    }

    /// Weight and italic flag of the instance resolved for `family`/`style`.
    pub fn query_style_metrics(
        &self,
        family: &str,
        style_name: &str,
        reference_size: f32,
    ) -> FontViewResult<StyleMetrics> {
        let unknown = || FontViewError::UnknownFamily { family: family.to_string() };
        let id = self.resolve(family, style_name).ok_or_else(unknown)?;
        let face = self.db.face(id).ok_or_else(unknown)?;

        let line_height = self
            .db
            .with_face_data(id, |data, index| {
                ttf_parser::Face::parse(data, index)
                    .ok()
                    .map(|parsed| style::line_height(&parsed, reference_size))
            })
            .flatten()
            .unwrap_or(reference_size * 1.2);

        Ok(StyleMetrics {
            weight: face.weight.0,
            italic: face.style != Style::Normal,
            line_height,
        })
    }

    /// Face used to render `family` at its regular style.
    pub fn face_for_family(&self, family: &str) -> Option<ID> {
        self.resolve(family, "Regular")
    }

    /// Run `f` with the raw data and collection index of face `id`.
    pub fn with_face_data<T>(&self, id: ID, f: impl FnOnce(&[u8], u32) -> T) -> Option<T> {
        self.db.with_face_data(id, f)
    }
}
