//! Style naming and resolved style metrics

use fontdb::{Style, Weight};
use ttf_parser::name_id;

/// One style offered by a registered family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontStyle {
    pub name: String,
    pub weight: u16,
    pub italic: bool,
}

/// Weight and slant of the font instance resolved for a family/style pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleMetrics {
    /// OpenType weight class (100..=900, 400 is regular)
    pub weight: u16,
    pub italic: bool,
    /// Line height at the reference size the metrics were queried with
    pub line_height: f32,
}

/// Subfamily name from the `name` table, preferring the typographic one.
pub(crate) fn subfamily_name(face: &ttf_parser::Face<'_>) -> Option<String> {
    [name_id::TYPOGRAPHIC_SUBFAMILY, name_id::SUBFAMILY]
        .into_iter()
        .find_map(|id| {
            face.names()
                .into_iter()
                .filter(|name| name.name_id == id && name.is_unicode())
                .find_map(|name| name.to_string())
                .filter(|name| !name.trim().is_empty())
        })
}

/// Line height in pixels for `size`, from hhea metrics.
pub(crate) fn line_height(face: &ttf_parser::Face<'_>, size: f32) -> f32 {
    let units = f32::from(face.units_per_em().max(1));
    let extent = f32::from(face.ascender()) - f32::from(face.descender()) + f32::from(face.line_gap());
    extent / units * size
}

/// Readable style name built from weight and slant, for faces without a subfamily name.
pub fn style_name_for(weight: Weight, style: Style) -> String {
    let weight_name = match weight.0 {
        0..=149 => "Thin",
        150..=249 => "ExtraLight",
        250..=349 => "Light",
        350..=449 => "Regular",
        450..=549 => "Medium",
        550..=649 => "SemiBold",
        650..=749 => "Bold",
        750..=849 => "ExtraBold",
        _ => "Black",
    };
    let slant = match style {
        Style::Normal => None,
        Style::Italic => Some("Italic"),
        Style::Oblique => Some("Oblique"),
    };
    match (weight_name, slant) {
        ("Regular", Some(slant)) => slant.to_string(),
        (weight_name, Some(slant)) => format!("{} {}", weight_name, slant),
        (weight_name, None) => weight_name.to_string(),
    }
}
