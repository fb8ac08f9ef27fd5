//! Preview rasterization
//!
//! Text is laid out with word wrapping inside the horizontal margins,
//! centered vertically (or top-aligned when it does not fit), and composited
//! with anti-aliased glyph coverage onto a transparent premultiplied RGBA
//! raster sized for the device pixel scale.

use crate::config::ViewerConfig;
use crate::constants::{INITIAL_FONT_SIZE, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::error::{FontViewError, FontViewResult};
use crate::font::FontRegistry;
use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle, WrapStyle};
use fontdue::{Font, FontSettings};

/// Straight (non-premultiplied) 8-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        let rgb = u32::from_str_radix(hex, 16).ok()?;
        Some(Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
    }
}

/// Size of the preview pane in logical units plus its device pixel scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTarget {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

impl RenderTarget {
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        Self { width, height, scale }
    }

    fn effective_scale(&self) -> f64 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }
}

/// Premultiplied RGBA raster tagged with the device scale it was rendered at
#[derive(Debug, Clone)]
pub struct PreviewImage {
    width: u32,
    height: u32,
    scale: f64,
    pixels: Vec<u8>,
}

impl PreviewImage {
    fn transparent(width: u32, height: u32, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Width in device pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in device pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Row-major premultiplied RGBA, `width * 4` bytes per row
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Bounding box of inked pixels as `(min_x, min_y, max_x, max_y)`.
    pub fn ink_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.pixel(x, y).map_or(0, |px| px[3]) == 0 {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
        bounds
    }

    /// Source-over a coverage mask of `color` at device position (`left`, `top`).
    fn composite(&mut self, left: i32, top: i32, mask_w: usize, mask_h: usize, coverage: &[u8], color: Rgba) {
        for row in 0..mask_h {
            let y = top + row as i32;
            if y < 0 || y >= self.height as i32 {
                continue;
            }
            for col in 0..mask_w {
                let x = left + col as i32;
                if x < 0 || x >= self.width as i32 {
                    continue;
                }
                let cov = u32::from(coverage[row * mask_w + col]);
                if cov == 0 {
                    continue;
                }
                let alpha = cov * u32::from(color.a) / 255;
                let i = (y as usize * self.width as usize + x as usize) * 4;
                let inverse = 255 - alpha;
                let src = [color.r, color.g, color.b];
                for (channel, value) in src.iter().enumerate() {
                    let dst = u32::from(self.pixels[i + channel]);
                    self.pixels[i + channel] = ((u32::from(*value) * alpha + dst * inverse) / 255) as u8;
                }
                let dst_a = u32::from(self.pixels[i + 3]);
                self.pixels[i + 3] = (alpha + dst_a * inverse / 255) as u8;
            }
        }
    }
}

/// Transient preview inputs driven by the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    active_family: Option<String>,
    font_size: u32,
    preview_text: String,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self::new(INITIAL_FONT_SIZE)
    }
}

impl PreviewState {
    pub fn new(font_size: u32) -> Self {
        Self {
            active_family: None,
            font_size: font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            preview_text: String::new(),
        }
    }

    pub fn active_family(&self) -> Option<&str> {
        self.active_family.as_deref()
    }

    pub fn set_active_family(&mut self, family: Option<String>) {
        self.active_family = family;
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Clamp into the slider range and return the stored size.
    pub fn set_font_size(&mut self, size: u32) -> u32 {
        self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self.font_size
    }

    pub fn preview_text(&self) -> &str {
        &self.preview_text
    }

    pub fn set_preview_text(&mut self, text: &str) {
        self.preview_text = text.to_string();
    }
}

pub struct PreviewRenderer {
    margin: f32,
    placeholder: String,
    color: Rgba,
    font: Option<(fontdb::ID, Font)>,
}

impl PreviewRenderer {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            margin: config.preview_margin,
            placeholder: config.placeholder_text.clone(),
            color: config.text_color,
            font: None,
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Drop the parsed face kept between renders.
    pub fn forget_font(&mut self) {
        self.font = None;
    }

    /// Parse the face backing `family`, reusing the previous one when unchanged.
    fn font_for<'a>(
        slot: &'a mut Option<(fontdb::ID, Font)>,
        registry: &FontRegistry,
        family: &str,
    ) -> FontViewResult<&'a Font> {
        let unknown = || FontViewError::UnknownFamily { family: family.to_string() };
        let id = registry.face_for_family(family).ok_or_else(unknown)?;

        if !matches!(slot, Some((cached, _)) if *cached == id) {
            let settings = |index| FontSettings {
                collection_index: index,
                ..FontSettings::default()
            };
            let font = registry
                .with_face_data(id, |data, index| Font::from_bytes(data, settings(index)))
                .ok_or_else(unknown)?
                .map_err(|message| FontViewError::Render { message: message.to_string() })?;
            *slot = Some((id, font));
        }

        match slot {
            Some((_, font)) => Ok(font),
            None => Err(unknown()),
        }
    }

    /// Rasterize `text` (or the placeholder when empty) in `family` at `size`.
    pub fn render(
        &mut self,
        registry: &FontRegistry,
        family: &str,
        size: u32,
        text: &str,
        target: RenderTarget,
    ) -> FontViewResult<PreviewImage> {
        let scale = target.effective_scale();
        let width = (target.width * scale).round();
        let height = (target.height * scale).round();
        if !(width >= 1.0 && height >= 1.0) {
            return Err(FontViewError::Render {
                message: format!("preview area is empty ({}x{})", target.width, target.height),
            });
        }
        let (width, height) = (width as u32, height as u32);

        let text = if text.is_empty() { self.placeholder.as_str() } else { text };
        let font = Self::font_for(&mut self.font, registry, family)?;

        let px = size as f32 * scale as f32;
        let margin = self.margin * scale as f32;
        let wrap_width = (width as f32 - 2.0 * margin).max(1.0);

        let mut layout: Layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings {
            max_width: Some(wrap_width),
            wrap_style: WrapStyle::Word,
            ..LayoutSettings::default()
        });
        layout.append(&[font], &TextStyle::new(text, px, 0));

        let offset_y = ((height as f32 - layout.height()) / 2.0).max(0.0);

        let mut image = PreviewImage::transparent(width, height, scale);
        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (metrics, coverage) = font.rasterize_config(glyph.key);
            image.composite(
                (glyph.x + margin).round() as i32,
                (glyph.y + offset_y).round() as i32,
                metrics.width,
                metrics.height,
                &coverage,
                self.color,
            );
        }
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::DEJAVU;
    use std::path::Path;

    const FAMILY: &str = "DejaVu Sans";

    fn setup() -> (FontRegistry, PreviewRenderer) {
        let mut registry = FontRegistry::new();
        registry.register(Path::new(DEJAVU)).unwrap();
        (registry, PreviewRenderer::new(&ViewerConfig::default()))
    }

    #[test]
    fn test_empty_text_renders_placeholder() {
        let (registry, mut renderer) = setup();
        let image = renderer
            .render(&registry, FAMILY, 32, "", RenderTarget::new(600.0, 300.0, 1.0))
            .unwrap();
        assert!(!image.is_blank());
        assert_eq!((image.width(), image.height()), (600, 300));
    }

    #[test]
    fn test_short_text_is_vertically_centered() {
        let (registry, mut renderer) = setup();
        let image = renderer
            .render(&registry, FAMILY, 32, "H", RenderTarget::new(400.0, 400.0, 1.0))
            .unwrap();
        let (min_x, min_y, _, max_y) = image.ink_bounds().unwrap();
        assert!(min_x >= 9, "glyph should respect the left margin, got {}", min_x);
        let middle = (min_y + max_y) / 2;
        assert!((170..=230).contains(&middle), "ink centered at {}", middle);
    }

    #[test]
    fn test_tall_content_is_top_aligned() {
        let (registry, mut renderer) = setup();
        let image = renderer
            .render(&registry, FAMILY, 300, "Hello wrapping world", RenderTarget::new(120.0, 100.0, 1.0))
            .unwrap();
        assert!(!image.is_blank());
        let (_, min_y, _, _) = image.ink_bounds().unwrap();
        assert!(min_y < 100);
    }

    #[test]
    fn test_long_text_wraps_inside_margins() {
        let (registry, mut renderer) = setup();
        let image = renderer
            .render(
                &registry,
                FAMILY,
                24,
                "the quick brown fox jumps over the lazy dog again and again",
                RenderTarget::new(200.0, 400.0, 1.0),
            )
            .unwrap();
        let (_, min_y, max_x, max_y) = image.ink_bounds().unwrap();
        assert!(max_x <= 195, "ink reaches column {}", max_x);
        assert!(max_y - min_y > 48, "expected several lines");
    }

    #[test]
    fn test_device_scale_multiplies_raster() {
        let (registry, mut renderer) = setup();
        let image = renderer
            .render(&registry, FAMILY, 32, "Aa", RenderTarget::new(300.0, 150.0, 2.0))
            .unwrap();
        assert_eq!((image.width(), image.height()), (600, 300));
        assert_eq!(image.scale(), 2.0);
        assert!(!image.is_blank());
    }

    #[test]
    fn test_glyph_edges_are_antialiased() {
        let (registry, mut renderer) = setup();
        let image = renderer
            .render(&registry, FAMILY, 48, "O", RenderTarget::new(200.0, 200.0, 1.0))
            .unwrap();
        let partial = image
            .pixels()
            .chunks_exact(4)
            .any(|px| px[3] > 0 && px[3] < 255);
        assert!(partial);
    }

    #[test]
    fn test_unknown_family_fails() {
        let (registry, mut renderer) = setup();
        let result = renderer.render(&registry, "Missing", 32, "x", RenderTarget::new(100.0, 100.0, 1.0));
        assert!(matches!(result, Err(FontViewError::UnknownFamily { .. })));
    }

    #[test]
    fn test_zero_sized_target_fails() {
        let (registry, mut renderer) = setup();
        let result = renderer.render(&registry, FAMILY, 32, "x", RenderTarget::new(0.0, 100.0, 1.0));
        assert!(matches!(result, Err(FontViewError::Render { .. })));
    }

    #[test]
    fn test_state_clamps_size() {
        let mut state = PreviewState::default();
        assert_eq!(state.font_size(), 32);
        assert_eq!(state.set_font_size(4), 8);
        assert_eq!(state.set_font_size(1000), 300);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(Rgba::from_hex("#222222"), Some(Rgba::rgb(0x22, 0x22, 0x22)));
        assert_eq!(Rgba::from_hex("4a90e2"), Some(Rgba::rgb(0x4a, 0x90, 0xe2)));
        assert_eq!(Rgba::from_hex("#123"), None);
    }
}
