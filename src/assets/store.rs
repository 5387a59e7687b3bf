use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    assets::decode::{self, DecodedImage},
    assets::svg_raster,
    foundation::error::{BoothError, BoothResult},
};

/// Raster size of the corner ornament, in pixels. Fixed by design: ornament
/// physical size does not scale with capture resolution.
pub const CORNER_ORNAMENT_PX: u32 = 60;
/// Raster size of the two accent ornaments, in pixels.
pub const ACCENT_ORNAMENT_PX: u32 = 50;

const CORNER_FILE: &str = "corner.svg";
const ACCENT_LEFT_FILE: &str = "pero.svg";
const ACCENT_RIGHT_FILE: &str = "knjiga.svg";

/// Decorative assets and the verse font, prepared up front.
///
/// All IO and SVG rasterization is front-loaded here so the compositor itself
/// never touches the filesystem. Every field is optional: a missing or broken
/// ornament is tolerated and simply not drawn, and a missing font skips verse
/// rendering while the frame and ornaments still composite.
#[derive(Clone, Debug, Default)]
pub struct PreparedBoothAssets {
    /// Corner ornament, pre-rasterized at [`CORNER_ORNAMENT_PX`].
    pub corner: Option<DecodedImage>,
    /// Bottom-left accent, pre-rasterized at [`ACCENT_ORNAMENT_PX`].
    pub accent_left: Option<DecodedImage>,
    /// Bottom-right accent, pre-rasterized at [`ACCENT_ORNAMENT_PX`].
    pub accent_right: Option<DecodedImage>,
    /// Verse font bytes (TTF/OTF), shared with the shaper.
    pub font_bytes: Option<Arc<Vec<u8>>>,
}

impl PreparedBoothAssets {
    /// No assets at all: frame geometry still renders, ornaments and verse
    /// text are skipped. Useful for headless tests.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load and rasterize the ornament set and verse font from `root`.
    ///
    /// Individual failures are logged and tolerated; this only ever fails on
    /// internal invariant breaks, never on missing files.
    #[tracing::instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn prepare(root: impl AsRef<Path>) -> BoothResult<Self> {
        let root = root.as_ref();
        Ok(Self {
            corner: load_ornament(&root.join(CORNER_FILE), CORNER_ORNAMENT_PX),
            accent_left: load_ornament(&root.join(ACCENT_LEFT_FILE), ACCENT_ORNAMENT_PX),
            accent_right: load_ornament(&root.join(ACCENT_RIGHT_FILE), ACCENT_ORNAMENT_PX),
            font_bytes: find_font(root).map(Arc::new),
        })
    }
}

fn load_ornament(path: &Path, size_px: u32) -> Option<DecodedImage> {
    let attempt = || -> BoothResult<DecodedImage> {
        let bytes = std::fs::read(path)
            .map_err(|e| BoothError::render(format!("read '{}': {e}", path.display())))?;
        let tree = decode::parse_svg(&bytes)?;
        svg_raster::rasterize_svg(&tree, size_px, size_px)
    };
    match attempt() {
        Ok(img) => Some(img),
        Err(e) => {
            tracing::warn!("ornament '{}' unavailable: {e}", path.display());
            None
        }
    }
}

/// First font file found under `root/fonts/` (then `root` itself), sorted by
/// name for determinism.
fn find_font(root: &Path) -> Option<Vec<u8>> {
    for dir in [root.join("fonts"), root.to_path_buf()] {
        let Some(path) = first_font_in_dir(&dir) else {
            continue;
        };
        match std::fs::read(&path) {
            Ok(bytes) => return Some(bytes),
            Err(e) => tracing::warn!("font '{}' unreadable: {e}", path.display()),
        }
    }
    None
}

fn first_font_in_dir(dir: &Path) -> Option<PathBuf> {
    let rd = std::fs::read_dir(dir).ok()?;
    let mut candidates: Vec<PathBuf> = rd
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|s| s.to_str())
                    .map(|ext| {
                        let ext = ext.to_ascii_lowercase();
                        ext == "ttf" || ext == "otf" || ext == "ttc"
                    })
                    .unwrap_or(false)
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// RGBA8 brush color carried through Parley styling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Stateful helper for shaping single verse lines with Parley.
///
/// Wrapping is done by the booth's own layout engine, so lines are shaped
/// without a width constraint here.
pub struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<GlyphBrush>,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    /// Construct a shaper with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape one line of text using the provided font bytes and styling.
    pub fn shape_line(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        brush: GlyphBrush,
    ) -> BoothResult<parley::Layout<GlyphBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BoothError::validation("font size must be finite and > 0"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| BoothError::render("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BoothError::render("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<GlyphBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Measured advance width of one line at `size_px`, in pixels.
    pub fn measure_width(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
    ) -> BoothResult<f64> {
        let layout = self.shape_line(text, font_bytes, size_px, GlyphBrush::default())?;
        let mut width = 0.0f64;
        for line in layout.lines() {
            width = width.max(f64::from(line.metrics().advance));
        }
        Ok(width)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
