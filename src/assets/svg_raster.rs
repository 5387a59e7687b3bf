use crate::assets::decode::DecodedImage;
use crate::foundation::error::{BoothError, BoothResult};

// Ornaments are drawn at fixed pixel sizes, so pathological sizes only occur
// with a broken configuration.
const MAX_DIM: u32 = 16_384;

/// Rasterize an SVG tree into a premultiplied RGBA8 image of exactly
/// `width x height` pixels, scaling non-uniformly from the tree's own size.
pub fn rasterize_svg(tree: &usvg::Tree, width: u32, height: u32) -> BoothResult<DecodedImage> {
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(BoothError::validation(format!(
            "svg raster size out of range: {width}x{height}"
        )));
    }
    let size = tree.size();
    if !size.width().is_finite() || size.width() <= 0.0 || size.height() <= 0.0 {
        return Err(BoothError::render("svg has invalid width/height"));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BoothError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(DecodedImage {
        width,
        height,
        rgba8: pixmap.data().to_vec(),
    })
}
