use std::sync::Arc;

use crate::{
    assets::decode::DecodedImage,
    assets::store::{ACCENT_ORNAMENT_PX, GlyphBrush, PreparedBoothAssets, TextShaper},
    foundation::core::{Affine, CaptureFrame, RenderedArtifact},
    foundation::error::{BoothError, BoothResult},
    layout::frame::{DecorStyle, FrameLayout, FramePolicy, resolve_frame_layout},
    layout::text::{self, TextMeasurer, WrappedBlock},
    render::shadow,
};

/// Outward offset of corner ornaments from the frame rectangle, in pixels.
const ORNAMENT_GAP_PX: f64 = 10.0;
/// Inward inset of the two accent ornaments from the bottom frame corners.
const ACCENT_INSET_PX: f64 = 10.0;

/// Resolution-relative verse text styling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerseStyle {
    /// Lower bound on the font size, in pixels.
    pub min_font_px: f64,
    /// Font size as a fraction of canvas width.
    pub font_scale: f64,
    /// Line height as a multiple of the font size.
    pub line_height_factor: f64,
    /// Wrap budget as a fraction of canvas width.
    pub max_width_frac: f64,
    /// Fill color, straight RGBA.
    pub color: [u8; 4],
    /// Drop shadow color, straight RGBA.
    pub shadow_color: [u8; 4],
    /// Drop shadow blur radius, in pixels.
    pub shadow_blur_px: u32,
    /// Drop shadow offset (x, y), in pixels.
    pub shadow_offset: (f64, f64),
}

impl Default for VerseStyle {
    fn default() -> Self {
        Self {
            min_font_px: 24.0,
            font_scale: 0.04,
            line_height_factor: 1.2,
            max_width_frac: 0.9,
            color: [255, 255, 255, 255],
            shadow_color: [0, 0, 0, 204],
            shadow_blur_px: 4,
            shadow_offset: (2.0, 2.0),
        }
    }
}

/// Full compositing configuration: layout policy, decoration preset, text
/// styling. The defaults reproduce the fixed ornamented booth look.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ComposeOptions {
    /// Frame-rectangle policy.
    pub policy: FramePolicy,
    /// Frame decoration preset.
    pub decor: DecorStyle,
    /// Verse text styling.
    pub verse: VerseStyle,
}

/// The frame compositor: turns a captured frame, the active verse, and the
/// prepared ornament set into a [`RenderedArtifact`].
///
/// Render order is fixed: mirror-blit, frame decoration, ornaments, verse
/// text. No step reads back pixels written by a later step, and no step
/// performs IO. Decorative draws are independent; a missing ornament is
/// skipped without aborting the remaining steps.
pub struct FrameCompositor {
    ctx: Option<vello_cpu::RenderContext>,
    shaper: TextShaper,
}

impl Default for FrameCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCompositor {
    /// Construct a compositor with a fresh shaping context.
    pub fn new() -> Self {
        Self {
            ctx: None,
            shaper: TextShaper::new(),
        }
    }

    /// Composite one capture.
    ///
    /// The caller must hand in a ready frame (`width > 0`); the orchestrator
    /// treats a zero-width frame as "camera not ready" and never gets here.
    #[tracing::instrument(skip_all, fields(width = frame.width, height = frame.height))]
    pub fn compose(
        &mut self,
        frame: &CaptureFrame<'_>,
        verse: Option<&str>,
        assets: &PreparedBoothAssets,
        opts: &ComposeOptions,
    ) -> BoothResult<RenderedArtifact> {
        let canvas = crate::foundation::core::BoothCanvas::new(frame.width, frame.height)?;
        let (w16, h16) = canvas_u16(frame.width, frame.height)?;
        let layout = resolve_frame_layout(canvas, &opts.policy)?;

        // Stage 1: mirrored photo, frame decoration, ornaments.
        let mut base = vello_cpu::Pixmap::new(w16, h16);
        self.with_ctx_mut(w16, h16, |this, ctx| {
            this.draw_mirrored_frame(ctx, frame)?;
            draw_frame_decor(ctx, &layout, &opts.decor);
            draw_ornaments(ctx, &layout, assets);
            ctx.flush();
            ctx.render_to_pixmap(&mut base);
            Ok(())
        })?;
        let mut out = base.data_as_u8_slice().to_vec();

        // Stage 2: verse text with drop shadow, over the rendered base.
        let verse = verse.map(str::trim).filter(|v| !v.is_empty());
        if let (Some(verse), Some(font)) = (verse, assets.font_bytes.clone()) {
            self.draw_verse(&mut out, w16, h16, &layout, verse, &font, &opts.verse)?;
        }

        Ok(RenderedArtifact {
            width: frame.width,
            height: frame.height,
            rgba8_premul: out,
        })
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> BoothResult<R>,
    ) -> BoothResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    /// Step 1: blit the source frame flipped horizontally across the full
    /// canvas, so the artifact matches what the subject saw in the preview.
    fn draw_mirrored_frame(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        frame: &CaptureFrame<'_>,
    ) -> BoothResult<()> {
        let w = f64::from(frame.width);
        let h = f64::from(frame.height);
        let paint = rgba_straight_to_image_premul(frame.rgba8, frame.width, frame.height)?;

        let mirror = Affine::translate((w, 0.0)) * Affine::scale_non_uniform(-1.0, 1.0);
        ctx.set_transform(affine_to_cpu(mirror));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        Ok(())
    }

    /// Step 5: wrap the quoted verse and draw it, shadow pass first.
    #[allow(clippy::too_many_arguments)]
    fn draw_verse(
        &mut self,
        out: &mut [u8],
        w16: u16,
        h16: u16,
        layout: &FrameLayout,
        verse: &str,
        font: &Arc<Vec<u8>>,
        style: &VerseStyle,
    ) -> BoothResult<()> {
        let w = f64::from(layout.canvas.width);
        let font_size = style.min_font_px.max(style.font_scale * w);
        let line_height = font_size * style.line_height_factor;
        let quoted = format!("\"{verse}\"");

        let block = {
            let mut measurer = ShaperMeasurer {
                shaper: &mut self.shaper,
                font_bytes: font,
                size_px: font_size as f32,
            };
            text::layout_block(
                &quoted,
                w * style.max_width_frac,
                line_height,
                layout.text_band_center_y(),
                &mut measurer,
            )?
        };
        if block.lines.is_empty() {
            return Ok(());
        }

        let font_data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font.to_vec()), 0);

        // Shadow pass: offset glyphs, blurred, composited under the fill.
        let c = style.shadow_color;
        let shadow_brush = GlyphBrush {
            r: c[0],
            g: c[1],
            b: c[2],
            a: c[3],
        };
        let mut pass = vello_cpu::Pixmap::new(w16, h16);
        self.render_text_pass(
            w16,
            h16,
            &block,
            font,
            &font_data,
            font_size as f32,
            shadow_brush,
            style.shadow_offset,
            &mut pass,
        )?;
        let blurred = shadow::blur_rgba8_premul(
            pass.data_as_u8_slice(),
            u32::from(w16),
            u32::from(h16),
            style.shadow_blur_px,
            (style.shadow_blur_px as f32 / 2.0).max(0.5),
        )?;
        shadow::premul_over_in_place(out, &blurred)?;

        // Fill pass.
        let c = style.color;
        let fill_brush = GlyphBrush {
            r: c[0],
            g: c[1],
            b: c[2],
            a: c[3],
        };
        let mut pass = vello_cpu::Pixmap::new(w16, h16);
        self.render_text_pass(
            w16,
            h16,
            &block,
            font,
            &font_data,
            font_size as f32,
            fill_brush,
            (0.0, 0.0),
            &mut pass,
        )?;
        shadow::premul_over_in_place(out, pass.data_as_u8_slice())?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn render_text_pass(
        &mut self,
        w16: u16,
        h16: u16,
        block: &WrappedBlock,
        font_bytes: &[u8],
        font_data: &vello_cpu::peniko::FontData,
        size_px: f32,
        brush: GlyphBrush,
        offset: (f64, f64),
        dst: &mut vello_cpu::Pixmap,
    ) -> BoothResult<()> {
        let center_x = f64::from(w16) / 2.0;
        self.with_ctx_mut(w16, h16, |this, ctx| {
            for (k, line) in block.lines.iter().enumerate() {
                let layout = this.shaper.shape_line(line, font_bytes, size_px, brush)?;
                let Some(metrics) = layout.lines().next().map(|l| l.metrics().clone()) else {
                    continue;
                };
                let advance = f64::from(metrics.advance);
                let line_center_y = block.start_y + (k as f64) * block.line_height;
                let y_top =
                    line_center_y - f64::from(metrics.ascent + metrics.descent) / 2.0 + offset.1;
                let x_left = center_x - advance / 2.0 + offset.0;

                ctx.set_transform(affine_to_cpu(Affine::translate((x_left, y_top))));
                for l in layout.lines() {
                    for item in l.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };
                        let b = run.style().brush;
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(b.r, b.g, b.b, b.a));
                        let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(font_data)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
            }
            ctx.flush();
            ctx.render_to_pixmap(dst);
            Ok(())
        })
    }
}

/// Measurer adapter shaping candidate lines at the resolved verse font size.
struct ShaperMeasurer<'a> {
    shaper: &'a mut TextShaper,
    font_bytes: &'a [u8],
    size_px: f32,
}

impl TextMeasurer for ShaperMeasurer<'_> {
    fn width_px(&mut self, text: &str) -> BoothResult<f64> {
        self.shaper.measure_width(text, self.font_bytes, self.size_px)
    }
}

/// Step 3: frame decoration, drawn as filled rectangles in the accent color.
fn draw_frame_decor(ctx: &mut vello_cpu::RenderContext, layout: &FrameLayout, decor: &DecorStyle) {
    let f = layout.frame;
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match *decor {
        DecorStyle::FixedOrnamented {
            line_px,
            corner_inset_px,
            color,
        } => {
            set_solid_paint(ctx, color);
            // One segment per edge, pulled in from the corners.
            fill_span(ctx, f.x0 + corner_inset_px, f.y0, f.x1 - corner_inset_px, f.y0 + line_px);
            fill_span(ctx, f.x0 + corner_inset_px, f.y1 - line_px, f.x1 - corner_inset_px, f.y1);
            fill_span(ctx, f.x0, f.y0 + corner_inset_px, f.x0 + line_px, f.y1 - corner_inset_px);
            fill_span(ctx, f.x1 - line_px, f.y0 + corner_inset_px, f.x1, f.y1 - corner_inset_px);
        }
        DecorStyle::ProportionalStroke {
            stroke_frac,
            min_stroke_px,
            tick_frac,
            color,
        } => {
            set_solid_paint(ctx, color);
            let s = min_stroke_px.max(stroke_frac * f64::from(layout.canvas.width));
            // Outline as four thin filled rects.
            fill_span(ctx, f.x0, f.y0, f.x1, f.y0 + s);
            fill_span(ctx, f.x0, f.y1 - s, f.x1, f.y1);
            fill_span(ctx, f.x0, f.y0 + s, f.x0 + s, f.y1 - s);
            fill_span(ctx, f.x1 - s, f.y0 + s, f.x1, f.y1 - s);
            // L-shaped ticks at two opposite corners.
            let arm = tick_frac * f.width().min(f.height());
            let t = s * 2.0;
            fill_span(ctx, f.x0, f.y0, f.x0 + arm, f.y0 + t);
            fill_span(ctx, f.x0, f.y0, f.x0 + t, f.y0 + arm);
            fill_span(ctx, f.x1 - arm, f.y1 - t, f.x1, f.y1);
            fill_span(ctx, f.x1 - t, f.y1 - arm, f.x1, f.y1);
        }
    }
}

/// Step 4: corner ornaments rotated about their own origin, plus the two
/// bottom accents. Every draw is independent; failures are skipped.
fn draw_ornaments(
    ctx: &mut vello_cpu::RenderContext,
    layout: &FrameLayout,
    assets: &PreparedBoothAssets,
) {
    let f = layout.frame;
    let gap = ORNAMENT_GAP_PX;

    if let Some(corner) = assets.corner.as_ref() {
        let placements = [
            (f.x0 - gap, f.y0 - gap, 0.0),
            (f.x1 + gap, f.y0 - gap, 90.0),
            (f.x0 - gap, f.y1 + gap, -90.0),
            (f.x1 + gap, f.y1 + gap, 180.0),
        ];
        for (x, y, rot_deg) in placements {
            draw_ornament(ctx, corner, x, y, rot_deg);
        }
    }

    let accent = f64::from(ACCENT_ORNAMENT_PX);
    if let Some(img) = assets.accent_left.as_ref() {
        draw_ornament(ctx, img, f.x0 + ACCENT_INSET_PX, f.y1 - accent - ACCENT_INSET_PX, 0.0);
    }
    if let Some(img) = assets.accent_right.as_ref() {
        draw_ornament(
            ctx,
            img,
            f.x1 - accent - ACCENT_INSET_PX,
            f.y1 - accent - ACCENT_INSET_PX,
            0.0,
        );
    }
}

fn draw_ornament(
    ctx: &mut vello_cpu::RenderContext,
    img: &DecodedImage,
    x: f64,
    y: f64,
    rot_deg: f64,
) {
    let paint = match rgba_premul_to_image(&img.rgba8, img.width, img.height) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("skipping ornament draw: {e}");
            return;
        }
    };
    // Translate to the target point, rotate about the image's own origin,
    // draw at origin.
    let tr = Affine::translate((x, y)) * Affine::rotate(rot_deg.to_radians());
    ctx.set_transform(affine_to_cpu(tr));
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(img.width),
        f64::from(img.height),
    ));
}

fn set_solid_paint(ctx: &mut vello_cpu::RenderContext, rgb: [u8; 3]) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255));
}

/// Fill an axis-aligned span, skipping degenerate geometry.
fn fill_span(ctx: &mut vello_cpu::RenderContext, x0: f64, y0: f64, x1: f64, y1: f64) {
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x0, y0, x1, y1));
}

fn canvas_u16(width: u32, height: u32) -> BoothResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BoothError::validation("frame width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BoothError::validation("frame height exceeds u16"))?;
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BoothResult<vello_cpu::Pixmap> {
    let (w, h) = canvas_u16(width, height)?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(BoothError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
    for px in bytes.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> BoothResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn rgba_straight_to_image_premul(
    bytes_rgba: &[u8],
    width: u32,
    height: u32,
) -> BoothResult<vello_cpu::Image> {
    let mut tmp = bytes_rgba.to_vec();
    crate::assets::decode::premultiply_rgba8_in_place(&mut tmp);
    rgba_premul_to_image(&tmp, width, height)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
