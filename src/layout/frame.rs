use crate::foundation::core::{BoothCanvas, Rect};
use crate::foundation::error::{BoothError, BoothResult};

/// Frame color of the original booth styling (brown `#573705`).
pub const FRAME_BROWN: [u8; 3] = [0x57, 0x37, 0x05];

/// Policy resolving the decorative frame rectangle from canvas dimensions.
///
/// Both variants guarantee a non-degenerate frame for any canvas of at least
/// 200x200 pixels; [`resolve_frame_layout`] rejects inputs where the resolved
/// frame would collapse.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FramePolicy {
    /// Reserve a fixed-pixel control strip on the longer side (right edge in
    /// landscape, bottom edge in portrait) with small fixed margins elsewhere.
    /// Used when on-screen controls must not scale with resolution.
    FixedControlZone {
        /// Margin on the non-control edges, in pixels.
        margin_px: f64,
        /// Width of the reserved control strip, in pixels.
        control_px: f64,
    },
    /// All margins are fractions of the canvas, so the frame occupies the same
    /// relative footprint at any resolution.
    Proportional {
        /// Left/right margin as a fraction of width.
        side_frac: f64,
        /// Top margin as a fraction of height.
        top_frac: f64,
        /// Bottom band (text reservation) as a fraction of height.
        bottom_frac: f64,
    },
}

impl Default for FramePolicy {
    fn default() -> Self {
        Self::FixedControlZone {
            margin_px: 20.0,
            control_px: 140.0,
        }
    }
}

/// Frame-decoration preset. Two observed styles of one capability; both draw
/// over the mirrored photo in the frame color, before ornaments and text.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecorStyle {
    /// Four short edge segments, inset from the corners by a fixed gap.
    FixedOrnamented {
        /// Segment thickness in pixels.
        line_px: f64,
        /// Inward offset of each segment from the corners, in pixels.
        corner_inset_px: f64,
        /// Segment color, straight RGB.
        color: [u8; 3],
    },
    /// A full rectangle outline plus L-shaped ticks at the top-left and
    /// bottom-right corners, stroke width proportional to canvas width.
    ProportionalStroke {
        /// Stroke width as a fraction of canvas width.
        stroke_frac: f64,
        /// Lower bound on the stroke width, in pixels.
        min_stroke_px: f64,
        /// Tick arm length as a fraction of the shorter frame side.
        tick_frac: f64,
        /// Stroke color, straight RGB.
        color: [u8; 3],
    },
}

impl Default for DecorStyle {
    fn default() -> Self {
        Self::FixedOrnamented {
            line_px: 3.0,
            corner_inset_px: 50.0,
            color: FRAME_BROWN,
        }
    }
}

/// Resolved placement of the decorative frame on a specific canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameLayout {
    /// The frame rectangle, fully contained in the canvas.
    pub frame: Rect,
    /// Canvas the layout was resolved against.
    pub canvas: BoothCanvas,
}

impl FrameLayout {
    /// Vertical center of the band reserved for verse text: from the frame's
    /// bottom edge down to the canvas bottom.
    pub fn text_band_center_y(&self) -> f64 {
        (self.frame.y1 + f64::from(self.canvas.height)) / 2.0
    }
}

/// Resolve the frame rectangle for `canvas` under `policy`.
///
/// Fails with a validation error when the policy would produce an empty or
/// inverted frame; the capture path never reaches this for sane resolutions
/// because zero-width frames abort capture before layout.
pub fn resolve_frame_layout(canvas: BoothCanvas, policy: &FramePolicy) -> BoothResult<FrameLayout> {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);

    let frame = match *policy {
        FramePolicy::FixedControlZone {
            margin_px,
            control_px,
        } => {
            if margin_px < 0.0 || control_px < 0.0 {
                return Err(BoothError::validation("frame margins must be >= 0"));
            }
            if canvas.is_landscape() {
                Rect::new(margin_px, margin_px, w - control_px, h - margin_px)
            } else {
                Rect::new(margin_px, margin_px, w - margin_px, h - control_px)
            }
        }
        FramePolicy::Proportional {
            side_frac,
            top_frac,
            bottom_frac,
        } => {
            for frac in [side_frac, top_frac, bottom_frac] {
                if !(0.0..0.5).contains(&frac) {
                    return Err(BoothError::validation(
                        "proportional margins must be in [0, 0.5)",
                    ));
                }
            }
            Rect::new(w * side_frac, h * top_frac, w * (1.0 - side_frac), h * (1.0 - bottom_frac))
        }
    };

    if frame.width() <= 0.0 || frame.height() <= 0.0 {
        return Err(BoothError::validation(format!(
            "degenerate frame {:.0}x{:.0} for canvas {}x{}",
            frame.width(),
            frame.height(),
            canvas.width,
            canvas.height
        )));
    }

    Ok(FrameLayout { frame, canvas })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/frame.rs"]
mod tests;
