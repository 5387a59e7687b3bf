use crate::foundation::error::{BoothError, BoothResult};

pub use kurbo::{Affine, Rect};

/// Output raster dimensions in pixels. Always matches the captured frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoothCanvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl BoothCanvas {
    /// Canvas for a captured frame, rejecting degenerate dimensions.
    pub fn new(width: u32, height: u32) -> BoothResult<Self> {
        if width == 0 || height == 0 {
            return Err(BoothError::validation("canvas dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// True when the longer side is horizontal. Square frames count as portrait,
    /// matching the control-zone placement rule (bottom edge unless W > H).
    pub fn is_landscape(self) -> bool {
        self.width > self.height
    }
}

/// A borrowed view of the camera frame at the moment of capture.
///
/// Straight-alpha RGBA8, row-major. Not owned by the compositor; it is valid
/// only for the duration of one compose call.
#[derive(Clone, Copy, Debug)]
pub struct CaptureFrame<'a> {
    /// Frame width in pixels. Zero signals "camera not ready".
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Pixel bytes, `width * height * 4` long.
    pub rgba8: &'a [u8],
}

impl<'a> CaptureFrame<'a> {
    /// Borrow a frame, validating the buffer length against the dimensions.
    pub fn new(width: u32, height: u32, rgba8: &'a [u8]) -> BoothResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| BoothError::validation("frame buffer size overflow"))?;
        if rgba8.len() != expected {
            return Err(BoothError::validation(format!(
                "frame buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8,
        })
    }

    /// True once the camera has produced a real frame.
    pub fn is_ready(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// The fully composited output raster, premultiplied RGBA8.
///
/// Same pixel dimensions as the captured frame; consumed once by the PNG
/// encoding step and then discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedArtifact {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Vec<u8>,
}
