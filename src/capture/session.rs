use std::io::Cursor;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;

use crate::{
    assets::store::PreparedBoothAssets,
    foundation::core::{CaptureFrame, RenderedArtifact},
    foundation::error::BoothResult,
    render::compositor::{ComposeOptions, FrameCompositor},
    verse::store::{VerseCollection, VerseStore},
};

/// Live frame capability: the camera subsystem, behind a trait so the session
/// is testable without a device.
pub trait FrameSource {
    /// Borrow the most recent frame, or `None` while the camera warms up.
    ///
    /// A frame with `width == 0` is treated the same as `None`: capture
    /// aborts with no side effects.
    fn frame(&mut self) -> BoothResult<Option<CaptureFrame<'_>>>;
}

/// Delivery capability for the encoded artifact (the browser-download stand-in).
pub trait ArtifactSink {
    /// Deliver one encoded PNG under the given file name.
    fn deliver(&mut self, file_name: &str, png: &[u8]) -> BoothResult<()>;
}

/// Result of one capture trigger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// An artifact was composited, encoded, and delivered.
    Captured {
        /// Delivered file name, `musa-selfie-<epoch-ms>.png`.
        file_name: String,
    },
    /// The camera has not produced a real frame yet. Benign no-op: no
    /// artifact, no delivery, no user-visible error.
    NotReady,
}

/// The capture orchestrator: owns the verse cursor, prepared assets, and the
/// compositor, and wires the two user triggers ("capture", "next verse") to
/// them.
pub struct BoothSession {
    verses: VerseStore,
    assets: PreparedBoothAssets,
    compositor: FrameCompositor,
    opts: ComposeOptions,
}

impl BoothSession {
    /// Build a session over a loaded verse collection and prepared assets.
    pub fn new(
        verses: VerseCollection,
        assets: PreparedBoothAssets,
        opts: ComposeOptions,
    ) -> Self {
        Self {
            verses: VerseStore::new(verses),
            assets,
            compositor: FrameCompositor::new(),
            opts,
        }
    }

    /// Verse at the active cursor.
    pub fn current_verse(&self) -> Option<&str> {
        self.verses.current()
    }

    /// Display form of the current verse, wrapped in quotation marks.
    pub fn verse_label(&self) -> Option<String> {
        self.verses.current().map(|v| format!("\"{v}\""))
    }

    /// Advance to the next verse, wrapping cyclically. No-op when the verse
    /// list is empty or failed to load.
    pub fn next_verse(&mut self) -> Option<&str> {
        self.verses.advance()
    }

    /// Handle one capture trigger: readiness check, compose, PNG encode,
    /// timestamped delivery.
    pub fn capture(
        &mut self,
        source: &mut dyn FrameSource,
        sink: &mut dyn ArtifactSink,
    ) -> BoothResult<CaptureOutcome> {
        let artifact = {
            let Some(frame) = source.frame()? else {
                return Ok(CaptureOutcome::NotReady);
            };
            if !frame.is_ready() {
                return Ok(CaptureOutcome::NotReady);
            }
            self.compositor
                .compose(&frame, self.verses.current(), &self.assets, &self.opts)?
        };

        let png = encode_png(&artifact)?;
        let file_name = capture_file_name(epoch_millis()?);
        sink.deliver(&file_name, &png)?;
        Ok(CaptureOutcome::Captured { file_name })
    }
}

/// Encode a rendered artifact as PNG bytes.
///
/// PNG stores straight alpha, so the artifact's premultiplied pixels are
/// un-premultiplied first. Opaque captures pass through unchanged.
pub fn encode_png(artifact: &RenderedArtifact) -> BoothResult<Vec<u8>> {
    let mut straight = artifact.rgba8_premul.clone();
    crate::assets::decode::unpremultiply_rgba8_in_place(&mut straight);
    let mut bytes = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut bytes),
        &straight,
        artifact.width,
        artifact.height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .context("encode artifact png")?;
    Ok(bytes)
}

/// Download file name for a capture taken at `epoch_ms`.
pub fn capture_file_name(epoch_ms: u128) -> String {
    format!("musa-selfie-{epoch_ms}.png")
}

fn epoch_millis() -> BoothResult<u128> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before unix epoch")?
        .as_millis())
}

#[cfg(test)]
#[path = "../../tests/unit/capture/session.rs"]
mod tests;
