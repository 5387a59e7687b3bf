//! Musabooth is a headless photo-booth compositing engine.
//!
//! It takes a captured camera frame, composites a mirrored copy of it with a
//! decorative frame, SVG corner/accent ornaments, and a word-wrapped verse
//! quotation, and delivers the result as a PNG artifact.
//!
//! # Pipeline overview
//!
//! 1. **Prepare**: `PreparedBoothAssets::prepare` front-loads all IO
//!    (ornament SVGs, verse font) so later stages never touch the filesystem.
//! 2. **Capture**: [`BoothSession::capture`] checks frame readiness, then
//!    hands the frame and the active verse to the compositor.
//! 3. **Compose**: [`FrameCompositor::compose`] mirrors the frame, resolves
//!    the frame rectangle from the configured [`FramePolicy`], draws the
//!    decoration and ornaments, and renders the wrapped verse with a drop
//!    shadow.
//! 4. **Deliver**: the artifact is PNG-encoded and pushed to an
//!    [`ArtifactSink`] under a `musa-selfie-<epoch-ms>.png` name.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: layout and wrapping are pure functions of
//!   their inputs; the host-dependent pieces (camera, text measurement,
//!   artifact delivery) sit behind small capability traits.
//! - **No IO in the compositor**: external IO is front-loaded in
//!   [`PreparedBoothAssets`].
//! - **Premultiplied RGBA8** end-to-end once pixels enter the renderer.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod capture;
mod foundation;
mod layout;
mod render;
mod verse;

pub use assets::decode::{DecodedImage, decode_image, parse_svg};
pub use assets::store::{
    ACCENT_ORNAMENT_PX, CORNER_ORNAMENT_PX, GlyphBrush, PreparedBoothAssets, TextShaper,
};
pub use assets::svg_raster::rasterize_svg;
pub use capture::session::{
    ArtifactSink, BoothSession, CaptureOutcome, FrameSource, capture_file_name, encode_png,
};
pub use foundation::core::{Affine, BoothCanvas, CaptureFrame, Rect, RenderedArtifact};
pub use foundation::error::{BoothError, BoothResult};
pub use layout::frame::{
    DecorStyle, FRAME_BROWN, FrameLayout, FramePolicy, resolve_frame_layout,
};
pub use layout::text::{TextMeasurer, WrappedBlock, block_start_y, layout_block, wrap};
pub use render::compositor::{ComposeOptions, FrameCompositor, VerseStyle};
pub use render::shadow::{blur_rgba8_premul, premul_over_in_place};
pub use verse::store::{VerseCollection, VerseStore};
