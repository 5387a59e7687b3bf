/// Convenience result type used across musabooth.
pub type BoothResult<T> = Result<T, BoothError>;

/// Top-level error taxonomy used by booth APIs.
///
/// Capture-not-ready is deliberately absent: a camera that has not produced a
/// real frame yet is a benign no-op, reported through
/// [`crate::capture::session::CaptureOutcome::NotReady`] instead of an error.
#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    /// Invalid caller-provided data (degenerate canvas, mismatched buffers).
    #[error("validation error: {0}")]
    Validation(String),

    /// Camera stream could not be acquired. Fatal to the session.
    #[error("camera error: {0}")]
    Camera(String),

    /// Verse list could not be fetched or parsed. Non-fatal: capture stays
    /// available and simply renders no verse text.
    #[error("verse load error: {0}")]
    VerseLoad(String),

    /// Errors while rasterizing or compositing the output frame.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    /// Build a [`BoothError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BoothError::Camera`] value.
    pub fn camera(msg: impl Into<String>) -> Self {
        Self::Camera(msg.into())
    }

    /// Build a [`BoothError::VerseLoad`] value.
    pub fn verse_load(msg: impl Into<String>) -> Self {
        Self::VerseLoad(msg.into())
    }

    /// Build a [`BoothError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
