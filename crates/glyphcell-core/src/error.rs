//! Error types for Glyphcell

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TextError>;

/// Main error type for Glyphcell
///
/// Only setup-time operations surface errors to the caller. Once faces are
/// installed, layout and cache operations degrade (substitute glyph, empty
/// placeholder) instead of failing — text must never halt because one glyph
/// is unrenderable.
#[derive(Debug, Error)]
pub enum TextError {
    #[error("Face loading failed: {0}")]
    FaceLoad(#[from] FaceLoadError),

    #[error("Rasterization failed: {0}")]
    Raster(#[from] RasterError),

    #[error("Invalid face slot {slot} (maximum {max})")]
    InvalidFaceSlot { slot: usize, max: usize },
}

/// Face loading errors
///
/// Returned by Font Resolution collaborators when a face cannot be opened.
/// A load failure never corrupts already-installed face slots.
#[derive(Debug, Error)]
pub enum FaceLoadError {
    #[error("Font file not found: {0}")]
    NotFound(String),

    #[error("Unrecognized or corrupt font data")]
    FormatError,
}

/// Rasterization errors
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Glyph index {0} not present in face")]
    MissingGlyph(u32),

    #[error("Backend error: {0}")]
    Backend(String),
}
