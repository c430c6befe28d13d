//! Error types for buffer preconditions and LUT/blueprint file I/O.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the core. Numeric edge cases never land here; they are
/// clamped or floored inside the operator chain.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Pixel data length does not match `width * height * 4`.
    #[error("buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Malformed `.cube` content.
    #[error("cube parse error on line {line}: {message}")]
    LutParse { line: usize, message: String },

    /// Grid size missing, too small or inconsistent with the entry count.
    #[error("invalid LUT size: {0}")]
    LutSize(String),

    /// Malformed parameter or blueprint JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
