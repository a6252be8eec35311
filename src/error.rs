//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, decode, and encode errors, and provides semantic
//! variants for per-image detection failures and argument validation.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JPEG encode error: {0}")]
    Encode(#[from] jpeg_encoder::EncodingError),

    #[error("Metadata error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty detection: no pixel passed the contrast threshold")]
    EmptyDetection,

    #[error("No object found within {search_radius} pixels of the image center")]
    NoObjectFound { search_radius: usize },

    #[error("Degenerate region: flood fill visited no pixels")]
    DegenerateRegion,

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }

    /// True for the per-image detection failures that batch processing
    /// counts and moves past without aborting.
    pub fn is_detection_failure(&self) -> bool {
        matches!(
            self,
            Error::EmptyDetection | Error::NoObjectFound { .. } | Error::DegenerateRegion
        )
    }
}
