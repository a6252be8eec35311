use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid radius: {radius}. Must be between 1 and 10")]
    InvalidRadius { radius: u32 },

    #[error("Invalid padding: {padding}. Must be between 0 and 100 percent")]
    InvalidPadding { padding: u32 },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crop error: {0}")]
    Crop(#[from] specrop::Error),
}
