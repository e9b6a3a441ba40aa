use std::io;

/// All error types for the hollowing pipeline.
#[derive(thiserror::Error, Debug)]
pub enum HollowError {
    #[error("Load error: {0}")]
    Load(String),
    #[error("Geometry error: {0}")]
    Geometry(String),
    #[error("Export error: {0}")]
    Export(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HollowError>;
