//! Crate error type
//!
//! The simulation itself never fails; these errors come from the I/O edges
//! (score file, settings file, level files).

use std::io;

#[derive(thiserror::Error, Debug)]
pub enum PlatformerError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    #[error("No levels to play")]
    NoLevels,
}

pub type Result<T> = std::result::Result<T, PlatformerError>;
