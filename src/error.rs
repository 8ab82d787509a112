//! Error types for the ray caster.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Scene has no camera")]
    MissingCamera,

    #[error("Invalid camera {index}: {reason}")]
    InvalidCamera { index: usize, reason: String },

    #[error("Invalid sphere {index}: {reason}")]
    InvalidSphere { index: usize, reason: String },

    #[error("Invalid light {index}: {reason}")]
    InvalidLight { index: usize, reason: String },

    #[error("Render cancelled after {rows} rows")]
    Cancelled { rows: usize },

    #[error("Worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Scene description error: {0}")]
    SceneFormat(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
