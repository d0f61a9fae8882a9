//! Error types for the visualizer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
///
/// Numerical divergence is not an error: it is reported through
/// [`crate::trajectory::Trajectory::first_non_finite`] and handled by the
/// render adapter.
#[derive(Debug, Error)]
pub enum VisualizerError {
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, VisualizerError>;
