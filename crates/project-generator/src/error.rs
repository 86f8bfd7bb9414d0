use std::path::PathBuf;

use andmore_sdk_bridge::SdkError;

use crate::renderer::RenderError;

/// Project generation errors
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Invalid project request: {0}")]
    InvalidRequest(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Reading file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid template manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("Rendering {}: {}", .file.display(), .source)]
    Render {
        file: PathBuf,
        #[source]
        source: RenderError,
    },
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),
    #[error("Cancelled")]
    Cancelled,
    #[error("Build step failed: {0}")]
    Build(#[from] SdkError),
}
