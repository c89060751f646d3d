//! CLI error types.

use std::path::PathBuf;

use docshim_adapter::{DocumentError, RenderError};
use docshim_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "{} and {} would both be written to {}",
        .first.display(),
        .second.display(),
        .target.display()
    )]
    OutputCollision {
        target: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("{}: {source}", .path.display())]
    Document {
        path: PathBuf,
        source: DocumentError,
    },

    #[error("{}: {source}", .path.display())]
    Render {
        path: PathBuf,
        source: RenderError,
    },

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
