//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration is invalid or names something that does not exist.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Capability assembly failed.
    #[error(transparent)]
    Capabilities(#[from] enterprise::Error),

    /// The query file or requested limit was invalid.
    #[error(transparent)]
    Query(#[from] query::Error),

    #[error("failed to render output: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
