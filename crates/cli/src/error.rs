//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors.
///
/// Every variant is fatal: `main` prints it and exits with status 1.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration is invalid or missing required values.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `--args` was not a JSON object.
    #[error("invalid tool arguments: {0}")]
    InvalidArguments(String),

    /// A one-shot tool invocation reported failure.
    #[error("tool '{0}' failed")]
    ToolFailed(String),

    /// An error occurred in the API client.
    #[error(transparent)]
    Client(#[from] client::Error),

    /// The stdio transport failed.
    #[error(transparent)]
    Mcp(#[from] mcp::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
