use thiserror::Error;

/// Errors that can occur during tool execution.
///
/// All of them end up as a failure envelope; none escape the dispatcher.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid arguments: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Api(#[from] client::Error),
}
