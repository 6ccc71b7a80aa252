//! Uniform result envelope returned by every tool.

use std::fmt::Display;

use mcp::CallToolResult;
use serde::{Serialize, Serializer};

/// Outcome of one tool invocation.
///
/// Serializes as `{"success": true, ...payload}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome<T> {
    Success(T),
    Failure(String),
}

#[derive(Serialize)]
struct SuccessBody<'a, T> {
    success: bool,
    #[serde(flatten)]
    payload: &'a T,
}

#[derive(Serialize)]
struct FailureBody<'a> {
    success: bool,
    error: &'a str,
}

impl<T: Serialize> Serialize for ToolOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(payload) => SuccessBody {
                success: true,
                payload,
            }
            .serialize(serializer),
            Self::Failure(error) => FailureBody {
                success: false,
                error,
            }
            .serialize(serializer),
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for ToolOutcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(e) => Self::Failure(e.to_string()),
        }
    }
}

impl<T: Serialize> ToolOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Render as a single pretty-printed JSON text block, flagged as an error
    /// for failures.
    pub fn into_call_result(self) -> CallToolResult {
        let is_error = !self.is_success();
        match serde_json::to_string_pretty(&self) {
            Ok(text) if is_error => CallToolResult::error(text),
            Ok(text) => CallToolResult::text(text),
            Err(e) => CallToolResult::error(format!("failed to serialize tool result: {e}")),
        }
    }
}
