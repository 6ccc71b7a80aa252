//! Tool catalog and dispatcher for the Metricool MCP server.
//!
//! The dispatcher maps a `(name, arguments)` pair onto one upstream call and
//! reshapes the raw response into a compact summary: brands with their
//! connected networks, pending posts, analytics totals with the top posts,
//! and the best LinkedIn posting slots.
//!
//! # Overview
//!
//! - [`catalog`]: the five tools and their input schemas.
//! - [`Dispatcher`]: executes tools against any [`SocialApi`] and implements
//!   [`mcp::ToolHost`] so it can be served directly.
//! - [`ToolOutcome`]: the `{success, ...}` envelope every tool returns.
//! - [`fields`]: ordered fallback keys for analytics metrics.
//!
//! # Example
//!
//! ```no_run
//! use client::MetricoolClient;
//! use tools::Dispatcher;
//!
//! # async fn example() -> client::Result<()> {
//! let client = MetricoolClient::builder("token", "1234567").build()?;
//! let dispatcher = Dispatcher::new(client);
//!
//! let result = dispatcher
//!     .dispatch("get_best_time", serde_json::json!({"brandId": "9876"}))
//!     .await;
//! println!("{}", result.joined_text());
//! # Ok(())
//! # }
//! ```

mod api;
mod args;
mod catalog;
mod dispatcher;
mod error;
pub mod fields;
mod outcome;
pub mod present;

pub use api::SocialApi;
pub use catalog::{ToolName, catalog};
pub use dispatcher::Dispatcher;
pub use error::ToolError;
pub use outcome::ToolOutcome;
