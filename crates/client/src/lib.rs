//! Client for the Metricool social-media management API.
//!
//! This crate is the only place that knows about HTTP: base URL, the
//! `X-Mc-Auth` token header, query scoping by user and brand, and the
//! translation of non-2xx responses into [`Error::Upstream`].
//!
//! # Example
//!
//! ```no_run
//! use client::MetricoolClient;
//!
//! # async fn example() -> client::Result<()> {
//! let client = MetricoolClient::builder("token", "1234567").build()?;
//!
//! for brand in client.list_brands().await? {
//!     println!("{} {:?}", brand.label, brand.handles.connected());
//! }
//!
//! let slots = client.get_best_times("9876").await?;
//! println!("{} slots", slots.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;
pub mod window;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_NETWORK, DEFAULT_TIMEOUT, DEFAULT_TIMEZONE, MetricoolClient,
    MetricoolClientBuilder,
};
pub use error::{Error, Result};
pub use types::{
    AnalyticsRecord, BestTimeSlot, Brand, BrandHandles, Provider, PublicationDate,
    SchedulePostRequest, ScheduledPost,
};
