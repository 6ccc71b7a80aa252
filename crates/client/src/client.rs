//! HTTP client for the Metricool REST API.

use std::time::Duration;

use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::types::{
    AnalyticsRecord, BestTimeSlot, Brand, DataEnvelope, SchedulePostRequest, ScheduledPost,
};
use crate::window::{analytics_window, schedule_window};

pub const DEFAULT_BASE_URL: &str = "https://app.metricool.com/api";
pub const DEFAULT_TIMEZONE: &str = "Europe/Madrid";
pub const DEFAULT_NETWORK: &str = "linkedin";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const AUTH_HEADER: &str = "X-Mc-Auth";

// ─────────────────────────────────────────────────────────────────────────────
// API Wire Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiNewPost<'a> {
    text: &'a str,
    publication_date: ApiPublicationDate<'a>,
    providers: Vec<ApiProvider<'a>>,
    auto_publish: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    linkedin_data: Option<ApiLinkedinData>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    media: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiPublicationDate<'a> {
    date_time: &'a str,
    timezone: &'a str,
}

#[derive(Debug, Serialize)]
struct ApiProvider<'a> {
    network: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiLinkedinData {
    preview_included: bool,
    #[serde(rename = "type")]
    post_type: &'static str,
}

impl<'a> ApiNewPost<'a> {
    fn from_request(request: &'a SchedulePostRequest, default_timezone: &'a str) -> Self {
        let network = request.network.as_deref().unwrap_or(DEFAULT_NETWORK);
        let linkedin_data = (network == "linkedin").then_some(ApiLinkedinData {
            preview_included: true,
            post_type: "POST",
        });

        Self {
            text: &request.text,
            publication_date: ApiPublicationDate {
                date_time: &request.date_time,
                timezone: request.timezone.as_deref().unwrap_or(default_timezone),
            },
            providers: vec![ApiProvider { network }],
            auto_publish: true,
            linkedin_data,
            media: request.image_url.as_deref().into_iter().collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for creating a [`MetricoolClient`].
#[derive(Debug, Clone)]
pub struct MetricoolClientBuilder {
    token: String,
    user_id: String,
    base_url: String,
    timezone: String,
    timeout: Duration,
}

impl MetricoolClientBuilder {
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at another host (a mock server in tests).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Timezone used when a request does not name one.
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<MetricoolClient> {
        let base_url = Url::parse(&self.base_url).map_err(|e| Error::BaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::BaseUrl {
                url: self.base_url,
                reason: "not a hierarchical URL".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("metricool-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(MetricoolClient {
            http,
            token: self.token,
            user_id: self.user_id,
            base_url,
            timezone: self.timezone,
        })
    }
}

/// Metricool API client.
///
/// Owns the transport details: base URL, auth header and status handling.
/// Every call is a single round-trip with no retry.
pub struct MetricoolClient {
    http: reqwest::Client,
    token: String,
    user_id: String,
    base_url: Url,
    timezone: String,
}

impl MetricoolClient {
    pub fn builder(token: impl Into<String>, user_id: impl Into<String>) -> MetricoolClientBuilder {
        MetricoolClientBuilder::new(token, user_id)
    }

    /// Default timezone for scheduling requests.
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// List the brands connected to the account.
    pub async fn list_brands(&self) -> Result<Vec<Brand>> {
        let url = self.endpoint(&["admin", "simpleProfiles"], &[]);
        let body = self.execute(self.request(Method::GET, url), "list brands").await?;
        decode(&body, "list brands")
    }

    /// Schedule a post for future publication.
    pub async fn schedule_post(&self, request: &SchedulePostRequest) -> Result<ScheduledPost> {
        require("brand id", &request.brand_id)?;
        require("text", &request.text)?;
        require("date-time", &request.date_time)?;

        let url = self.endpoint(
            &["v2", "scheduler", "posts"],
            &[("blogId", &request.brand_id)],
        );
        let payload = ApiNewPost::from_request(request, &self.timezone);
        let req = self.request(Method::POST, url).json(&payload);

        let body = self.execute(req, "schedule post").await?;
        let envelope: DataEnvelope<ScheduledPost> = decode(&body, "schedule post")?;
        envelope
            .data
            .ok_or_else(|| Error::MissingData("schedule post".to_string()))
    }

    /// Posts scheduled for the next 60 days.
    pub async fn list_scheduled_posts(&self, brand_id: &str) -> Result<Vec<ScheduledPost>> {
        require("brand id", brand_id)?;

        let (start, end) = schedule_window(Utc::now());
        let url = self.endpoint(
            &["v2", "scheduler", "posts"],
            &[
                ("blogId", brand_id),
                ("start", &start),
                ("end", &end),
                ("timezone", &self.timezone),
            ],
        );

        let body = self
            .execute(self.request(Method::GET, url), "list scheduled posts")
            .await?;
        let envelope: DataEnvelope<Vec<ScheduledPost>> = decode(&body, "list scheduled posts")?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Per-post statistics between `start` and `end` (`YYYY-MM-DD`).
    ///
    /// Missing bounds default to the last 30 days. The endpoint answers with a
    /// bare array, not a data envelope.
    pub async fn get_analytics(
        &self,
        brand_id: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Vec<AnalyticsRecord>> {
        require("brand id", brand_id)?;

        let (start, end) = analytics_window(Utc::now(), start, end);
        let url = self.endpoint(
            &["stats", "posts"],
            &[("blogId", brand_id), ("start", &start), ("end", &end)],
        );

        let body = self
            .execute(self.request(Method::GET, url), "get analytics")
            .await?;
        decode(&body, "get analytics")
    }

    /// Recommended LinkedIn posting slots.
    pub async fn get_best_times(&self, brand_id: &str) -> Result<Vec<BestTimeSlot>> {
        require("brand id", brand_id)?;

        let url = self.endpoint(
            &["v2", "scheduler", "besttimes", "linkedin"],
            &[("blogId", brand_id)],
        );

        let body = self
            .execute(self.request(Method::GET, url), "get best times")
            .await?;
        let envelope: DataEnvelope<Vec<BestTimeSlot>> = decode(&body, "get best times")?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Remove a scheduled post.
    pub async fn delete_scheduled_post(&self, post_id: &str) -> Result<()> {
        require("post id", post_id)?;

        let url = self.endpoint(&["v2", "scheduler", "posts", post_id], &[]);
        self.execute(self.request(Method::DELETE, url), "delete scheduled post")
            .await?;
        Ok(())
    }

    // --- Internal methods ---

    /// Base URL + path segments + `userId` + extra query parameters.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("userId", &self.user_id);
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, path = url.path(), "upstream request");
        self.http
            .request(method, url)
            .header(AUTH_HEADER, &self.token)
            .header(CONTENT_TYPE, "application/json")
    }

    /// Send the request and return the body of a 2xx response.
    async fn execute(&self, req: RequestBuilder, operation: &str) -> Result<String> {
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = error_body(response.text().await);
            tracing::warn!(operation, status = status.as_u16(), "upstream request failed");
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}

/// Body text of a failed response, or a placeholder when it could not be read.
fn error_body<E: std::fmt::Display>(read: std::result::Result<String, E>) -> String {
    match read {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = %e, "failed to read upstream error body");
            format!("<body unavailable: {e}>")
        }
    }
}

fn require(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidRequest(format!("{what} must not be empty")));
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(body: &str, context: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::Decode {
        context: context.to_string(),
        source: e,
    })
}
