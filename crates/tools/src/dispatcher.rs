//! Routes tool calls to the upstream API and shapes the replies.

use client::SchedulePostRequest;
use mcp::{CallToolResult, Tool, ToolHost};
use serde::Serialize;
use serde_json::{Value, json};

use crate::api::SocialApi;
use crate::args::{self, AnalyticsArgs, BrandArgs, SchedulePostArgs, non_blank};
use crate::catalog::{ToolName, catalog};
use crate::outcome::ToolOutcome;
use crate::present::{
    self, AnalyticsReport, BestTimeReport, BrandList, PendingPosts, ScheduleConfirmation,
};
use crate::ToolError;

type ToolResult<T> = Result<T, ToolError>;

/// Executes catalog tools against a [`SocialApi`].
///
/// Holds no state besides the API handle; calls are independent.
pub struct Dispatcher<A> {
    api: A,
}

impl<A: SocialApi> Dispatcher<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run one tool call. Never fails: errors come back as an error-flagged
    /// result.
    pub async fn dispatch(&self, name: &str, arguments: Value) -> CallToolResult {
        let Some(tool) = ToolName::parse(name) else {
            tracing::warn!(tool = name, "unknown tool");
            return unknown_tool(name);
        };

        tracing::info!(tool = name, "tool call");
        match tool {
            ToolName::ListBrands => render(tool, self.list_brands().await),
            ToolName::SchedulePost => render(tool, self.schedule_post(arguments).await),
            ToolName::ListScheduledPosts => {
                render(tool, self.list_scheduled_posts(arguments).await)
            }
            ToolName::GetAnalytics => render(tool, self.get_analytics(arguments).await),
            ToolName::GetBestTime => render(tool, self.get_best_time(arguments).await),
        }
    }

    async fn list_brands(&self) -> ToolResult<BrandList> {
        let brands = self.api.list_brands().await?;
        Ok(present::brand_list(&brands))
    }

    async fn schedule_post(&self, arguments: Value) -> ToolResult<ScheduleConfirmation> {
        let input: SchedulePostArgs = args::parse(arguments)?;
        let request = SchedulePostRequest {
            brand_id: input.brand_id,
            text: input.text,
            date_time: input.date_time,
            timezone: non_blank(input.timezone),
            network: non_blank(input.network),
            image_url: non_blank(input.image_url),
        };

        let post = self.api.schedule_post(&request).await?;
        Ok(present::schedule_confirmation(&post))
    }

    async fn list_scheduled_posts(&self, arguments: Value) -> ToolResult<PendingPosts> {
        let input: BrandArgs = args::parse(arguments)?;
        let posts = self.api.list_scheduled_posts(&input.brand_id).await?;
        Ok(present::pending_posts(&posts))
    }

    async fn get_analytics(&self, arguments: Value) -> ToolResult<AnalyticsReport> {
        let input: AnalyticsArgs = args::parse(arguments)?;
        let start = non_blank(input.start_date);
        let end = non_blank(input.end_date);

        let records = self
            .api
            .get_analytics(&input.brand_id, start.as_deref(), end.as_deref())
            .await?;
        Ok(present::analytics_report(&records))
    }

    async fn get_best_time(&self, arguments: Value) -> ToolResult<BestTimeReport> {
        let input: BrandArgs = args::parse(arguments)?;
        let slots = self.api.get_best_times(&input.brand_id).await?;
        Ok(present::best_time_report(&slots))
    }
}

impl<A: SocialApi> ToolHost for Dispatcher<A> {
    fn tools(&self) -> Vec<Tool> {
        catalog()
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> CallToolResult {
        self.dispatch(name, arguments).await
    }
}

fn render<T: Serialize>(tool: ToolName, result: ToolResult<T>) -> CallToolResult {
    if let Err(e) = &result {
        tracing::warn!(tool = tool.as_str(), error = %e, "tool call failed");
    }
    ToolOutcome::from(result).into_call_result()
}

fn unknown_tool(name: &str) -> CallToolResult {
    let body = json!({ "error": format!("Unknown tool: {name}") });
    CallToolResult::error(serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string()))
}
