//! The fixed tool catalog.

use mcp::Tool;
use serde_json::{Map, Value, json};

/// Every tool the dispatcher knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    ListBrands,
    SchedulePost,
    ListScheduledPosts,
    GetAnalytics,
    GetBestTime,
}

impl ToolName {
    pub const ALL: [ToolName; 5] = [
        ToolName::ListBrands,
        ToolName::SchedulePost,
        ToolName::ListScheduledPosts,
        ToolName::GetAnalytics,
        ToolName::GetBestTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::ListBrands => "list_brands",
            ToolName::SchedulePost => "schedule_post",
            ToolName::ListScheduledPosts => "list_scheduled_posts",
            ToolName::GetAnalytics => "get_analytics",
            ToolName::GetBestTime => "get_best_time",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolName::ListBrands => {
                "List the brands (connected social accounts) and the networks each one has connected."
            }
            ToolName::SchedulePost => {
                "Schedule a post for future publication on one of a brand's networks (LinkedIn by default)."
            }
            ToolName::ListScheduledPosts => {
                "List a brand's posts still pending publication over the next 60 days."
            }
            ToolName::GetAnalytics => {
                "Summarize a brand's post performance: totals, engagement rate and the top 5 posts by engagement."
            }
            ToolName::GetBestTime => {
                "Recommend the best days and hours to post on LinkedIn, based on the brand's past engagement."
            }
        }
    }

    /// `(name, description)` of each string parameter, and the required subset.
    fn parameters(self) -> (&'static [(&'static str, &'static str)], &'static [&'static str]) {
        const BRAND: (&str, &str) = ("brandId", "Brand id as returned by list_brands");
        match self {
            ToolName::ListBrands => (&[], &[]),
            ToolName::SchedulePost => (
                &[
                    BRAND,
                    ("text", "Post text"),
                    (
                        "dateTime",
                        "Publication time, ISO 8601 without offset (e.g. 2026-11-02T09:30:00)",
                    ),
                    ("timezone", "IANA timezone of dateTime (defaults to the server's zone)"),
                    ("network", "Target network (defaults to linkedin)"),
                    ("imageUrl", "Public URL of an image to attach"),
                ],
                &["brandId", "text", "dateTime"],
            ),
            ToolName::ListScheduledPosts | ToolName::GetBestTime => (&[BRAND], &["brandId"]),
            ToolName::GetAnalytics => (
                &[
                    BRAND,
                    ("startDate", "First day, YYYY-MM-DD (defaults to 30 days ago)"),
                    ("endDate", "Last day, YYYY-MM-DD (defaults to today)"),
                ],
                &["brandId"],
            ),
        }
    }

    pub fn input_schema(self) -> Value {
        let (parameters, required) = self.parameters();
        let properties: Map<String, Value> = parameters
            .iter()
            .map(|(name, description)| {
                (
                    (*name).to_string(),
                    json!({"type": "string", "description": description}),
                )
            })
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn definition(self) -> Tool {
        Tool {
            name: self.as_str().to_string(),
            description: Some(self.description().to_string()),
            input_schema: self.input_schema(),
        }
    }
}

/// The five tools, in a stable order.
pub fn catalog() -> Vec<Tool> {
    ToolName::ALL.into_iter().map(ToolName::definition).collect()
}
