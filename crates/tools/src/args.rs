//! Typed tool arguments.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::ToolError;

/// Arguments of tools that only need a brand.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandArgs {
    #[serde(deserialize_with = "id_string")]
    pub brand_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePostArgs {
    #[serde(deserialize_with = "id_string")]
    pub brand_id: String,
    pub text: String,
    pub date_time: String,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsArgs {
    #[serde(deserialize_with = "id_string")]
    pub brand_id: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Decode the `arguments` object of a tool call.
pub fn parse<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidInput(e.to_string()))
}

/// Blank optional strings are treated as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Ids are declared as strings but agents often send numbers.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
