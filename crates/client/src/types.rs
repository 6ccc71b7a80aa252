//! Entities exchanged with the upstream API.
//!
//! These are read-only views of upstream state. Fields the upstream may omit
//! are defaulted so a sparse response still decodes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A connected social account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: i64,
    #[serde(default, deserialize_with = "null_default")]
    pub label: String,
    #[serde(flatten)]
    pub handles: BrandHandles,
}

/// Per-network handles of a brand. A present, non-empty handle means the
/// network is connected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandHandles {
    #[serde(default, deserialize_with = "lenient_string")]
    pub linkedin_company: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub twitter: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub facebook: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub instagram: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub youtube: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tiktok: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub threads: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bluesky: Option<String>,
}

impl BrandHandles {
    /// Connected networks in fixed order: linkedin, twitter, facebook,
    /// instagram, youtube, tiktok, threads, bluesky.
    pub fn connected(&self) -> Vec<&'static str> {
        [
            ("linkedin", &self.linkedin_company),
            ("twitter", &self.twitter),
            ("facebook", &self.facebook),
            ("instagram", &self.instagram),
            ("youtube", &self.youtube),
            ("tiktok", &self.tiktok),
            ("threads", &self.threads),
            ("bluesky", &self.bluesky),
        ]
        .into_iter()
        .filter(|(_, handle)| handle.as_deref().is_some_and(|h| !h.is_empty()))
        .map(|(network, _)| network)
        .collect()
    }
}

/// Handles are usually strings but some networks report numeric page ids.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Explicit `null` decodes like a missing key.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A post to be scheduled.
#[derive(Debug, Clone, Default)]
pub struct SchedulePostRequest {
    pub brand_id: String,
    pub text: String,
    /// ISO 8601 local date-time without offset, e.g. `2026-11-02T09:30:00`.
    pub date_time: String,
    /// Falls back to the client's default timezone.
    pub timezone: Option<String>,
    /// Falls back to `linkedin`.
    pub network: Option<String>,
    pub image_url: Option<String>,
}

/// A post known to the upstream scheduler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPost {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_default")]
    pub publication_date: PublicationDate,
    #[serde(default, deserialize_with = "null_default")]
    pub providers: Vec<Provider>,
    #[serde(default, deserialize_with = "null_default")]
    pub draft: bool,
}

/// Local date-time plus the timezone it is expressed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationDate {
    #[serde(default, deserialize_with = "null_default")]
    pub date_time: String,
    #[serde(default, deserialize_with = "null_default")]
    pub timezone: String,
}

/// One target network of a scheduled post and its publication status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    #[serde(default, deserialize_with = "null_default")]
    pub network: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub detailed_status: Option<String>,
    #[serde(default)]
    pub public_url: Option<String>,
}

/// Performance snapshot of a published post.
///
/// Kept as a raw JSON object because the upstream reports the same metric
/// under different names depending on the network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalyticsRecord(pub Map<String, Value>);

impl AnalyticsRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

impl From<Value> for AnalyticsRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

/// A recommended posting window derived from past engagement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestTimeSlot {
    /// 0 = Sunday .. 6 = Saturday.
    #[serde(alias = "day")]
    pub day_of_week: u8,
    /// 0..=23.
    pub hour: u8,
    #[serde(alias = "value", default)]
    pub score: f64,
}

/// `{ "data": ... }` wrapper used by the scheduler endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: Option<T>,
}
