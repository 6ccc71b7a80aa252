//! Ordered fallback resolution for analytics attributes.
//!
//! The upstream reports the same metric under different keys depending on
//! the network. Each logical attribute lists its candidate keys in precedence
//! order; the first non-null value wins.

use client::AnalyticsRecord;
use serde_json::Value;

/// A logical attribute and the keys it may appear under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    candidates: &'static [&'static str],
}

pub const IMPRESSIONS: Field = Field::new(&["impressions"]);
pub const ENGAGEMENTS: Field = Field::new(&["engagements", "engagement"]);
pub const CLICKS: Field = Field::new(&["clicks"]);
pub const LIKES: Field = Field::new(&["likes", "reactions"]);
pub const COMMENTS: Field = Field::new(&["comments"]);
pub const SHARES: Field = Field::new(&["shares"]);
pub const POST_ID: Field = Field::new(&["id", "postId"]);
pub const TEXT: Field = Field::new(&["text", "content"]);
pub const PUBLISHED_AT: Field = Field::new(&["publishedAt", "date"]);

impl Field {
    pub const fn new(candidates: &'static [&'static str]) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &'static [&'static str] {
        self.candidates
    }

    /// First non-null value among the candidates.
    pub fn resolve<'a>(&self, record: &'a AnalyticsRecord) -> Option<&'a Value> {
        self.candidates
            .iter()
            .find_map(|key| record.get(key).filter(|v| !v.is_null()))
    }

    /// Numeric value, or 0 when absent or not a number.
    pub fn count(&self, record: &AnalyticsRecord) -> u64 {
        self.resolve(record).and_then(as_count).unwrap_or(0)
    }

    /// String value; non-string scalars are rendered as text.
    pub fn text(&self, record: &AnalyticsRecord) -> Option<String> {
        match self.resolve(record)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Counts arrive as integers, floats or numeric strings.
fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f.round() as u64),
        _ => None,
    }
}
