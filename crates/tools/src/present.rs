//! Reshaping upstream data into compact, agent-readable summaries.
//!
//! Everything here is pure: it reads borrowed upstream entities and builds new
//! payloads without touching the originals.

use std::cmp::Reverse;

use client::{AnalyticsRecord, BestTimeSlot, Brand, ScheduledPost};
use serde::Serialize;
use serde_json::Value;

use crate::fields::{
    CLICKS, COMMENTS, ENGAGEMENTS, Field, IMPRESSIONS, LIKES, POST_ID, PUBLISHED_AT, SHARES, TEXT,
};

pub const ELLIPSIS: &str = "...";
pub const PENDING_TEXT_LIMIT: usize = 100;
pub const TOP_POST_TEXT_LIMIT: usize = 80;
pub const TOP_LIMIT: usize = 5;

const PENDING: &str = "PENDING";
const UNKNOWN: &str = "Unknown";
const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const BEST_TIME_ADVICE: &str = "These are the LinkedIn time slots where this brand's posts \
     have historically earned the most engagement. Schedule important posts in the top slots.";

// ─────────────────────────────────────────────────────────────────────────────
// Payloads
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BrandList {
    pub brands: Vec<BrandSummary>,
}

#[derive(Debug, Serialize)]
pub struct BrandSummary {
    pub id: String,
    pub name: String,
    pub networks: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfirmation {
    pub message: String,
    pub post_id: Option<i64>,
    pub uuid: Option<String>,
    pub scheduled_date: String,
    pub networks: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PendingPosts {
    pub count: usize,
    pub posts: Vec<PendingPost>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingPost {
    pub id: Option<i64>,
    pub text: String,
    pub scheduled_date: String,
    pub timezone: String,
    pub networks: Vec<String>,
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub summary: AnalyticsSummary,
    pub post_count: usize,
    pub top_posts: Vec<TopPost>,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_impressions: u64,
    pub total_engagements: u64,
    pub total_clicks: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub engagement_rate: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPost {
    pub id: Value,
    pub text: String,
    pub published_at: Value,
    pub impressions: u64,
    pub engagements: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestTimeReport {
    pub recommendation: &'static str,
    pub top_slots: Vec<SlotSummary>,
}

#[derive(Debug, Serialize)]
pub struct SlotSummary {
    pub day: &'static str,
    pub time: String,
    pub score: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Reshaping
// ─────────────────────────────────────────────────────────────────────────────

pub fn brand_list(brands: &[Brand]) -> BrandList {
    BrandList {
        brands: brands
            .iter()
            .map(|brand| BrandSummary {
                id: brand.id.to_string(),
                name: brand.label.clone(),
                networks: brand.handles.connected(),
            })
            .collect(),
    }
}

pub fn schedule_confirmation(post: &ScheduledPost) -> ScheduleConfirmation {
    ScheduleConfirmation {
        message: "Post scheduled successfully".to_string(),
        post_id: post.id,
        uuid: post.uuid.clone(),
        scheduled_date: post.publication_date.date_time.clone(),
        networks: networks(post),
    }
}

/// Posts with at least one provider still `PENDING`.
pub fn pending_posts(posts: &[ScheduledPost]) -> PendingPosts {
    let posts: Vec<PendingPost> = posts
        .iter()
        .filter(|post| {
            post.providers
                .iter()
                .any(|p| p.status.as_deref() == Some(PENDING))
        })
        .map(|post| PendingPost {
            id: post.id,
            text: truncate(&post.text, PENDING_TEXT_LIMIT),
            scheduled_date: post.publication_date.date_time.clone(),
            timezone: post.publication_date.timezone.clone(),
            networks: networks(post),
            status: post
                .providers
                .first()
                .and_then(|p| p.detailed_status.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
        })
        .collect();

    PendingPosts {
        count: posts.len(),
        posts,
    }
}

pub fn analytics_report(records: &[AnalyticsRecord]) -> AnalyticsReport {
    // Totals saturate at u64::MAX.
    let sum = |field: Field| {
        records
            .iter()
            .map(|r| field.count(r))
            .fold(0u64, u64::saturating_add)
    };

    let total_impressions = sum(IMPRESSIONS);
    let total_engagements = sum(ENGAGEMENTS);
    let summary = AnalyticsSummary {
        total_impressions,
        total_engagements,
        total_clicks: sum(CLICKS),
        total_likes: sum(LIKES),
        total_comments: sum(COMMENTS),
        total_shares: sum(SHARES),
        engagement_rate: engagement_rate(total_engagements, total_impressions),
    };

    let mut ranked: Vec<&AnalyticsRecord> = records.iter().collect();
    // Stable: equal engagement keeps upstream order.
    ranked.sort_by_key(|r| Reverse(ENGAGEMENTS.count(r)));

    let top_posts = ranked
        .into_iter()
        .take(TOP_LIMIT)
        .map(|r| TopPost {
            id: POST_ID.resolve(r).cloned().unwrap_or(Value::Null),
            text: truncate(&TEXT.text(r).unwrap_or_default(), TOP_POST_TEXT_LIMIT),
            published_at: PUBLISHED_AT.resolve(r).cloned().unwrap_or(Value::Null),
            impressions: IMPRESSIONS.count(r),
            engagements: ENGAGEMENTS.count(r),
        })
        .collect();

    AnalyticsReport {
        summary,
        post_count: records.len(),
        top_posts,
    }
}

pub fn best_time_report(slots: &[BestTimeSlot]) -> BestTimeReport {
    let mut ranked: Vec<&BestTimeSlot> = slots.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    BestTimeReport {
        recommendation: BEST_TIME_ADVICE,
        top_slots: ranked
            .into_iter()
            .take(TOP_LIMIT)
            .map(|slot| SlotSummary {
                day: weekday_name(slot.day_of_week),
                time: format_hour(slot.hour),
                score: slot.score,
            })
            .collect(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Formatting helpers
// ─────────────────────────────────────────────────────────────────────────────

/// At most `limit` characters, plus `...` when something was cut.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

/// `engagements / impressions * 100` with two decimals, `0.00%` when there
/// were no impressions.
pub fn engagement_rate(engagements: u64, impressions: u64) -> String {
    if impressions == 0 {
        return "0.00%".to_string();
    }
    let rate = engagements as f64 / impressions as f64 * 100.0;
    format!("{rate:.2}%")
}

/// 0 = Sunday .. 6 = Saturday.
pub fn weekday_name(day: u8) -> &'static str {
    WEEKDAYS.get(usize::from(day)).copied().unwrap_or(UNKNOWN)
}

/// 12-hour clock: 0 → `12:00 AM`, 12 → `12:00 PM`, 13 → `1:00 PM`.
pub fn format_hour(hour: u8) -> String {
    let period = if hour % 24 < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display}:00 {period}")
}

fn networks(post: &ScheduledPost) -> Vec<String> {
    post.providers.iter().map(|p| p.network.clone()).collect()
}
