//! The upstream operations the dispatcher depends on.

use std::future::Future;

use client::{
    AnalyticsRecord, BestTimeSlot, Brand, MetricoolClient, Result, SchedulePostRequest,
    ScheduledPost,
};

/// Upstream operations exposed as tools.
///
/// Implemented by [`MetricoolClient`]; tests substitute canned data.
pub trait SocialApi: Send + Sync {
    fn list_brands(&self) -> impl Future<Output = Result<Vec<Brand>>> + Send;

    fn schedule_post(
        &self,
        request: &SchedulePostRequest,
    ) -> impl Future<Output = Result<ScheduledPost>> + Send;

    fn list_scheduled_posts(
        &self,
        brand_id: &str,
    ) -> impl Future<Output = Result<Vec<ScheduledPost>>> + Send;

    fn get_analytics(
        &self,
        brand_id: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> impl Future<Output = Result<Vec<AnalyticsRecord>>> + Send;

    fn get_best_times(
        &self,
        brand_id: &str,
    ) -> impl Future<Output = Result<Vec<BestTimeSlot>>> + Send;
}

impl SocialApi for MetricoolClient {
    fn list_brands(&self) -> impl Future<Output = Result<Vec<Brand>>> + Send {
        MetricoolClient::list_brands(self)
    }

    fn schedule_post(
        &self,
        request: &SchedulePostRequest,
    ) -> impl Future<Output = Result<ScheduledPost>> + Send {
        MetricoolClient::schedule_post(self, request)
    }

    fn list_scheduled_posts(
        &self,
        brand_id: &str,
    ) -> impl Future<Output = Result<Vec<ScheduledPost>>> + Send {
        MetricoolClient::list_scheduled_posts(self, brand_id)
    }

    fn get_analytics(
        &self,
        brand_id: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> impl Future<Output = Result<Vec<AnalyticsRecord>>> + Send {
        MetricoolClient::get_analytics(self, brand_id, start, end)
    }

    fn get_best_times(
        &self,
        brand_id: &str,
    ) -> impl Future<Output = Result<Vec<BestTimeSlot>>> + Send {
        MetricoolClient::get_best_times(self, brand_id)
    }
}
