//! Dispatcher tests against a canned API and against a mocked upstream.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use client::{
    AnalyticsRecord, BestTimeSlot, Brand, MetricoolClient, PublicationDate, Result,
    SchedulePostRequest, ScheduledPost,
};
use mcp::{CallToolResult, ToolHost};
use serde_json::{Value, json};
use tools::{Dispatcher, SocialApi};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct FakeApi {
    calls: AtomicUsize,
    brands: Vec<Brand>,
    posts: Vec<ScheduledPost>,
    records: Vec<AnalyticsRecord>,
    slots: Vec<BestTimeSlot>,
    scheduled: Mutex<Option<SchedulePostRequest>>,
    analytics_query: Mutex<Option<(String, Option<String>, Option<String>)>>,
}

impl FakeApi {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl SocialApi for FakeApi {
    async fn list_brands(&self) -> Result<Vec<Brand>> {
        self.hit();
        Ok(self.brands.clone())
    }

    async fn schedule_post(&self, request: &SchedulePostRequest) -> Result<ScheduledPost> {
        self.hit();
        *self.scheduled.lock().unwrap() = Some(request.clone());
        Ok(ScheduledPost {
            id: Some(900),
            uuid: Some("u-900".to_string()),
            text: request.text.clone(),
            publication_date: PublicationDate {
                date_time: request.date_time.clone(),
                timezone: request.timezone.clone().unwrap_or_default(),
            },
            providers: serde_json::from_value(json!([
                {"network": request.network.clone().unwrap_or_else(|| "linkedin".into()), "status": "PENDING"}
            ]))
            .unwrap(),
            draft: false,
        })
    }

    async fn list_scheduled_posts(&self, _brand_id: &str) -> Result<Vec<ScheduledPost>> {
        self.hit();
        Ok(self.posts.clone())
    }

    async fn get_analytics(
        &self,
        brand_id: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Vec<AnalyticsRecord>> {
        self.hit();
        *self.analytics_query.lock().unwrap() = Some((
            brand_id.to_string(),
            start.map(str::to_string),
            end.map(str::to_string),
        ));
        Ok(self.records.clone())
    }

    async fn get_best_times(&self, _brand_id: &str) -> Result<Vec<BestTimeSlot>> {
        self.hit();
        Ok(self.slots.clone())
    }
}

fn body(result: &CallToolResult) -> Value {
    assert_eq!(result.content.len(), 1, "expected a single text block");
    serde_json::from_str(&result.joined_text()).expect("tool output should be JSON")
}

#[tokio::test]
async fn unknown_tool_fails_without_calling_upstream() {
    let dispatcher = Dispatcher::new(FakeApi::default());

    let result = dispatcher.dispatch("delete_everything", json!({})).await;

    assert!(result.is_error);
    assert!(result.joined_text().contains("Unknown tool: delete_everything"));
    assert_eq!(body(&result), json!({"error": "Unknown tool: delete_everything"}));
    assert_eq!(dispatcher.api().calls(), 0);
}

#[tokio::test]
async fn catalog_is_served_through_tool_host() {
    let dispatcher = Dispatcher::new(FakeApi::default());
    let tools = dispatcher.tools();
    assert_eq!(tools.len(), 5);
    assert!(tools.iter().all(|t| t.description.is_some()));
    assert_eq!(dispatcher.api().calls(), 0);
}

#[tokio::test]
async fn list_brands_reports_connected_networks() {
    let api = FakeApi {
        brands: serde_json::from_value(json!([
            {"id": 1, "label": "Acme", "linkedinCompany": "acme", "tiktok": "acme"},
            {"id": 2, "label": "Globex"}
        ]))
        .unwrap(),
        ..Default::default()
    };
    let dispatcher = Dispatcher::new(api);

    let result = dispatcher.call_tool("list_brands", json!({})).await;

    assert!(!result.is_error);
    assert_eq!(
        body(&result),
        json!({
            "success": true,
            "brands": [
                {"id": "1", "name": "Acme", "networks": ["linkedin", "tiktok"]},
                {"id": "2", "name": "Globex", "networks": []}
            ]
        })
    );
}

#[tokio::test]
async fn schedule_post_forwards_arguments() {
    let dispatcher = Dispatcher::new(FakeApi::default());

    let result = dispatcher
        .dispatch(
            "schedule_post",
            json!({
                "brandId": 55,
                "text": "Hello world",
                "dateTime": "2026-11-02T09:30:00",
                "timezone": "",
                "imageUrl": "https://cdn.example.com/x.png"
            }),
        )
        .await;

    assert!(!result.is_error);
    let sent = dispatcher.api().scheduled.lock().unwrap().clone().unwrap();
    assert_eq!(sent.brand_id, "55");
    assert_eq!(sent.timezone, None);
    assert_eq!(sent.network, None);
    assert_eq!(sent.image_url.as_deref(), Some("https://cdn.example.com/x.png"));

    assert_eq!(
        body(&result),
        json!({
            "success": true,
            "message": "Post scheduled successfully",
            "postId": 900,
            "uuid": "u-900",
            "scheduledDate": "2026-11-02T09:30:00",
            "networks": ["linkedin"]
        })
    );
}

#[tokio::test]
async fn missing_required_argument_is_a_failure_envelope() {
    let dispatcher = Dispatcher::new(FakeApi::default());

    let result = dispatcher
        .dispatch("schedule_post", json!({"brandId": "1", "text": "hi"}))
        .await;

    assert!(result.is_error);
    let body = body(&result);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("dateTime"));
    assert_eq!(dispatcher.api().calls(), 0);
}

#[tokio::test]
async fn scheduled_posts_keep_only_pending() {
    let api = FakeApi {
        posts: serde_json::from_value(json!([
            {
                "id": 1,
                "text": "x".repeat(150),
                "publicationDate": {"dateTime": "2026-11-01T10:00:00", "timezone": "Europe/Madrid"},
                "providers": [{"network": "linkedin", "status": "PENDING", "detailedStatus": "Scheduled"}]
            },
            {
                "id": 2,
                "text": "done",
                "providers": [{"network": "linkedin", "status": "PUBLISHED"}]
            },
            {
                "id": 3,
                "text": "broken",
                "providers": [{"network": "twitter", "status": "ERROR"}]
            }
        ]))
        .unwrap(),
        ..Default::default()
    };
    let dispatcher = Dispatcher::new(api);

    let result = dispatcher
        .dispatch("list_scheduled_posts", json!({"brandId": "1"}))
        .await;
    let body = body(&result);

    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 1);
    let post = &body["posts"][0];
    assert_eq!(post["id"], 1);
    assert_eq!(post["text"].as_str().unwrap().chars().count(), 103);
    assert_eq!(post["scheduledDate"], "2026-11-01T10:00:00");
    assert_eq!(post["timezone"], "Europe/Madrid");
    assert_eq!(post["networks"], json!(["linkedin"]));
    assert_eq!(post["status"], "Scheduled");
}

#[tokio::test]
async fn analytics_summary_and_top_posts() {
    let api = FakeApi {
        records: serde_json::from_value(json!([
            {"id": "a", "text": "first", "impressions": 100, "engagements": 10, "publishedAt": "2026-09-02"},
            {"postId": "b", "content": "second", "impressions": 50, "engagement": 5, "date": "2026-09-03"}
        ]))
        .unwrap(),
        ..Default::default()
    };
    let dispatcher = Dispatcher::new(api);

    let result = dispatcher
        .dispatch(
            "get_analytics",
            json!({"brandId": "7", "startDate": "2026-09-01", "endDate": "2026-09-30"}),
        )
        .await;
    let body = body(&result);

    assert_eq!(
        *dispatcher.api().analytics_query.lock().unwrap(),
        Some((
            "7".to_string(),
            Some("2026-09-01".to_string()),
            Some("2026-09-30".to_string())
        ))
    );
    assert_eq!(body["summary"]["totalImpressions"], 150);
    assert_eq!(body["summary"]["totalEngagements"], 15);
    assert_eq!(body["summary"]["engagementRate"], "10.00%");
    assert_eq!(body["postCount"], 2);
    assert_eq!(body["topPosts"][0]["id"], "a");
    assert_eq!(body["topPosts"][1]["id"], "b");
    assert_eq!(body["topPosts"][1]["text"], "second");
    assert_eq!(body["topPosts"][1]["publishedAt"], "2026-09-03");
}

#[tokio::test]
async fn best_time_formats_slots() {
    let api = FakeApi {
        slots: serde_json::from_value(json!([
            {"dayOfWeek": 0, "hour": 0, "score": 2.0},
            {"dayOfWeek": 3, "hour": 12, "score": 9.5},
            {"dayOfWeek": 5, "hour": 13, "score": 4.0}
        ]))
        .unwrap(),
        ..Default::default()
    };
    let dispatcher = Dispatcher::new(api);

    let result = dispatcher
        .dispatch("get_best_time", json!({"brandId": "7"}))
        .await;
    let body = body(&result);

    assert_eq!(body["success"], true);
    assert!(body["recommendation"].is_string());
    assert_eq!(
        body["topSlots"],
        json!([
            {"day": "Wednesday", "time": "12:00 PM", "score": 9.5},
            {"day": "Friday", "time": "1:00 PM", "score": 4.0},
            {"day": "Sunday", "time": "12:00 AM", "score": 2.0}
        ])
    );
}

#[tokio::test]
async fn upstream_403_fails_every_tool_with_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let client = MetricoolClient::builder("token", "1")
        .base_url(server.uri())
        .build()
        .expect("client construction should not fail");
    let dispatcher = Dispatcher::new(client);

    let calls = [
        ("list_brands", json!({})),
        (
            "schedule_post",
            json!({"brandId": "1", "text": "hi", "dateTime": "2026-11-02T09:30:00"}),
        ),
        ("list_scheduled_posts", json!({"brandId": "1"})),
        ("get_analytics", json!({"brandId": "1"})),
        ("get_best_time", json!({"brandId": "1"})),
    ];

    for (name, arguments) in calls {
        let result = dispatcher.dispatch(name, arguments).await;
        assert!(result.is_error, "{name} should fail");
        let body = body(&result);
        assert_eq!(body["success"], false);
        let message = body["error"].as_str().unwrap();
        assert!(
            message.contains("403") && message.contains("forbidden"),
            "{name}: {message}"
        );
    }
}
