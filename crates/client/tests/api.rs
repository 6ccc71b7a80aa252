//! Integration tests for `MetricoolClient` using wiremock HTTP mocks.

use client::{Error, MetricoolClient, SchedulePostRequest};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> MetricoolClient {
    MetricoolClient::builder("secret-token", "1234")
        .base_url(base_url)
        .timezone("Europe/Madrid")
        .build()
        .expect("client construction should not fail")
}

#[tokio::test]
async fn list_brands_sends_auth_header_and_user_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/simpleProfiles"))
        .and(query_param("userId", "1234"))
        .and(header("X-Mc-Auth", "secret-token"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 11, "label": "Acme", "linkedinCompany": "acme", "twitter": "acme"},
            {"id": 12, "label": "Globex"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let brands = test_client(&server.uri()).list_brands().await.expect("should list");

    assert_eq!(brands.len(), 2);
    assert_eq!(brands[0].id, 11);
    assert_eq!(brands[0].label, "Acme");
    assert_eq!(brands[0].handles.connected(), vec!["linkedin", "twitter"]);
    assert!(brands[1].handles.connected().is_empty());
}

#[tokio::test]
async fn schedule_post_posts_body_and_unwraps_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/scheduler/posts"))
        .and(query_param("userId", "1234"))
        .and(query_param("blogId", "77"))
        .and(body_json(json!({
            "text": "Launch day",
            "publicationDate": {"dateTime": "2026-11-02T09:30:00", "timezone": "Europe/Madrid"},
            "providers": [{"network": "linkedin"}],
            "autoPublish": true,
            "linkedinData": {"previewIncluded": true, "type": "POST"},
            "media": ["https://cdn.example.com/launch.png"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "id": 501,
                "uuid": "f3c2",
                "text": "Launch day",
                "publicationDate": {"dateTime": "2026-11-02T09:30:00", "timezone": "Europe/Madrid"},
                "providers": [{"network": "linkedin", "status": "PENDING"}],
                "draft": false
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SchedulePostRequest {
        brand_id: "77".into(),
        text: "Launch day".into(),
        date_time: "2026-11-02T09:30:00".into(),
        image_url: Some("https://cdn.example.com/launch.png".into()),
        ..Default::default()
    };
    let post = test_client(&server.uri())
        .schedule_post(&request)
        .await
        .expect("should schedule");

    assert_eq!(post.id, Some(501));
    assert_eq!(post.uuid.as_deref(), Some("f3c2"));
    assert_eq!(post.providers[0].network, "linkedin");
}

#[tokio::test]
async fn schedule_post_without_data_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/scheduler/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let request = SchedulePostRequest {
        brand_id: "77".into(),
        text: "Hi".into(),
        date_time: "2026-11-02T09:30:00".into(),
        ..Default::default()
    };
    let err = test_client(&server.uri())
        .schedule_post(&request)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingData(_)));
}

#[tokio::test]
async fn list_scheduled_posts_queries_window_and_timezone() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/scheduler/posts"))
        .and(query_param("userId", "1234"))
        .and(query_param("blogId", "77"))
        .and(query_param("timezone", "Europe/Madrid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "text": "a", "providers": []}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let posts = test_client(&server.uri())
        .list_scheduled_posts("77")
        .await
        .expect("should list");
    assert_eq!(posts.len(), 1);

    let requests = server.received_requests().await.expect("recording enabled");
    let query: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let start = &query.iter().find(|(k, _)| k == "start").expect("start").1;
    let end = &query.iter().find(|(k, _)| k == "end").expect("end").1;

    // YYYY-MM-DDTHH:MM:SS, no offset, no fraction.
    for ts in [start, end] {
        assert_eq!(ts.len(), 19, "unexpected timestamp {ts}");
        assert_eq!(&ts[10..11], "T");
        assert!(!ts.contains('Z') && !ts.contains('+') && !ts.contains('.'));
    }
    assert!(start < end);
}

#[tokio::test]
async fn list_scheduled_posts_without_data_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/scheduler/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let posts = test_client(&server.uri())
        .list_scheduled_posts("77")
        .await
        .expect("should list");
    assert!(posts.is_empty());
}

#[tokio::test]
async fn get_analytics_sends_compact_dates_and_returns_bare_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stats/posts"))
        .and(query_param("blogId", "77"))
        .and(query_param("start", "20260901"))
        .and(query_param("end", "20260930"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "impressions": 100, "engagements": 10},
            {"postId": "b", "impressions": 50, "engagement": 5}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let records = test_client(&server.uri())
        .get_analytics("77", Some("2026-09-01"), Some("2026-09-30"))
        .await
        .expect("should fetch");

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].get("engagement"), Some(&json!(5)));
}

#[tokio::test]
async fn get_best_times_targets_linkedin() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/scheduler/besttimes/linkedin"))
        .and(query_param("blogId", "77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"dayOfWeek": 2, "hour": 9, "score": 4.5}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let slots = test_client(&server.uri())
        .get_best_times("77")
        .await
        .expect("should fetch");
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].hour, 9);
}

#[tokio::test]
async fn delete_scheduled_post_uses_delete_verb() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/scheduler/posts/501"))
        .and(query_param("userId", "1234"))
        .and(header("X-Mc-Auth", "secret-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri())
        .delete_scheduled_post("501")
        .await
        .expect("should delete");
}

#[tokio::test]
async fn non_success_status_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let errors = vec![
        client.list_brands().await.unwrap_err(),
        client.list_scheduled_posts("77").await.unwrap_err(),
        client.get_analytics("77", None, None).await.unwrap_err(),
        client.get_best_times("77").await.unwrap_err(),
        client.delete_scheduled_post("1").await.unwrap_err(),
    ];

    for err in errors {
        assert!(
            matches!(&err, Error::Upstream { status: 403, body } if body == "forbidden"),
            "unexpected error: {err:?}"
        );
        let message = err.to_string();
        assert!(message.contains("403") && message.contains("forbidden"), "{message}");
    }
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/simpleProfiles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).list_brands().await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}
