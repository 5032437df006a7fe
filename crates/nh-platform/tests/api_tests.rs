//! API Endpoint Tests
//!
//! Routers exercised in-process with an in-memory store: listing with
//! pagination params, point reads, status transitions, and error mapping.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use chrono::{Duration, TimeZone, Utc};
use nh_platform::api::{notifications_router, NotificationsState};
use nh_platform::domain::{NotificationPriority, WebNotification};
use nh_platform::repository::WebNotificationRepository;
use nh_store::MemoryStore;

fn test_app() -> axum::Router {
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
    let notifications: Vec<WebNotification> = (0..5)
        .map(|i| {
            WebNotification::new(
                format!("n-{i}"),
                "billing",
                "user@example.com",
                format!("Notification #{i}"),
            )
            .with_priority(if i % 2 == 0 {
                NotificationPriority::High
            } else {
                NotificationPriority::Low
            })
            .with_publish_date(base + Duration::hours(i as i64))
        })
        .collect();

    let repo = Arc::new(WebNotificationRepository::new(Arc::new(
        MemoryStore::with_entities(notifications),
    )));
    notifications_router(NotificationsState {
        notification_repo: repo,
    })
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn list_returns_page_with_cursor() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?pageSize=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert!(body["nextPageId"].is_string());
    // Most recent first.
    assert_eq!(body["items"][0]["notificationId"], "n-4");
}

#[tokio::test]
async fn list_follows_continuation_cursor() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/?pageSize=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    let cursor = body["nextPageId"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri(&format!("/?pageSize=3&nextPageId={cursor}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert!(body["nextPageId"].is_null());
}

#[tokio::test]
async fn active_only_keeps_notifications_without_expiry() {
    let now = Utc::now();
    let notifications = vec![
        // No expiry set, so it never expires.
        WebNotification::new("evergreen", "billing", "user@example.com", "Evergreen"),
        WebNotification::new("expired", "billing", "user@example.com", "Expired")
            .with_expiry(now - Duration::hours(1)),
        WebNotification::new("active", "billing", "user@example.com", "Active")
            .with_expiry(now + Duration::hours(1)),
    ];
    let repo = Arc::new(WebNotificationRepository::new(Arc::new(
        MemoryStore::with_entities(notifications),
    )));
    let app = notifications_router(NotificationsState {
        notification_repo: repo,
    });

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?activeOnly=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let ids: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["notificationId"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"evergreen"));
    assert!(ids.contains(&"active"));
}

#[tokio::test]
async fn list_rejects_bad_page_size_and_unknown_status() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/?pageSize=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?readStatus=ARCHIVED")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_rejects_foreign_cursor() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/?pageSize=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let cursor = json_body(response).await["nextPageId"]
        .as_str()
        .unwrap()
        .to_string();

    // Same cursor, different filter.
    let response = app
        .oneshot(
            Request::builder()
                .uri(&format!("/?pageSize=3&readStatus=NEW&nextPageId={cursor}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"], "invalid_cursor");
}

#[tokio::test]
async fn get_by_id_and_not_found_mapping() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/n-1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["notificationId"], "n-1");
    assert_eq!(body["priority"], "LOW");

    let response = app
        .oneshot(Request::builder().uri("/n-99").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(
        body["message"],
        "The notification with notificationId 'n-99' is not found."
    );
}

#[tokio::test]
async fn mark_read_transitions_status() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/n-2/read")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["readStatus"], "READ");

    let response = app
        .oneshot(Request::builder().uri("/n-2").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["readStatus"], "READ");
}

#[tokio::test]
async fn create_returns_created_entity() {
    let app = test_app();

    let payload = serde_json::json!({
        "title": "Deploy finished",
        "application": "ci",
        "recipient": "dev@example.com",
        "priority": "HIGH"
    });
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["title"], "Deploy finished");
    assert_eq!(body["priority"], "HIGH");
    assert_eq!(body["readStatus"], "NEW");
    assert!(body["notificationId"].is_string());
}
