//! Web Notifications API
//!
//! REST endpoints backing the client's notification tray.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use nh_common::Filter;

use crate::domain::web_notification::fields;
use crate::domain::{NotificationPriority, NotificationReadStatus, WebNotification};
use crate::error::{NotificationError, Result};
use crate::repository::WebNotificationRepository;

use super::common::{PageResponse, SuccessResponse};

pub(crate) const DEFAULT_PAGE_SIZE: i64 = 20;

/// Notifications service state
#[derive(Clone)]
pub struct NotificationsState {
    pub notification_repo: Arc<WebNotificationRepository>,
}

/// Web notification response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebNotificationResponse {
    pub notification_id: String,
    pub title: String,
    pub body: String,
    pub application: String,
    pub sender: String,
    pub recipient: String,
    pub priority: String,
    pub read_status: String,
    pub publish_on_utc_date: String,
    pub expires_on_utc_date: Option<String>,
    pub tracking_id: Option<String>,
    pub properties: Option<HashMap<String, String>>,
}

impl From<WebNotification> for WebNotificationResponse {
    fn from(n: WebNotification) -> Self {
        Self {
            notification_id: n.notification_id,
            title: n.title,
            body: n.body,
            application: n.application,
            sender: n.sender,
            recipient: n.recipient,
            priority: n.priority.as_str().to_string(),
            read_status: n.read_status.as_str().to_string(),
            publish_on_utc_date: n.publish_on_utc_date.to_rfc3339(),
            expires_on_utc_date: n.expires_on_utc_date.map(|ts| ts.to_rfc3339()),
            tracking_id: n.tracking_id,
            properties: n.properties,
        }
    }
}

/// Create notification request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    /// Notification id; generated when absent
    pub notification_id: Option<String>,
    pub title: String,
    pub body: Option<String>,
    pub application: String,
    pub sender: Option<String>,
    pub recipient: String,
    /// LOW, NORMAL or HIGH (defaults to NORMAL)
    pub priority: Option<String>,
    pub publish_on_utc_date: Option<DateTime<Utc>>,
    pub expires_on_utc_date: Option<DateTime<Utc>>,
    pub tracking_id: Option<String>,
    pub properties: Option<HashMap<String, String>>,
}

/// Query parameters for the notifications listing
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NotificationsQuery {
    /// Filter by read status (NEW, READ, DISMISSED)
    pub read_status: Option<String>,

    /// Filter by priority (LOW, NORMAL, HIGH)
    pub priority: Option<String>,

    /// Filter by recipient
    pub recipient: Option<String>,

    /// Filter by originating application
    pub application: Option<String>,

    /// Drop already-expired notifications from the listing
    pub active_only: Option<bool>,

    /// Primary sort field, ascending (priority, application or
    /// publishOnUtcDate); publish date descending breaks ties
    pub order_by: Option<String>,

    /// Continuation token from a previous page
    pub next_page_id: Option<String>,

    /// Maximum number of items to return
    pub page_size: Option<i64>,
}

fn parse_priority(value: &str) -> Result<NotificationPriority> {
    NotificationPriority::parse(value).ok_or_else(|| {
        NotificationError::invalid_argument(format!("Unknown priority '{value}'."))
    })
}

fn parse_read_status(value: &str) -> Result<NotificationReadStatus> {
    NotificationReadStatus::parse(value).ok_or_else(|| {
        NotificationError::invalid_argument(format!("Unknown read status '{value}'."))
    })
}

fn resolve_order_field(order_by: Option<&str>) -> Result<Option<&'static str>> {
    match order_by {
        None => Ok(None),
        Some("priority") => Ok(Some(fields::PRIORITY)),
        Some("application") => Ok(Some(fields::APPLICATION)),
        Some("publishOnUtcDate") => Ok(Some(fields::PUBLISH_ON_UTC_DATE)),
        Some(other) => Err(NotificationError::invalid_argument(format!(
            "Unknown order field '{other}'."
        ))),
    }
}

fn build_filter(query: &NotificationsQuery) -> Result<Option<Filter>> {
    let mut clauses = Vec::new();

    if let Some(status) = query.read_status.as_deref() {
        let status = parse_read_status(status)?;
        clauses.push(Filter::eq(fields::READ_STATUS, status.as_str()));
    }
    if let Some(priority) = query.priority.as_deref() {
        let priority = parse_priority(priority)?;
        clauses.push(Filter::eq(fields::PRIORITY, priority.rank()));
    }
    if let Some(recipient) = query.recipient.as_deref() {
        clauses.push(Filter::eq(fields::RECIPIENT, recipient));
    }
    if let Some(application) = query.application.as_deref() {
        clauses.push(Filter::eq(fields::APPLICATION, application));
    }
    if query.active_only.unwrap_or(false) {
        // A notification without an expiry never expires.
        clauses.push(Filter::or(vec![
            Filter::absent(fields::EXPIRES_ON_UTC_DATE),
            Filter::gt(fields::EXPIRES_ON_UTC_DATE, Utc::now()),
        ]));
    }

    Ok(match clauses.len() {
        0 => None,
        1 => clauses.pop(),
        _ => Some(Filter::and(clauses)),
    })
}

/// List notifications with filters and cursor pagination
#[utoipa::path(
    get,
    path = "",
    params(NotificationsQuery),
    responses(
        (status = 200, body = PageResponse<WebNotificationResponse>),
        (status = 400, description = "Invalid filter, order field, page size or cursor")
    ),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(state): State<NotificationsState>,
    Query(query): Query<NotificationsQuery>,
) -> Result<Json<PageResponse<WebNotificationResponse>>> {
    let filter = build_filter(&query)?;
    let order_by = resolve_order_field(query.order_by.as_deref())?;
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

    let page = state
        .notification_repo
        .read_page(filter, order_by, query.next_page_id.as_deref(), page_size)
        .await?;

    Ok(Json(PageResponse {
        items: page.items.into_iter().map(Into::into).collect(),
        next_page_id: page.next_page_id,
    }))
}

/// Get a notification by id
#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, body = WebNotificationResponse),
        (status = 404, description = "Notification not found")
    ),
    tag = "notifications"
)]
pub async fn get_notification(
    State(state): State<NotificationsState>,
    Path(id): Path<String>,
) -> Result<Json<WebNotificationResponse>> {
    let notification = state.notification_repo.read(&id).await?;
    Ok(Json(notification.into()))
}

/// Create a notification
#[utoipa::path(
    post,
    path = "",
    request_body = CreateNotificationRequest,
    responses((status = 201, body = WebNotificationResponse)),
    tag = "notifications"
)]
pub async fn create_notification(
    State(state): State<NotificationsState>,
    Json(request): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<WebNotificationResponse>)> {
    let notification_id = request
        .notification_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let mut notification = WebNotification::new(
        notification_id,
        request.application,
        request.recipient,
        request.title,
    );
    if let Some(body) = request.body {
        notification = notification.with_body(body);
    }
    if let Some(sender) = request.sender {
        notification = notification.with_sender(sender);
    }
    if let Some(priority) = request.priority.as_deref() {
        notification = notification.with_priority(parse_priority(priority)?);
    }
    if let Some(publish_on) = request.publish_on_utc_date {
        notification = notification.with_publish_date(publish_on);
    }
    if let Some(expires_on) = request.expires_on_utc_date {
        notification = notification.with_expiry(expires_on);
    }
    if let Some(tracking_id) = request.tracking_id {
        notification = notification.with_tracking_id(tracking_id);
    }
    if let Some(properties) = request.properties {
        notification = notification.with_properties(properties);
    }

    state.notification_repo.create(&notification).await?;
    Ok((StatusCode::CREATED, Json(notification.into())))
}

/// Mark a notification as read
#[utoipa::path(
    post,
    path = "/{id}/read",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, body = WebNotificationResponse),
        (status = 404, description = "Notification not found")
    ),
    tag = "notifications"
)]
pub async fn mark_notification_read(
    State(state): State<NotificationsState>,
    Path(id): Path<String>,
) -> Result<Json<WebNotificationResponse>> {
    let notification = state.notification_repo.mark_read(&id).await?;
    Ok(Json(notification.into()))
}

/// Dismiss a notification
#[utoipa::path(
    post,
    path = "/{id}/dismiss",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, body = WebNotificationResponse),
        (status = 404, description = "Notification not found")
    ),
    tag = "notifications"
)]
pub async fn dismiss_notification(
    State(state): State<NotificationsState>,
    Path(id): Path<String>,
) -> Result<Json<WebNotificationResponse>> {
    let notification = state.notification_repo.dismiss(&id).await?;
    Ok(Json(notification.into()))
}

/// Delete a notification
#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, body = SuccessResponse),
        (status = 404, description = "Notification not found")
    ),
    tag = "notifications"
)]
pub async fn delete_notification(
    State(state): State<NotificationsState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let deleted = state.notification_repo.delete(&id).await?;
    if !deleted {
        return Err(NotificationError::not_found(id));
    }
    Ok(Json(SuccessResponse::ok()))
}

/// Create notifications router
pub fn notifications_router(state: NotificationsState) -> Router {
    Router::new()
        .route("/", get(list_notifications).post(create_notification))
        .route("/:id", get(get_notification).delete(delete_notification))
        .route("/:id/read", post(mark_notification_read))
        .route("/:id/dismiss", post(dismiss_notification))
        .with_state(state)
}
