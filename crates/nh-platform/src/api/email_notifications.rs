//! Email Notifications API

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use nh_common::Filter;

use crate::domain::email_notification::fields;
use crate::domain::{EmailNotification, EmailStatus};
use crate::error::{NotificationError, Result};
use crate::repository::EmailNotificationRepository;

use super::common::PageResponse;
use super::notifications::DEFAULT_PAGE_SIZE;

/// Email notifications service state
#[derive(Clone)]
pub struct EmailNotificationsState {
    pub email_repo: Arc<EmailNotificationRepository>,
}

/// Email notification response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailNotificationResponse {
    pub notification_id: String,
    pub subject: String,
    pub body: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub application: String,
    pub priority: String,
    pub status: String,
    pub send_on_utc_date: String,
    pub error_message: Option<String>,
    pub try_count: i32,
}

impl From<EmailNotification> for EmailNotificationResponse {
    fn from(n: EmailNotification) -> Self {
        Self {
            notification_id: n.notification_id,
            subject: n.subject,
            body: n.body,
            to: n.to,
            cc: n.cc,
            application: n.application,
            priority: n.priority.as_str().to_string(),
            status: n.status.as_str().to_string(),
            send_on_utc_date: n.send_on_utc_date.to_rfc3339(),
            error_message: n.error_message,
            try_count: n.try_count,
        }
    }
}

/// Create email notification request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmailNotificationRequest {
    pub notification_id: Option<String>,
    pub subject: String,
    pub body: Option<String>,
    pub to: Vec<String>,
    pub cc: Option<Vec<String>>,
    pub application: String,
}

/// Query parameters for the email notifications listing
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmailNotificationsQuery {
    /// Filter by delivery status (QUEUED, SENT, FAILED)
    pub status: Option<String>,

    /// Filter by originating application
    pub application: Option<String>,

    /// Continuation token from a previous page
    pub next_page_id: Option<String>,

    /// Maximum number of items to return
    pub page_size: Option<i64>,
}

fn build_filter(query: &EmailNotificationsQuery) -> Result<Option<Filter>> {
    let mut clauses = Vec::new();

    if let Some(status) = query.status.as_deref() {
        let status = EmailStatus::parse(status).ok_or_else(|| {
            NotificationError::invalid_argument(format!("Unknown email status '{status}'."))
        })?;
        clauses.push(Filter::eq(fields::STATUS, status.as_str()));
    }
    if let Some(application) = query.application.as_deref() {
        clauses.push(Filter::eq(fields::APPLICATION, application));
    }

    Ok(match clauses.len() {
        0 => None,
        1 => clauses.pop(),
        _ => Some(Filter::and(clauses)),
    })
}

/// List email notifications
#[utoipa::path(
    get,
    path = "",
    params(EmailNotificationsQuery),
    responses(
        (status = 200, body = PageResponse<EmailNotificationResponse>),
        (status = 400, description = "Invalid filter, page size or cursor")
    ),
    tag = "email-notifications"
)]
pub async fn list_email_notifications(
    State(state): State<EmailNotificationsState>,
    Query(query): Query<EmailNotificationsQuery>,
) -> Result<Json<PageResponse<EmailNotificationResponse>>> {
    let filter = build_filter(&query)?;
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

    let page = state
        .email_repo
        .read_page(filter, None, query.next_page_id.as_deref(), page_size)
        .await?;

    Ok(Json(PageResponse {
        items: page.items.into_iter().map(Into::into).collect(),
        next_page_id: page.next_page_id,
    }))
}

/// Get an email notification by id
#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, body = EmailNotificationResponse),
        (status = 404, description = "Notification not found")
    ),
    tag = "email-notifications"
)]
pub async fn get_email_notification(
    State(state): State<EmailNotificationsState>,
    Path(id): Path<String>,
) -> Result<Json<EmailNotificationResponse>> {
    let notification = state.email_repo.read(&id).await?;
    Ok(Json(notification.into()))
}

/// Queue an email notification
#[utoipa::path(
    post,
    path = "",
    request_body = CreateEmailNotificationRequest,
    responses((status = 201, body = EmailNotificationResponse)),
    tag = "email-notifications"
)]
pub async fn create_email_notification(
    State(state): State<EmailNotificationsState>,
    Json(request): Json<CreateEmailNotificationRequest>,
) -> Result<(StatusCode, Json<EmailNotificationResponse>)> {
    let notification_id = request
        .notification_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let mut notification = EmailNotification::new(
        notification_id,
        request.application,
        request.to,
        request.subject,
    );
    if let Some(body) = request.body {
        notification = notification.with_body(body);
    }
    if let Some(cc) = request.cc {
        notification = notification.with_cc(cc);
    }

    state.email_repo.create(&notification).await?;
    Ok((StatusCode::CREATED, Json(notification.into())))
}

/// Create email notifications router
pub fn email_notifications_router(state: EmailNotificationsState) -> Router {
    Router::new()
        .route(
            "/",
            get(list_email_notifications).post(create_email_notification),
        )
        .route("/:id", get(get_email_notification))
        .with_state(state)
}
