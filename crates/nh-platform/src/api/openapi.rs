//! OpenAPI Document

use utoipa::OpenApi;

use super::common::{ApiError, PageResponse, SuccessResponse};
use super::email_notifications::{CreateEmailNotificationRequest, EmailNotificationResponse};
use super::notifications::{CreateNotificationRequest, WebNotificationResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NotifyHub API",
        description = "Notification delivery service - web and email notifications with cursor-paginated reads",
    ),
    paths(
        super::notifications::list_notifications,
        super::notifications::get_notification,
        super::notifications::create_notification,
        super::notifications::mark_notification_read,
        super::notifications::dismiss_notification,
        super::notifications::delete_notification,
        super::email_notifications::list_email_notifications,
        super::email_notifications::get_email_notification,
        super::email_notifications::create_email_notification,
    ),
    components(schemas(
        ApiError,
        SuccessResponse,
        WebNotificationResponse,
        CreateNotificationRequest,
        EmailNotificationResponse,
        CreateEmailNotificationRequest,
        PageResponse<WebNotificationResponse>,
        PageResponse<EmailNotificationResponse>,
    )),
    tags(
        (name = "notifications", description = "Web notification tray"),
        (name = "email-notifications", description = "Email notification queue"),
    )
)]
pub struct NotifyHubApiDoc;
