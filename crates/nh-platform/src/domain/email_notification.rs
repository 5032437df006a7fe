//! Email Notification Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nh_common::{Document, FieldValue};

use super::web_notification::NotificationPriority;

/// Delivery state of an email notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmailStatus {
    Queued,
    Sent,
    Failed,
}

impl EmailStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EmailStatus::Queued => "QUEUED",
            EmailStatus::Sent => "SENT",
            EmailStatus::Failed => "FAILED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "QUEUED" => Some(EmailStatus::Queued),
            "SENT" => Some(EmailStatus::Sent),
            "FAILED" => Some(EmailStatus::Failed),
            _ => None,
        }
    }
}

pub mod fields {
    pub const NOTIFICATION_ID: &str = "_id";
    pub const APPLICATION: &str = "application";
    pub const STATUS: &str = "status";
    pub const PRIORITY: &str = "priority";
    pub const SEND_ON_UTC_DATE: &str = "sendOnUtcDate";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailNotification {
    #[serde(rename = "_id")]
    pub notification_id: String,

    pub subject: String,

    pub body: String,

    pub to: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<String>,

    pub application: String,

    pub priority: NotificationPriority,

    pub status: EmailStatus,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub send_on_utc_date: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    pub try_count: i32,
}

impl EmailNotification {
    pub fn new(
        notification_id: impl Into<String>,
        application: impl Into<String>,
        to: Vec<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            notification_id: notification_id.into(),
            subject: subject.into(),
            body: String::new(),
            to,
            cc: Vec::new(),
            application: application.into(),
            priority: NotificationPriority::Normal,
            status: EmailStatus::Queued,
            send_on_utc_date: Utc::now(),
            error_message: None,
            try_count: 0,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_cc(mut self, cc: Vec<String>) -> Self {
        self.cc = cc;
        self
    }

    pub fn with_priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_send_date(mut self, send_on: DateTime<Utc>) -> Self {
        self.send_on_utc_date = send_on;
        self
    }

    pub fn mark_sent(&mut self) {
        self.status = EmailStatus::Sent;
        self.error_message = None;
    }

    pub fn mark_failed(&mut self, error: impl Into<String>) {
        self.status = EmailStatus::Failed;
        self.error_message = Some(error.into());
        self.try_count += 1;
    }
}

impl Document for EmailNotification {
    fn document_id(&self) -> &str {
        &self.notification_id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            fields::NOTIFICATION_ID => Some(FieldValue::Str(self.notification_id.clone())),
            fields::APPLICATION => Some(FieldValue::Str(self.application.clone())),
            fields::STATUS => Some(FieldValue::Str(self.status.as_str().to_string())),
            fields::PRIORITY => Some(FieldValue::Int(self.priority.rank())),
            fields::SEND_ON_UTC_DATE => Some(FieldValue::Timestamp(self.send_on_utc_date)),
            _ => None,
        }
    }
}
