//! Web Notification Entity

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use nh_common::{Document, FieldValue};

use super::optional_bson_datetime;

/// Notification priority, ordered `Low < Normal < High`. Persisted as an
/// integer so the store can order and range-compare it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NotificationPriority {
    Low,
    Normal,
    High,
}

impl NotificationPriority {
    pub fn rank(self) -> i64 {
        match self {
            NotificationPriority::Low => 0,
            NotificationPriority::Normal => 1,
            NotificationPriority::High => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NotificationPriority::Low => "LOW",
            NotificationPriority::Normal => "NORMAL",
            NotificationPriority::High => "HIGH",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "LOW" => Some(NotificationPriority::Low),
            "NORMAL" => Some(NotificationPriority::Normal),
            "HIGH" => Some(NotificationPriority::High),
            _ => None,
        }
    }
}

impl fmt::Display for NotificationPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NotificationPriority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.rank() as i32)
    }
}

impl<'de> Deserialize<'de> for NotificationPriority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        match value {
            0 => Ok(NotificationPriority::Low),
            1 => Ok(NotificationPriority::Normal),
            2 => Ok(NotificationPriority::High),
            other => Err(serde::de::Error::custom(format!(
                "invalid notification priority: {other}"
            ))),
        }
    }
}

/// Read state of a web notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationReadStatus {
    New,
    Read,
    Dismissed,
}

impl NotificationReadStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationReadStatus::New => "NEW",
            NotificationReadStatus::Read => "READ",
            NotificationReadStatus::Dismissed => "DISMISSED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "NEW" => Some(NotificationReadStatus::New),
            "READ" => Some(NotificationReadStatus::Read),
            "DISMISSED" => Some(NotificationReadStatus::Dismissed),
            _ => None,
        }
    }
}

/// Serialized field names, shared by the `Document` impl and the filter/sort
/// builders so descriptors always target real document fields.
pub mod fields {
    pub const NOTIFICATION_ID: &str = "_id";
    pub const APPLICATION: &str = "application";
    pub const SENDER: &str = "sender";
    pub const RECIPIENT: &str = "recipient";
    pub const PRIORITY: &str = "priority";
    pub const READ_STATUS: &str = "readStatus";
    pub const PUBLISH_ON_UTC_DATE: &str = "publishOnUtcDate";
    pub const EXPIRES_ON_UTC_DATE: &str = "expiresOnUtcDate";
}

/// A notification shown in the client's notification tray.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebNotification {
    #[serde(rename = "_id")]
    pub notification_id: String,

    pub title: String,

    pub body: String,

    /// Application the notification originates from.
    pub application: String,

    pub sender: String,

    pub recipient: String,

    pub priority: NotificationPriority,

    pub read_status: NotificationReadStatus,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub publish_on_utc_date: DateTime<Utc>,

    #[serde(
        default,
        with = "optional_bson_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_on_utc_date: Option<DateTime<Utc>>,

    /// Correlation id propagated from the publishing system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,

    /// Additional payload fields, opaque to the platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, String>>,
}

impl WebNotification {
    pub fn new(
        notification_id: impl Into<String>,
        application: impl Into<String>,
        recipient: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            notification_id: notification_id.into(),
            title: title.into(),
            body: String::new(),
            application: application.into(),
            sender: String::new(),
            recipient: recipient.into(),
            priority: NotificationPriority::Normal,
            read_status: NotificationReadStatus::New,
            publish_on_utc_date: Utc::now(),
            expires_on_utc_date: None,
            tracking_id: None,
            properties: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    pub fn with_priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_publish_date(mut self, publish_on: DateTime<Utc>) -> Self {
        self.publish_on_utc_date = publish_on;
        self
    }

    pub fn with_expiry(mut self, expires_on: DateTime<Utc>) -> Self {
        self.expires_on_utc_date = Some(expires_on);
        self
    }

    pub fn with_tracking_id(mut self, tracking_id: impl Into<String>) -> Self {
        self.tracking_id = Some(tracking_id.into());
        self
    }

    pub fn with_properties(mut self, properties: HashMap<String, String>) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn mark_read(&mut self) {
        self.read_status = NotificationReadStatus::Read;
    }

    pub fn dismiss(&mut self) {
        self.read_status = NotificationReadStatus::Dismissed;
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_on_utc_date
            .map(|expires| expires <= now)
            .unwrap_or(false)
    }
}

impl Document for WebNotification {
    fn document_id(&self) -> &str {
        &self.notification_id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            fields::NOTIFICATION_ID => Some(FieldValue::Str(self.notification_id.clone())),
            fields::APPLICATION => Some(FieldValue::Str(self.application.clone())),
            fields::SENDER => Some(FieldValue::Str(self.sender.clone())),
            fields::RECIPIENT => Some(FieldValue::Str(self.recipient.clone())),
            fields::PRIORITY => Some(FieldValue::Int(self.priority.rank())),
            fields::READ_STATUS => Some(FieldValue::Str(self.read_status.as_str().to_string())),
            fields::PUBLISH_ON_UTC_DATE => Some(FieldValue::Timestamp(self.publish_on_utc_date)),
            fields::EXPIRES_ON_UTC_DATE => self.expires_on_utc_date.map(FieldValue::Timestamp),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_is_ordered() {
        assert!(NotificationPriority::Low < NotificationPriority::Normal);
        assert!(NotificationPriority::Normal < NotificationPriority::High);
        assert_eq!(NotificationPriority::High.rank(), 2);
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!(
            NotificationPriority::parse("high"),
            Some(NotificationPriority::High)
        );
        assert_eq!(NotificationPriority::parse("urgent"), None);
    }

    #[test]
    fn builder_defaults() {
        let notification = WebNotification::new("n-1", "billing", "user@example.com", "Invoice");
        assert_eq!(notification.priority, NotificationPriority::Normal);
        assert_eq!(notification.read_status, NotificationReadStatus::New);
        assert!(notification.expires_on_utc_date.is_none());
    }

    #[test]
    fn transitions() {
        let mut notification =
            WebNotification::new("n-1", "billing", "user@example.com", "Invoice");
        notification.mark_read();
        assert_eq!(notification.read_status, NotificationReadStatus::Read);
        notification.dismiss();
        assert_eq!(notification.read_status, NotificationReadStatus::Dismissed);
    }

    #[test]
    fn expiry_check() {
        let now = Utc::now();
        let notification = WebNotification::new("n-1", "billing", "user@example.com", "Invoice")
            .with_expiry(now - chrono::Duration::minutes(1));
        assert!(notification.is_expired(now));

        let notification = WebNotification::new("n-2", "billing", "user@example.com", "Invoice")
            .with_expiry(now + chrono::Duration::minutes(1));
        assert!(!notification.is_expired(now));
    }

    #[test]
    fn field_access_matches_serialized_names() {
        let notification = WebNotification::new("n-1", "billing", "user@example.com", "Invoice");
        assert_eq!(
            notification.field(fields::NOTIFICATION_ID),
            Some(FieldValue::Str("n-1".to_string()))
        );
        assert_eq!(
            notification.field(fields::PRIORITY),
            Some(FieldValue::Int(1))
        );
        assert_eq!(
            notification.field(fields::READ_STATUS),
            Some(FieldValue::Str("NEW".to_string()))
        );
        assert_eq!(notification.field(fields::EXPIRES_ON_UTC_DATE), None);
        assert_eq!(notification.field("unknown"), None);
    }
}
