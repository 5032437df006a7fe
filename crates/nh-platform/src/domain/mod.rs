//! Domain Models
//!
//! Notification entities persisted in the document store. Timestamps are
//! stored as BSON datetimes and priorities as integers so that server-side
//! range comparisons and ordering behave correctly.

pub mod email_notification;
pub mod web_notification;

pub use email_notification::{EmailNotification, EmailStatus};
pub use web_notification::{NotificationPriority, NotificationReadStatus, WebNotification};

/// Serde helper for optional BSON datetimes (the bson crate only ships the
/// non-optional variant).
pub(crate) mod optional_bson_datetime {
    use bson::DateTime as BsonDateTime;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => BsonDateTime::from_chrono(*ts).serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<BsonDateTime>::deserialize(deserializer)?;
        Ok(value.map(BsonDateTime::to_chrono))
    }
}
