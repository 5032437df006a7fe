//! Platform Error Types

use thiserror::Error;

use nh_store::StoreError;

#[derive(Error, Debug)]
pub enum NotificationError {
    /// Malformed caller input, detected before any store call.
    #[error("{message}")]
    InvalidArgument { message: String },

    /// A point read found no matching notification. Paged reads never raise
    /// this; an empty page is a valid outcome.
    #[error("The notification with notificationId '{notification_id}' is not found.")]
    NotificationNotFound { notification_id: String },

    /// Store and transport failures, propagated unchanged.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl NotificationError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(notification_id: impl Into<String>) -> Self {
        Self::NotificationNotFound {
            notification_id: notification_id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NotificationError>;
