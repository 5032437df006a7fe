//! Repository Layer
//!
//! Read/write access to notification entities through the document store
//! interface. Repositories hold no state across calls; each read is one
//! independent request and concurrent calls are unordered.

pub mod email_notification;
pub mod web_notification;

pub use email_notification::EmailNotificationRepository;
pub use web_notification::WebNotificationRepository;

use crate::error::{NotificationError, Result};

/// Shared argument validation for every repository operation that takes an
/// entity id or a page size.
pub(crate) fn require_entity_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(NotificationError::invalid_argument(
            "The entity Id is not specified.",
        ));
    }
    Ok(())
}

pub(crate) fn require_positive_page_size(page_size: i64) -> Result<()> {
    if page_size <= 0 {
        return Err(NotificationError::invalid_argument(
            "The page size must be greater than zero.",
        ));
    }
    Ok(())
}
