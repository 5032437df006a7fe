//! Web Notification Repository

use std::sync::Arc;

use tracing::debug;

use nh_common::{Filter, Page, Sort};
use nh_store::{DocumentStore, Query};

use crate::domain::web_notification::fields;
use crate::domain::WebNotification;
use crate::error::{NotificationError, Result};

use super::{require_entity_id, require_positive_page_size};

/// Read/write access to web notifications. The store is abstracted behind
/// `DocumentStore`, so the repository runs unchanged against MongoDB or the
/// in-memory backend.
pub struct WebNotificationRepository {
    store: Arc<dyn DocumentStore<WebNotification>>,
}

impl WebNotificationRepository {
    pub fn new(store: Arc<dyn DocumentStore<WebNotification>>) -> Self {
        Self { store }
    }

    /// Reads one page of notifications matching `filter`, ordered by
    /// `order_by` ascending with publish date descending as the tie-breaker,
    /// or by publish date descending alone when no order field is given.
    ///
    /// The page content and order are exactly what the store produced; an
    /// empty page with no cursor is a valid end-of-results outcome, not an
    /// error.
    pub async fn read_page(
        &self,
        filter: Option<Filter>,
        order_by: Option<&str>,
        next_page_id: Option<&str>,
        page_size: i64,
    ) -> Result<Page<WebNotification>> {
        require_positive_page_size(page_size)?;

        let sort = match order_by {
            Some(field) => vec![
                Sort::ascending(field),
                Sort::descending(fields::PUBLISH_ON_UTC_DATE),
            ],
            None => vec![Sort::descending(fields::PUBLISH_ON_UTC_DATE)],
        };

        let query = Query::new(filter, sort);
        debug!(page_size, has_cursor = next_page_id.is_some(), "reading web notification page");
        let page = self
            .store
            .query_page(&query, next_page_id, page_size as usize)
            .await?;

        Ok(Page::new(page.items, page.next_cursor))
    }

    /// Reads a single notification by id. A missing notification is the one
    /// store outcome this layer translates into a domain error.
    pub async fn read(&self, notification_id: &str) -> Result<WebNotification> {
        require_entity_id(notification_id)?;

        self.store
            .point_read(notification_id)
            .await?
            .ok_or_else(|| NotificationError::not_found(notification_id))
    }

    pub async fn create(&self, notification: &WebNotification) -> Result<()> {
        require_entity_id(&notification.notification_id)?;
        self.store.insert(notification).await?;
        debug!(notification_id = %notification.notification_id, "created web notification");
        Ok(())
    }

    pub async fn update(&self, notification: &WebNotification) -> Result<()> {
        require_entity_id(&notification.notification_id)?;
        let replaced = self
            .store
            .replace(&notification.notification_id, notification)
            .await?;
        if !replaced {
            return Err(NotificationError::not_found(&notification.notification_id));
        }
        Ok(())
    }

    pub async fn delete(&self, notification_id: &str) -> Result<bool> {
        require_entity_id(notification_id)?;
        Ok(self.store.delete(notification_id).await?)
    }

    /// Marks a notification as read and returns the updated entity.
    pub async fn mark_read(&self, notification_id: &str) -> Result<WebNotification> {
        let mut notification = self.read(notification_id).await?;
        notification.mark_read();
        self.update(&notification).await?;
        Ok(notification)
    }

    /// Dismisses a notification and returns the updated entity.
    pub async fn dismiss(&self, notification_id: &str) -> Result<WebNotification> {
        let mut notification = self.read(notification_id).await?;
        notification.dismiss();
        self.update(&notification).await?;
        Ok(notification)
    }
}
