//! Email Notification Repository

use std::sync::Arc;

use tracing::debug;

use nh_common::{Filter, Page, Sort};
use nh_store::{DocumentStore, Query};

use crate::domain::email_notification::fields;
use crate::domain::{EmailNotification, EmailStatus};
use crate::error::{NotificationError, Result};

use super::{require_entity_id, require_positive_page_size};

pub struct EmailNotificationRepository {
    store: Arc<dyn DocumentStore<EmailNotification>>,
}

impl EmailNotificationRepository {
    pub fn new(store: Arc<dyn DocumentStore<EmailNotification>>) -> Self {
        Self { store }
    }

    /// Same paged-read contract as the web repository, with the send date as
    /// the fixed secondary sort key.
    pub async fn read_page(
        &self,
        filter: Option<Filter>,
        order_by: Option<&str>,
        next_page_id: Option<&str>,
        page_size: i64,
    ) -> Result<Page<EmailNotification>> {
        require_positive_page_size(page_size)?;

        let sort = match order_by {
            Some(field) => vec![
                Sort::ascending(field),
                Sort::descending(fields::SEND_ON_UTC_DATE),
            ],
            None => vec![Sort::descending(fields::SEND_ON_UTC_DATE)],
        };

        let query = Query::new(filter, sort);
        let page = self
            .store
            .query_page(&query, next_page_id, page_size as usize)
            .await?;

        Ok(Page::new(page.items, page.next_cursor))
    }

    /// Convenience paged read over delivery state, used by the dispatch
    /// worker and the API listing.
    pub async fn read_page_by_status(
        &self,
        status: EmailStatus,
        next_page_id: Option<&str>,
        page_size: i64,
    ) -> Result<Page<EmailNotification>> {
        let filter = Filter::eq(fields::STATUS, status.as_str());
        self.read_page(Some(filter), None, next_page_id, page_size)
            .await
    }

    pub async fn read(&self, notification_id: &str) -> Result<EmailNotification> {
        require_entity_id(notification_id)?;

        self.store
            .point_read(notification_id)
            .await?
            .ok_or_else(|| NotificationError::not_found(notification_id))
    }

    pub async fn create(&self, notification: &EmailNotification) -> Result<()> {
        require_entity_id(&notification.notification_id)?;
        self.store.insert(notification).await?;
        debug!(notification_id = %notification.notification_id, "created email notification");
        Ok(())
    }

    pub async fn update(&self, notification: &EmailNotification) -> Result<()> {
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

    /// Records a delivery outcome and returns the updated entity.
    pub async fn record_outcome(
        &self,
        notification_id: &str,
        outcome: std::result::Result<(), String>,
    ) -> Result<EmailNotification> {
        let mut notification = self.read(notification_id).await?;
        match outcome {
            Ok(()) => notification.mark_sent(),
            Err(error) => notification.mark_failed(error),
        }
        self.update(&notification).await?;
        Ok(notification)
    }

    pub async fn delete(&self, notification_id: &str) -> Result<bool> {
        require_entity_id(notification_id)?;
        Ok(self.store.delete(notification_id).await?)
    }
}
