//! Email Notification Repository Tests

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use nh_platform::domain::{EmailNotification, EmailStatus, NotificationPriority};
use nh_platform::repository::EmailNotificationRepository;
use nh_platform::NotificationError;
use nh_store::MemoryStore;

fn seeded_repository() -> EmailNotificationRepository {
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
    let emails: Vec<EmailNotification> = (0..6)
        .map(|i| {
            let mut email = EmailNotification::new(
                format!("email-{i}"),
                "billing",
                vec!["user@example.com".to_string()],
                format!("Subject #{i}"),
            )
            .with_priority(NotificationPriority::Normal)
            .with_send_date(base + Duration::minutes(i as i64));
            if i % 2 == 0 {
                email.mark_sent();
            }
            email
        })
        .collect();
    EmailNotificationRepository::new(Arc::new(MemoryStore::with_entities(emails)))
}

#[tokio::test]
async fn read_page_by_status_filters_and_orders_by_send_date() {
    let repo = seeded_repository();

    let page = repo
        .read_page_by_status(EmailStatus::Sent, None, 10)
        .await
        .unwrap();
    assert_eq!(page.items.len(), 3);
    assert!(page.items.iter().all(|e| e.status == EmailStatus::Sent));
    for pair in page.items.windows(2) {
        assert!(pair[0].send_on_utc_date >= pair[1].send_on_utc_date);
    }
}

#[tokio::test]
async fn paging_by_status_continues_with_cursor() {
    let repo = seeded_repository();

    let first = repo
        .read_page_by_status(EmailStatus::Queued, None, 2)
        .await
        .unwrap();
    assert_eq!(first.items.len(), 2);
    assert!(first.next_page_id.is_some());

    let second = repo
        .read_page_by_status(EmailStatus::Queued, first.next_page_id.as_deref(), 2)
        .await
        .unwrap();
    assert_eq!(second.items.len(), 1);
    assert!(second.next_page_id.is_none());
}

#[tokio::test]
async fn point_read_validation_matches_web_repository() {
    let repo = seeded_repository();

    let err = repo.read(" ").await.unwrap_err();
    assert_eq!(err.to_string(), "The entity Id is not specified.");

    let err = repo.read("email-99").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "The notification with notificationId 'email-99' is not found."
    );
}

#[tokio::test]
async fn record_outcome_updates_delivery_state() {
    let repo = seeded_repository();

    let failed = repo
        .record_outcome("email-1", Err("smtp timeout".to_string()))
        .await
        .unwrap();
    assert_eq!(failed.status, EmailStatus::Failed);
    assert_eq!(failed.try_count, 1);
    assert_eq!(failed.error_message.as_deref(), Some("smtp timeout"));

    let sent = repo.record_outcome("email-1", Ok(())).await.unwrap();
    assert_eq!(sent.status, EmailStatus::Sent);
    assert!(sent.error_message.is_none());

    let err = repo
        .record_outcome("email-99", Ok(()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        NotificationError::NotificationNotFound { .. }
    ));
}
