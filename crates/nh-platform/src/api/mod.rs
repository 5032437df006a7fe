//! REST API Layer
//!
//! Thin axum controllers over the repositories. Error mapping lives in
//! `common`: invalid arguments become 400s, missing notifications 404s, and
//! store failures 500s.

pub mod common;
pub mod email_notifications;
pub mod notifications;
pub mod openapi;

pub use email_notifications::{email_notifications_router, EmailNotificationsState};
pub use notifications::{notifications_router, NotificationsState};
pub use openapi::NotifyHubApiDoc;
