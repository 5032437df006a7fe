//! NotifyHub Platform
//!
//! Notification delivery backend:
//! - Web and email notification entities stored in a document database
//! - Repositories with filtered, ordered, cursor-paginated reads
//! - REST API consumed by the notification client

pub mod api;
pub mod domain;
pub mod error;
pub mod repository;

pub use domain::*;
pub use error::NotificationError;
