//! NotifyHub Server
//!
//! Production server for the notification delivery REST APIs:
//! - Web notifications: list/read/create/mark-read/dismiss/delete
//! - Email notifications: list/read/create
//! - Health and readiness probes
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `NH_API_PORT` | `8080` | HTTP API port |
//! | `NH_MONGO_URL` | `mongodb://localhost:27017` | MongoDB connection URL |
//! | `NH_MONGO_DB` | `notifyhub` | MongoDB database name |
//! | `NH_DEV_MODE` | `false` | Use a seeded in-memory store instead of MongoDB |
//! | `RUST_LOG` | `info` | Log level |

use std::sync::Arc;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use chrono::{Duration, Utc};
use nh_platform::api::{
    email_notifications_router, notifications_router, EmailNotificationsState, NotificationsState,
    NotifyHubApiDoc,
};
use nh_platform::domain::{EmailNotification, NotificationPriority, WebNotification};
use nh_platform::repository::{EmailNotificationRepository, WebNotificationRepository};
use nh_store::{DocumentStore, MemoryStore, MongoStore};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// A handful of notifications so the client has something to render against
/// the in-memory store.
fn seed_dev_data() -> (Vec<WebNotification>, Vec<EmailNotification>) {
    let now = Utc::now();
    let web = vec![
        WebNotification::new("dev-web-1", "billing", "dev@example.com", "Invoice ready")
            .with_body("Your invoice for May is ready.")
            .with_priority(NotificationPriority::High)
            .with_publish_date(now - Duration::hours(1))
            .with_expiry(now + Duration::days(30)),
        WebNotification::new("dev-web-2", "ci", "dev@example.com", "Build passed")
            .with_body("Pipeline #42 finished.")
            .with_publish_date(now - Duration::hours(2)),
        WebNotification::new("dev-web-3", "ci", "dev@example.com", "Build failed")
            .with_body("Pipeline #41 failed on test stage.")
            .with_priority(NotificationPriority::Low)
            .with_publish_date(now - Duration::hours(3)),
    ];
    let email = vec![EmailNotification::new(
        "dev-email-1",
        "billing",
        vec!["dev@example.com".to_string()],
        "Invoice ready",
    )
    .with_body("Your invoice for May is attached.")];
    (web, email)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Starting NotifyHub Server");

    // Configuration from environment
    let api_port: u16 = env_or_parse("NH_API_PORT", 8080);
    let mongo_url = env_or("NH_MONGO_URL", "mongodb://localhost:27017");
    let mongo_db = env_or("NH_MONGO_DB", "notifyhub");
    let dev_mode = std::env::var("NH_DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    let (web_store, email_store): (
        Arc<dyn DocumentStore<WebNotification>>,
        Arc<dyn DocumentStore<EmailNotification>>,
    ) = if dev_mode {
        info!("Dev mode: using seeded in-memory stores");
        let (web, email) = seed_dev_data();
        (
            Arc::new(MemoryStore::with_entities(web)),
            Arc::new(MemoryStore::with_entities(email)),
        )
    } else {
        info!("Connecting to MongoDB: {}/{}", mongo_url, mongo_db);
        let mongo_client = mongodb::Client::with_uri_str(&mongo_url).await?;
        let db = mongo_client.database(&mongo_db);
        (
            Arc::new(MongoStore::new(&db, "web_notifications")),
            Arc::new(MongoStore::new(&db, "email_notifications")),
        )
    };

    // Initialize repositories
    let notification_repo = Arc::new(WebNotificationRepository::new(web_store));
    let email_repo = Arc::new(EmailNotificationRepository::new(email_store));
    info!("Repositories initialized");

    let notifications_state = NotificationsState { notification_repo };
    let email_notifications_state = EmailNotificationsState { email_repo };

    // Build API router
    let app = Router::new()
        .nest(
            "/api/v1/notifications",
            notifications_router(notifications_state),
        )
        .nest(
            "/api/v1/email-notifications",
            email_notifications_router(email_notifications_state),
        )
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .merge(SwaggerUi::new("/swagger-ui").url("/q/openapi", NotifyHubApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start API server
    let api_addr = format!("0.0.0.0:{}", api_port);
    info!("API server listening on http://{}", api_addr);

    let listener = TcpListener::bind(&api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("NotifyHub Server shutdown complete");
    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "UP",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn ready_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "READY"
    }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
