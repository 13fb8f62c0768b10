use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod events;
mod feed;
mod models;
mod routes;
mod schema;
mod services;

use clinic_shared::clients::db::{create_pool, DbPool};
use clinic_shared::clients::rabbitmq::RabbitMQClient;
use config::AppConfig;
use events::changes::ChangeBus;

pub struct AppState {
    pub db: DbPool,
    pub config: AppConfig,
    pub rabbitmq: RabbitMQClient,
    pub changes: ChangeBus,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    clinic_shared::middleware::init_tracing("clinic-notification");

    let config = AppConfig::load()?;
    let port = config.port;

    // Set JWT_SECRET env var for the auth extractor middleware
    std::env::set_var("JWT_SECRET", &config.jwt_secret);

    let db = create_pool(&config.database_url)?;
    let rabbitmq = RabbitMQClient::connect(&config.rabbitmq_url).await?;
    let changes = ChangeBus::new();
    let metrics_handle = clinic_shared::middleware::init_metrics();

    let state = Arc::new(AppState { db, config, rabbitmq, changes, metrics_handle });

    // Background consumers turning domain events into notification rows.
    {
        let state = state.clone();
        tokio::spawn(async move {
            if let Err(e) = events::subscriber::listen_inventory_events(state).await {
                tracing::error!(error = %e, "inventory subscriber exited");
            }
        });
    }
    {
        let state = state.clone();
        tokio::spawn(async move {
            if let Err(e) = events::subscriber::listen_user_registered(state).await {
                tracing::error!(error = %e, "user subscriber exited");
            }
        });
    }

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::health::metrics))
        .route(
            "/notifications",
            get(routes::notifications::list_notifications)
                .post(routes::notifications::send_notification),
        )
        .route(
            "/notifications/unread-count",
            get(routes::notifications::unread_count),
        )
        .route(
            "/notifications/mark-all-read",
            post(routes::notifications::mark_all_read),
        )
        .route("/notifications/stream", get(routes::stream::notification_stream))
        .route("/notifications/:id/read", post(routes::notifications::mark_read))
        .route(
            "/notifications/:id",
            delete(routes::notifications::delete_notification),
        )
        .layer(axum::middleware::from_fn(
            clinic_shared::middleware::metrics_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "clinic-notification starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
