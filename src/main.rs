//! Bistro Backend
//!
//! A REST backend persisting menu items and table reservations in SQLite.

mod api;
mod config;
mod db;
mod errors;
mod models;
mod service;

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::SqliteRecordStore;
use models::{MenuItem, Record, TableReservation};
use service::{Clock, MenuItemService, RandomSource, ReservationService, SystemClock, ThreadRandom};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub menu_items: Arc<MenuItemService>,
    pub reservations: Arc<ReservationService>,
}

impl AppState {
    /// Build one store and service per collection over a shared pool.
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let random: Arc<dyn RandomSource> = Arc::new(ThreadRandom);

        let menu_store =
            SqliteRecordStore::new(pool.clone(), MenuItem::COLLECTION, config.max_record_bytes);
        let reservation_store =
            SqliteRecordStore::new(pool, TableReservation::COLLECTION, config.max_record_bytes);

        Self {
            menu_items: Arc::new(MenuItemService::new(
                menu_store,
                clock.clone(),
                random.clone(),
            )),
            reservations: Arc::new(ReservationService::new(reservation_store, clock, random)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Bistro Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let state = AppState::new(pool, &config);

    let menu_count = state.menu_items.count().await?;
    let reservation_count = state.reservations.count().await?;
    tracing::info!(
        "Loaded {} menu items and {} table reservations",
        menu_count,
        reservation_count
    );

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Menu items
        .route(
            "/menu-items",
            get(api::get_menu_items).post(api::add_menu_item),
        )
        .route("/menu-items/{id}", put(api::update_menu_item))
        // Table reservations
        .route(
            "/reservations",
            get(api::get_table_reservations).post(api::add_table_reservation),
        )
        .route("/reservations/{id}", put(api::update_table_reservation));

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
