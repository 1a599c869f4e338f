//! ticketd — a support ticket service with owner/admin role-based access
//! control.
//!
//! Users own tickets; admins may read and update (but not delete) any
//! ticket and list the whole collection. Authentication happens upstream
//! at a reverse proxy; ticketd trusts an identity header and re-validates
//! the principal against its user store on every operation.

pub mod authz;
pub mod config;
pub mod db;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state, routing::get};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::TicketdConfig>,
    pub db: Arc<db::DbPool>,
    pub services: services::Services,
}

impl AppState {
    /// Connect to the database, run migrations if configured, and build
    /// the service layer.
    pub async fn new(config: config::TicketdConfig) -> db::DbResult<Self> {
        let pool = db::DbPool::from_config(&config.database).await?;
        if config.database.run_migrations {
            pool.run_migrations().await?;
        }

        let db = Arc::new(pool);
        let services = services::Services::new(db.clone());

        Ok(Self {
            config: Arc::new(config),
            db,
            services,
        })
    }
}

/// Build the application router.
///
/// `notes` is an optional external notes sub-resource router, nested under
/// `/tickets/{id}/notes` (see [`routes::tickets::router`]).
pub fn build_router(state: AppState, notes: Option<Router<AppState>>) -> Router {
    let tickets = routes::tickets::router(notes).layer(from_fn_with_state(
        state.clone(),
        middleware::principal_middleware,
    ));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/tickets", tickets)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(RequestBodyLimitLayer::new(state.config.server.max_body_bytes))
        .with_state(state)
}
