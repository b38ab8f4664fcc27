//! # HTTP Gateway
//!
//! Thin HTTP glue over the RCON client: each endpoint builds one command
//! string, runs one round trip through [`RconClient`], and adapts the
//! plain-text reply into JSON. State-mutating endpoints (POST) pass through
//! the allowlist middleware; read-only endpoints bypass it.
//!
//! All shared state is immutable after startup — handlers never coordinate
//! with each other beyond the read-only configuration in [`AppState`].

pub mod access;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod scrape;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::allowlist::Allowlist;
use crate::client::RconClient;
use crate::config::GatewayConfig;
use crate::error::Result;
use crate::utils::Metrics;

/// Shared, read-only gateway state.
#[derive(Debug)]
pub struct AppState {
    pub client: RconClient,
    pub allowlist: Allowlist,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: RconClient::new(config.rcon),
            allowlist: config.allowlist,
            metrics: Metrics::new(),
        }
    }

    /// Run one RCON command, recording metrics for the attempt.
    pub async fn run_command(&self, command: &str) -> Result<String> {
        self.metrics.command_started();
        match self.client.execute(command).await {
            Ok(reply) => Ok(reply),
            Err(error) => {
                self.metrics.command_failed(&error);
                Err(error)
            }
        }
    }
}

/// Build the gateway router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/static/{filename}", get(handlers::static_file))
        .route("/players", get(handlers::players))
        .route("/admins", get(handlers::admins))
        .route("/seed", get(handlers::seed))
        .route("/uptime", get(handlers::uptime))
        .route("/status", get(handlers::status))
        .route("/save", post(handlers::save))
        .route("/shutdown", post(handlers::shutdown))
        .route("/command", post(handlers::command))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access::restrict_mutations,
        ))
        .with_state(state)
}
