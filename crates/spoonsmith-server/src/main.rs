//! Spoonsmith Web Server
//!
//! Serves the spoon design form and renders outlines on demand.
//!
//! ## Endpoints
//!
//! - `GET /` design form
//! - `GET /design?...` form plus preview
//! - `GET /spoon.png?...` PNG download (compact by default)
//! - `GET /template.svg?...` SVG template download (annotated by default)
//! - `GET /health`
//!
//! Query parameters are the spec field names (`bowl_shape`, `bowl_width`, ...)
//! plus `mode` and, for PNG, `scale`.

mod config;
mod form;
mod routes;

use config::ServerConfig;
use routes::AppState;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spoonsmith_server=info,tower_http=info".into()),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid server configuration");
            std::process::exit(1);
        }
    };

    let app = routes::router(Arc::new(AppState::new(config.composer)));

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    info!("Spoonsmith server listening on {}", config.addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server failed");
        std::process::exit(1);
    }
}
