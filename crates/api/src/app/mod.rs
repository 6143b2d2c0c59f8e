//! HTTP application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store selection and service construction (in-memory or
//!   Postgres, picked by environment)
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: success envelopes and response shapes
//! - `errors.rs`: uniform error envelope rendering

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app() -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services().await?);
    Ok(build_router(services))
}

/// Assemble the router around an already-built service set.
///
/// Split out from `build_app` so tests can wire in-memory services without
/// touching the environment.
pub fn build_router(services: Arc<AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .fallback(errors::unknown_route)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .layer(Extension(services))
}

/// Single-origin CORS for the frontend, credentials allowed.
fn cors_layer() -> CorsLayer {
    let origin = std::env::var("CORS_ORIGIN").unwrap_or_else(|_| {
        tracing::warn!("CORS_ORIGIN not set; allowing http://localhost:4200");
        "http://localhost:4200".to_string()
    });

    match origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!(%origin, "invalid CORS_ORIGIN; cross-origin requests disabled");
            CorsLayer::new()
        }
    }
}
