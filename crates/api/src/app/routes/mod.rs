use axum::Router;

pub mod bookings;
pub mod common;
pub mod customers;
pub mod services;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/customers", customers::router())
        .nest("/bookings", bookings::router())
        .nest("/services", services::router())
}
