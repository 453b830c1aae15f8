use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_booking, get_booking, list_bookings, list_owner_bookings, update_booking,
};

/// Creates the API router with all booking endpoints
///
/// Command endpoints (Write operations):
/// - POST /bookings - Create a new booking (status WAITING)
/// - PATCH /bookings/:bookingId?approved= - Approve or reject a booking
///
/// Query endpoints (Read operations):
/// - GET /bookings/:bookingId - Get booking details
/// - GET /bookings?state=&from=&size= - List bookings made by the caller
/// - GET /bookings/owner?state=&from=&size= - List bookings on the caller's items
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Command endpoints (Write operations)
        .route("/bookings", post(create_booking).get(list_bookings))
        .route(
            "/bookings/:booking_id",
            patch(update_booking).get(get_booking),
        )
        // Query endpoints (Read operations)
        .route("/bookings/owner", get(list_owner_bookings))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
