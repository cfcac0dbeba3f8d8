use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all guest list endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route(
            "/v1/guest",
            get(handler::list_guests).post(handler::create_guest),
        )
        .route(
            "/v1/guest/:id",
            get(handler::get_guest).delete(handler::delete_guest),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
