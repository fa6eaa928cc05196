use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all catalog endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::health_handler))
        .route(
            "/mod3ds",
            get(handler::list_public).post(handler::create_record),
        )
        .route("/mod3ds/all", get(handler::list_all))
        .route(
            "/mod3ds/:id",
            get(handler::get_record)
                .put(handler::update_record)
                .delete(handler::delete_record),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
