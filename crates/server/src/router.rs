use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Creates the Axum router with all the application routes.
///
/// The profile and hello-world routes answer with and without a trailing slash.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/hello_world", get(handlers::hello_world))
        .route("/hello_world/", get(handlers::hello_world))
        .route("/get_profile", post(handlers::get_profile_handler))
        .route("/get_profile/", post(handlers::get_profile_handler))
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
