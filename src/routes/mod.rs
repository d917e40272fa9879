use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Extension, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handlers::{
        docs::api_docs, posts::posts_handler, route_not_found, students::students_handler,
        teachers::teachers_handler,
    },
    middleware::error_envelope,
    AppState,
};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .nest(
            "/posts",
            posts_handler().method_not_allowed_fallback(route_not_found),
        )
        .nest(
            "/students",
            students_handler().method_not_allowed_fallback(route_not_found),
        )
        .nest(
            "/teachers",
            teachers_handler().method_not_allowed_fallback(route_not_found),
        )
        .route("/api-docs", get(api_docs))
        .fallback(route_not_found)
        .layer(from_fn_with_state(app_state.clone(), error_envelope))
        .layer(Extension(app_state.clone()))
        .layer(configure_cors(&app_state.config))
        .layer(TraceLayer::new_for_http())
}

/// Any origin unless `CORS_ORIGINS` pins an allow-list.
pub fn configure_cors(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}
