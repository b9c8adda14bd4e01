pub mod error;
pub mod routes;
pub mod state;
pub mod upload;

use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::adapters::http::state::HttpState;
use crate::config::ServerOptions;

/// Solo los orígenes configurados; cualquier método y cabecera.
pub fn cors_layer(opts: &ServerOptions) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(opts.cors_origins.clone()))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn router(state: HttpState, opts: &ServerOptions) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/predict", post(routes::predict))
        .layer(DefaultBodyLimit::max(opts.max_upload_bytes))
        .layer(cors_layer(opts))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
