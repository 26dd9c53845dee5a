use axum::{http::HeaderValue, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

use self::graphql::GatewaySchema;
use crate::infrastructure::config::Config;

pub mod graphql;

pub fn build_router(schema: GatewaySchema, config: &Config) -> Router {
    let router = graphql::router(schema)
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http());

    if let Some(static_files) = static_files(config) {
        router.fallback_service(static_files)
    } else {
        router
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.app.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .app
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

fn static_files(config: &Config) -> Option<ServeDir> {
    let dir = config.app.static_dir.as_deref()?;
    Some(ServeDir::new(dir).append_index_html_on_directories(true))
}
