pub mod config;
pub mod error;
pub mod state;
pub mod routes;
pub mod store;
pub mod submission;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::{AppState, SharedState};
use crate::store::notion::NotionClient;
use crate::store::{RecordStore, StoreError};

/// Build the application backed by the Notion API.
pub fn build_app(config: Config) -> Result<Router, StoreError> {
    let missing = config.notion.missing();
    if !missing.is_empty() {
        tracing::warn!(
            "Notion is not fully configured (missing {}); submissions will fail",
            missing.join(", ")
        );
    }

    let store = Arc::new(NotionClient::new(config.notion.clone())?);
    Ok(build_router(&config, store))
}

/// Build the router around any record store.
pub fn build_router(config: &Config, store: Arc<dyn RecordStore>) -> Router {
    let state: SharedState = Arc::new(AppState { store });

    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ));

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(layers)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{origin}': {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn health() -> &'static str {
    "ok"
}
