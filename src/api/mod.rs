use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

mod assets;
mod error;
mod posts;
mod research;
mod types;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &crate::config::Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }
}

#[must_use]
pub fn create_app_state(shared: Arc<SharedState>) -> Arc<AppState> {
    Arc::new(AppState { shared })
}

pub fn router(state: Arc<AppState>) -> Router {
    let images_path = state.config().general.images_path.clone();
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/research", post(research::research))
        .route("/generate", post(posts::generate))
        .route("/posts", get(posts::list_posts))
        .route("/post/{id}", get(posts::get_post))
        .route("/post/{id}", delete(posts::delete_post))
        .with_state(state)
        .nest_service(
            "/static/images",
            tower_http::services::ServeDir::new(images_path),
        )
        .fallback(assets::serve_asset)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
