// Define data modules
pub mod errors; // ApiError taxonomy mapped to HTTP responses
pub mod metrics; // Prometheus registry and request-tracking middleware
pub mod models; // Data structures (Post, Customization)
pub mod routes_customize; // HTTP handlers for customization & upload APIs
pub mod routes_ops; // HTTP handlers for /health and /metrics
pub mod routes_posts; // HTTP handlers for post CRUD APIs
pub mod store; // Persistent storage (load/save posts.json, customization.json)
pub mod uploads; // Upload validation and placement

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::get,
};
use tower_http::services::ServeDir;

use crate::metrics::Metrics;
use crate::store::Store;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub metrics: Arc<Metrics>,
    pub static_dir: PathBuf,
    pub started: Instant,
}

impl AppState {
    pub fn new(store: Store, metrics: Metrics, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: Arc::new(store),
            metrics: Arc::new(metrics),
            static_dir: static_dir.into(),
            started: Instant::now(),
        }
    }
}

/// Build the full application router over the given state.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        // posts
        .route(
            "/posts",
            get(routes_posts::list_posts).post(routes_posts::create_post),
        )
        .route(
            "/posts/:id",
            get(routes_posts::get_post)
                .put(routes_posts::update_post)
                .delete(routes_posts::delete_post),
        )
        // uploads
        .route("/uploads", axum::routing::post(routes_customize::upload_image))
        // customization
        .route(
            "/customize",
            get(routes_customize::get_customization).post(routes_customize::update_customization),
        );

    Router::new()
        .nest("/api", api)
        .route("/health", get(routes_ops::health))
        .route("/metrics", get(routes_ops::metrics))
        .fallback_service(ServeDir::new(state.static_dir.clone()))
        .layer(DefaultBodyLimit::max(uploads::MAX_UPLOAD_BYTES))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            metrics::track_requests,
        ))
        .with_state(state)
}
