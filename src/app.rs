use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::services::DirectoryService;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryService>,
}

impl AppState {
    pub fn new(directory: DirectoryService) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }
}

pub fn app(state: AppState, enable_cors: bool) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // GLPI pass-through
        .route("/initSession", post(handlers::init_session_post))
        .route("/users", post(handlers::users_post))
        .route("/tickets", post(handlers::tickets_post))
        .with_state(state);

    let router = if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}
