use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use super::routes::{self, AppState};
use crate::application::board_service::BoardService;

/// Full application router: both collection endpoints, a health probe, and
/// an open CORS policy (any origin; preflight answered with an empty 200).
pub fn app<S: BoardService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(routes::tasks::router(state.clone()))
        .merge(routes::categories::router(state))
        .layer(cors())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}
