use axum::{
    Router,
    routing::{get, post},
};
#[cfg(debug_assertions)]
use tower_http::cors::CorsLayer;

use crate::{AppState, middleware::log_errors, routes};

// 搜索相关的路由
pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/search/locations", get(routes::search::search_locations))
        .route("/search/flights", post(routes::search::search_flights))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(routes::search::health))
        .merge(search_routes());

    // 根路径不能 nest，前缀为空时直接使用
    let base_uri = state.config.api_base_uri.trim_matches('/');
    let router = if base_uri.is_empty() {
        api
    } else {
        Router::new().nest(&format!("/{}", base_uri), api)
    };

    let router = router.layer(axum::middleware::from_fn(log_errors));

    // 开发模式下允许跨域
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(CorsLayer::permissive())
    };

    router.with_state(state)
}
