use std::sync::Arc;

use axum::{http::Method, Extension, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    docs::docs_handler,
    handlers::{auth::auth_handler, courses::courses_handler, posts::posts_handler},
    AppState,
};

pub fn create_routes(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .merge(courses_handler())
        .merge(posts_handler())
        .merge(auth_handler());

    Router::new()
        .nest("/api", api_route)
        .merge(docs_handler())
        .layer(TraceLayer::new_for_http())
        .layer(configure_cors())
        .layer(Extension(app_state))
}

pub fn configure_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}
