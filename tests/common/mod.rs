#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use blog_api::{
    config::Config,
    repositories::{courses_repo::CourseRepository, posts_repo::PostRepository, MemoryRepo},
    routes::create_routes,
    services::auth::AuthService,
    AppState,
};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

pub const JWT_SECRET: &str = "test-secret";
pub const API_KEY: &str = "test-api-key";

pub fn test_config() -> Config {
    Config {
        database_url: None,
        jwt_secret: JWT_SECRET.to_string(),
        jwt_maxage: 1,
        api_key: Some(API_KEY.to_string()),
        port: 0,
    }
}

pub fn test_app() -> Router {
    let repo = Arc::new(MemoryRepo::new());
    app_with(repo.clone(), repo)
}

pub fn app_with(courses: Arc<dyn CourseRepository>, posts: Arc<dyn PostRepository>) -> Router {
    create_routes(Arc::new(AppState::new(test_config(), courses, posts)))
}

pub fn session_token(user_id: &str) -> String {
    AuthService::new(JWT_SECRET.to_string(), 1, None)
        .issue_token(user_id)
        .unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

impl TestResponse {
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or_else(|err| {
            panic!("response is not JSON ({err}): {}", self.text);
        })
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> TestResponse {
    let mut request = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        headers,
        text: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}
