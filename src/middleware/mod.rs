use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use axum_extra::extract::CookieJar;
use tracing::debug;

use crate::AppState;

pub const PROTECTED_RESOURCE_MESSAGE: &str = "This is a protected resource, log in to continue";

/// The user behind a verified session, available to gated handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

/// Lets the request through only when it carries a valid session token.
///
/// Unauthenticated requests get a plain-text notice with status 200 rather
/// than a 401.
pub async fn auth_gate(
    Extension(app_state): Extension<Arc<AppState>>,
    cookies: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let token = cookies
        .get("token")
        .map(|c| c.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| {
                    auth_value
                        .strip_prefix("Bearer ")
                        .map(|stripped| stripped.to_string())
                })
        });

    let user_id = token.and_then(|token| app_state.auth_service.decode_token(token).ok());

    match user_id {
        Some(user_id) => {
            req.extensions_mut().insert(AuthUser { user_id });
            next.run(req).await
        }
        None => {
            debug!(path = %req.uri().path(), "Rejected unauthenticated request");
            (StatusCode::OK, PROTECTED_RESOURCE_MESSAGE).into_response()
        }
    }
}
