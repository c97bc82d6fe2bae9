use std::sync::Arc;

use axum::{
    http::HeaderMap,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::{
    errors::ErrorResponse,
    models::{
        auth::{LoginDto, LoginResponseDto},
        validation::validate_payload,
    },
    AppState, Result,
};

use super::JsonBody;

pub const API_KEY_HEADER: &str = "x-api-key";

pub fn auth_handler() -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", get(logout))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    description = "Opens a session for a user vouched for by the identity provider",
    params(("x-api-key" = String, Header, description = "Identity provider key")),
    request_body = LoginDto,
    responses(
        (status = 200, description = "Session opened", body = LoginResponseDto),
        (status = 401, description = "Missing or wrong API key", body = ErrorResponse),
        (status = 500, description = "\"userId\" is required", body = ErrorResponse)
    )
)]
pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    cookies: CookieJar,
    headers: HeaderMap,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse> {
    let api_key = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    app_state.auth_service.check_api_key(api_key)?;

    let session: LoginDto = validate_payload(body)?;
    let user_id = session.user_id.unwrap_or_default();
    let token = app_state.auth_service.issue_token(&user_id)?;

    let cookie_duration = time::Duration::hours(app_state.auth_service.session_hours());
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true);

    Ok((
        cookies.add(cookie),
        Json(LoginResponseDto {
            status: "success".to_string(),
            token,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = "auth",
    description = "Ends the current session",
    responses(
        (status = 200, description = "Session cleared", body = String, content_type = "text/plain")
    )
)]
pub async fn logout(cookies: CookieJar) -> impl IntoResponse {
    let cookies = cookies.remove(Cookie::build(("token", "")).path("/"));
    (cookies, "You have been logged out")
}
