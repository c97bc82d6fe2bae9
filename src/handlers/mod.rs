use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, StatusCode},
};
use serde_json::{Map, Value};

use crate::{models::response::ResultResponse, Error};

pub mod auth;
pub mod courses;
pub mod posts;

/// Raw JSON request body.
///
/// A request without a body, or one not sent as `application/json`, reads
/// as an empty object so validation reports on the fields themselves.
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|content_type| content_type.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with("application/json"));

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| Error::Validation(rejection.body_text()))?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Value::Object(Map::new())));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|err| Error::Validation(err.to_string()))
    }
}

fn success<T>(result: T) -> ResultResponse<T> {
    ResultResponse {
        status: StatusCode::OK.as_u16(),
        message: "Successful Get Request".to_string(),
        result,
    }
}
