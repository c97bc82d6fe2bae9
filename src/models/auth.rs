use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{FieldKind, Schema};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginDto {
    #[serde(rename = "userId")]
    #[validate(
        required(message = "\"userId\" is required"),
        length(min = 1, message = "\"userId\" is not allowed to be empty")
    )]
    pub user_id: Option<String>,
}

impl Schema for LoginDto {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[("userId", FieldKind::Text)];
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponseDto {
    pub status: String,
    pub token: String,
}
