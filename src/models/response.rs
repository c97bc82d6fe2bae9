use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Successful read or update: `{status, message, result}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResultResponse<T> {
    pub status: u16,
    pub message: String,
    pub result: T,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseCreatedResponse {
    pub status: u16,
    pub message: String,
    pub course: super::courses::Course,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostCreatedResponse {
    pub status: u16,
    pub message: String,
    pub post: super::posts::Post,
}

/// Match and modification counts reported by a partial update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    Updated(UpdateOutcome),
    Unchanged,
}
