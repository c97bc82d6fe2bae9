use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validation::{deserialize_date, FieldKind, Schema};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(
        required(message = "\"title\" is required"),
        length(min = 1, message = "\"title\" is not allowed to be empty")
    )]
    #[schema(example = "CSE341")]
    pub title: Option<String>,
    #[validate(
        required(message = "\"category\" is required"),
        length(min = 1, message = "\"category\" is not allowed to be empty")
    )]
    #[schema(example = "Web Development")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<DateTime<Utc>>,
}

impl Schema for CreateCourseDto {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("title", FieldKind::Text),
        ("category", FieldKind::Text),
        ("date", FieldKind::Date),
    ];
}

/// Partial overwrite of a course. Absent fields are left untouched.
#[derive(Debug, Default, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, message = "\"title\" is not allowed to be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "\"category\" is not allowed to be empty"))]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<DateTime<Utc>>,
}

impl Schema for UpdateCourseDto {
    const FIELDS: &'static [(&'static str, FieldKind)] = CreateCourseDto::FIELDS;
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub category: String,
    pub date: Option<DateTime<Utc>>,
}

impl From<CreateCourseDto> for NewCourse {
    fn from(dto: CreateCourseDto) -> Self {
        Self {
            title: dto.title.unwrap_or_default(),
            category: dto.category.unwrap_or_default(),
            date: dto.date,
        }
    }
}

impl Course {
    pub fn apply(&mut self, changes: &UpdateCourseDto) -> bool {
        let mut modified = false;

        if let Some(title) = changes.title.as_ref().filter(|title| **title != self.title) {
            self.title = title.clone();
            modified = true;
        }
        if let Some(category) = changes
            .category
            .as_ref()
            .filter(|category| **category != self.category)
        {
            self.category = category.clone();
            modified = true;
        }
        if let Some(date) = changes.date.filter(|date| Some(*date) != self.date) {
            self.date = Some(date);
            modified = true;
        }

        modified
    }
}
