use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validation::{deserialize_date, FieldKind, Schema};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq, ToSchema)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub content: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostDto {
    #[validate(
        required(message = "\"title\" is required"),
        length(min = 1, message = "\"title\" is not allowed to be empty")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "\"category\" is required"),
        length(min = 1, message = "\"category\" is not allowed to be empty")
    )]
    pub category: Option<String>,
    #[validate(
        required(message = "\"content\" is required"),
        length(min = 1, message = "\"content\" is not allowed to be empty")
    )]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<DateTime<Utc>>,
}

impl Schema for CreatePostDto {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("title", FieldKind::Text),
        ("category", FieldKind::Text),
        ("content", FieldKind::Text),
        ("date", FieldKind::Date),
    ];
}

#[derive(Debug, Default, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdatePostDto {
    #[validate(length(min = 1, message = "\"title\" is not allowed to be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "\"category\" is not allowed to be empty"))]
    pub category: Option<String>,
    #[validate(length(min = 1, message = "\"content\" is not allowed to be empty"))]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<DateTime<Utc>>,
}

impl Schema for UpdatePostDto {
    const FIELDS: &'static [(&'static str, FieldKind)] = CreatePostDto::FIELDS;
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub category: String,
    pub content: String,
    pub user_id: String,
    pub date: Option<DateTime<Utc>>,
}

impl NewPost {
    pub fn from_dto(dto: CreatePostDto, user_id: &str) -> Self {
        Self {
            title: dto.title.unwrap_or_default(),
            category: dto.category.unwrap_or_default(),
            content: dto.content.unwrap_or_default(),
            user_id: user_id.to_string(),
            date: dto.date,
        }
    }
}

/// Lookup keys for `GET /posts/{field}/{value}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    Title,
    Category,
    User,
}

impl PostField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Category => "category",
            Self::User => "user_id",
        }
    }

    pub fn matches(&self, post: &Post, value: &str) -> bool {
        match self {
            Self::Title => post.title == value,
            Self::Category => post.category == value,
            Self::User => post.user_id == value,
        }
    }
}

impl Post {
    pub fn apply(&mut self, changes: &UpdatePostDto) -> bool {
        let mut modified = false;

        for (current, change) in [
            (&mut self.title, &changes.title),
            (&mut self.category, &changes.category),
            (&mut self.content, &changes.content),
        ] {
            if let Some(value) = change.as_ref().filter(|value| **value != *current) {
                *current = value.clone();
                modified = true;
            }
        }
        if let Some(date) = changes.date.filter(|date| Some(*date) != self.date) {
            self.date = Some(date);
            modified = true;
        }

        modified
    }
}
