use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::{
    errors::ErrorResponse,
    handlers::{auth, courses, posts},
    models::{
        auth::{LoginDto, LoginResponseDto},
        courses::{Course, CreateCourseDto, UpdateCourseDto},
        posts::{CreatePostDto, Post, UpdatePostDto},
        response::{CourseCreatedResponse, PostCreatedResponse, UpdateOutcome},
    },
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog API",
        description = "A Blog API that allows authors to publish posts and comment on other posts"
    ),
    paths(
        courses::create_course,
        courses::get_courses,
        courses::get_course,
        courses::get_course_by_title,
        courses::update_course,
        courses::delete_course,
        posts::create_post,
        posts::get_posts,
        posts::get_post,
        posts::get_posts_by_title,
        posts::get_posts_by_category,
        posts::get_posts_by_user,
        posts::update_post,
        posts::delete_post,
        auth::login,
        auth::logout,
    ),
    components(schemas(
        Course,
        CreateCourseDto,
        UpdateCourseDto,
        Post,
        CreatePostDto,
        UpdatePostDto,
        CourseCreatedResponse,
        PostCreatedResponse,
        UpdateOutcome,
        LoginDto,
        LoginResponseDto,
        ErrorResponse,
    )),
    tags(
        (name = "courses", description = "Course catalogue"),
        (name = "posts", description = "Blog posts"),
        (name = "auth", description = "Session handling")
    )
)]
pub struct ApiDoc;

pub fn docs_handler() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
