use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use crate::{
    errors::ErrorResponse,
    models::{
        courses::{Course, CreateCourseDto, UpdateCourseDto},
        response::{CourseCreatedResponse, ResultResponse, UpdateOutcome, UpdateStatus},
    },
    AppState, Result,
};

use super::{success, JsonBody};

pub fn courses_handler() -> Router {
    Router::new()
        .route("/courses", get(get_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/courses/title/{title}", get(get_course_by_title))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    tag = "courses",
    description = "Adds a new Course",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "New Course Created", body = CourseCreatedResponse),
        (status = 422, description = "Course could not be created", body = ErrorResponse),
        (status = 500, description = "\"attribute\" is not allowed to be empty", body = ErrorResponse)
    )
)]
pub async fn create_course(
    Extension(app_state): Extension<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse> {
    let course = app_state.courses_service.create_course(body).await?;

    Ok((
        StatusCode::CREATED,
        Json(CourseCreatedResponse {
            status: StatusCode::CREATED.as_u16(),
            message: "New Course Created".to_string(),
            course,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "courses",
    description = "Gets all Courses",
    responses(
        (status = 200, description = "Successful Get Request", body = ResultResponse<Vec<Course>>),
        (status = 404, description = "No Courses Found", body = ErrorResponse)
    )
)]
pub async fn get_courses(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse> {
    let courses = app_state.courses_service.get_courses().await?;
    Ok(Json(success(courses)))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    tag = "courses",
    description = "Gets one Course using its ID",
    params(("id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Successful Get Request", body = ResultResponse<Course>),
        (status = 404, description = "Course does not exist", body = ErrorResponse),
        (status = 422, description = "Invalid Course ID", body = ErrorResponse)
    )
)]
pub async fn get_course(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<impl IntoResponse> {
    let course = app_state.courses_service.get_course(&course_id).await?;
    Ok(Json(success(course)))
}

#[utoipa::path(
    get,
    path = "/api/courses/title/{title}",
    tag = "courses",
    description = "Gets the first Course with the given title",
    params(("title" = String, Path, description = "Course title")),
    responses(
        (status = 200, description = "Successful Get Request", body = ResultResponse<Course>),
        (status = 404, description = "No Courses Found", body = ErrorResponse)
    )
)]
pub async fn get_course_by_title(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse> {
    let course = app_state.courses_service.get_course_by_title(&title).await?;
    Ok(Json(success(course)))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    tag = "courses",
    description = "Updates Course",
    params(("id" = String, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course successfully updated", body = ResultResponse<UpdateOutcome>),
        (status = 422, description = "Course does not exist or invalid Course ID", body = ErrorResponse),
        (status = 500, description = "\"attribute\" is not allowed to be empty", body = ErrorResponse)
    )
)]
pub async fn update_course(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(course_id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Response> {
    let status = app_state
        .courses_service
        .update_course(&course_id, body)
        .await?;

    Ok(match status {
        UpdateStatus::Updated(outcome) => Json(ResultResponse {
            status: StatusCode::OK.as_u16(),
            message: format!("Course {course_id} was updated succesfully"),
            result: outcome,
        })
        .into_response(),
        UpdateStatus::Unchanged => (StatusCode::OK, "No update was made").into_response(),
    })
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    tag = "courses",
    description = "Deletes one Course using its ID",
    params(("id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted", body = String, content_type = "text/plain"),
        (status = 422, description = "Course does not exist or invalid Course ID", body = ErrorResponse)
    )
)]
pub async fn delete_course(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<impl IntoResponse> {
    app_state.courses_service.delete_course(&course_id).await?;

    Ok((
        StatusCode::OK,
        format!("Course {course_id} was deleted succesfully"),
    ))
}
