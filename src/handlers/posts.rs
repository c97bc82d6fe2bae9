use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use crate::{
    errors::ErrorResponse,
    middleware::{auth_gate, AuthUser},
    models::{
        posts::{CreatePostDto, Post, PostField, UpdatePostDto},
        response::{PostCreatedResponse, ResultResponse, UpdateOutcome, UpdateStatus},
    },
    AppState, Result,
};

use super::{success, JsonBody};

pub fn posts_handler() -> Router {
    Router::new()
        .route("/posts", get(get_posts))
        .route("/posts", post(create_post).layer(middleware::from_fn(auth_gate)))
        .route("/posts/{id}", get(get_post))
        .route(
            "/posts/{id}",
            put(update_post).layer(middleware::from_fn(auth_gate)),
        )
        .route(
            "/posts/{id}",
            delete(delete_post).layer(middleware::from_fn(auth_gate)),
        )
        .route("/posts/title/{title}", get(get_posts_by_title))
        .route("/posts/category/{category}", get(get_posts_by_category))
        .route("/posts/user/{userid}", get(get_posts_by_user))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    description = "Adds a new Post for the logged in user",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "New Post Created", body = PostCreatedResponse),
        (status = 200, description = "Not logged in", body = String, content_type = "text/plain"),
        (status = 422, description = "Post could not be created", body = ErrorResponse),
        (status = 500, description = "\"attribute\" is not allowed to be empty", body = ErrorResponse)
    )
)]
pub async fn create_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse> {
    let post = app_state
        .posts_service
        .create_post(body, &user.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PostCreatedResponse {
            status: StatusCode::CREATED.as_u16(),
            message: "New Post Created".to_string(),
            post,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    description = "Gets all Posts",
    responses(
        (status = 200, description = "Successful Get Request", body = ResultResponse<Vec<Post>>),
        (status = 404, description = "No Posts Found", body = ErrorResponse)
    )
)]
pub async fn get_posts(Extension(app_state): Extension<Arc<AppState>>) -> Result<impl IntoResponse> {
    let posts = app_state.posts_service.get_posts().await?;
    Ok(Json(success(posts)))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    description = "Gets one Post using its ID",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Successful Get Request", body = ResultResponse<Post>),
        (status = 404, description = "Post does not exist", body = ErrorResponse),
        (status = 422, description = "Invalid Post ID", body = ErrorResponse)
    )
)]
pub async fn get_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse> {
    let post = app_state.posts_service.get_post(&post_id).await?;
    Ok(Json(success(post)))
}

#[utoipa::path(
    get,
    path = "/api/posts/title/{title}",
    tag = "posts",
    description = "Gets all Posts with the given title",
    params(("title" = String, Path, description = "Post title")),
    responses(
        (status = 200, description = "Successful Get Request", body = ResultResponse<Vec<Post>>),
        (status = 404, description = "No Posts Found", body = ErrorResponse)
    )
)]
pub async fn get_posts_by_title(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse> {
    find_posts_by(&app_state, PostField::Title, &title).await
}

#[utoipa::path(
    get,
    path = "/api/posts/category/{category}",
    tag = "posts",
    description = "Gets all Posts in a category",
    params(("category" = String, Path, description = "Post category")),
    responses(
        (status = 200, description = "Successful Get Request", body = ResultResponse<Vec<Post>>),
        (status = 404, description = "No Posts Found", body = ErrorResponse)
    )
)]
pub async fn get_posts_by_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse> {
    find_posts_by(&app_state, PostField::Category, &category).await
}

#[utoipa::path(
    get,
    path = "/api/posts/user/{userid}",
    tag = "posts",
    description = "Gets all Posts written by a user",
    params(("userid" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Successful Get Request", body = ResultResponse<Vec<Post>>),
        (status = 404, description = "No Posts Found", body = ErrorResponse)
    )
)]
pub async fn get_posts_by_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse> {
    find_posts_by(&app_state, PostField::User, &user_id).await
}

async fn find_posts_by(
    app_state: &AppState,
    field: PostField,
    value: &str,
) -> Result<Json<ResultResponse<Vec<Post>>>> {
    let posts = app_state.posts_service.get_posts_by(field, value).await?;
    Ok(Json(success(posts)))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    description = "Updates Post",
    params(("id" = String, Path, description = "Post ID")),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post successfully updated", body = ResultResponse<UpdateOutcome>),
        (status = 422, description = "Post does not exist or invalid Post ID", body = ErrorResponse),
        (status = 500, description = "\"attribute\" is not allowed to be empty", body = ErrorResponse)
    )
)]
pub async fn update_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Response> {
    let status = app_state.posts_service.update_post(&post_id, body).await?;

    Ok(match status {
        UpdateStatus::Updated(outcome) => Json(ResultResponse {
            status: StatusCode::OK.as_u16(),
            message: format!("Post {post_id} was updated succesfully"),
            result: outcome,
        })
        .into_response(),
        UpdateStatus::Unchanged => (StatusCode::OK, "No update was made").into_response(),
    })
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    description = "Deletes one Post using its ID",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post deleted", body = String, content_type = "text/plain"),
        (status = 422, description = "Post does not exist or invalid Post ID", body = ErrorResponse)
    )
)]
pub async fn delete_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse> {
    app_state.posts_service.delete_post(&post_id).await?;

    Ok((
        StatusCode::OK,
        format!("Post {post_id} was deleted succesfully"),
    ))
}
