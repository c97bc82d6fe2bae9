mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use blog_api::{
    models::{
        courses::{Course, NewCourse, UpdateCourseDto},
        response::UpdateOutcome,
    },
    repositories::{courses_repo::CourseRepository, MemoryRepo, StoreError, StoreResult},
};
use common::{app_with, send, test_app};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn course_lifecycle() {
    let app = test_app();

    let created = send(
        &app,
        Method::POST,
        "/api/courses",
        Some(json!({ "title": "CSE341", "category": "Web Development" })),
        None,
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let created = created.json();
    assert_eq!(created["status"], 201);
    assert_eq!(created["message"], "New Course Created");
    assert_eq!(created["course"]["title"], "CSE341");
    assert_eq!(created["course"]["category"], "Web Development");
    let id = created["course"]["id"].as_str().unwrap().to_string();

    let fetched = send(&app, Method::GET, &format!("/api/courses/{id}"), None, None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    let fetched = fetched.json();
    assert_eq!(fetched["message"], "Successful Get Request");
    assert_eq!(fetched["result"]["title"], "CSE341");
    assert_eq!(fetched["result"]["category"], "Web Development");

    let updated = send(
        &app,
        Method::PUT,
        &format!("/api/courses/{id}"),
        Some(json!({ "category": "Databases" })),
        None,
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    let updated = updated.json();
    assert_eq!(
        updated["message"],
        format!("Course {id} was updated succesfully")
    );
    assert_eq!(updated["result"]["matchedCount"], 1);
    assert_eq!(updated["result"]["modifiedCount"], 1);

    let fetched = send(&app, Method::GET, &format!("/api/courses/{id}"), None, None)
        .await
        .json();
    assert_eq!(fetched["result"]["title"], "CSE341");
    assert_eq!(fetched["result"]["category"], "Databases");

    let deleted = send(&app, Method::DELETE, &format!("/api/courses/{id}"), None, None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.text, format!("Course {id} was deleted succesfully"));

    let gone = send(&app, Method::GET, &format!("/api/courses/{id}"), None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.json()["message"], "Course does not exist");
}

#[tokio::test]
async fn empty_title_is_rejected_and_not_persisted() {
    let app = test_app();

    let response = send(
        &app,
        Method::POST,
        "/api/courses",
        Some(json!({ "title": "", "category": "Web Development" })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json()["message"],
        "\"title\" is not allowed to be empty"
    );

    let listed = send(&app, Method::GET, "/api/courses", None, None).await;
    assert_eq!(listed.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_is_not_found_until_a_course_exists() {
    let app = test_app();

    let empty = send(&app, Method::GET, "/api/courses", None, None).await;
    assert_eq!(empty.status, StatusCode::NOT_FOUND);
    assert_eq!(
        empty.json(),
        json!({ "status": 404, "message": "No courses found" })
    );

    send(
        &app,
        Method::POST,
        "/api/courses",
        Some(json!({ "title": "CSE341", "category": "Web Development", "date": "01/01/2022" })),
        None,
    )
    .await;

    let listed = send(&app, Method::GET, "/api/courses", None, None).await;
    assert_eq!(listed.status, StatusCode::OK);
    let listed = listed.json();
    assert_eq!(listed["result"].as_array().unwrap().len(), 1);
    assert_eq!(listed["result"][0]["date"], "2022-01-01T00:00:00Z");
}

#[tokio::test]
async fn malformed_and_unknown_ids() {
    let app = test_app();
    let unknown = Uuid::now_v7();

    let malformed = send(&app, Method::GET, "/api/courses/not-an-id", None, None).await;
    assert_eq!(malformed.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(malformed.json()["message"], "Invalid Course ID");

    let missing = send(&app, Method::GET, &format!("/api/courses/{unknown}"), None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let update = send(
        &app,
        Method::PUT,
        "/api/courses/not-an-id",
        Some(json!({ "title": "CSE341" })),
        None,
    )
    .await;
    assert_eq!(update.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(update.json()["message"], "Invalid Course ID");

    let update = send(
        &app,
        Method::PUT,
        &format!("/api/courses/{unknown}"),
        Some(json!({ "title": "CSE341" })),
        None,
    )
    .await;
    assert_eq!(update.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(update.json()["message"], "Course does not exist");
}

#[tokio::test]
async fn repeated_update_reports_no_change() {
    let app = test_app();

    let created = send(
        &app,
        Method::POST,
        "/api/courses",
        Some(json!({ "title": "CSE341", "category": "Web Development", "date": "2022-01-01" })),
        None,
    )
    .await
    .json();
    let id = created["course"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/courses/{id}");

    let first = send(&app, Method::PUT, &uri, Some(json!({ "category": "X" })), None).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = send(&app, Method::PUT, &uri, Some(json!({ "category": "X" })), None).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.text, "No update was made");

    let nothing = send(&app, Method::PUT, &uri, Some(json!({})), None).await;
    assert_eq!(nothing.text, "No update was made");

    let fetched = send(&app, Method::GET, &uri, None, None).await.json();
    assert_eq!(fetched["result"]["title"], "CSE341");
    assert_eq!(fetched["result"]["category"], "X");
    assert_eq!(fetched["result"]["date"], "2022-01-01T00:00:00Z");
}

#[tokio::test]
async fn deleting_twice_is_unprocessable() {
    let app = test_app();

    let created = send(
        &app,
        Method::POST,
        "/api/courses",
        Some(json!({ "title": "CSE341", "category": "Web Development" })),
        None,
    )
    .await
    .json();
    let uri = format!("/api/courses/{}", created["course"]["id"].as_str().unwrap());

    assert_eq!(
        send(&app, Method::DELETE, &uri, None, None).await.status,
        StatusCode::OK
    );

    let again = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(again.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(again.json()["message"], "Course does not exist");

    let malformed = send(&app, Method::DELETE, "/api/courses/42", None, None).await;
    assert_eq!(malformed.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(malformed.json()["message"], "Invalid Course ID");
}

#[tokio::test]
async fn finds_course_by_title() {
    let app = test_app();

    let missing = send(&app, Method::GET, "/api/courses/title/CSE341", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    send(
        &app,
        Method::POST,
        "/api/courses",
        Some(json!({ "title": "CSE341", "category": "Web Development" })),
        None,
    )
    .await;

    let found = send(&app, Method::GET, "/api/courses/title/CSE341", None, None).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.json()["result"]["category"], "Web Development");
}

#[tokio::test]
async fn body_that_is_not_json_fails_validation() {
    let app = test_app();

    let response = send(
        &app,
        Method::POST,
        "/api/courses",
        Some(json!("CSE341")),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json()["message"],
        "\"value\" must be of type object"
    );
}

#[tokio::test]
async fn empty_body_is_treated_as_an_empty_object() {
    let app = test_app();

    let create = send(&app, Method::POST, "/api/courses", None, None).await;
    assert_eq!(create.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(create.json()["message"], "\"title\" is required");

    let created = send(
        &app,
        Method::POST,
        "/api/courses",
        Some(json!({ "title": "CSE341", "category": "Web Development" })),
        None,
    )
    .await
    .json();
    let uri = format!("/api/courses/{}", created["course"]["id"].as_str().unwrap());

    let update = send(&app, Method::PUT, &uri, None, None).await;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.text, "No update was made");
}

#[tokio::test]
async fn unknown_fields_are_rejected() {
    let app = test_app();

    let response = send(
        &app,
        Method::POST,
        "/api/courses",
        Some(json!({ "title": "CSE341", "category": "Web Development", "instructor": "Brother B" })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json()["message"],
        "\"instructor\" is not allowed"
    );

    let listed = send(&app, Method::GET, "/api/courses", None, None).await;
    assert_eq!(listed.status, StatusCode::NOT_FOUND);
}

/// A store whose backend is unreachable.
struct BrokenStore;

#[async_trait]
impl CourseRepository for BrokenStore {
    async fn get_courses(&self) -> StoreResult<Vec<Course>> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn get_course(&self, _course_id: &str) -> StoreResult<Course> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn find_course_by_title(&self, _title: &str) -> StoreResult<Option<Course>> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn create_course(&self, _course: NewCourse) -> StoreResult<Course> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn update_course(
        &self,
        _course_id: &str,
        _changes: &UpdateCourseDto,
    ) -> StoreResult<UpdateOutcome> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn delete_course(&self, _course_id: &str) -> StoreResult<u64> {
        Err(StoreError::Backend("connection refused".to_string()))
    }
}

#[tokio::test]
async fn backend_failures() {
    let app = app_with(Arc::new(BrokenStore), Arc::new(MemoryRepo::new()));

    let created = send(
        &app,
        Method::POST,
        "/api/courses",
        Some(json!({ "title": "CSE341", "category": "Web Development" })),
        None,
    )
    .await;
    assert_eq!(created.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(created.json()["message"], "Course could not be created");

    let fetched = send(
        &app,
        Method::GET,
        &format!("/api/courses/{}", Uuid::now_v7()),
        None,
        None,
    )
    .await;
    assert_eq!(fetched.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(fetched.json(), json!({ "error": "connection refused" }));

    let listed = send(&app, Method::GET, "/api/courses", None, None).await;
    assert_eq!(listed.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        listed.json(),
        json!({ "status": 500, "message": "Internal server error" })
    );
}
