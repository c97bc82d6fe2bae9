use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::{
    models::{
        courses::{Course, CreateCourseDto, NewCourse, UpdateCourseDto},
        response::UpdateStatus,
        validation::validate_payload,
    },
    repositories::courses_repo::CourseRepository,
    Error, Result,
};

use super::{lookup_error, mutation_error};

#[derive(Clone)]
pub struct CoursesService {
    repo: Arc<dyn CourseRepository>,
}

impl CoursesService {
    pub fn new(repo: Arc<dyn CourseRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_course(&self, body: Value) -> Result<Course> {
        let course: CreateCourseDto = validate_payload(body)?;

        let course = self
            .repo
            .create_course(NewCourse::from(course))
            .await
            .map_err(|err| {
                warn!("Course insert rejected: {}", err);
                Error::Unprocessable("Course could not be created".to_string())
            })?;

        info!(course_id = %course.id, "Course created");
        Ok(course)
    }

    pub async fn get_courses(&self) -> Result<Vec<Course>> {
        let courses = self.repo.get_courses().await?;

        if courses.is_empty() {
            return Err(Error::NotFound("No courses found".to_string()));
        }
        Ok(courses)
    }

    pub async fn get_course(&self, course_id: &str) -> Result<Course> {
        self.repo
            .get_course(course_id)
            .await
            .map_err(|err| lookup_error(err, "Course"))
    }

    pub async fn get_course_by_title(&self, title: &str) -> Result<Course> {
        self.repo
            .find_course_by_title(title)
            .await?
            .ok_or_else(|| Error::NotFound("No courses found".to_string()))
    }

    pub async fn update_course(&self, course_id: &str, body: Value) -> Result<UpdateStatus> {
        let changes: UpdateCourseDto = validate_payload(body)?;

        let outcome = self
            .repo
            .update_course(course_id, &changes)
            .await
            .map_err(|err| mutation_error(err, "Course"))?;

        if outcome.modified_count > 0 {
            info!(course_id, "Course updated");
            Ok(UpdateStatus::Updated(outcome))
        } else if outcome.matched_count < 1 {
            Err(Error::Unprocessable("Course does not exist".to_string()))
        } else {
            Ok(UpdateStatus::Unchanged)
        }
    }

    pub async fn delete_course(&self, course_id: &str) -> Result<()> {
        let deleted = self
            .repo
            .delete_course(course_id)
            .await
            .map_err(|err| mutation_error(err, "Course"))?;

        if deleted < 1 {
            return Err(Error::Unprocessable("Course does not exist".to_string()));
        }

        info!(course_id, "Course deleted");
        Ok(())
    }
}
