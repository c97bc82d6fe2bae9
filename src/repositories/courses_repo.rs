use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::models::{
    courses::{Course, NewCourse, UpdateCourseDto},
    response::UpdateOutcome,
};

use super::{parse_id, PostgresRepo, StoreResult};

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn get_courses(&self) -> StoreResult<Vec<Course>>;
    async fn get_course(&self, course_id: &str) -> StoreResult<Course>;
    async fn find_course_by_title(&self, title: &str) -> StoreResult<Option<Course>>;
    async fn create_course(&self, course: NewCourse) -> StoreResult<Course>;
    async fn update_course(
        &self,
        course_id: &str,
        changes: &UpdateCourseDto,
    ) -> StoreResult<UpdateOutcome>;
    /// Returns the number of deleted rows.
    async fn delete_course(&self, course_id: &str) -> StoreResult<u64>;
}

#[async_trait]
impl CourseRepository for PostgresRepo {
    #[instrument(skip(self))]
    async fn get_courses(&self) -> StoreResult<Vec<Course>> {
        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, category, date FROM courses
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::info!(count = courses.len(), "Course query completed");
        Ok(courses)
    }

    #[instrument(skip(self))]
    async fn get_course(&self, course_id: &str) -> StoreResult<Course> {
        let course_id = parse_id(course_id)?;

        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, category, date FROM courses WHERE id = $1
            "#,
        )
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(course)
    }

    #[instrument(skip(self))]
    async fn find_course_by_title(&self, title: &str) -> StoreResult<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, category, date FROM courses WHERE title = $1 LIMIT 1
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    #[instrument(skip(self))]
    async fn create_course(&self, course: NewCourse) -> StoreResult<Course> {
        let id = Uuid::now_v7();

        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (id, title, category, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, category, date
            "#,
        )
        .bind(id)
        .bind(course.title)
        .bind(course.category)
        .bind(course.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(course)
    }

    #[instrument(skip(self))]
    async fn update_course(
        &self,
        course_id: &str,
        changes: &UpdateCourseDto,
    ) -> StoreResult<UpdateOutcome> {
        let course_id = parse_id(course_id)?;

        // Only rows whose values actually differ count as modified.
        let modified = sqlx::query(
            r#"
            UPDATE courses
            SET title = COALESCE($2, title),
                category = COALESCE($3, category),
                date = COALESCE($4, date)
            WHERE id = $1
              AND (title IS DISTINCT FROM COALESCE($2, title)
                OR category IS DISTINCT FROM COALESCE($3, category)
                OR date IS DISTINCT FROM COALESCE($4, date))
            "#,
        )
        .bind(course_id)
        .bind(changes.title.as_deref())
        .bind(changes.category.as_deref())
        .bind(changes.date)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if modified > 0 {
            return Ok(UpdateOutcome {
                matched_count: modified,
                modified_count: modified,
            });
        }

        let matched: bool =
            sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)"#)
                .bind(course_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(UpdateOutcome {
            matched_count: u64::from(matched),
            modified_count: 0,
        })
    }

    #[instrument(skip(self))]
    async fn delete_course(&self, course_id: &str) -> StoreResult<u64> {
        let course_id = parse_id(course_id)?;

        let deleted = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(course_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}
