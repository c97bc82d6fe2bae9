use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    courses::{Course, NewCourse, UpdateCourseDto},
    posts::{NewPost, Post, PostField, UpdatePostDto},
    response::UpdateOutcome,
};

use super::{
    courses_repo::CourseRepository, parse_id, posts_repo::PostRepository, StoreError,
    StoreResult,
};

/// Process-local store used when no database is configured.
#[derive(Clone, Default)]
pub struct MemoryRepo {
    courses: Arc<RwLock<Vec<Course>>>,
    posts: Arc<RwLock<Vec<Post>>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

fn outcome(matched: bool, modified: bool) -> UpdateOutcome {
    UpdateOutcome {
        matched_count: u64::from(matched),
        modified_count: u64::from(modified),
    }
}

#[async_trait]
impl CourseRepository for MemoryRepo {
    async fn get_courses(&self) -> StoreResult<Vec<Course>> {
        Ok(self.courses.read().await.clone())
    }

    async fn get_course(&self, course_id: &str) -> StoreResult<Course> {
        let course_id = parse_id(course_id)?;

        self.courses
            .read()
            .await
            .iter()
            .find(|course| course.id == course_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_course_by_title(&self, title: &str) -> StoreResult<Option<Course>> {
        Ok(self
            .courses
            .read()
            .await
            .iter()
            .find(|course| course.title == title)
            .cloned())
    }

    async fn create_course(&self, course: NewCourse) -> StoreResult<Course> {
        let course = Course {
            id: Uuid::now_v7(),
            title: course.title,
            category: course.category,
            date: course.date,
        };

        self.courses.write().await.push(course.clone());
        Ok(course)
    }

    async fn update_course(
        &self,
        course_id: &str,
        changes: &UpdateCourseDto,
    ) -> StoreResult<UpdateOutcome> {
        let course_id = parse_id(course_id)?;

        let mut courses = self.courses.write().await;
        Ok(match courses.iter_mut().find(|course| course.id == course_id) {
            Some(course) => outcome(true, course.apply(changes)),
            None => outcome(false, false),
        })
    }

    async fn delete_course(&self, course_id: &str) -> StoreResult<u64> {
        let course_id = parse_id(course_id)?;

        let mut courses = self.courses.write().await;
        let before = courses.len();
        courses.retain(|course| course.id != course_id);
        Ok((before - courses.len()) as u64)
    }
}

#[async_trait]
impl PostRepository for MemoryRepo {
    async fn get_posts(&self) -> StoreResult<Vec<Post>> {
        Ok(self.posts.read().await.clone())
    }

    async fn get_post(&self, post_id: &str) -> StoreResult<Post> {
        let post_id = parse_id(post_id)?;

        self.posts
            .read()
            .await
            .iter()
            .find(|post| post.id == post_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_posts_by(&self, field: PostField, value: &str) -> StoreResult<Vec<Post>> {
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .filter(|post| field.matches(post, value))
            .cloned()
            .collect())
    }

    async fn create_post(&self, post: NewPost) -> StoreResult<Post> {
        let post = Post {
            id: Uuid::now_v7(),
            title: post.title,
            category: post.category,
            content: post.content,
            user_id: post.user_id,
            date: post.date,
        };

        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn update_post(
        &self,
        post_id: &str,
        changes: &UpdatePostDto,
    ) -> StoreResult<UpdateOutcome> {
        let post_id = parse_id(post_id)?;

        let mut posts = self.posts.write().await;
        Ok(match posts.iter_mut().find(|post| post.id == post_id) {
            Some(post) => outcome(true, post.apply(changes)),
            None => outcome(false, false),
        })
    }

    async fn delete_post(&self, post_id: &str) -> StoreResult<u64> {
        let post_id = parse_id(post_id)?;

        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|post| post.id != post_id);
        Ok((before - posts.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_course(title: &str) -> NewCourse {
        NewCourse {
            title: title.to_string(),
            category: "Web Development".to_string(),
            date: None,
        }
    }

    #[tokio::test]
    async fn update_reports_matched_and_modified_counts() {
        let repo = MemoryRepo::new();
        let course = repo.create_course(new_course("CSE341")).await.unwrap();
        let id = course.id.to_string();

        let changes = UpdateCourseDto {
            category: Some("Databases".to_string()),
            ..Default::default()
        };
        assert_eq!(
            repo.update_course(&id, &changes).await.unwrap(),
            outcome(true, true)
        );
        assert_eq!(
            repo.update_course(&id, &changes).await.unwrap(),
            outcome(true, false)
        );

        let stored = repo.get_course(&id).await.unwrap();
        assert_eq!(stored.title, "CSE341");
        assert_eq!(stored.category, "Databases");
    }

    #[tokio::test]
    async fn unknown_and_malformed_ids_are_distinguished() {
        let repo = MemoryRepo::new();

        assert_eq!(
            repo.get_course(&Uuid::now_v7().to_string()).await,
            Err(StoreError::NotFound)
        );
        assert_eq!(
            repo.delete_course("not-an-id").await,
            Err(StoreError::MalformedId("not-an-id".to_string()))
        );
        assert_eq!(
            repo.update_course(&Uuid::now_v7().to_string(), &UpdateCourseDto::default())
                .await
                .unwrap(),
            outcome(false, false)
        );
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_course() {
        let repo = MemoryRepo::new();
        let first = repo.create_course(new_course("CSE341")).await.unwrap();
        repo.create_course(new_course("CSE340")).await.unwrap();

        assert_eq!(repo.delete_course(&first.id.to_string()).await, Ok(1));
        assert_eq!(repo.delete_course(&first.id.to_string()).await, Ok(0));
        assert_eq!(repo.get_courses().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn finds_posts_by_field() {
        let repo = MemoryRepo::new();
        for (title, category, user_id) in [
            ("Rust ownership", "Programming", "user-1"),
            ("Sourdough", "Cooking", "user-1"),
            ("Lifetimes", "Programming", "user-2"),
        ] {
            repo.create_post(NewPost {
                title: title.to_string(),
                category: category.to_string(),
                content: "...".to_string(),
                user_id: user_id.to_string(),
                date: None,
            })
            .await
            .unwrap();
        }

        let programming = repo
            .find_posts_by(PostField::Category, "Programming")
            .await
            .unwrap();
        assert_eq!(programming.len(), 2);

        let by_user = repo.find_posts_by(PostField::User, "user-1").await.unwrap();
        assert_eq!(by_user.len(), 2);

        let by_title = repo.find_posts_by(PostField::Title, "Sourdough").await.unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].category, "Cooking");
    }
}
