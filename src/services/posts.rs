use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::{
    models::{
        posts::{CreatePostDto, NewPost, Post, PostField, UpdatePostDto},
        response::UpdateStatus,
        validation::validate_payload,
    },
    repositories::posts_repo::PostRepository,
    Error, Result,
};

use super::{lookup_error, mutation_error};

#[derive(Clone)]
pub struct PostsService {
    repo: Arc<dyn PostRepository>,
}

impl PostsService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_post(&self, body: Value, user_id: &str) -> Result<Post> {
        let post: CreatePostDto = validate_payload(body)?;

        let post = self
            .repo
            .create_post(NewPost::from_dto(post, user_id))
            .await
            .map_err(|err| {
                warn!("Post insert rejected: {}", err);
                Error::Unprocessable("Post could not be created".to_string())
            })?;

        info!(post_id = %post.id, user_id, "Post created");
        Ok(post)
    }

    pub async fn get_posts(&self) -> Result<Vec<Post>> {
        let posts = self.repo.get_posts().await?;

        if posts.is_empty() {
            return Err(Error::NotFound("No posts found".to_string()));
        }
        Ok(posts)
    }

    pub async fn get_post(&self, post_id: &str) -> Result<Post> {
        self.repo
            .get_post(post_id)
            .await
            .map_err(|err| lookup_error(err, "Post"))
    }

    pub async fn get_posts_by(&self, field: PostField, value: &str) -> Result<Vec<Post>> {
        let posts = self.repo.find_posts_by(field, value).await?;

        if posts.is_empty() {
            return Err(Error::NotFound("No posts found".to_string()));
        }
        Ok(posts)
    }

    pub async fn update_post(&self, post_id: &str, body: Value) -> Result<UpdateStatus> {
        let changes: UpdatePostDto = validate_payload(body)?;

        let outcome = self
            .repo
            .update_post(post_id, &changes)
            .await
            .map_err(|err| mutation_error(err, "Post"))?;

        if outcome.modified_count > 0 {
            info!(post_id, "Post updated");
            Ok(UpdateStatus::Updated(outcome))
        } else if outcome.matched_count < 1 {
            Err(Error::Unprocessable("Post does not exist".to_string()))
        } else {
            Ok(UpdateStatus::Unchanged)
        }
    }

    pub async fn delete_post(&self, post_id: &str) -> Result<()> {
        let deleted = self
            .repo
            .delete_post(post_id)
            .await
            .map_err(|err| mutation_error(err, "Post"))?;

        if deleted < 1 {
            return Err(Error::Unprocessable("Post does not exist".to_string()));
        }

        info!(post_id, "Post deleted");
        Ok(())
    }
}
