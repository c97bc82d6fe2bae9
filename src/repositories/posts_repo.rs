use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::models::{
    posts::{NewPost, Post, PostField, UpdatePostDto},
    response::UpdateOutcome,
};

use super::{parse_id, PostgresRepo, StoreResult};

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn get_posts(&self) -> StoreResult<Vec<Post>>;
    async fn get_post(&self, post_id: &str) -> StoreResult<Post>;
    async fn find_posts_by(&self, field: PostField, value: &str) -> StoreResult<Vec<Post>>;
    async fn create_post(&self, post: NewPost) -> StoreResult<Post>;
    async fn update_post(&self, post_id: &str, changes: &UpdatePostDto)
        -> StoreResult<UpdateOutcome>;
    async fn delete_post(&self, post_id: &str) -> StoreResult<u64>;
}

#[async_trait]
impl PostRepository for PostgresRepo {
    #[instrument(skip(self))]
    async fn get_posts(&self) -> StoreResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, category, content, user_id, date FROM posts
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::info!(count = posts.len(), "Post query completed");
        Ok(posts)
    }

    #[instrument(skip(self))]
    async fn get_post(&self, post_id: &str) -> StoreResult<Post> {
        let post_id = parse_id(post_id)?;

        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, category, content, user_id, date FROM posts WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    #[instrument(skip(self))]
    async fn find_posts_by(&self, field: PostField, value: &str) -> StoreResult<Vec<Post>> {
        let sql = format!(
            "SELECT id, title, category, content, user_id, date FROM posts WHERE {} = $1",
            field.column()
        );
        tracing::debug!("Executing query: {}", sql);

        let posts = sqlx::query_as::<_, Post>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    #[instrument(skip(self))]
    async fn create_post(&self, post: NewPost) -> StoreResult<Post> {
        let id = Uuid::now_v7();

        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, title, category, content, user_id, date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, category, content, user_id, date
            "#,
        )
        .bind(id)
        .bind(post.title)
        .bind(post.category)
        .bind(post.content)
        .bind(post.user_id)
        .bind(post.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    #[instrument(skip(self))]
    async fn update_post(
        &self,
        post_id: &str,
        changes: &UpdatePostDto,
    ) -> StoreResult<UpdateOutcome> {
        let post_id = parse_id(post_id)?;

        let modified = sqlx::query(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                category = COALESCE($3, category),
                content = COALESCE($4, content),
                date = COALESCE($5, date)
            WHERE id = $1
              AND (title IS DISTINCT FROM COALESCE($2, title)
                OR category IS DISTINCT FROM COALESCE($3, category)
                OR content IS DISTINCT FROM COALESCE($4, content)
                OR date IS DISTINCT FROM COALESCE($5, date))
            "#,
        )
        .bind(post_id)
        .bind(changes.title.as_deref())
        .bind(changes.category.as_deref())
        .bind(changes.content.as_deref())
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
            sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)"#)
                .bind(post_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(UpdateOutcome {
            matched_count: u64::from(matched),
            modified_count: 0,
        })
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, post_id: &str) -> StoreResult<u64> {
        let post_id = parse_id(post_id)?;

        let deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}
