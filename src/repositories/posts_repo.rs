use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::{
    models::posts::{NewPost, Post},
    Result,
};

use super::{contains_pattern, PostgresRepo};

#[async_trait]
pub trait PostsRepository: Sync + Send {
    async fn get_posts(&self) -> Result<Vec<Post>>;
    async fn get_post(&self, post_id: i32) -> Result<Option<Post>>;
    async fn create_post(&self, post: &NewPost) -> Result<Post>;
    async fn update_post(&self, post_id: i32, post: &NewPost) -> Result<Option<Post>>;
    async fn delete_post(&self, post_id: i32) -> Result<Option<Post>>;
    async fn search_posts(&self, term: &str) -> Result<Vec<Post>>;
}

#[async_trait]
impl PostsRepository for PostgresRepo {
    #[instrument(skip(self))]
    async fn get_posts(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, author, created_at FROM posts
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = posts.len(), "Posts fetched");
        Ok(posts)
    }

    #[instrument(skip(self))]
    async fn get_post(&self, post_id: i32) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, author, created_at FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        debug!(found = post.is_some(), "Post lookup completed");
        Ok(post)
    }

    #[instrument(skip(self))]
    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, author)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, author, created_at
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.author)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    #[instrument(skip(self))]
    async fn update_post(&self, post_id: i32, post: &NewPost) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = $2,
                content = $3,
                author = $4
            WHERE id = $1
            RETURNING id, title, content, author, created_at
            "#,
        )
        .bind(post_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.author)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, post_id: i32) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            DELETE FROM posts WHERE id = $1
            RETURNING id, title, content, author, created_at
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    #[instrument(skip(self))]
    async fn search_posts(&self, term: &str) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, author, created_at FROM posts
            WHERE title ILIKE $1 OR content ILIKE $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(contains_pattern(term))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = posts.len(), "Post search completed");
        Ok(posts)
    }
}
