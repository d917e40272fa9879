use std::sync::Arc;

use crate::{
    models::posts::{NewPost, Post},
    repositories::posts_repo::PostsRepository,
    Error, Result,
};

#[derive(Clone)]
pub struct PostsService {
    repo: Arc<dyn PostsRepository>,
}

impl PostsService {
    pub fn new(repo: Arc<dyn PostsRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_posts(&self) -> Result<Vec<Post>> {
        self.repo.get_posts().await
    }

    pub async fn get_post(&self, post_id: i32) -> Result<Post> {
        let post = self.repo.get_post(post_id).await?;
        post.ok_or_else(|| Error::record_not_found("postId", post_id))
    }

    pub async fn create_post(&self, post: NewPost) -> Result<Post> {
        self.repo.create_post(&post).await
    }

    pub async fn update_post(&self, post_id: i32, post: NewPost) -> Result<Post> {
        let post = self.repo.update_post(post_id, &post).await?;
        post.ok_or_else(|| Error::record_not_found("postId", post_id))
    }

    /// Returns the row as it was before deletion.
    pub async fn delete_post(&self, post_id: i32) -> Result<Post> {
        let post = self.repo.delete_post(post_id).await?;
        post.ok_or_else(|| Error::record_not_found("postId", post_id))
    }

    pub async fn search_posts(&self, term: &str) -> Result<Vec<Post>> {
        self.repo.search_posts(term).await
    }
}
