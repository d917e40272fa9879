use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{models::query::require_fields, Error, Result};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for both create and update. Fields stay optional so a missing
/// field is reported as such instead of as a malformed body.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PostDto {
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 10, message = "Content must be at least 10 characters"))]
    pub content: Option<String>,
    pub author: Option<String>,
}

/// Validated field set written to the `posts` table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl PostDto {
    pub fn validate_create(self) -> Result<NewPost> {
        self.check_required()?;
        self.validate()
            .map_err(|e| Error::from_validation(e, &["title", "content"]))?;
        Ok(self.into_new_post())
    }

    pub fn validate_update(self) -> Result<NewPost> {
        self.check_required()?;
        Ok(self.into_new_post())
    }

    fn check_required(&self) -> Result<()> {
        require_fields(&[
            ("title", &self.title),
            ("content", &self.content),
            ("author", &self.author),
        ])
    }

    fn into_new_post(self) -> NewPost {
        NewPost {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostsData {
    pub posts: Vec<Post>,
}

#[derive(Debug, Serialize)]
pub struct PostData {
    pub post: Post,
}
