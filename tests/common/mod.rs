#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use blog_school_api::{
    app,
    config::{Config, Environment},
    errors::StorageError,
    models::{
        posts::{NewPost, Post},
        students::{NewStudent, Student},
        teachers::{NewTeacher, Teacher},
    },
    repositories::{
        posts_repo::PostsRepository, students_repo::StudentsRepository,
        teachers_repo::TeachersRepository,
    },
    AppState, Error, Result,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

struct Table<T> {
    next_id: i32,
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: Vec::new(),
        }
    }
}

/// Stand-in for the PostgreSQL repository. Mirrors its ordering (newest
/// first) and case-insensitive substring search, and can be told to fail
/// the next call with a given SQLSTATE.
#[derive(Default)]
pub struct MemoryRepo {
    posts: Mutex<Table<Post>>,
    students: Mutex<Table<Student>>,
    teachers: Mutex<Table<Teacher>>,
    failure: Mutex<Option<StorageError>>,
}

impl MemoryRepo {
    pub fn fail_next(&self, err: StorageError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    fn check_failure(&self) -> Result<()> {
        match self.failure.lock().unwrap().take() {
            Some(err) => Err(Error::Storage(err)),
            None => Ok(()),
        }
    }
}

fn contains(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}

#[async_trait]
impl PostsRepository for MemoryRepo {
    async fn get_posts(&self) -> Result<Vec<Post>> {
        self.check_failure()?;
        Ok(self.posts.lock().unwrap().rows.iter().rev().cloned().collect())
    }

    async fn get_post(&self, post_id: i32) -> Result<Option<Post>> {
        self.check_failure()?;
        let table = self.posts.lock().unwrap();
        Ok(table.rows.iter().find(|p| p.id == post_id).cloned())
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        self.check_failure()?;
        let mut table = self.posts.lock().unwrap();
        table.next_id += 1;
        let post = Post {
            id: table.next_id,
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
            created_at: Utc::now(),
        };
        table.rows.push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, post_id: i32, post: &NewPost) -> Result<Option<Post>> {
        self.check_failure()?;
        let mut table = self.posts.lock().unwrap();
        Ok(table.rows.iter_mut().find(|p| p.id == post_id).map(|row| {
            row.title = post.title.clone();
            row.content = post.content.clone();
            row.author = post.author.clone();
            row.clone()
        }))
    }

    async fn delete_post(&self, post_id: i32) -> Result<Option<Post>> {
        self.check_failure()?;
        let mut table = self.posts.lock().unwrap();
        let index = table.rows.iter().position(|p| p.id == post_id);
        Ok(index.map(|i| table.rows.remove(i)))
    }

    async fn search_posts(&self, term: &str) -> Result<Vec<Post>> {
        self.check_failure()?;
        let table = self.posts.lock().unwrap();
        Ok(table
            .rows
            .iter()
            .rev()
            .filter(|p| contains(&p.title, term) || contains(&p.content, term))
            .cloned()
            .collect())
    }
}

macro_rules! person_repository {
    ($repo_trait:ident, $field:ident, $record:ident, $new:ident,
     $list:ident, $get:ident, $create:ident, $update:ident, $delete:ident, $search:ident) => {
        #[async_trait]
        impl $repo_trait for MemoryRepo {
            async fn $list(&self) -> Result<Vec<$record>> {
                self.check_failure()?;
                Ok(self.$field.lock().unwrap().rows.iter().rev().cloned().collect())
            }

            async fn $get(&self, id: i32) -> Result<Option<$record>> {
                self.check_failure()?;
                let table = self.$field.lock().unwrap();
                Ok(table.rows.iter().find(|r| r.id == id).cloned())
            }

            async fn $create(&self, new: &$new) -> Result<$record> {
                self.check_failure()?;
                let mut table = self.$field.lock().unwrap();
                table.next_id += 1;
                let record = $record {
                    id: table.next_id,
                    name: new.name.clone(),
                    email: new.email.clone(),
                    created_at: Utc::now(),
                };
                table.rows.push(record.clone());
                Ok(record)
            }

            async fn $update(&self, id: i32, new: &$new) -> Result<Option<$record>> {
                self.check_failure()?;
                let mut table = self.$field.lock().unwrap();
                Ok(table.rows.iter_mut().find(|r| r.id == id).map(|row| {
                    row.name = new.name.clone();
                    row.email = new.email.clone();
                    row.clone()
                }))
            }

            async fn $delete(&self, id: i32) -> Result<Option<$record>> {
                self.check_failure()?;
                let mut table = self.$field.lock().unwrap();
                let index = table.rows.iter().position(|r| r.id == id);
                Ok(index.map(|i| table.rows.remove(i)))
            }

            async fn $search(&self, term: &str) -> Result<Vec<$record>> {
                self.check_failure()?;
                let table = self.$field.lock().unwrap();
                Ok(table
                    .rows
                    .iter()
                    .rev()
                    .filter(|r| contains(&r.name, term) || contains(&r.email, term))
                    .cloned()
                    .collect())
            }
        }
    };
}

person_repository!(
    StudentsRepository, students, Student, NewStudent,
    get_students, get_student, create_student, update_student, delete_student, search_students
);
person_repository!(
    TeachersRepository, teachers, Teacher, NewTeacher,
    get_teachers, get_teacher, create_teacher, update_teacher, delete_teacher, search_teachers
);

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<MemoryRepo>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_environment(Environment::Test)
    }

    pub fn with_environment(environment: Environment) -> Self {
        let mut config = Config::from_lookup(|_| None);
        config.environment = environment;

        let repo = Arc::new(MemoryRepo::default());
        let state = AppState::new(config, repo.clone(), repo.clone(), repo.clone());

        Self {
            router: app(state),
            repo,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body.to_string())).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body.to_string())).await
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

/// Asserts the fields every error envelope carries.
pub fn assert_error_envelope(
    body: &Value,
    status: &str,
    message: &str,
    method: &str,
    path: &str,
) {
    assert_eq!(body["status"], status, "{body}");
    assert_eq!(body["message"], message, "{body}");
    assert_eq!(body["method"], method, "{body}");
    assert_eq!(body["path"], path, "{body}");
    let timestamp = body["timestamp"].as_str().expect("timestamp");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}
