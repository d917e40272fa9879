use std::sync::Arc;

use axum::Router;
use config::Config;
use repositories::{
    posts_repo::PostsRepository, students_repo::StudentsRepository,
    teachers_repo::TeachersRepository, PostgresRepo,
};
use services::{posts::PostsService, students::StudentsService, teachers::TeachersService};

pub use self::errors::{Error, Result};

pub mod config;
pub mod db;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub posts_service: PostsService,
    pub students_service: StudentsService,
    pub teachers_service: TeachersService,
}

impl AppState {
    pub fn new(
        config: Config,
        posts: Arc<dyn PostsRepository>,
        students: Arc<dyn StudentsRepository>,
        teachers: Arc<dyn TeachersRepository>,
    ) -> Self {
        Self {
            config,
            posts_service: PostsService::new(posts),
            students_service: StudentsService::new(students),
            teachers_service: TeachersService::new(teachers),
        }
    }

    /// Every resource backed by the same PostgreSQL pool.
    pub fn with_postgres(config: Config, repo: PostgresRepo) -> Self {
        let repo = Arc::new(repo);
        Self::new(config, repo.clone(), repo.clone(), repo)
    }
}

pub fn app(app_state: AppState) -> Router {
    routes::create_router(Arc::new(app_state))
}
