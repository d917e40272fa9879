use std::sync::Arc;

use crate::{
    models::teachers::{NewTeacher, Teacher},
    repositories::teachers_repo::TeachersRepository,
    Error, Result,
};

#[derive(Clone)]
pub struct TeachersService {
    repo: Arc<dyn TeachersRepository>,
}

impl TeachersService {
    pub fn new(repo: Arc<dyn TeachersRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_teachers(&self) -> Result<Vec<Teacher>> {
        self.repo.get_teachers().await
    }

    pub async fn get_teacher(&self, teacher_id: i32) -> Result<Teacher> {
        let teacher = self.repo.get_teacher(teacher_id).await?;
        teacher.ok_or_else(|| Error::record_not_found("teacherId", teacher_id))
    }

    pub async fn create_teacher(&self, teacher: NewTeacher) -> Result<Teacher> {
        self.repo.create_teacher(&teacher).await
    }

    pub async fn update_teacher(&self, teacher_id: i32, teacher: NewTeacher) -> Result<Teacher> {
        let teacher = self.repo.update_teacher(teacher_id, &teacher).await?;
        teacher.ok_or_else(|| Error::record_not_found("teacherId", teacher_id))
    }

    pub async fn delete_teacher(&self, teacher_id: i32) -> Result<Teacher> {
        let teacher = self.repo.delete_teacher(teacher_id).await?;
        teacher.ok_or_else(|| Error::record_not_found("teacherId", teacher_id))
    }

    pub async fn search_teachers(&self, term: &str) -> Result<Vec<Teacher>> {
        self.repo.search_teachers(term).await
    }
}
