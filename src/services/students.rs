use std::sync::Arc;

use crate::{
    models::students::{NewStudent, Student},
    repositories::students_repo::StudentsRepository,
    Error, Result,
};

#[derive(Clone)]
pub struct StudentsService {
    repo: Arc<dyn StudentsRepository>,
}

impl StudentsService {
    pub fn new(repo: Arc<dyn StudentsRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_students(&self) -> Result<Vec<Student>> {
        self.repo.get_students().await
    }

    pub async fn get_student(&self, student_id: i32) -> Result<Student> {
        let student = self.repo.get_student(student_id).await?;
        student.ok_or_else(|| Error::record_not_found("studentId", student_id))
    }

    pub async fn create_student(&self, student: NewStudent) -> Result<Student> {
        self.repo.create_student(&student).await
    }

    pub async fn update_student(&self, student_id: i32, student: NewStudent) -> Result<Student> {
        let student = self.repo.update_student(student_id, &student).await?;
        student.ok_or_else(|| Error::record_not_found("studentId", student_id))
    }

    pub async fn delete_student(&self, student_id: i32) -> Result<Student> {
        let student = self.repo.delete_student(student_id).await?;
        student.ok_or_else(|| Error::record_not_found("studentId", student_id))
    }

    pub async fn search_students(&self, term: &str) -> Result<Vec<Student>> {
        self.repo.search_students(term).await
    }
}
