use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::{
    models::students::{NewStudent, Student},
    Result,
};

use super::{contains_pattern, PostgresRepo};

#[async_trait]
pub trait StudentsRepository: Sync + Send {
    async fn get_students(&self) -> Result<Vec<Student>>;
    async fn get_student(&self, student_id: i32) -> Result<Option<Student>>;
    async fn create_student(&self, student: &NewStudent) -> Result<Student>;
    async fn update_student(
        &self,
        student_id: i32,
        student: &NewStudent,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, student_id: i32) -> Result<Option<Student>>;
    async fn search_students(&self, term: &str) -> Result<Vec<Student>>;
}

#[async_trait]
impl StudentsRepository for PostgresRepo {
    #[instrument(skip(self))]
    async fn get_students(&self) -> Result<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, name, email, created_at FROM students
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = students.len(), "Students fetched");
        Ok(students)
    }

    #[instrument(skip(self))]
    async fn get_student(&self, student_id: i32) -> Result<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, name, email, created_at FROM students WHERE id = $1",
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;

        debug!(found = student.is_some(), "Student lookup completed");
        Ok(student)
    }

    #[instrument(skip(self))]
    async fn create_student(&self, student: &NewStudent) -> Result<Student> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(&student.name)
        .bind(&student.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(student)
    }

    #[instrument(skip(self))]
    async fn update_student(
        &self,
        student_id: i32,
        student: &NewStudent,
    ) -> Result<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET name = $2,
                email = $3
            WHERE id = $1
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(student_id)
        .bind(&student.name)
        .bind(&student.email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    #[instrument(skip(self))]
    async fn delete_student(&self, student_id: i32) -> Result<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "DELETE FROM students WHERE id = $1 RETURNING id, name, email, created_at",
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    #[instrument(skip(self))]
    async fn search_students(&self, term: &str) -> Result<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, name, email, created_at FROM students
            WHERE name ILIKE $1 OR email ILIKE $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(contains_pattern(term))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = students.len(), "Student search completed");
        Ok(students)
    }
}
