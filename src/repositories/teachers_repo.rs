use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::{
    models::teachers::{NewTeacher, Teacher},
    Result,
};

use super::{contains_pattern, PostgresRepo};

#[async_trait]
pub trait TeachersRepository: Sync + Send {
    async fn get_teachers(&self) -> Result<Vec<Teacher>>;
    async fn get_teacher(&self, teacher_id: i32) -> Result<Option<Teacher>>;
    async fn create_teacher(&self, teacher: &NewTeacher) -> Result<Teacher>;
    async fn update_teacher(
        &self,
        teacher_id: i32,
        teacher: &NewTeacher,
    ) -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, teacher_id: i32) -> Result<Option<Teacher>>;
    async fn search_teachers(&self, term: &str) -> Result<Vec<Teacher>>;
}

#[async_trait]
impl TeachersRepository for PostgresRepo {
    #[instrument(skip(self))]
    async fn get_teachers(&self) -> Result<Vec<Teacher>> {
        let teachers = sqlx::query_as::<_, Teacher>(
            r#"
            SELECT id, name, email, created_at FROM teachers
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = teachers.len(), "Teachers fetched");
        Ok(teachers)
    }

    #[instrument(skip(self))]
    async fn get_teacher(&self, teacher_id: i32) -> Result<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "SELECT id, name, email, created_at FROM teachers WHERE id = $1",
        )
        .bind(teacher_id)
        .fetch_optional(&self.pool)
        .await?;

        debug!(found = teacher.is_some(), "Teacher lookup completed");
        Ok(teacher)
    }

    #[instrument(skip(self))]
    async fn create_teacher(&self, teacher: &NewTeacher) -> Result<Teacher> {
        let teacher = sqlx::query_as::<_, Teacher>(
            r#"
            INSERT INTO teachers (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(&teacher.name)
        .bind(&teacher.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(teacher)
    }

    #[instrument(skip(self))]
    async fn update_teacher(
        &self,
        teacher_id: i32,
        teacher: &NewTeacher,
    ) -> Result<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(
            r#"
            UPDATE teachers
            SET name = $2,
                email = $3
            WHERE id = $1
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(teacher_id)
        .bind(&teacher.name)
        .bind(&teacher.email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(teacher)
    }

    #[instrument(skip(self))]
    async fn delete_teacher(&self, teacher_id: i32) -> Result<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "DELETE FROM teachers WHERE id = $1 RETURNING id, name, email, created_at",
        )
        .bind(teacher_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(teacher)
    }

    #[instrument(skip(self))]
    async fn search_teachers(&self, term: &str) -> Result<Vec<Teacher>> {
        let teachers = sqlx::query_as::<_, Teacher>(
            r#"
            SELECT id, name, email, created_at FROM teachers
            WHERE name ILIKE $1 OR email ILIKE $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(contains_pattern(term))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = teachers.len(), "Teacher search completed");
        Ok(teachers)
    }
}
