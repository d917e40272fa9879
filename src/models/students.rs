use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{models::query::require_fields, Result};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StudentDto {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
}

impl StudentDto {
    /// Create and update share the same rule: every field must be present.
    pub fn into_new_student(self) -> Result<NewStudent> {
        require_fields(&[("name", &self.name), ("email", &self.email)])?;

        Ok(NewStudent {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StudentsData {
    pub students: Vec<Student>,
}

#[derive(Debug, Serialize)]
pub struct StudentData {
    pub student: Student,
}
