use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{models::query::require_fields, Result};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Teacher {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TeacherDto {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
}

impl TeacherDto {
    pub fn into_new_teacher(self) -> Result<NewTeacher> {
        require_fields(&[("name", &self.name), ("email", &self.email)])?;

        Ok(NewTeacher {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TeachersData {
    pub teachers: Vec<Teacher>,
}

#[derive(Debug, Serialize)]
pub struct TeacherData {
    pub teacher: Teacher,
}
