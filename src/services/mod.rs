pub mod posts;
pub mod students;
pub mod teachers;
