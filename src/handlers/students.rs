use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use tracing::info;

use crate::{
    extract::{AppJson, AppPath},
    models::{
        query::{parse_id, SearchQueryDto},
        response::{ListResponse, Response},
        students::{StudentData, StudentDto, StudentsData},
    },
    AppState, Result,
};

pub fn students_handler() -> Router {
    Router::new()
        .route("/", get(get_students).post(create_student))
        .route("/search", get(search_students))
        .route(
            "/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}

async fn get_students(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse> {
    let students = app_state.students_service.get_students().await?;
    info!(count = students.len(), "Students listed");

    Ok((
        StatusCode::OK,
        Json(ListResponse::new(students.len(), StudentsData { students })),
    ))
}

async fn search_students(
    Extension(app_state): Extension<Arc<AppState>>,
    query: std::result::Result<Query<SearchQueryDto>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let term = query.term()?;

    let students = app_state.students_service.search_students(&term).await?;
    info!(term = %term, count = students.len(), "Students searched");

    Ok((
        StatusCode::OK,
        Json(ListResponse::search(students.len(), term, StudentsData { students })),
    ))
}

async fn get_student(
    Extension(app_state): Extension<Arc<AppState>>,
    AppPath(student_id): AppPath<String>,
) -> Result<impl IntoResponse> {
    let student_id = parse_id(&student_id)?;
    let student = app_state.students_service.get_student(student_id).await?;

    Ok((StatusCode::OK, Json(Response::data(StudentData { student }))))
}

async fn create_student(
    Extension(app_state): Extension<Arc<AppState>>,
    AppJson(body): AppJson<StudentDto>,
) -> Result<impl IntoResponse> {
    let new_student = body.into_new_student()?;
    info!(name = %new_student.name, "Creating student");

    let student = app_state.students_service.create_student(new_student).await?;

    Ok((
        StatusCode::CREATED,
        Json(Response::with_message(
            "Student created successfully",
            StudentData { student },
        )),
    ))
}

async fn update_student(
    Extension(app_state): Extension<Arc<AppState>>,
    AppPath(student_id): AppPath<String>,
    AppJson(body): AppJson<StudentDto>,
) -> Result<impl IntoResponse> {
    let student_id = parse_id(&student_id)?;
    let update = body.into_new_student()?;
    info!(student_id, "Updating student");

    let student = app_state
        .students_service
        .update_student(student_id, update)
        .await?;

    Ok((
        StatusCode::OK,
        Json(Response::with_message(
            "Student updated successfully",
            StudentData { student },
        )),
    ))
}

async fn delete_student(
    Extension(app_state): Extension<Arc<AppState>>,
    AppPath(student_id): AppPath<String>,
) -> Result<impl IntoResponse> {
    let student_id = parse_id(&student_id)?;
    info!(student_id, "Deleting student");

    let student = app_state.students_service.delete_student(student_id).await?;

    Ok((
        StatusCode::OK,
        Json(Response::with_message(
            "Student deleted successfully",
            StudentData { student },
        )),
    ))
}
