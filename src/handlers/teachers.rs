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
        teachers::{TeacherData, TeacherDto, TeachersData},
    },
    AppState, Result,
};

pub fn teachers_handler() -> Router {
    Router::new()
        .route("/", get(get_teachers).post(create_teacher))
        .route("/search", get(search_teachers))
        .route(
            "/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
}

async fn get_teachers(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse> {
    let teachers = app_state.teachers_service.get_teachers().await?;
    info!(count = teachers.len(), "Teachers listed");

    Ok((
        StatusCode::OK,
        Json(ListResponse::new(teachers.len(), TeachersData { teachers })),
    ))
}

async fn search_teachers(
    Extension(app_state): Extension<Arc<AppState>>,
    query: std::result::Result<Query<SearchQueryDto>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let term = query.term()?;

    let teachers = app_state.teachers_service.search_teachers(&term).await?;
    info!(term = %term, count = teachers.len(), "Teachers searched");

    Ok((
        StatusCode::OK,
        Json(ListResponse::search(teachers.len(), term, TeachersData { teachers })),
    ))
}

async fn get_teacher(
    Extension(app_state): Extension<Arc<AppState>>,
    AppPath(teacher_id): AppPath<String>,
) -> Result<impl IntoResponse> {
    let teacher_id = parse_id(&teacher_id)?;
    let teacher = app_state.teachers_service.get_teacher(teacher_id).await?;

    Ok((StatusCode::OK, Json(Response::data(TeacherData { teacher }))))
}

async fn create_teacher(
    Extension(app_state): Extension<Arc<AppState>>,
    AppJson(body): AppJson<TeacherDto>,
) -> Result<impl IntoResponse> {
    let new_teacher = body.into_new_teacher()?;
    info!(name = %new_teacher.name, "Creating teacher");

    let teacher = app_state.teachers_service.create_teacher(new_teacher).await?;

    Ok((
        StatusCode::CREATED,
        Json(Response::with_message(
            "Teacher created successfully",
            TeacherData { teacher },
        )),
    ))
}

async fn update_teacher(
    Extension(app_state): Extension<Arc<AppState>>,
    AppPath(teacher_id): AppPath<String>,
    AppJson(body): AppJson<TeacherDto>,
) -> Result<impl IntoResponse> {
    let teacher_id = parse_id(&teacher_id)?;
    let update = body.into_new_teacher()?;
    info!(teacher_id, "Updating teacher");

    let teacher = app_state
        .teachers_service
        .update_teacher(teacher_id, update)
        .await?;

    Ok((
        StatusCode::OK,
        Json(Response::with_message(
            "Teacher updated successfully",
            TeacherData { teacher },
        )),
    ))
}

async fn delete_teacher(
    Extension(app_state): Extension<Arc<AppState>>,
    AppPath(teacher_id): AppPath<String>,
) -> Result<impl IntoResponse> {
    let teacher_id = parse_id(&teacher_id)?;
    info!(teacher_id, "Deleting teacher");

    let teacher = app_state.teachers_service.delete_teacher(teacher_id).await?;

    Ok((
        StatusCode::OK,
        Json(Response::with_message(
            "Teacher deleted successfully",
            TeacherData { teacher },
        )),
    ))
}
