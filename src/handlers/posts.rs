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
        posts::{PostData, PostDto, PostsData},
        query::{parse_id, SearchQueryDto},
        response::{ListResponse, Response},
    },
    AppState, Result,
};

pub fn posts_handler() -> Router {
    Router::new()
        .route("/", get(get_posts).post(create_post))
        .route("/search", get(search_posts))
        .route("/{id}", get(get_post).put(update_post).delete(delete_post))
}

async fn get_posts(Extension(app_state): Extension<Arc<AppState>>) -> Result<impl IntoResponse> {
    let posts = app_state.posts_service.get_posts().await?;
    info!(count = posts.len(), "Posts listed");

    Ok((
        StatusCode::OK,
        Json(ListResponse::new(posts.len(), PostsData { posts })),
    ))
}

async fn search_posts(
    Extension(app_state): Extension<Arc<AppState>>,
    query: std::result::Result<Query<SearchQueryDto>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let term = query.term()?;

    let posts = app_state.posts_service.search_posts(&term).await?;
    info!(term = %term, count = posts.len(), "Posts searched");

    Ok((
        StatusCode::OK,
        Json(ListResponse::search(posts.len(), term, PostsData { posts })),
    ))
}

async fn get_post(
    Extension(app_state): Extension<Arc<AppState>>,
    AppPath(post_id): AppPath<String>,
) -> Result<impl IntoResponse> {
    let post_id = parse_id(&post_id)?;
    let post = app_state.posts_service.get_post(post_id).await?;

    Ok((StatusCode::OK, Json(Response::data(PostData { post }))))
}

async fn create_post(
    Extension(app_state): Extension<Arc<AppState>>,
    AppJson(body): AppJson<PostDto>,
) -> Result<impl IntoResponse> {
    let new_post = body.validate_create()?;
    info!(title = %new_post.title, author = %new_post.author, "Creating post");

    let post = app_state.posts_service.create_post(new_post).await?;

    Ok((
        StatusCode::CREATED,
        Json(Response::with_message(
            "Post created successfully",
            PostData { post },
        )),
    ))
}

async fn update_post(
    Extension(app_state): Extension<Arc<AppState>>,
    AppPath(post_id): AppPath<String>,
    AppJson(body): AppJson<PostDto>,
) -> Result<impl IntoResponse> {
    let post_id = parse_id(&post_id)?;
    let update = body.validate_update()?;
    info!(post_id, "Updating post");

    let post = app_state.posts_service.update_post(post_id, update).await?;

    Ok((
        StatusCode::OK,
        Json(Response::with_message(
            "Post updated successfully",
            PostData { post },
        )),
    ))
}

async fn delete_post(
    Extension(app_state): Extension<Arc<AppState>>,
    AppPath(post_id): AppPath<String>,
) -> Result<impl IntoResponse> {
    let post_id = parse_id(&post_id)?;
    info!(post_id, "Deleting post");

    let post = app_state.posts_service.delete_post(post_id).await?;

    Ok((
        StatusCode::OK,
        Json(Response::with_message(
            "Post deleted successfully",
            PostData { post },
        )),
    ))
}
