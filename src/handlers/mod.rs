use axum::extract::OriginalUri;

use crate::Error;

pub mod docs;
pub mod posts;
pub mod students;
pub mod teachers;

/// Unmatched paths, and unsupported methods on known paths.
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> Error {
    Error::route_not_found(uri.path())
}
