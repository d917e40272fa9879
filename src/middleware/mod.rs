use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use tracing::{error, warn};

use crate::{config::Config, models::response::ErrorResponse, AppState, Error};

const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Single translation point between failures and HTTP. Handlers and
/// extractors return `Error`, which `IntoResponse` parks in the response
/// extensions; here it is logged with the request context and rendered into
/// the error envelope.
pub async fn error_envelope(
    State(app_state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let headers = req.headers().clone();

    // Kept so a failing request can be logged with the body it carried.
    let (parts, body) = req.into_parts();
    let body = match to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(err) => {
            let error = Error::bad_request_with(
                "Invalid request body",
                json!({ "error": err.to_string() }),
            );
            let ctx = RequestContext {
                method: &method,
                path: &path,
                headers: &headers,
                body: &[],
            };
            return render_error(&app_state.config, &error, &ctx);
        }
    };

    let response = next
        .run(Request::from_parts(parts, Body::from(body.clone())))
        .await;

    let Some(error) = response.extensions().get::<Error>().cloned() else {
        return response;
    };

    let ctx = RequestContext {
        method: &method,
        path: &path,
        headers: &headers,
        body: &body,
    };
    render_error(&app_state.config, &error, &ctx)
}

struct RequestContext<'a> {
    method: &'a Method,
    path: &'a str,
    headers: &'a HeaderMap,
    body: &'a [u8],
}

fn render_error(config: &Config, error: &Error, ctx: &RequestContext<'_>) -> Response {
    let normalized = error.normalize();
    let body = String::from_utf8_lossy(ctx.body);

    if normalized.is_operational {
        warn!(
            method = %ctx.method,
            path = ctx.path,
            headers = ?ctx.headers,
            body = %body,
            status = normalized.status_code.as_u16(),
            error = ?error,
            "Request rejected"
        );
    } else {
        error!(
            method = %ctx.method,
            path = ctx.path,
            headers = ?ctx.headers,
            body = %body,
            status = normalized.status_code.as_u16(),
            error = ?error,
            "Request failed"
        );
    }

    let development = config.is_development();
    let status_code = normalized.status_code;
    let status = normalized.status();

    let envelope = ErrorResponse {
        status,
        message: normalized.message,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        path: ctx.path.to_string(),
        method: ctx.method.to_string(),
        details: if normalized.is_operational || development {
            normalized.details
        } else {
            None
        },
        stack: development.then(|| error.trace()),
    };

    (status_code, Json(envelope)).into_response()
}
