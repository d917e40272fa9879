use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{json, Value};
use sqlx::postgres::PgDatabaseError;
use validator::ValidationErrors;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Client-caused failure raised before any storage access.
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<Value>,
    },
    #[error("{message}")]
    NotFound {
        message: String,
        details: Option<Value>,
    },
    #[error("storage failure: {0}")]
    Storage(StorageError),
    #[error("unexpected failure: {0}")]
    Unknown(String),
}

impl Error {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request_with(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details: Some(details),
        }
    }

    /// A missing record, `key` names the id field echoed back in the details.
    pub fn record_not_found(key: &str, id: i32) -> Self {
        Self::NotFound {
            message: "Record not found".to_string(),
            details: Some(json!({ key: id })),
        }
    }

    pub fn route_not_found(path: &str) -> Self {
        Self::NotFound {
            message: "Route not found".to_string(),
            details: Some(json!({ "path": path })),
        }
    }

    /// Turns `validator` output into a single 400. The message comes from the
    /// first failing field in `order`; every failing rule ends up in details.
    pub fn from_validation(errors: ValidationErrors, order: &[&str]) -> Self {
        let field_errors = errors.field_errors();

        let message = order
            .iter()
            .filter_map(|field| field_errors.get(*field))
            .chain(field_errors.values())
            .flat_map(|errs| errs.iter())
            .next()
            .map(|err| match &err.message {
                Some(msg) => msg.to_string(),
                None => err.code.to_string(),
            })
            .unwrap_or_else(|| "Invalid data".to_string());

        let fields: serde_json::Map<String, Value> = field_errors
            .iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect();

        Self::bad_request_with(message, json!({ "fields": fields }))
    }

    /// Maps any failure onto the single response shape used at the HTTP
    /// boundary. Never fails; unrecognised storage codes land on 500.
    pub fn normalize(&self) -> NormalizedError {
        match self {
            Self::Validation { message, details } => NormalizedError {
                status_code: StatusCode::BAD_REQUEST,
                message: message.clone(),
                details: details.clone(),
                is_operational: true,
            },
            Self::NotFound { message, details } => NormalizedError {
                status_code: StatusCode::NOT_FOUND,
                message: message.clone(),
                details: details.clone(),
                is_operational: true,
            },
            Self::Storage(err) => err.normalize(),
            Self::Unknown(_) => NormalizedError {
                status_code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Internal server error".to_string(),
                details: None,
                is_operational: false,
            },
        }
    }

    /// Debug trace exposed only in development mode.
    pub fn trace(&self) -> String {
        match self {
            Self::Storage(err) => err.raw.clone(),
            other => format!("{other:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    UniqueViolation,
    ForeignKeyViolation,
    NotNullViolation,
    InvalidTextRepresentation,
    Connection,
    Other,
}

impl StorageErrorKind {
    /// Classifies a PostgreSQL SQLSTATE code.
    pub fn from_code(code: &str) -> Self {
        match code {
            "23505" => Self::UniqueViolation,
            "23503" => Self::ForeignKeyViolation,
            "23502" => Self::NotNullViolation,
            "22P02" => Self::InvalidTextRepresentation,
            "08000" | "08003" | "08006" => Self::Connection,
            _ => Self::Other,
        }
    }
}

/// Driver failure reduced to the fields the normalizer reads.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind:?} ({})", .code.as_deref().unwrap_or("no code"))]
pub struct StorageError {
    pub kind: StorageErrorKind,
    pub code: Option<String>,
    pub constraint: Option<String>,
    pub detail: Option<String>,
    pub column: Option<String>,
    pub table: Option<String>,
    pub hint: Option<String>,
    pub raw: String,
}

impl StorageError {
    pub fn with_code(code: &str) -> Self {
        Self {
            kind: StorageErrorKind::from_code(code),
            code: Some(code.to_string()),
            constraint: None,
            detail: None,
            column: None,
            table: None,
            hint: None,
            raw: format!("database error {code}"),
        }
    }

    fn connection(raw: String) -> Self {
        Self {
            kind: StorageErrorKind::Connection,
            code: None,
            constraint: None,
            detail: None,
            column: None,
            table: None,
            hint: None,
            raw,
        }
    }

    fn normalize(&self) -> NormalizedError {
        let code = self.code.clone();
        let (status_code, message, details) = match self.kind {
            StorageErrorKind::UniqueViolation => (
                StatusCode::CONFLICT,
                "Duplicate data found",
                StorageDetails {
                    error_code: code,
                    constraint: self.constraint.clone(),
                    detail: self.detail.clone(),
                    ..Default::default()
                },
            ),
            StorageErrorKind::ForeignKeyViolation => (
                StatusCode::BAD_REQUEST,
                "Invalid reference found",
                StorageDetails {
                    error_code: code,
                    constraint: self.constraint.clone(),
                    detail: self.detail.clone(),
                    ..Default::default()
                },
            ),
            StorageErrorKind::NotNullViolation => (
                StatusCode::BAD_REQUEST,
                "Required field not provided",
                StorageDetails {
                    error_code: code,
                    column: self.column.clone(),
                    table: self.table.clone(),
                    ..Default::default()
                },
            ),
            StorageErrorKind::InvalidTextRepresentation => (
                StatusCode::BAD_REQUEST,
                "Invalid data format",
                StorageDetails {
                    error_code: code,
                    detail: self.detail.clone(),
                    ..Default::default()
                },
            ),
            StorageErrorKind::Connection => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Database connection error",
                StorageDetails {
                    error_code: code,
                    detail: Some("Service temporarily unavailable".to_string()),
                    ..Default::default()
                },
            ),
            StorageErrorKind::Other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                StorageDetails {
                    error_code: code,
                    detail: self.detail.clone(),
                    hint: self.hint.clone(),
                    ..Default::default()
                },
            ),
        };

        NormalizedError {
            status_code,
            message: message.to_string(),
            details: serde_json::to_value(details).ok(),
            is_operational: false,
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct StorageDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    constraint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedError {
    pub status_code: StatusCode,
    pub message: String,
    pub details: Option<Value>,
    pub is_operational: bool,
}

impl NormalizedError {
    pub fn status(&self) -> &'static str {
        if self.status_code.is_client_error() {
            "fail"
        } else {
            "error"
        }
    }
}

impl IntoResponse for Error {
    /// Only the status is decided here. The envelope needs the request, so the
    /// error rides along in the extensions until `middleware::error_envelope`.
    fn into_response(self) -> Response {
        let mut response = self.normalize().status_code.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        let raw = format!("{err:?}");
        match err {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.into_owned());
                let pg = db_err.try_downcast_ref::<PgDatabaseError>();
                let Some(code) = code else {
                    return Self::Unknown(raw);
                };
                Self::Storage(StorageError {
                    kind: StorageErrorKind::from_code(&code),
                    code: Some(code),
                    constraint: db_err.constraint().map(str::to_string),
                    detail: pg.and_then(|e| e.detail()).map(str::to_string),
                    column: pg.and_then(|e| e.column()).map(str::to_string),
                    table: db_err.table().map(str::to_string),
                    hint: pg.and_then(|e| e.hint()).map(str::to_string),
                    raw,
                })
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => Self::Storage(StorageError::connection(raw)),
            _ => Self::Unknown(raw),
        }
    }
}
