use serde::Serialize;
use serde_json::Value;

/// Success envelope for collections. `searchTerm` only appears on searches.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub status: &'static str,
    pub results: usize,
    #[serde(rename = "searchTerm", skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    pub data: T,
}

impl<T> ListResponse<T> {
    pub fn new(results: usize, data: T) -> Self {
        Self {
            status: "success",
            results,
            search_term: None,
            data,
        }
    }

    pub fn search(results: usize, term: String, data: T) -> Self {
        Self {
            search_term: Some(term),
            ..Self::new(results, data)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Response<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> Response<T> {
    pub fn data(data: T) -> Self {
        Self {
            status: "success",
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: Some(message.into()),
            data,
        }
    }
}

/// Error envelope written by the error middleware.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
    pub timestamp: String,
    pub path: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}
