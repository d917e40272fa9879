use serde::Deserialize;
use serde_json::json;

use crate::{Error, Result};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQueryDto {
    pub q: Option<String>,
}

impl SearchQueryDto {
    /// Returns the search term once it is present and at least 2 characters.
    /// The query string is decoded lossily, so a replacement character means
    /// the client sent bytes that were not UTF-8.
    pub fn term(self) -> Result<String> {
        let term = match self.q {
            Some(q) if !q.is_empty() => q,
            _ => return Err(Error::bad_request("Search term is required")),
        };

        if term.contains(char::REPLACEMENT_CHARACTER) {
            return Err(Error::bad_request("Search term must be valid UTF-8"));
        }

        if term.chars().count() < 2 {
            return Err(Error::bad_request(
                "Search term must be at least 2 characters",
            ));
        }

        Ok(term)
    }
}

/// Path ids must be plain integers; anything else is rejected before the
/// database is touched.
pub fn parse_id(raw: &str) -> Result<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| Error::bad_request("Invalid ID, must be a number"))
}

/// Fails with every absent or empty field listed, in the order given.
pub fn require_fields(fields: &[(&str, &Option<String>)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::bad_request_with(
            "Required fields not provided",
            json!({ "missingFields": missing }),
        ))
    }
}
