//! Remote service errors.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single validation failure reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Attribute name taken from the error's `source.pointer`, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match (&self.attribute, &self.detail) {
            (Some(attribute), Some(detail)) => write!(f, "{attribute} {detail}"),
            (None, Some(detail)) => f.write_str(detail),
            (Some(attribute), None) => write!(f, "{attribute} {}", self.title),
            (None, None) => f.write_str(&self.title),
        }
    }
}

/// Errors raised while talking to the remote resource service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The remote service rejected the payload.
    #[error("validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// Non-2xx status or body that doesn't look like a JSON-API document.
    #[error("unexpected response from remote service: {0}")]
    UnexpectedResponse(String),

    #[error("failed to decode resource: {0}")]
    Decode(#[from] serde_json::Error),

    /// A resource id that should be a UUID wasn't one.
    #[error("invalid resource identifier: {0}")]
    InvalidIdentifier(String),
}

/// Joins validation messages into a single human readable string.
pub fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Deserialize)]
struct ErrorDocument {
    #[serde(default)]
    errors: Vec<RawError>,
}

#[derive(Debug, Deserialize)]
struct RawError {
    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    detail: Option<String>,

    #[serde(default)]
    source: Option<RawSource>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    #[serde(default)]
    pointer: Option<String>,
}

/// Parse a JSON-API `errors` body into validation errors.
///
/// Returns an empty list when the body isn't an error document.
pub(crate) fn parse_validation_errors(body: &str) -> Vec<ValidationError> {
    let Ok(document) = serde_json::from_str::<ErrorDocument>(body) else {
        return Vec::new();
    };

    document
        .errors
        .into_iter()
        .map(|raw| ValidationError {
            title: raw.title.unwrap_or_else(|| "is invalid".to_owned()),
            detail: raw.detail,
            attribute: raw
                .source
                .and_then(|source| source.pointer)
                .and_then(|pointer| pointer.rsplit('/').next().map(str::to_owned))
                .filter(|attribute| !attribute.is_empty() && attribute != "data"),
        })
        .collect()
}
