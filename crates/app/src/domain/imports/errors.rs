//! Import errors.

use serde::Serialize;
use thiserror::Error;

use crate::{
    auth::Forbidden,
    domain::members::MembersServiceError,
    remote::RemoteError,
};

/// A problem with one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRowError {
    /// 1-based data row number, `0` for the header.
    pub row: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    pub message: String,
}

impl ImportRowError {
    pub(crate) fn new(row: usize, field: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.map(str::to_owned),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    /// The file was rejected before anything was written.
    #[error("invalid import file")]
    Invalid(Vec<ImportRowError>),

    #[error("action not permitted")]
    Forbidden(#[from] Forbidden),

    #[error("failed to import organization on row {row}")]
    Organization {
        row: usize,
        #[source]
        source: RemoteError,
    },

    #[error("failed to invite member on row {row}")]
    Member {
        row: usize,
        #[source]
        source: MembersServiceError,
    },
}
