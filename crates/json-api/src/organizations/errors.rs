//! Organization Errors

use salvo::http::StatusError;
use tracing::error;

use backoffice_app::{
    domain::{
        imports::ImportError, members::MembersServiceError,
        organizations::OrganizationsServiceError,
    },
    remote::{RemoteError, ValidationError, join_messages},
};

fn unprocessable(brief: &str, errors: &[ValidationError]) -> StatusError {
    StatusError::unprocessable_entity()
        .brief(brief)
        .detail(join_messages(errors))
}

pub(crate) fn into_status_error(error: OrganizationsServiceError) -> StatusError {
    match error {
        OrganizationsServiceError::NotFound => {
            StatusError::not_found().brief("Organization not found")
        }
        OrganizationsServiceError::Forbidden(_) => StatusError::forbidden(),
        OrganizationsServiceError::Invalid(errors) => {
            unprocessable("Invalid organization payload", &errors)
        }
        OrganizationsServiceError::Remote(source) => {
            error!("organization request failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn member_status_error(error: MembersServiceError) -> StatusError {
    match error {
        MembersServiceError::OrganizationNotFound => {
            StatusError::not_found().brief("Organization not found")
        }
        MembersServiceError::MemberNotFound => StatusError::not_found().brief("Member not found"),
        MembersServiceError::MissingMemberEmail => {
            StatusError::bad_request().brief("Member email is required")
        }
        MembersServiceError::Forbidden(_) => StatusError::forbidden(),
        MembersServiceError::Invalid(errors) => unprocessable("Invalid member payload", &errors),
        MembersServiceError::Remote(source) => {
            error!("member request failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Map import failures other than [`ImportError::Invalid`], which is
/// rendered as a list by the handler.
pub(crate) fn import_status_error(error: ImportError) -> StatusError {
    match error {
        ImportError::Invalid(errors) => StatusError::bad_request()
            .brief("Invalid import file")
            .detail(
                errors
                    .iter()
                    .map(|error| format!("row {}: {}", error.row, error.message))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        ImportError::Forbidden(_) => StatusError::forbidden(),
        ImportError::Organization {
            row,
            source: RemoteError::Validation(errors),
        } => unprocessable(&format!("Invalid organization on row {row}"), &errors),
        ImportError::Organization { row, source } => {
            error!("import failed creating organization on row {row}: {source}");

            StatusError::internal_server_error()
        }
        ImportError::Member {
            row,
            source: MembersServiceError::Invalid(errors),
        } => unprocessable(&format!("Invalid member on row {row}"), &errors),
        ImportError::Member { row, source } => {
            error!("import failed inviting member on row {row}: {source}");

            StatusError::internal_server_error()
        }
    }
}
