//! Batch Import Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use backoffice_app::domain::imports::ImportError;

use crate::{
    extensions::*,
    observability::observe_import,
    organizations::{
        errors::import_status_error,
        responses::{ImportReportResponse, ImportRowErrorResponse},
    },
    state::State,
};

/// Batch Import Handler
///
/// Imports organizations and members from the CSV uploaded as `file`.
/// Every row is validated first; when any row fails nothing is written and
/// the problems are returned as a list.
#[endpoint(
    tags("organizations"),
    summary = "Batch Import Organizations",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Import report", body = ImportReportResponse),
        (status_code = StatusCode::BAD_REQUEST, description = "Rejected rows", body = Vec<ImportRowErrorResponse>),
        (status_code = StatusCode::FORBIDDEN, description = "Forbidden"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context_or_401()?;

    let path = req
        .file("file")
        .await
        .map(|file| file.path().clone())
        .ok_or_else(|| StatusError::bad_request().brief("Missing `file` upload"))?;

    let input = tokio::fs::read(&path)
        .await
        .or_500("failed to read uploaded file")?;

    match state.app.imports.import_csv(ctx, &input).await {
        Ok(report) => {
            observe_import(true, report.members.len());

            info!(
                organizations = report.organizations.len(),
                members = report.members.len(),
                "batch import succeeded"
            );

            res.render(Json(ImportReportResponse::from(report)));
        }
        Err(ImportError::Invalid(errors)) => {
            observe_import(false, errors.len());

            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(
                errors
                    .into_iter()
                    .map(ImportRowErrorResponse::from)
                    .collect::<Vec<_>>(),
            ));
        }
        Err(other) => return Err(import_status_error(other)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::CONTENT_TYPE,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use backoffice_app::{
        auth::Forbidden,
        domain::{
            imports::{
                ImportRowError,
                data::{ImportReport, ImportedMember, ImportedOrganization},
            },
            members::data::InvitedMember,
            organizations::records::OrganizationUuid,
        },
    };

    use crate::test_helpers::{Mocks, admin_service, make_user};

    use super::*;

    const BOUNDARY: &str = "backoffice-boundary";
    const CSV: &str = "organization_name,email\nAcme,jane@acme.test\n";

    fn multipart(field: &str, contents: &str) -> String {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"import.csv\"\r\n\
             Content-Type: text/csv\r\n\r\n\
             {contents}\r\n\
             --{BOUNDARY}--\r\n"
        )
    }

    async fn upload(mocks: Mocks, body: String) -> Response {
        TestClient::post("http://example.com/organization/batch_import")
            .add_header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
                true,
            )
            .body(body)
            .send(&admin_service(
                mocks,
                Router::with_path("organization/batch_import").post(handler),
            ))
            .await
    }

    #[tokio::test]
    async fn test_batch_import_returns_report() -> TestResult {
        let organization = OrganizationUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .imports
            .expect_import_csv()
            .once()
            .withf(|_, input| input == CSV.as_bytes())
            .return_once(move |_, _| {
                Ok(ImportReport {
                    organizations: vec![ImportedOrganization {
                        uuid: organization,
                        name: "Acme".to_owned(),
                        external_id: None,
                        created: true,
                    }],
                    members: vec![ImportedMember {
                        row: 1,
                        organization,
                        member: InvitedMember::User(make_user("jane@acme.test", true)),
                    }],
                })
            });

        let mut res = upload(mocks, multipart("file", CSV)).await;
        let report: ImportReportResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(report.organizations.len(), 1);
        assert_eq!(
            report.members.first().map(|member| member.organization_id),
            Some(organization.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_batch_import_rejections_return_error_list() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.imports.expect_import_csv().once().return_once(|_, _| {
            Err(ImportError::Invalid(vec![ImportRowError {
                row: 1,
                field: Some("email".to_owned()),
                message: "is not a valid email".to_owned(),
            }]))
        });

        let mut res = upload(mocks, multipart("file", CSV)).await;
        let errors: Vec<ImportRowErrorResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.first().and_then(|error| error.field.as_deref()),
            Some("email")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_batch_import_without_file_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.imports.expect_import_csv().never();

        let res = upload(mocks, multipart("document", CSV)).await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_batch_import_forbidden_for_support_users() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .imports
            .expect_import_csv()
            .once()
            .return_once(|_, _| Err(ImportError::Forbidden(Forbidden)));

        let res = upload(mocks, multipart("file", CSV)).await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
