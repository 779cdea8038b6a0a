//! Batch Import Example Handler

use salvo::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    prelude::*,
};

use backoffice_app::domain::imports::BATCH_EXAMPLE_CSV;

use crate::extensions::*;

/// Batch Import Example Handler
///
/// Downloads a CSV template for the batch import.
#[endpoint(
    tags("organizations"),
    summary = "Download Batch Import Example",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "CSV template"),
    ),
)]
pub(crate) async fn handler(res: &mut Response) -> Result<(), StatusError> {
    res.add_header(CONTENT_TYPE, "text/csv; charset=utf-8", true)
        .or_500("failed to set content type")?
        .add_header(
            CONTENT_DISPOSITION,
            r#"attachment; filename="batch-example.csv""#,
            true,
        )
        .or_500("failed to set content disposition")?
        .write_body(BATCH_EXAMPLE_CSV)
        .or_500("failed to write batch example")?;

    Ok(())
}
