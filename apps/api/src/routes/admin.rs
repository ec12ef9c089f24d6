use std::io::ErrorKind;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub key: Option<String>,
}

/// GET /admin/download-csv?key=<secret>
///
/// Streams the record store as a CSV attachment. 403 unless `key` matches the
/// configured secret; 404 when nothing has been recorded yet.
pub async fn handle_download_csv(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    if !key_matches(
        query.key.as_deref(),
        state.config.admin_secret_key.as_deref(),
    ) {
        warn!("Rejected admin CSV download with missing or invalid key");
        return Err(AppError::Forbidden);
    }

    let path = &state.config.records_path;
    let contents = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound(
                "No submissions have been recorded yet".to_string(),
            ));
        }
        Err(e) => return Err(AppError::Internal(e.into())),
    };

    info!("Admin CSV download ({} bytes)", contents.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"submissions.csv\"",
            ),
        ],
        contents,
    )
        .into_response())
}

/// Constant-time comparison. No configured secret means no access.
fn key_matches(provided: Option<&str>, secret: Option<&str>) -> bool {
    match (provided, secret) {
        (Some(provided), Some(secret)) => provided.as_bytes().ct_eq(secret.as_bytes()).into(),
        _ => false,
    }
}
