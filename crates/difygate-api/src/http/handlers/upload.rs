//! Repository upload handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;

use difygate_types::upload::{UploadReceipt, UploadRequest};

use crate::http::error::AppError;
use crate::http::handlers::parse_body;
use crate::state::AppState;

/// POST /api/git-to-s3 - Clone a repository and copy its files to S3.
pub async fn git_to_s3(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UploadReceipt>, AppError> {
    let request: UploadRequest = parse_body(&body)?;
    let receipt = state.upload_service.upload(request).await?;
    Ok(Json(receipt))
}
