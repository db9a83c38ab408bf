//! Supporting document handlers

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Extension, Json,
};

use domain_claims::documents::{MAX_DOCUMENT_BYTES, UPLOADS_PREFIX};
use domain_claims::{Actor, DocumentUpload};

use crate::dto::documents::DocumentResponse;
use crate::{error::ApiError, AppState};

/// Request body limit for uploads
///
/// Slightly above the document limit so oversized files still reach the
/// store and get its error message.
pub const UPLOAD_BODY_LIMIT: usize = MAX_DOCUMENT_BYTES as usize + 64 * 1024;

/// Form field carrying the file
const FILE_FIELD: &str = "file";

/// Stores the `file` field of a multipart form
pub async fn upload_document(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentResponse>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let reference = state
            .documents
            .save(DocumentUpload::new(file_name, content.to_vec()))
            .await?;

        tracing::info!(user = %actor.approver_name(), reference = ?reference, "Document uploaded");
        return Ok((StatusCode::CREATED, Json(DocumentResponse { reference })));
    }

    Err(ApiError::BadRequest(format!("Missing '{FILE_FIELD}' field")))
}

/// Serves a stored document by file name
pub async fn download_document(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let reference = format!("{UPLOADS_PREFIX}{name}");
    let content = state
        .documents
        .load(&reference)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Document {name}")))?;

    Response::builder()
        .header(header::CONTENT_TYPE, content_type(&name))
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{name}\""),
        )
        .body(Body::from(content))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

fn content_type(name: &str) -> &'static str {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        "application/pdf"
    } else if lower.ends_with(".docx") {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    } else if lower.ends_with(".xlsx") {
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types() {
        assert_eq!(content_type("a.PDF"), "application/pdf");
        assert!(content_type("b.xlsx").contains("spreadsheetml"));
        assert_eq!(content_type("c"), "application/octet-stream");
    }
}
