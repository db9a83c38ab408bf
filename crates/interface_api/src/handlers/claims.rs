//! Lecturer claim handlers

use axum::{extract::State, http::StatusCode, Extension, Json};

use domain_claims::{Actor, ClaimSubmission};

use crate::dto::claims::{claim_responses, ClaimResponse};
use crate::{error::ApiError, AppState};

/// Submits a claim for the calling lecturer
pub async fn submit_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(submission): Json<ClaimSubmission>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let claim = state.reviews.submit(&actor, submission).await?;
    Ok((StatusCode::CREATED, Json(claim.into())))
}

/// Lists the calling lecturer's claims, newest first
pub async fn list_my_claims(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.reviews.my_claims(&actor).await?;
    Ok(Json(claim_responses(claims)))
}
