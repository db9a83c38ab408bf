//! Review handlers for coordinators and managers

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use core_kernel::ClaimId;
use domain_claims::{Actor, ClaimAssessment};

use super::parse_id;
use crate::dto::claims::{claim_responses, ClaimResponse};
use crate::dto::review::{RejectRequest, ReviewItemResponse};
use crate::{error::ApiError, AppState};

/// Pending claims with their findings
pub async fn review_queue(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<ReviewItemResponse>>, ApiError> {
    let queue = state.reviews.review_queue(&actor).await?;
    Ok(Json(queue.into_iter().map(Into::into).collect()))
}

pub async fn approved_claims(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.reviews.approved_claims(&actor).await?;
    Ok(Json(claim_responses(claims)))
}

/// Findings and approval outlook for one claim
pub async fn assess_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<ClaimAssessment>, ApiError> {
    let id: ClaimId = parse_id(&id)?;
    Ok(Json(state.reviews.assess(id, &actor).await?))
}

pub async fn approve_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let id: ClaimId = parse_id(&id)?;
    let claim = state.reviews.approve(id, &actor).await?;
    Ok(Json(claim.into()))
}

/// Rejects a claim; the JSON body with review notes is optional
pub async fn reject_claim(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    body: Option<Json<RejectRequest>>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let id: ClaimId = parse_id(&id)?;
    let notes = body.and_then(|Json(request)| request.notes);
    let claim = state.reviews.reject(id, &actor, notes).await?;
    Ok(Json(claim.into()))
}
