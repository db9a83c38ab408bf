//! HR handlers: lecturer roster, payment reports and analytics

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Extension, Json,
};
use chrono::Utc;

use core_kernel::{LecturerId, ReportId};
use domain_claims::Actor;
use domain_hr::{HrAnalytics, Lecturer, LecturerUpdate, NewLecturer, PaymentReport};

use super::parse_id;
use crate::dto::claims::{claim_responses, ClaimResponse};
use crate::dto::hr::{PeriodRequest, ReportSummary};
use crate::{error::ApiError, AppState};

// ============================================================================
// Lecturers
// ============================================================================

pub async fn list_lecturers(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<Lecturer>>, ApiError> {
    Ok(Json(state.hr.lecturers(&actor).await?))
}

pub async fn create_lecturer(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<NewLecturer>,
) -> Result<(StatusCode, Json<Lecturer>), ApiError> {
    let lecturer = state.hr.create_lecturer(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(lecturer)))
}

pub async fn get_lecturer(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<Lecturer>, ApiError> {
    let id: LecturerId = parse_id(&id)?;
    Ok(Json(state.hr.lecturer(&actor, id).await?))
}

pub async fn get_lecturer_by_employee_id(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(employee_id): Path<String>,
) -> Result<Json<Lecturer>, ApiError> {
    Ok(Json(
        state.hr.lecturer_by_employee_id(&actor, &employee_id).await?,
    ))
}

pub async fn update_lecturer(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    Json(update): Json<LecturerUpdate>,
) -> Result<Json<Lecturer>, ApiError> {
    let id: LecturerId = parse_id(&id)?;
    Ok(Json(state.hr.update_lecturer(&actor, id, update).await?))
}

/// Deactivates a lecturer; their records are kept
pub async fn deactivate_lecturer(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: LecturerId = parse_id(&id)?;
    state.hr.deactivate_lecturer(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Payment Reports
// ============================================================================

/// Approved claims due for payment in a period
pub async fn claims_for_payment(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(period): Query<PeriodRequest>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let period = period.resolve(state.hr.timezone(), Utc::now())?;
    let claims = state.hr.claims_for_payment(&actor, period).await?;
    Ok(Json(claim_responses(claims)))
}

pub async fn generate_report(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(period): Json<PeriodRequest>,
) -> Result<(StatusCode, Json<PaymentReport>), ApiError> {
    let period = period.resolve(state.hr.timezone(), Utc::now())?;
    let report = state.hr.generate_payment_report(&actor, period).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// Stored reports, newest first
pub async fn list_reports(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<ReportSummary>>, ApiError> {
    let reports = state.hr.reports(&actor).await?;
    Ok(Json(reports.into_iter().map(Into::into).collect()))
}

pub async fn get_report(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<PaymentReport>, ApiError> {
    let id: ReportId = parse_id(&id)?;
    Ok(Json(state.hr.report(&actor, id).await?))
}

/// A stored report as a CSV attachment
pub async fn download_report(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: ReportId = parse_id(&id)?;
    let (file_name, csv) = state.hr.export_report(&actor, id).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, "text/csv")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        )
        .body(Body::from(csv))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

// ============================================================================
// Analytics
// ============================================================================

pub async fn analytics(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<HrAnalytics>, ApiError> {
    Ok(Json(state.hr.analytics(&actor).await?))
}
