//! API middleware

use axum::{
    body::Body,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{info, warn};

use domain_claims::{Actor, ApproverRole};

use crate::error::ApiError;

/// Header carrying the caller's username
pub const USER_HEADER: &str = "x-user";

/// Header carrying the caller's role name, e.g. `Academic Manager`
pub const ROLE_HEADER: &str = "x-role";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Reads the acting user from the identity headers
///
/// A missing role means no identity at all; the username is optional for
/// reviewers and HR, whose role name then stands in for it.
pub fn actor_from_headers(headers: &HeaderMap) -> Option<Actor> {
    let role = header(headers, ROLE_HEADER)?;
    let username = header(headers, USER_HEADER).map(str::to_string);
    Some(Actor::new(username, ApproverRole::from(role)))
}

/// Identity middleware
///
/// Resolves the [`Actor`] and adds it to the request extensions.
pub async fn identity_middleware(mut request: Request<Body>, next: Next) -> Response {
    match actor_from_headers(request.headers()) {
        Some(actor) => {
            request.extensions_mut().insert(actor);
            next.run(request).await
        }
        None => {
            warn!("Missing {} header", ROLE_HEADER);
            ApiError::Unauthorized.into_response()
        }
    }
}

/// User and role recorded in the audit log for a request
///
/// Read straight from the headers, since audit runs outside identity and
/// also sees callers that identity turns away.
pub fn audit_identity(headers: &HeaderMap) -> (String, String) {
    actor_from_headers(headers)
        .map(|a| (a.approver_name(), a.role.to_string()))
        .unwrap_or_else(|| ("anonymous".to_string(), "none".to_string()))
}

/// Audit logging middleware
///
/// Logs every API request with the acting user, including refused ones
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let (user, role) = audit_identity(request.headers());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user,
        role = %role,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_actor_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_HEADER, HeaderValue::from_static("jane.smith"));
        headers.insert(ROLE_HEADER, HeaderValue::from_static("Lecturer"));

        let actor = actor_from_headers(&headers).unwrap();
        assert_eq!(actor.username.as_deref(), Some("jane.smith"));
        assert_eq!(actor.role, ApproverRole::Lecturer);
    }

    #[test]
    fn test_role_is_required() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_HEADER, HeaderValue::from_static("jane.smith"));
        assert!(actor_from_headers(&headers).is_none());

        headers.insert(ROLE_HEADER, HeaderValue::from_static("   "));
        assert!(actor_from_headers(&headers).is_none());
    }

    #[test]
    fn test_reviewer_without_username_approves_as_role() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, HeaderValue::from_static("Programme Coordinator"));

        let actor = actor_from_headers(&headers).unwrap();
        assert_eq!(actor.approver_name(), "Programme Coordinator");
    }

    #[test]
    fn test_audit_records_anonymous_caller() {
        let headers = HeaderMap::new();
        let (user, role) = audit_identity(&headers);
        assert_eq!(user, "anonymous");
        assert_eq!(role, "none");
    }

    #[test]
    fn test_audit_records_named_caller() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_HEADER, HeaderValue::from_static("jane.smith"));
        headers.insert(ROLE_HEADER, HeaderValue::from_static("Lecturer"));

        let (user, role) = audit_identity(&headers);
        assert_eq!(user, "jane.smith");
        assert_eq!(role, "Lecturer");
    }
}
