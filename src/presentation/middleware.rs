//! HTTP middleware for the web server

use axum::{
    extract::FromRequestParts,
    http::{Request, StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use std::time::Instant;
use uuid::Uuid;

use crate::application::errors::{ApplicationError, AuthError};
use crate::domain::{Role, User};
use crate::presentation::controllers::AppState;
use crate::presentation::models::ErrorResponse;

impl ApplicationError {
    pub fn status_code(&self) -> StatusCode {
        match self.error_type() {
            "validation_error" | "conflict" => StatusCode::BAD_REQUEST,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "forbidden" => StatusCode::FORBIDDEN,
            "not_found" => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error handling middleware
impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, error_type = self.error_type(), "Request failed");
            "Internal server error".to_string()
        } else {
            tracing::debug!(error = %self, error_type = self.error_type(), "Request rejected");
            self.to_string()
        };

        let error_response = ErrorResponse {
            error: message,
            status: status.as_u16(),
            timestamp: Utc::now(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Request logging middleware with timing and request ID
pub async fn logging_middleware(request: Request<axum::body::Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = Uuid::new_v4();
    let start_time = Instant::now();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        "Processing request"
    );

    let response = next.run(request).await;
    let duration = start_time.elapsed();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

fn bearer_token(parts: &Parts) -> Result<&str, ApplicationError> {
    let value = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::MissingToken.into()),
    }
}

/// Caller resolved from the bearer token to a live user row
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApplicationError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user = state.auth_service.authenticate(token).await?;
        Ok(AuthUser(user))
    }
}

/// Authenticated caller holding the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApplicationError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(ApplicationError::forbidden(
                "Access denied. Admin privileges required.",
            ));
        }
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::RepositoryError;
    use crate::domain::DomainError;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            ApplicationError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApplicationError::conflict("taken").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApplicationError::from(RepositoryError::StillReferenced).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApplicationError::from(AuthError::ExpiredToken).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApplicationError::forbidden("no").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApplicationError::not_found("Package").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApplicationError::from(DomainError::AlreadyCancelled).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApplicationError::from(AuthError::Hashing("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn bearer_prefix_is_required() {
        let (mut parts, _) = Request::builder()
            .header(header::AUTHORIZATION, "Token abc")
            .body(())
            .unwrap()
            .into_parts();
        assert!(bearer_token(&parts).is_err());

        parts
            .headers
            .insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&parts).unwrap(), "abc");
    }
}
