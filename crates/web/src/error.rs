//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding. All route handlers return `Result<T, AppError>`, and
//! the `IntoResponse` impl maps each failure kind to exactly one of the
//! four user-visible behaviors: not-found page, redirect to login, redirect
//! away, or a terminal 500. No retries happen in this layer.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::filters;
use crate::services::auth::AuthError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found (or hidden from the requester).
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not permitted (e.g. editing someone else's card).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Dedicated page for missing or hidden cards.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
struct NotFoundTemplate;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        match &self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, NotFoundTemplate).into_response(),
            Self::Unauthorized(_) => Redirect::to("/auth/login").into_response(),
            Self::Forbidden(_) => Redirect::to("/cards").into_response(),
            Self::Auth(err) => {
                let status = match err {
                    AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                    AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                    AuthError::WeakPassword(_) | AuthError::InvalidEmail(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                // Don't expose internal error details to clients
                let message = match err {
                    AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                    AuthError::UserAlreadyExists => {
                        "An account with this email already exists".to_string()
                    }
                    AuthError::WeakPassword(msg) => msg.clone(),
                    AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                    _ => "Authentication error".to_string(),
                };
                (status, message).into_response()
            }
            Self::Database(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
                .into_response(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("alice-smith".to_string());
        assert_eq!(err.to_string(), "Not found: alice-smith");

        let err = AppError::Forbidden("not the owner".to_string());
        assert_eq!(err.to_string(), "Forbidden: not the owner");
    }

    #[test]
    fn test_not_found_renders_404_page() {
        let response = AppError::NotFound("test".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_not_found_page_treats_hidden_and_missing_alike() {
        let page = NotFoundTemplate.render().unwrap();
        assert!(page.contains("Card not found"));
        assert!(page.contains("doesn't exist, or it isn't shared publicly"));
    }

    #[test]
    fn test_unauthorized_redirects_to_login() {
        let response = AppError::Unauthorized("no session".to_string()).into_response();
        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers().get(axum::http::header::LOCATION).unwrap(),
            "/auth/login"
        );
    }

    #[test]
    fn test_forbidden_redirects_away() {
        let response = AppError::Forbidden("not the owner".to_string()).into_response();
        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers().get(axum::http::header::LOCATION).unwrap(),
            "/cards"
        );
    }

    #[test]
    fn test_internal_is_terminal_500() {
        let response = AppError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
