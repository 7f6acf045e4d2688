//! Authentication route handlers.
//!
//! Login, registration, and logout backed by the local user table.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Form & Query Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        success: query.success,
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.login_with_password(&form.email, &form.password).await {
        Ok(user) => {
            let current = CurrentUser::from(&user);
            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!(error = %e, "failed to store session");
                return LoginTemplate {
                    error: Some("Something went wrong, please try again".to_owned()),
                    success: None,
                }
                .into_response();
            }
            set_sentry_user(&user.id, Some(user.email.as_str()));
            tracing::info!(user_id = %user.id, "user logged in");
            Redirect::to("/cards").into_response()
        }
        Err(e) => {
            tracing::debug!(error = %e, "login failed");
            LoginTemplate {
                error: Some("Invalid email or password".to_owned()),
                success: None,
            }
            .into_response()
        }
    }
}

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate { error: None }
}

/// Handle registration form submission.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return RegisterTemplate {
            error: Some("Passwords do not match".to_owned()),
        }
        .into_response();
    }

    let auth = AuthService::new(state.pool());

    match auth.register_with_password(&form.email, &form.password).await {
        Ok(user) => {
            let current = CurrentUser::from(&user);
            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!(error = %e, "failed to store session");
                return Redirect::to("/auth/login?success=Account+created").into_response();
            }
            set_sentry_user(&user.id, Some(user.email.as_str()));
            tracing::info!(user_id = %user.id, "user registered");
            Redirect::to("/cards").into_response()
        }
        Err(e) => RegisterTemplate {
            error: Some(register_error_message(&e)),
        }
        .into_response(),
    }
}

/// Handle logout.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::warn!(error = %e, "failed to clear session on logout");
    }
    clear_sentry_user();
    Redirect::to("/").into_response()
}

/// Map a registration failure to a user-facing message.
fn register_error_message(error: &crate::services::auth::AuthError) -> String {
    use crate::services::auth::AuthError;
    match error {
        AuthError::UserAlreadyExists => "An account with this email already exists".to_owned(),
        AuthError::InvalidEmail(_) => "Please enter a valid email address".to_owned(),
        AuthError::WeakPassword(msg) => msg.clone(),
        _ => "Something went wrong, please try again".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_error_messages() {
        use crate::services::auth::AuthError;

        assert_eq!(
            register_error_message(&AuthError::UserAlreadyExists),
            "An account with this email already exists"
        );
        assert_eq!(
            register_error_message(&AuthError::WeakPassword("too short".to_owned())),
            "too short"
        );
        assert_eq!(
            register_error_message(&AuthError::InvalidCredentials),
            "Something went wrong, please try again"
        );
    }
}
