//! Error responses for the HTML dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Redirect, Response};
use serde_json::Value;

use crate::error::AppError;
use crate::web::session::clear_session_cookie;

#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: u16,
    reason: String,
    message: String,
    lines: Vec<String>,
}

/// Dashboard-side wrapper around [`AppError`].
///
/// A backend 401 means the session token is no longer accepted: the cookie
/// is cleared and the browser is sent back to the login page. Everything
/// else renders `error.html` with the mapped status.
#[derive(Debug)]
pub struct WebError(pub AppError);

impl From<AppError> for WebError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Flattens validation details into display lines, e.g. `phone: Invalid phone number`.
///
/// Schema-level messages (reported under `__all__`) are shown without a prefix.
pub fn error_lines(err: &AppError) -> Vec<String> {
    let Value::Object(fields) = err.details() else {
        return Vec::new();
    };
    if !matches!(err, AppError::Validation { .. }) {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for (field, messages) in fields {
        let Some(messages) = messages.as_array() else {
            continue;
        };
        for message in messages.iter().filter_map(Value::as_str) {
            if field == "__all__" {
                lines.push(message.to_string());
            } else {
                lines.push(format!("{}: {}", field.replace('_', " "), message));
            }
        }
    }
    lines
}

pub fn login_redirect() -> Response {
    (
        [(SET_COOKIE, clear_session_cookie())],
        Redirect::to("/dashboard/login"),
    )
        .into_response()
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.is_unauthorized() {
            tracing::info!("Backend rejected session token, redirecting to login");
            return login_redirect();
        }

        let status = err.status();
        if status.is_server_error() {
            tracing::error!(code = err.code(), details = %err.details(), "{}", err);
        }

        let template = ErrorTemplate {
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: err.to_string(),
            lines: error_lines(&err),
        };
        (status, template).into_response()
    }
}

/// Shorthand for a 404 page.
pub fn not_found(message: &str) -> WebError {
    WebError(AppError::not_found(message, Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn test_error_lines() {
        let err = AppError::bad_request(
            "Validation failed",
            json!({
                "full_name": ["Name must be 2-120 characters"],
                "__all__": ["Expiry date must not be before issue date"],
            }),
        );
        let lines = error_lines(&err);
        assert!(lines.contains(&"full name: Name must be 2-120 characters".to_string()));
        assert!(lines.contains(&"Expiry date must not be before issue date".to_string()));
    }

    #[test]
    fn test_error_lines_ignore_other_errors() {
        let err = AppError::upstream("Backend error", json!({"status": 503}));
        assert!(error_lines(&err).is_empty());
    }

    #[test]
    fn test_unauthorized_redirects_and_clears_cookie() {
        let response = WebError(AppError::unauthorized("expired", json!({}))).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(
            response.headers()[SET_COOKIE]
                .to_str()
                .unwrap()
                .contains("Max-Age=0")
        );
    }

    #[test]
    fn test_not_found_renders_page() {
        let response = not_found("Driver not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
