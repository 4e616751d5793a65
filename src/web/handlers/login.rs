//! Login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::error::WebError;
use crate::web::forms::{LoginForm, form_errors};
use crate::web::handlers::notice_message;
use crate::web::session::{clear_session_cookie, session_cookie, session_value};

/// Renders `templates/login.html`: email/password form, error list and
/// an optional notice (e.g. after logout).
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    email: String,
    errors: Vec<String>,
    notice: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub notice: Option<String>,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /dashboard/login`
pub async fn login_handler(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    LoginTemplate {
        email: String::new(),
        errors: Vec::new(),
        notice: notice_message(query.notice.as_deref()),
    }
}

/// Exchanges credentials for a backend token and stores it in the
/// session cookie.
///
/// # Endpoint
///
/// `POST /dashboard/login` (form: `email`, `password`)
///
/// # Responses
///
/// - `303` to `/dashboard` with `Set-Cookie: fleet_session=...` on success
/// - `401` login page with "Invalid email or password"
/// - `400` login page listing validation problems
pub async fn login_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    let email = form.email.trim().to_string();

    match state.auth_service.login(form.into_credentials()).await {
        Ok(token) => {
            let cookie = session_cookie(
                &state.auth_service.seal(&token),
                state.settings.secure_cookies,
            );
            Ok(([(SET_COOKIE, cookie)], Redirect::to("/dashboard")).into_response())
        }
        Err(err @ (AppError::Unauthorized { .. } | AppError::Validation { .. })) => {
            let status = err.status();
            let errors = match &err {
                AppError::Unauthorized { .. } => vec![err.to_string()],
                _ => form_errors(&err),
            };
            let page = LoginTemplate {
                email,
                errors,
                notice: None,
            };
            Ok((status, page).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// Ends the session: revokes the token at the backend (best effort) and
/// clears the cookie.
///
/// # Endpoint
///
/// `POST /dashboard/logout`
pub async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_value(&headers).and_then(|sealed| state.auth_service.open(&sealed))
        && let Err(err) = state.auth_service.logout(&token).await
    {
        tracing::warn!(error = %err, "Backend logout failed, clearing session anyway");
    }

    (
        [(SET_COOKIE, clear_session_cookie())],
        Redirect::to("/dashboard/login?notice=logged_out"),
    )
        .into_response()
}
