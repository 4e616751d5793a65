//! Cookie-based session middleware for the web dashboard.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;
use crate::web::error::login_redirect;
use crate::web::session::session_value;

/// Resolves the backend token from the signed session cookie.
///
/// # Cookie Format
///
/// ```text
/// Cookie: fleet_session=<base64url(token)>.<hex(hmac-sha256)>
/// ```
///
/// # Flow
///
/// 1. Read `fleet_session` from the `Cookie` header(s)
/// 2. Verify the signature via [`crate::application::services::AuthService::open`]
/// 3. On success, store the [`crate::domain::entities::AccessToken`] as a
///    request extension and continue
/// 4. Otherwise clear the cookie and redirect to `/dashboard/login`
///
/// The token itself is only checked by the backend. When it has expired,
/// the handler's backend call fails with 401 and
/// [`crate::web::error::WebError`] performs the same redirect.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/", get(dashboard_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), web_auth::layer));
/// ```
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = session_value(req.headers()).and_then(|sealed| st.auth_service.open(&sealed));

    match token {
        Some(token) => {
            req.extensions_mut().insert(token);
            next.run(req).await
        }
        None => {
            tracing::debug!(path = %req.uri().path(), "No valid session, redirecting to login");
            login_redirect()
        }
    }
}
