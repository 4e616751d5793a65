//! Authentication middleware for the JSON API.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::domain::entities::AccessToken;
use crate::web::session::session_value;
use crate::{error::AppError, state::AppState};

/// Resolves the caller's backend token and stores it as a request extension.
///
/// # Sources
///
/// 1. `Authorization: Bearer <token>` (scripts, `fleetctl`)
/// 2. The signed dashboard session cookie (charts loaded by the browser)
///
/// The token is not checked here; the backend rejects expired tokens and
/// that 401 is passed through to the caller.
///
/// # Errors
///
/// Returns `401 Unauthorized` if neither source yields a token, or the
/// cookie signature does not verify.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/analytics/summary", get(summary_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) if !token.is_empty() => Some(AccessToken::new(token)),
        _ => session_value(&parts.headers).and_then(|sealed| st.auth_service.open(&sealed)),
    };

    let token = token.ok_or_else(|| {
        AppError::unauthorized(
            "Unauthorized",
            serde_json::json!({"reason": "Bearer token or session cookie is missing or invalid"}),
        )
    })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(token);

    Ok(next.run(req).await)
}
