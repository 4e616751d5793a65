//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: backend, cache (public)
//! - `/api/*`            - JSON API (bearer token or session cookie; pager is public)
//! - `/dashboard/*`      - Web UI (cookie session required, except login)
//! - `/static/*`         - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on login (configurable for proxy deployments)
//! - **Authentication** - Bearer token / cookie (API) or cookie session (web)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, RateLimit};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Assembles every route and middleware except path normalization.
///
/// Tests use this with [`RateLimit::Disabled`], since the limiter needs the
/// peer address that only a real listener provides.
pub fn build_router(state: AppState, rate_limit: RateLimit) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .merge(api::routes::public_routes());

    let web_protected = web::routes::protected_routes(state.import_service.max_upload_bytes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            web_auth::layer,
        ));

    let web_login = rate_limit::apply(web::routes::login_routes(), rate_limit);

    let web_router = Router::new().merge(web_protected).merge(web_login);

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .nest("/dashboard", web_router)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router served by the binary.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let router = build_router(state, RateLimit::from_proxy_flag(behind_proxy));
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
