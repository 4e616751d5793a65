//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// How client addresses are determined for rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimit {
    /// No limiting (tests, or when a proxy already limits).
    Disabled,
    /// Socket peer address.
    PeerIp,
    /// `X-Forwarded-For` / `X-Real-IP`, falling back to the peer address.
    /// Use only behind a trusted reverse proxy.
    ForwardedIp,
}

impl RateLimit {
    pub fn from_proxy_flag(behind_proxy: bool) -> Self {
        if behind_proxy {
            RateLimit::ForwardedIp
        } else {
            RateLimit::PeerIp
        }
    }
}

/// Builds the login limiter.
///
/// # Limits
///
/// - **Rate**: 1 request per 2 seconds
/// - **Burst**: 5 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
fn login_layer<K: KeyExtractor>(
    extractor: K,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(5)
            .key_extractor(extractor)
            .finish()
            .expect("non-zero rate limit settings"),
    );

    GovernorLayer::new(governor_conf)
}

/// Applies the login limiter to `router` according to `mode`.
///
/// # Example
///
/// ```rust,ignore
/// let login = rate_limit::apply(web::routes::login_routes(), RateLimit::PeerIp);
/// ```
pub fn apply(router: Router<AppState>, mode: RateLimit) -> Router<AppState> {
    match mode {
        RateLimit::Disabled => router,
        RateLimit::PeerIp => router.layer(login_layer(PeerIpKeyExtractor)),
        RateLimit::ForwardedIp => router.layer(login_layer(SmartIpKeyExtractor)),
    }
}
