//! Repository traits for backend sessions and health.

use crate::domain::entities::{AccessToken, Credentials};
use crate::error::AppError;
use async_trait::async_trait;

/// Exchanges administrator credentials for a backend bearer token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the credentials are rejected.
    async fn login(&self, credentials: Credentials) -> Result<AccessToken, AppError>;

    /// Revokes the token on the backend.
    async fn logout(&self, token: &AccessToken) -> Result<(), AppError>;
}

/// Reachability check used by the health endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendHealth: Send + Sync {
    async fn ping(&self) -> bool;
}
