//! Repository trait for drivers and the companies they belong to.

use crate::domain::entities::{AccessToken, Company, Driver, DriverFilter, DriverPatch, NewDriver};
use crate::domain::pagination::Page;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for driver records.
///
/// # Implementations
///
/// - [`crate::infrastructure::backend::HttpDriverRepository`] - REST backend
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// Lists drivers matching the filter, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is rejected.
    /// Returns [`AppError::Upstream`] if the backend fails.
    async fn list(&self, token: &AccessToken, filter: DriverFilter) -> Result<Page<Driver>, AppError>;

    /// Finds a driver by ID, `None` if the backend reports 404.
    async fn find(&self, token: &AccessToken, id: i64) -> Result<Option<Driver>, AppError>;

    /// Registers a new driver.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the backend reports a duplicate
    /// (for example the same national ID).
    async fn create(&self, token: &AccessToken, driver: NewDriver) -> Result<Driver, AppError>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the driver does not exist.
    async fn update(&self, token: &AccessToken, id: i64, patch: DriverPatch) -> Result<Driver, AppError>;

    /// Deletes a driver. Returns `false` if it did not exist.
    async fn delete(&self, token: &AccessToken, id: i64) -> Result<bool, AppError>;

    /// Lists companies drivers can be assigned to.
    async fn companies(&self, token: &AccessToken) -> Result<Vec<Company>, AppError>;
}
