//! Repository trait for driver compliance documents.

use crate::domain::entities::{AccessToken, DocumentPatch, DriverDocument, NewDocument};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Lists every document stored for a driver.
    async fn list_for_driver(
        &self,
        token: &AccessToken,
        driver_id: i64,
    ) -> Result<Vec<DriverDocument>, AppError>;

    async fn create(
        &self,
        token: &AccessToken,
        driver_id: i64,
        document: NewDocument,
    ) -> Result<DriverDocument, AppError>;

    async fn update(
        &self,
        token: &AccessToken,
        document_id: i64,
        patch: DocumentPatch,
    ) -> Result<DriverDocument, AppError>;

    /// Deletes a document. Returns `false` if it did not exist.
    async fn delete(&self, token: &AccessToken, document_id: i64) -> Result<bool, AppError>;
}
