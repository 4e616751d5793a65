//! Repository trait for data file uploads.

use crate::domain::entities::{AccessToken, FileImport, UploadFile};
use crate::domain::pagination::{Page, PageRequest};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImportRepository: Send + Sync {
    /// Sends a file to the backend for ingestion.
    ///
    /// The backend processes the file asynchronously; the returned import is
    /// usually still `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the backend rejects the file.
    async fn upload(&self, token: &AccessToken, file: UploadFile) -> Result<FileImport, AppError>;

    /// Lists past imports, newest first.
    async fn list(&self, token: &AccessToken, page: PageRequest) -> Result<Page<FileImport>, AppError>;
}
