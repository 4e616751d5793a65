//! Payroll and trip data file uploads.

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use super::driver_service::clamp_page;
use crate::domain::entities::{AccessToken, FileImport, UploadFile};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repositories::ImportRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, cached, invalidate, namespace, user_key};

/// File extensions the backend knows how to ingest.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

/// Default upload limit (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Checks an upload before it is forwarded.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the file is empty, too large, or not
/// a CSV/Excel file.
pub fn validate_upload(file: &UploadFile, max_bytes: usize) -> Result<(), AppError> {
    if file.bytes.is_empty() {
        return Err(AppError::bad_request(
            "The uploaded file is empty",
            json!({ "file": [format!("{} contains no data", file.file_name)] }),
        ));
    }

    if file.bytes.len() > max_bytes {
        return Err(AppError::bad_request(
            "The uploaded file is too large",
            json!({ "file": [format!("{} bytes is over the {max_bytes} byte limit", file.bytes.len())] }),
        ));
    }

    match file.extension() {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        ext => Err(AppError::bad_request(
            "Unsupported file type",
            json!({
                "file": [format!("'{}' is not one of {}", ext.unwrap_or_default(), ALLOWED_EXTENSIONS.join(", "))]
            }),
        )),
    }
}

pub struct ImportService<R: ImportRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    max_upload_bytes: usize,
}

impl<R: ImportRepository + ?Sized> ImportService<R> {
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>, max_upload_bytes: usize) -> Self {
        Self {
            repository,
            cache,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Validates and forwards a data file.
    ///
    /// A successful upload drops cached records, imports and analytics since
    /// the backend may start ingesting immediately.
    pub async fn upload(&self, token: &AccessToken, file: UploadFile) -> Result<FileImport, AppError> {
        validate_upload(&file, self.max_upload_bytes)?;

        let kind = file.kind;
        let size = file.bytes.len();
        let import = self.repository.upload(token, file).await?;

        invalidate(self.cache.as_ref(), namespace::IMPORTS).await;
        invalidate(self.cache.as_ref(), namespace::RECORDS).await;
        invalidate(self.cache.as_ref(), namespace::ANALYTICS).await;

        info!(import_id = import.id, kind = kind.as_str(), size, "Data file uploaded");
        Ok(import)
    }

    /// Import history, newest first.
    pub async fn list(&self, token: &AccessToken, page: PageRequest) -> Result<Page<FileImport>, AppError> {
        let page = clamp_page(page);
        let key = user_key(
            namespace::IMPORTS,
            token,
            &format!("p{}:s{}", page.page, page.page_size),
        );
        cached(self.cache.as_ref(), &key, || self.repository.list(token, page)).await
    }
}
