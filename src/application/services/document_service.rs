//! Driver documents and their expiry tracking.

use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::domain::entities::{
    AccessToken, ComplianceReport, DocumentPatch, DocumentView, DriverDocument, NewDocument,
};
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, cached, invalidate, namespace, user_key};

/// Service for a driver's licences, IDs and contracts.
///
/// Documents are returned as [`DocumentView`]s evaluated against the
/// configured warning window, soonest expiry first.
pub struct DocumentService<R: DocumentRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    warning_days: u32,
}

impl<R: DocumentRepository + ?Sized> DocumentService<R> {
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>, warning_days: u32) -> Self {
        Self {
            repository,
            cache,
            warning_days,
        }
    }

    pub fn warning_days(&self) -> u32 {
        self.warning_days
    }

    async fn documents(&self, token: &AccessToken, driver_id: i64) -> Result<Vec<DriverDocument>, AppError> {
        let key = user_key(namespace::DOCUMENTS, token, &driver_id.to_string());
        cached(self.cache.as_ref(), &key, || {
            self.repository.list_for_driver(token, driver_id)
        })
        .await
    }

    /// Lists a driver's documents with their expiry status as of `today`.
    pub async fn list(
        &self,
        token: &AccessToken,
        driver_id: i64,
        today: NaiveDate,
    ) -> Result<Vec<DocumentView>, AppError> {
        let mut views: Vec<DocumentView> = self
            .documents(token, driver_id)
            .await?
            .into_iter()
            .map(|doc| DocumentView::new(doc, today, self.warning_days))
            .collect();

        // Undated documents sort last.
        views.sort_by_key(|v| (v.document.expires_on.is_none(), v.document.expires_on));
        Ok(views)
    }

    /// Finds one of a driver's documents, for edit forms.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the driver has no such document.
    pub async fn get(
        &self,
        token: &AccessToken,
        driver_id: i64,
        document_id: i64,
    ) -> Result<DriverDocument, AppError> {
        self.documents(token, driver_id)
            .await?
            .into_iter()
            .find(|doc| doc.id == document_id)
            .ok_or_else(|| {
                AppError::not_found(
                    "Document not found",
                    json!({ "driver_id": driver_id, "document_id": document_id }),
                )
            })
    }

    /// Which required documents are missing, expired or about to expire.
    pub async fn compliance(
        &self,
        token: &AccessToken,
        driver_id: i64,
        today: NaiveDate,
    ) -> Result<ComplianceReport, AppError> {
        let views = self.list(token, driver_id, today).await?;
        Ok(ComplianceReport::from_views(&views))
    }

    /// Attaches a document to a driver.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the number is blank, a dated
    /// kind lacks an expiry date, or expiry precedes issue.
    pub async fn create(
        &self,
        token: &AccessToken,
        driver_id: i64,
        mut document: NewDocument,
    ) -> Result<DriverDocument, AppError> {
        document.number = document.number.trim().to_string();
        document.validate()?;

        let created = self.repository.create(token, driver_id, document).await?;
        self.invalidate().await;

        info!(driver_id, document_id = created.id, kind = created.kind.as_str(), "Document added");
        Ok(created)
    }

    /// Applies a partial update to a document.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty patch or invalid fields.
    pub async fn update(
        &self,
        token: &AccessToken,
        document_id: i64,
        patch: DocumentPatch,
    ) -> Result<DriverDocument, AppError> {
        if patch == DocumentPatch::default() {
            return Err(AppError::bad_request(
                "Nothing to update",
                json!({ "document_id": document_id }),
            ));
        }
        patch.validate()?;

        let updated = self.repository.update(token, document_id, patch).await?;
        self.invalidate().await;

        info!(document_id, "Document updated");
        Ok(updated)
    }

    /// Removes a document.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the document does not exist.
    pub async fn delete(&self, token: &AccessToken, document_id: i64) -> Result<(), AppError> {
        if !self.repository.delete(token, document_id).await? {
            return Err(AppError::not_found(
                "Document not found",
                json!({ "document_id": document_id }),
            ));
        }
        self.invalidate().await;

        info!(document_id, "Document deleted");
        Ok(())
    }

    /// Document changes move the expiry counters on the dashboard too.
    async fn invalidate(&self) {
        invalidate(self.cache.as_ref(), namespace::DOCUMENTS).await;
        invalidate(self.cache.as_ref(), namespace::ANALYTICS).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DocumentKind;
    use crate::domain::expiry::ExpiryStatus;
    use crate::domain::repositories::MockDocumentRepository;
    use crate::infrastructure::cache::NullCache;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn token() -> AccessToken {
        AccessToken::new("test-token")
    }

    fn doc(id: i64, kind: DocumentKind, expires_on: Option<NaiveDate>) -> DriverDocument {
        DriverDocument {
            id,
            driver_id: 1,
            kind,
            number: format!("N-{id}"),
            issued_on: None,
            expires_on,
            file_url: None,
            created_at: Utc::now(),
        }
    }

    fn service(mock_repo: MockDocumentRepository) -> DocumentService<MockDocumentRepository> {
        DocumentService::new(Arc::new(mock_repo), Arc::new(NullCache::new()), 30)
    }

    #[tokio::test]
    async fn test_list_evaluates_and_sorts_by_expiry() {
        let mut mock_repo = MockDocumentRepository::new();
        mock_repo.expect_list_for_driver().times(1).returning(|_, _| {
            Ok(vec![
                doc(1, DocumentKind::Contract, None),
                doc(2, DocumentKind::DrivingLicense, Some(date(2027, 1, 1))),
                doc(3, DocumentKind::NationalId, Some(date(2026, 3, 10))),
            ])
        });

        let views = service(mock_repo)
            .list(&token(), 1, date(2026, 3, 1))
            .await
            .unwrap();

        let ids: Vec<i64> = views.iter().map(|v| v.document.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(views[0].status, ExpiryStatus::ExpiringSoon);
        assert_eq!(views[0].days_left, Some(9));
        assert_eq!(views[2].status, ExpiryStatus::NoExpiry);
    }

    #[tokio::test]
    async fn test_compliance_reports_missing_and_expired() {
        let mut mock_repo = MockDocumentRepository::new();
        mock_repo.expect_list_for_driver().times(1).returning(|_, _| {
            Ok(vec![
                doc(1, DocumentKind::DrivingLicense, Some(date(2026, 1, 1))),
                doc(2, DocumentKind::NationalId, Some(date(2030, 1, 1))),
            ])
        });

        let report = service(mock_repo)
            .compliance(&token(), 1, date(2026, 3, 1))
            .await
            .unwrap();

        assert_eq!(report.expired, vec![DocumentKind::DrivingLicense]);
        assert_eq!(report.missing, vec![DocumentKind::VehicleLicense]);
        assert!(!report.is_compliant());
    }

    #[tokio::test]
    async fn test_get_unknown_document() {
        let mut mock_repo = MockDocumentRepository::new();
        mock_repo
            .expect_list_for_driver()
            .times(1)
            .returning(|_, _| Ok(vec![doc(1, DocumentKind::Contract, None)]));

        let result = service(mock_repo).get(&token(), 1, 99).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_requires_expiry_for_licence() {
        let mock_repo = MockDocumentRepository::new();

        let document = NewDocument {
            kind: DocumentKind::DrivingLicense,
            number: "DL-1".to_string(),
            issued_on: None,
            expires_on: None,
            file_url: None,
        };
        let result = service(mock_repo).create(&token(), 1, document).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_trims_number() {
        let mut mock_repo = MockDocumentRepository::new();
        mock_repo
            .expect_create()
            .withf(|_, driver_id, d| *driver_id == 4 && d.number == "C-77")
            .times(1)
            .returning(|_, _, d| Ok(doc(10, d.kind, d.expires_on)));

        let document = NewDocument {
            kind: DocumentKind::Contract,
            number: " C-77 ".to_string(),
            issued_on: None,
            expires_on: None,
            file_url: None,
        };
        let created = service(mock_repo).create(&token(), 4, document).await.unwrap();

        assert_eq!(created.id, 10);
    }

    #[tokio::test]
    async fn test_update_empty_patch() {
        let mock_repo = MockDocumentRepository::new();

        let result = service(mock_repo)
            .update(&token(), 1, DocumentPatch::default())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_document() {
        let mut mock_repo = MockDocumentRepository::new();
        mock_repo.expect_delete().times(1).returning(|_, _| Ok(false));

        let result = service(mock_repo).delete(&token(), 3).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
