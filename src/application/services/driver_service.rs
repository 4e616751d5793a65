//! Driver management service.

use crate::domain::entities::{AccessToken, Company, Driver, DriverFilter, DriverPatch, NewDriver};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repositories::DriverRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, cached, invalidate, namespace, user_key};
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// Upper bound for any page size requested by a client.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Clamps a requested page into `1..=MAX_PAGE_SIZE` rows.
pub fn clamp_page(page: PageRequest) -> PageRequest {
    PageRequest::new(page.page, page.page_size.clamp(1, MAX_PAGE_SIZE))
}

/// Service for browsing and editing drivers.
///
/// Reads go through the query cache; every successful mutation drops the
/// `drivers:` namespace so the next read sees the backend state.
pub struct DriverService<R: DriverRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
}

impl<R: DriverRepository + ?Sized> DriverService<R> {
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self { repository, cache }
    }

    /// Lists drivers matching `filter`.
    ///
    /// Blank searches are dropped and the page size is clamped.
    pub async fn list(&self, token: &AccessToken, filter: DriverFilter) -> Result<Page<Driver>, AppError> {
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let filter = DriverFilter {
            page: clamp_page(filter.page),
            search,
            ..filter
        };

        let key = user_key(namespace::DRIVERS, token, &format!("list:{}", filter.cache_key()));
        cached(self.cache.as_ref(), &key, || self.repository.list(token, filter)).await
    }

    /// Retrieves a driver by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the backend has no such driver.
    pub async fn get(&self, token: &AccessToken, id: i64) -> Result<Driver, AppError> {
        let key = user_key(namespace::DRIVERS, token, &id.to_string());
        // A miss is an error inside the fetch, so it is never cached.
        cached(self.cache.as_ref(), &key, || async {
            self.repository
                .find(token, id)
                .await?
                .ok_or_else(|| AppError::not_found("Driver not found", json!({ "id": id })))
        })
        .await
    }

    /// Creates a driver after local validation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the input breaks a field rule;
    /// backend rejections (duplicate phone, unknown company) pass through.
    pub async fn create(&self, token: &AccessToken, mut driver: NewDriver) -> Result<Driver, AppError> {
        driver.full_name = driver.full_name.trim().to_string();
        driver.phone = driver.phone.trim().to_string();
        driver.validate()?;

        let created = self.repository.create(token, driver).await?;
        invalidate(self.cache.as_ref(), namespace::DRIVERS).await;
        invalidate(self.cache.as_ref(), namespace::ANALYTICS).await;

        info!(driver_id = created.id, "Driver created");
        Ok(created)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty patch or invalid fields.
    pub async fn update(&self, token: &AccessToken, id: i64, patch: DriverPatch) -> Result<Driver, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(
                "Nothing to update",
                json!({ "id": id }),
            ));
        }
        patch.validate()?;

        let updated = self.repository.update(token, id, patch).await?;
        invalidate(self.cache.as_ref(), namespace::DRIVERS).await;
        invalidate(self.cache.as_ref(), namespace::ANALYTICS).await;

        info!(driver_id = id, "Driver updated");
        Ok(updated)
    }

    /// Deletes a driver.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the driver does not exist.
    pub async fn delete(&self, token: &AccessToken, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(token, id).await? {
            return Err(AppError::not_found("Driver not found", json!({ "id": id })));
        }

        invalidate(self.cache.as_ref(), namespace::DRIVERS).await;
        invalidate(self.cache.as_ref(), namespace::DOCUMENTS).await;
        invalidate(self.cache.as_ref(), namespace::ANALYTICS).await;

        info!(driver_id = id, "Driver deleted");
        Ok(())
    }

    /// Companies available for assignment, for form dropdowns.
    pub async fn companies(&self, token: &AccessToken) -> Result<Vec<Company>, AppError> {
        let key = user_key(namespace::DRIVERS, token, "companies");
        cached(self.cache.as_ref(), &key, || self.repository.companies(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DriverStatus;
    use crate::domain::repositories::MockDriverRepository;
    use crate::infrastructure::cache::{MapCache, NullCache};
    use chrono::Utc;

    fn token() -> AccessToken {
        AccessToken::new("test-token")
    }

    fn create_test_driver(id: i64, name: &str) -> Driver {
        Driver {
            id,
            full_name: name.to_string(),
            phone: "+254712345678".to_string(),
            email: None,
            national_id: None,
            company_id: None,
            company_name: None,
            status: DriverStatus::Active,
            hired_on: None,
            created_at: Utc::now(),
        }
    }

    fn service(mock_repo: MockDriverRepository) -> DriverService<MockDriverRepository> {
        DriverService::new(Arc::new(mock_repo), Arc::new(NullCache::new()))
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(PageRequest::new(3, 1000)).page_size, MAX_PAGE_SIZE);
        assert_eq!(clamp_page(PageRequest::new(3, 0)).page_size, 1);
        assert_eq!(clamp_page(PageRequest::new(3, 25)).page_size, 25);
    }

    #[tokio::test]
    async fn test_list_trims_search_and_clamps_page_size() {
        let mut mock_repo = MockDriverRepository::new();
        mock_repo
            .expect_list()
            .withf(|_, f| f.search.as_deref() == Some("amina") && f.page.page_size == MAX_PAGE_SIZE)
            .times(1)
            .returning(|_, f| Ok(Page::new(vec![create_test_driver(1, "Amina")], 1, f.page)));

        let filter = DriverFilter::new(PageRequest::new(1, 500)).with_search(Some("  amina ".to_string()));
        let page = service(mock_repo).list(&token(), filter).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages(), 1);
    }

    #[tokio::test]
    async fn test_list_blank_search_is_dropped() {
        let mut mock_repo = MockDriverRepository::new();
        mock_repo
            .expect_list()
            .withf(|_, f| f.search.is_none())
            .times(1)
            .returning(|_, f| Ok(Page::empty(f.page)));

        let filter = DriverFilter::new(PageRequest::default()).with_search(Some("   ".to_string()));
        assert!(service(mock_repo).list(&token(), filter).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let mut mock_repo = MockDriverRepository::new();
        mock_repo.expect_find().times(1).returning(|_, _| Ok(None));

        let result = service(mock_repo).get(&token(), 42).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_missing_driver_is_not_cached() {
        let mut mock_repo = MockDriverRepository::new();
        let mut seq = mockall::Sequence::new();
        mock_repo
            .expect_find()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(None));
        mock_repo
            .expect_find()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, id| Ok(Some(create_test_driver(id, "Amina"))));

        let cache = Arc::new(MapCache::default());
        let service = DriverService::new(Arc::new(mock_repo), cache.clone());

        let first = service.get(&token(), 42).await;
        assert!(matches!(first.unwrap_err(), AppError::NotFound { .. }));
        assert_eq!(cache.len(), 0);

        let second = service.get(&token(), 42).await.unwrap();
        assert_eq!(second.full_name, "Amina");
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_create_invalid_phone_skips_backend() {
        let mock_repo = MockDriverRepository::new();

        let driver = NewDriver {
            full_name: "Amina Yusuf".to_string(),
            phone: "call me".to_string(),
            email: None,
            national_id: None,
            company_id: None,
            status: DriverStatus::Active,
            hired_on: None,
        };
        let result = service(mock_repo).create(&token(), driver).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_trims_name() {
        let mut mock_repo = MockDriverRepository::new();
        mock_repo
            .expect_create()
            .withf(|_, d| d.full_name == "Amina Yusuf")
            .times(1)
            .returning(|_, d| Ok(create_test_driver(9, &d.full_name)));

        let driver = NewDriver {
            full_name: "  Amina Yusuf ".to_string(),
            phone: "+254712345678".to_string(),
            email: None,
            national_id: None,
            company_id: None,
            status: DriverStatus::Active,
            hired_on: None,
        };
        let created = service(mock_repo).create(&token(), driver).await.unwrap();

        assert_eq!(created.id, 9);
    }

    #[tokio::test]
    async fn test_update_empty_patch() {
        let mock_repo = MockDriverRepository::new();

        let result = service(mock_repo)
            .update(&token(), 1, DriverPatch::default())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_driver() {
        let mut mock_repo = MockDriverRepository::new();
        mock_repo.expect_delete().times(1).returning(|_, _| Ok(false));

        let result = service(mock_repo).delete(&token(), 5).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
