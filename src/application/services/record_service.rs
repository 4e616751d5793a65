//! Browsing imported payment and trip rows.

use chrono::{Days, NaiveDate};
use std::sync::Arc;

use super::driver_service::clamp_page;
use crate::domain::entities::{AccessToken, DateRange, PaymentRecord, RecordFilter, TripRecord};
use crate::domain::pagination::Page;
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, cached, namespace, user_key};

/// Days covered when only the end of a record range is given.
const OPEN_RANGE_DAYS: u64 = 30;

/// Builds an optional record filter range from loose query bounds.
///
/// - neither bound: no date filter
/// - only `from`: up to `today`
/// - only `to`: the 30 days ending with `to`
///
/// # Errors
///
/// Returns [`AppError::Validation`] if `from` is after `to`.
pub fn resolve_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<Option<DateRange>, AppError> {
    match (from, to) {
        (None, None) => Ok(None),
        (Some(from), None) => DateRange::new(from, today.max(from)).map(Some),
        (None, Some(to)) => {
            let from = to
                .checked_sub_days(Days::new(OPEN_RANGE_DAYS - 1))
                .unwrap_or(to);
            DateRange::new(from, to).map(Some)
        }
        (Some(from), Some(to)) => DateRange::new(from, to).map(Some),
    }
}

pub struct RecordService<R: RecordRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
}

impl<R: RecordRepository + ?Sized> RecordService<R> {
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self { repository, cache }
    }

    /// Payroll rows, newest period first as served by the backend.
    pub async fn payments(
        &self,
        token: &AccessToken,
        filter: RecordFilter,
    ) -> Result<Page<PaymentRecord>, AppError> {
        let filter = RecordFilter {
            page: clamp_page(filter.page),
            ..filter
        };
        let key = user_key(namespace::RECORDS, token, &format!("payments:{}", filter.cache_key()));
        cached(self.cache.as_ref(), &key, || self.repository.payments(token, filter)).await
    }

    /// Daily trip rows.
    pub async fn trips(&self, token: &AccessToken, filter: RecordFilter) -> Result<Page<TripRecord>, AppError> {
        let filter = RecordFilter {
            page: clamp_page(filter.page),
            ..filter
        };
        let key = user_key(namespace::RECORDS, token, &format!("trips:{}", filter.cache_key()));
        cached(self.cache.as_ref(), &key, || self.repository.trips(token, filter)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::PageRequest;
    use crate::domain::repositories::MockRecordRepository;
    use crate::infrastructure::cache::NullCache;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_range() {
        let today = date(2026, 4, 15);

        assert_eq!(resolve_range(None, None, today).unwrap(), None);

        let from_only = resolve_range(Some(date(2026, 4, 1)), None, today).unwrap().unwrap();
        assert_eq!(from_only.to, today);

        let to_only = resolve_range(None, Some(date(2026, 3, 30)), today).unwrap().unwrap();
        assert_eq!(to_only.from, date(2026, 3, 1));

        assert!(resolve_range(Some(date(2026, 5, 1)), Some(date(2026, 4, 1)), today).is_err());
    }

    #[test]
    fn test_resolve_range_future_from() {
        let range = resolve_range(Some(date(2026, 5, 1)), None, date(2026, 4, 1))
            .unwrap()
            .unwrap();
        assert_eq!(range.len_days(), 1);
    }

    #[tokio::test]
    async fn test_payments_forwards_filter() {
        let mut mock_repo = MockRecordRepository::new();
        mock_repo
            .expect_payments()
            .withf(|_, f| f.driver_id == Some(3) && f.page.page_size == 100)
            .times(1)
            .returning(|_, f| Ok(Page::new(Vec::new(), 250, f.page)));

        let service = RecordService::new(Arc::new(mock_repo), Arc::new(NullCache::new()));
        let filter = RecordFilter::new(PageRequest::new(2, 10_000)).with_driver(Some(3));
        let page = service
            .payments(&AccessToken::new("t"), filter)
            .await
            .unwrap();

        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.page, 2);
    }
}
