//! Dashboard analytics: summary cards and chart data.

use chrono::NaiveDate;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::analytics::MAX_RANGE_DAYS;
use crate::domain::entities::{AccessToken, ChartSlice, DashboardSummary, DateRange, SeriesPoint};
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, cached, namespace, user_key};

/// Range used by the charts when the caller does not pick one.
pub const DEFAULT_RANGE_DAYS: u32 = 30;

/// Resolves the chart range from optional query bounds.
///
/// Missing bounds default to the last [`DEFAULT_RANGE_DAYS`] days ending
/// today (or ending at `to`).
///
/// # Errors
///
/// Returns [`AppError::Validation`] for reversed bounds or a range longer
/// than [`MAX_RANGE_DAYS`].
pub fn resolve_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<DateRange, AppError> {
    let to = to.unwrap_or(today);
    let range = match from {
        Some(from) => DateRange::new(from, to)?,
        None => DateRange::last_days(DEFAULT_RANGE_DAYS, to),
    };

    if range.len_days() > MAX_RANGE_DAYS {
        return Err(AppError::bad_request(
            "Date range is too long",
            json!({ "days": range.len_days(), "max_days": MAX_RANGE_DAYS }),
        ));
    }
    Ok(range)
}

/// Sorts slices largest first and fills in each slice's percentage share.
///
/// Shares are rounded to one decimal; an all-zero chart gets zero shares.
pub fn with_shares(mut slices: Vec<ChartSlice>) -> Vec<ChartSlice> {
    let total: f64 = slices.iter().map(|s| s.value).sum();
    for slice in &mut slices {
        slice.share = if total > 0.0 {
            (slice.value / total * 1000.0).round() / 10.0
        } else {
            0.0
        };
    }
    slices.sort_by(|a, b| b.value.total_cmp(&a.value));
    slices
}

/// Produces one point per day of `range`, zero where the backend had none.
///
/// Points outside the range are dropped; duplicate days are summed.
pub fn fill_gaps(points: Vec<SeriesPoint>, range: DateRange) -> Vec<SeriesPoint> {
    let mut by_day: HashMap<NaiveDate, f64> = HashMap::new();
    for point in points.into_iter().filter(|p| range.contains(p.date)) {
        *by_day.entry(point.date).or_default() += point.value;
    }

    range
        .days()
        .map(|date| SeriesPoint {
            date,
            value: by_day.get(&date).copied().unwrap_or(0.0),
        })
        .collect()
}

pub struct AnalyticsService<R: AnalyticsRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
}

impl<R: AnalyticsRepository + ?Sized> AnalyticsService<R> {
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self { repository, cache }
    }

    pub async fn summary(&self, token: &AccessToken) -> Result<DashboardSummary, AppError> {
        let key = user_key(namespace::ANALYTICS, token, "summary");
        cached(self.cache.as_ref(), &key, || self.repository.summary(token)).await
    }

    /// Trip counts per company as pie slices.
    pub async fn trips_by_company(
        &self,
        token: &AccessToken,
        range: DateRange,
    ) -> Result<Vec<ChartSlice>, AppError> {
        let key = user_key(
            namespace::ANALYTICS,
            token,
            &format!("by-company:{}_{}", range.from, range.to),
        );
        let slices = cached(self.cache.as_ref(), &key, || {
            self.repository.trips_by_company(token, range)
        })
        .await?;
        Ok(with_shares(slices))
    }

    /// Daily trip counts over `range` without gaps.
    pub async fn trips_over_time(
        &self,
        token: &AccessToken,
        range: DateRange,
    ) -> Result<Vec<SeriesPoint>, AppError> {
        let key = user_key(
            namespace::ANALYTICS,
            token,
            &format!("over-time:{}_{}", range.from, range.to),
        );
        let points = cached(self.cache.as_ref(), &key, || {
            self.repository.trips_over_time(token, range)
        })
        .await?;
        Ok(fill_gaps(points, range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockAnalyticsRepository;
    use crate::infrastructure::cache::NullCache;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slice(label: &str, value: f64) -> ChartSlice {
        ChartSlice {
            label: label.to_string(),
            value,
            share: 0.0,
        }
    }

    #[test]
    fn test_resolve_range_defaults_to_last_30_days() {
        let range = resolve_range(None, None, date(2026, 3, 30)).unwrap();
        assert_eq!(range.from, date(2026, 3, 1));
        assert_eq!(range.to, date(2026, 3, 30));
    }

    #[test]
    fn test_resolve_range_limits() {
        let today = date(2026, 6, 1);
        assert!(resolve_range(Some(date(2025, 6, 1)), None, today).is_ok());
        assert!(resolve_range(Some(date(2025, 5, 1)), None, today).is_err());
        assert!(resolve_range(Some(date(2026, 7, 1)), None, today).is_err());
    }

    #[test]
    fn test_with_shares() {
        let slices = with_shares(vec![slice("A", 1.0), slice("B", 3.0)]);
        assert_eq!(slices[0].label, "B");
        assert_eq!(slices[0].share, 75.0);
        assert_eq!(slices[1].share, 25.0);

        let zero = with_shares(vec![slice("A", 0.0)]);
        assert_eq!(zero[0].share, 0.0);
    }

    #[test]
    fn test_fill_gaps() {
        let range = DateRange::new(date(2026, 1, 1), date(2026, 1, 4)).unwrap();
        let points = vec![
            SeriesPoint { date: date(2026, 1, 2), value: 5.0 },
            SeriesPoint { date: date(2026, 1, 2), value: 1.0 },
            SeriesPoint { date: date(2025, 12, 31), value: 9.0 },
        ];

        let filled = fill_gaps(points, range);

        let values: Vec<f64> = filled.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.0, 6.0, 0.0, 0.0]);
        assert_eq!(filled[3].date, date(2026, 1, 4));
    }

    #[tokio::test]
    async fn test_trips_over_time_fills_range() {
        let mut mock_repo = MockAnalyticsRepository::new();
        mock_repo.expect_trips_over_time().times(1).returning(|_, _| {
            Ok(vec![SeriesPoint {
                date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
                value: 12.0,
            }])
        });

        let service = AnalyticsService::new(Arc::new(mock_repo), Arc::new(NullCache::new()));
        let range = DateRange::new(date(2026, 2, 1), date(2026, 2, 28)).unwrap();
        let series = service
            .trips_over_time(&AccessToken::new("t"), range)
            .await
            .unwrap();

        assert_eq!(series.len(), 28);
        assert_eq!(series[9].value, 12.0);
    }

    #[tokio::test]
    async fn test_trips_by_company_adds_shares() {
        let mut mock_repo = MockAnalyticsRepository::new();
        mock_repo
            .expect_trips_by_company()
            .times(1)
            .returning(|_, _| Ok(vec![slice("Acme", 10.0), slice("Globex", 30.0)]));

        let service = AnalyticsService::new(Arc::new(mock_repo), Arc::new(NullCache::new()));
        let range = DateRange::last_days(30, date(2026, 2, 28));
        let slices = service
            .trips_by_company(&AccessToken::new("t"), range)
            .await
            .unwrap();

        assert_eq!(slices[0].label, "Globex");
        assert_eq!(slices[0].share, 75.0);
    }
}
