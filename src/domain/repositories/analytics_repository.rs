//! Repository trait for dashboard analytics.

use crate::domain::entities::{AccessToken, ChartSlice, DashboardSummary, DateRange, SeriesPoint};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    async fn summary(&self, token: &AccessToken) -> Result<DashboardSummary, AppError>;

    /// Trip counts per company over the range, for the pie chart.
    async fn trips_by_company(
        &self,
        token: &AccessToken,
        range: DateRange,
    ) -> Result<Vec<ChartSlice>, AppError>;

    /// Daily trip counts over the range. Days without trips may be absent.
    async fn trips_over_time(
        &self,
        token: &AccessToken,
        range: DateRange,
    ) -> Result<Vec<SeriesPoint>, AppError>;
}
