use async_trait::async_trait;
use std::sync::Arc;

use super::client::{BackendClient, QueryParams};
use crate::domain::entities::{AccessToken, ChartSlice, DashboardSummary, DateRange, SeriesPoint};
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;

/// Aggregates served under `/analytics`.
pub struct HttpAnalyticsRepository {
    client: Arc<BackendClient>,
}

impl HttpAnalyticsRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

fn range_params(range: DateRange) -> QueryParams {
    vec![("from", range.from.to_string()), ("to", range.to.to_string())]
}

#[async_trait]
impl AnalyticsRepository for HttpAnalyticsRepository {
    async fn summary(&self, token: &AccessToken) -> Result<DashboardSummary, AppError> {
        Ok(self
            .client
            .get_json(token, "analytics/summary", &Vec::new())
            .await?)
    }

    async fn trips_by_company(
        &self,
        token: &AccessToken,
        range: DateRange,
    ) -> Result<Vec<ChartSlice>, AppError> {
        Ok(self
            .client
            .get_json(token, "analytics/trips-by-company", &range_params(range))
            .await?)
    }

    async fn trips_over_time(
        &self,
        token: &AccessToken,
        range: DateRange,
    ) -> Result<Vec<SeriesPoint>, AppError> {
        Ok(self
            .client
            .get_json(token, "analytics/trips-over-time", &range_params(range))
            .await?)
    }
}
