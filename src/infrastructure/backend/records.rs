//! Imported payment and trip rows.

use async_trait::async_trait;
use std::sync::Arc;

use super::client::{BackendClient, ListEnvelope, QueryParams, page_params};
use crate::domain::entities::{AccessToken, PaymentRecord, RecordFilter, TripRecord};
use crate::domain::pagination::Page;
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;

pub struct HttpRecordRepository {
    client: Arc<BackendClient>,
}

impl HttpRecordRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

fn record_params(filter: &RecordFilter) -> QueryParams {
    let mut query = page_params(filter.page);
    if let Some(driver_id) = filter.driver_id {
        query.push(("driver_id", driver_id.to_string()));
    }
    if let Some(range) = filter.range {
        query.push(("from", range.from.to_string()));
        query.push(("to", range.to.to_string()));
    }
    query
}

#[async_trait]
impl RecordRepository for HttpRecordRepository {
    async fn payments(
        &self,
        token: &AccessToken,
        filter: RecordFilter,
    ) -> Result<Page<PaymentRecord>, AppError> {
        let envelope: ListEnvelope<PaymentRecord> = self
            .client
            .get_json(token, "records/payments", &record_params(&filter))
            .await?;
        Ok(envelope.into_page(filter.page))
    }

    async fn trips(&self, token: &AccessToken, filter: RecordFilter) -> Result<Page<TripRecord>, AppError> {
        let envelope: ListEnvelope<TripRecord> = self
            .client
            .get_json(token, "records/trips", &record_params(&filter))
            .await?;
        Ok(envelope.into_page(filter.page))
    }
}
