//! Repository trait for ingested payroll and trip rows.

use crate::domain::entities::{AccessToken, PaymentRecord, RecordFilter, TripRecord};
use crate::domain::pagination::Page;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to records produced by file imports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn payments(
        &self,
        token: &AccessToken,
        filter: RecordFilter,
    ) -> Result<Page<PaymentRecord>, AppError>;

    async fn trips(&self, token: &AccessToken, filter: RecordFilter) -> Result<Page<TripRecord>, AppError>;
}
