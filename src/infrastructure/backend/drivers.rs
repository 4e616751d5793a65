//! Driver and company endpoints.

use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

use super::client::{BackendClient, ListEnvelope, page_params};
use crate::domain::entities::{AccessToken, Company, Driver, DriverFilter, DriverPatch, NewDriver};
use crate::domain::pagination::Page;
use crate::domain::repositories::DriverRepository;
use crate::error::AppError;

/// Driver repository backed by `/drivers` and `/companies`.
pub struct HttpDriverRepository {
    client: Arc<BackendClient>,
}

impl HttpDriverRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DriverRepository for HttpDriverRepository {
    async fn list(&self, token: &AccessToken, filter: DriverFilter) -> Result<Page<Driver>, AppError> {
        let mut query = page_params(filter.page);
        if let Some(search) = filter.search {
            query.push(("search", search));
        }
        if let Some(status) = filter.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(company_id) = filter.company_id {
            query.push(("company_id", company_id.to_string()));
        }

        let envelope: ListEnvelope<Driver> = self.client.get_json(token, "drivers", &query).await?;
        Ok(envelope.into_page(filter.page))
    }

    async fn find(&self, token: &AccessToken, id: i64) -> Result<Option<Driver>, AppError> {
        Ok(self
            .client
            .get_optional(token, &format!("drivers/{id}"))
            .await?)
    }

    async fn create(&self, token: &AccessToken, driver: NewDriver) -> Result<Driver, AppError> {
        Ok(self
            .client
            .send_json(Method::POST, Some(token), "drivers", &driver)
            .await?)
    }

    async fn update(&self, token: &AccessToken, id: i64, patch: DriverPatch) -> Result<Driver, AppError> {
        Ok(self
            .client
            .send_json(Method::PATCH, Some(token), &format!("drivers/{id}"), &patch)
            .await?)
    }

    async fn delete(&self, token: &AccessToken, id: i64) -> Result<bool, AppError> {
        Ok(self.client.delete(token, &format!("drivers/{id}")).await?)
    }

    async fn companies(&self, token: &AccessToken) -> Result<Vec<Company>, AppError> {
        Ok(self.client.get_json(token, "companies", &Vec::new()).await?)
    }
}
