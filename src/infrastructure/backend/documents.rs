use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

use super::client::BackendClient;
use crate::domain::entities::{AccessToken, DocumentPatch, DriverDocument, NewDocument};
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;

/// Driver documents: listed and created under `/drivers/{id}/documents`,
/// edited and removed under `/documents/{id}`.
pub struct HttpDocumentRepository {
    client: Arc<BackendClient>,
}

impl HttpDocumentRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentRepository for HttpDocumentRepository {
    async fn list_for_driver(
        &self,
        token: &AccessToken,
        driver_id: i64,
    ) -> Result<Vec<DriverDocument>, AppError> {
        Ok(self
            .client
            .get_json(token, &format!("drivers/{driver_id}/documents"), &Vec::new())
            .await?)
    }

    async fn create(
        &self,
        token: &AccessToken,
        driver_id: i64,
        document: NewDocument,
    ) -> Result<DriverDocument, AppError> {
        Ok(self
            .client
            .send_json(
                Method::POST,
                Some(token),
                &format!("drivers/{driver_id}/documents"),
                &document,
            )
            .await?)
    }

    async fn update(
        &self,
        token: &AccessToken,
        document_id: i64,
        patch: DocumentPatch,
    ) -> Result<DriverDocument, AppError> {
        Ok(self
            .client
            .send_json(
                Method::PATCH,
                Some(token),
                &format!("documents/{document_id}"),
                &patch,
            )
            .await?)
    }

    async fn delete(&self, token: &AccessToken, document_id: i64) -> Result<bool, AppError> {
        Ok(self
            .client
            .delete(token, &format!("documents/{document_id}"))
            .await?)
    }
}
