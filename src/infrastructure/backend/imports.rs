//! Data file uploads, forwarded to the backend as multipart forms.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::json;
use std::sync::Arc;

use super::client::{BackendClient, ListEnvelope, page_params};
use crate::domain::entities::{AccessToken, FileImport, UploadFile};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::repositories::ImportRepository;
use crate::error::AppError;

pub struct HttpImportRepository {
    client: Arc<BackendClient>,
}

impl HttpImportRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

fn upload_form(file: UploadFile) -> Result<Form, AppError> {
    let mut part = Part::bytes(file.bytes).file_name(file.file_name);
    if let Some(content_type) = file.content_type {
        part = part.mime_str(&content_type).map_err(|e| {
            AppError::bad_request(
                "Invalid file content type",
                json!({ "content_type": content_type, "error": e.to_string() }),
            )
        })?;
    }

    Ok(Form::new()
        .text("kind", file.kind.as_str())
        .part("file", part))
}

#[async_trait]
impl ImportRepository for HttpImportRepository {
    async fn upload(&self, token: &AccessToken, file: UploadFile) -> Result<FileImport, AppError> {
        let form = upload_form(file)?;
        Ok(self.client.post_multipart(token, "imports", form).await?)
    }

    async fn list(&self, token: &AccessToken, page: PageRequest) -> Result<Page<FileImport>, AppError> {
        let envelope: ListEnvelope<FileImport> = self
            .client
            .get_json(token, "imports", &page_params(page))
            .await?;
        Ok(envelope.into_page(page))
    }
}
