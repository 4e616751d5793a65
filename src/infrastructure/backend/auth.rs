//! Login/logout against the backend and its health check.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use std::sync::Arc;

use super::client::BackendClient;
use crate::domain::entities::{AccessToken, Credentials};
use crate::domain::repositories::{AuthRepository, BackendHealth};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: AccessToken,
}

pub struct HttpAuthRepository {
    client: Arc<BackendClient>,
}

impl HttpAuthRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn login(&self, credentials: Credentials) -> Result<AccessToken, AppError> {
        let response: LoginResponse = self
            .client
            .send_json(Method::POST, None, "auth/login", &credentials)
            .await?;
        Ok(response.token)
    }

    async fn logout(&self, token: &AccessToken) -> Result<(), AppError> {
        Ok(self.client.post_empty(token, "auth/logout").await?)
    }
}

#[async_trait]
impl BackendHealth for BackendClient {
    async fn ping(&self) -> bool {
        BackendClient::ping(self).await
    }
}
