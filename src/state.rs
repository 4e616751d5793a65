//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{
    AnalyticsService, AuthService, DocumentService, DriverService, ImportService, RecordService,
    SessionSigner,
};
use crate::config::Config;
use crate::domain::repositories::{
    AnalyticsRepository, AuthRepository, BackendHealth, DocumentRepository, DriverRepository,
    ImportRepository, RecordRepository,
};
use crate::infrastructure::backend::{
    BackendClient, BackendError, HttpAnalyticsRepository, HttpAuthRepository,
    HttpDocumentRepository, HttpDriverRepository, HttpImportRepository, HttpRecordRepository,
};
use crate::infrastructure::cache::CacheService;

/// Name of the cookie carrying the sealed backend token.
pub const SESSION_COOKIE: &str = "fleet_session";

/// Repository implementations the services are built from.
///
/// Production wiring uses the HTTP adapters; tests plug in fakes.
pub struct Repositories {
    pub auth: Arc<dyn AuthRepository>,
    pub drivers: Arc<dyn DriverRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pub records: Arc<dyn RecordRepository>,
    pub imports: Arc<dyn ImportRepository>,
    pub analytics: Arc<dyn AnalyticsRepository>,
    pub health: Arc<dyn BackendHealth>,
}

impl Repositories {
    /// HTTP repositories sharing one backend client.
    pub fn http(client: Arc<BackendClient>) -> Self {
        Self {
            auth: Arc::new(HttpAuthRepository::new(client.clone())),
            drivers: Arc::new(HttpDriverRepository::new(client.clone())),
            documents: Arc::new(HttpDocumentRepository::new(client.clone())),
            records: Arc::new(HttpRecordRepository::new(client.clone())),
            imports: Arc::new(HttpImportRepository::new(client.clone())),
            analytics: Arc::new(HttpAnalyticsRepository::new(client.clone())),
            health: client,
        }
    }
}

/// Dashboard settings handlers need at request time.
#[derive(Debug, Clone)]
pub struct UiSettings {
    pub default_page_size: u32,
    pub secure_cookies: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            secure_cookies: false,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<dyn AuthRepository>>,
    pub driver_service: Arc<DriverService<dyn DriverRepository>>,
    pub document_service: Arc<DocumentService<dyn DocumentRepository>>,
    pub record_service: Arc<RecordService<dyn RecordRepository>>,
    pub import_service: Arc<ImportService<dyn ImportRepository>>,
    pub analytics_service: Arc<AnalyticsService<dyn AnalyticsRepository>>,
    pub health: Arc<dyn BackendHealth>,
    pub cache: Arc<dyn CacheService>,
    pub settings: UiSettings,
}

impl AppState {
    /// Builds the services from repositories and a cache.
    pub fn new(
        repositories: Repositories,
        cache: Arc<dyn CacheService>,
        signer: SessionSigner,
        warning_days: u32,
        max_upload_bytes: usize,
        settings: UiSettings,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(repositories.auth, signer)),
            driver_service: Arc::new(DriverService::new(repositories.drivers, cache.clone())),
            document_service: Arc::new(DocumentService::new(
                repositories.documents,
                cache.clone(),
                warning_days,
            )),
            record_service: Arc::new(RecordService::new(repositories.records, cache.clone())),
            import_service: Arc::new(ImportService::new(
                repositories.imports,
                cache.clone(),
                max_upload_bytes,
            )),
            analytics_service: Arc::new(AnalyticsService::new(
                repositories.analytics,
                cache.clone(),
            )),
            health: repositories.health,
            cache,
            settings,
        }
    }

    /// Production state: HTTP repositories against `config.backend_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be built.
    pub fn from_config(config: &Config, cache: Arc<dyn CacheService>) -> Result<Self, BackendError> {
        let client = BackendClient::new(
            &config.backend_url,
            Duration::from_secs(config.backend_timeout_seconds),
            config.backend_retries,
        )?;

        Ok(Self::new(
            Repositories::http(Arc::new(client)),
            cache,
            SessionSigner::new(&config.session_secret),
            config.expiry_warning_days,
            config.max_upload_bytes,
            UiSettings {
                default_page_size: config.default_page_size,
                secure_cookies: config.secure_cookies,
            },
        ))
    }
}
