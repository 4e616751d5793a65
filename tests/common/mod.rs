#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{NaiveDate, Utc};
use serde_json::json;

use fleet_admin::api::middleware::rate_limit::RateLimit;
use fleet_admin::application::services::SessionSigner;
use fleet_admin::application::services::import_service::DEFAULT_MAX_UPLOAD_BYTES;
use fleet_admin::domain::entities::{
    AccessToken, ChartSlice, Company, Credentials, DashboardSummary, DateRange, DocumentKind,
    DocumentPatch, Driver, DriverDocument, DriverFilter, DriverPatch, DriverStatus, FileImport,
    ImportStatus, NewDocument, NewDriver, PaymentRecord, RecordFilter, SeriesPoint, TripRecord,
    UploadFile,
};
use fleet_admin::domain::pagination::{Page, PageRequest};
use fleet_admin::domain::repositories::{
    AnalyticsRepository, AuthRepository, BackendHealth, DocumentRepository, DriverRepository,
    ImportRepository, RecordRepository,
};
use fleet_admin::error::AppError;
use fleet_admin::infrastructure::cache::NullCache;
use fleet_admin::routes::build_router;
use fleet_admin::state::{AppState, Repositories, SESSION_COOKIE, UiSettings};

pub const ADMIN_EMAIL: &str = "admin@fleet.test";
pub const ADMIN_PASSWORD: &str = "correct-horse";
pub const VALID_TOKEN: &str = "token-admin-1";
pub const SESSION_SECRET: &str = "test-session-secret-123";

#[derive(Default)]
struct Store {
    drivers: Vec<Driver>,
    documents: Vec<DriverDocument>,
    imports: Vec<FileImport>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory stand-in for the fleet backend.
///
/// Only [`VALID_TOKEN`] is accepted; any other token gets the backend's 401.
pub struct FakeBackend {
    store: Mutex<Store>,
    healthy: AtomicBool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store {
                next_id: 100,
                ..Default::default()
            }),
            healthy: AtomicBool::new(true),
        }
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn add_driver(&self, full_name: &str, phone: &str) -> Driver {
        let mut store = self.store.lock().unwrap();
        let driver = Driver {
            id: store.next_id(),
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            email: None,
            national_id: None,
            company_id: Some(1),
            company_name: Some("Northwind Cabs".to_string()),
            status: DriverStatus::Active,
            hired_on: None,
            created_at: Utc::now(),
        };
        store.drivers.push(driver.clone());
        driver
    }

    pub fn add_document(&self, driver_id: i64, kind: DocumentKind, expires_on: NaiveDate) -> DriverDocument {
        let mut store = self.store.lock().unwrap();
        let document = DriverDocument {
            id: store.next_id(),
            driver_id,
            kind,
            number: format!("DOC-{driver_id}"),
            issued_on: None,
            expires_on: Some(expires_on),
            file_url: None,
            created_at: Utc::now(),
        };
        store.documents.push(document.clone());
        document
    }

    pub fn driver_count(&self) -> usize {
        self.store.lock().unwrap().drivers.len()
    }

    pub fn import_count(&self) -> usize {
        self.store.lock().unwrap().imports.len()
    }
}

fn check(token: &AccessToken) -> Result<(), AppError> {
    if token.as_str() == VALID_TOKEN {
        Ok(())
    } else {
        Err(AppError::unauthorized(
            "Backend rejected the session",
            json!({ "status": 401 }),
        ))
    }
}

fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let slice = items
        .iter()
        .skip(request.offset() as usize)
        .take(request.page_size as usize)
        .cloned()
        .collect();
    Page::new(slice, items.len() as u64, request)
}

#[async_trait]
impl AuthRepository for FakeBackend {
    async fn login(&self, credentials: Credentials) -> Result<AccessToken, AppError> {
        if credentials.email == ADMIN_EMAIL && credentials.password == ADMIN_PASSWORD {
            Ok(AccessToken::new(VALID_TOKEN))
        } else {
            Err(AppError::unauthorized("Bad credentials", json!({})))
        }
    }

    async fn logout(&self, token: &AccessToken) -> Result<(), AppError> {
        check(token)
    }
}

#[async_trait]
impl BackendHealth for FakeBackend {
    async fn ping(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DriverRepository for FakeBackend {
    async fn list(&self, token: &AccessToken, filter: DriverFilter) -> Result<Page<Driver>, AppError> {
        check(token)?;
        let store = self.store.lock().unwrap();
        let matching: Vec<Driver> = store
            .drivers
            .iter()
            .filter(|d| match &filter.search {
                Some(term) => d.full_name.to_lowercase().contains(&term.to_lowercase()),
                None => true,
            })
            .filter(|d| filter.status.is_none_or(|s| d.status == s))
            .cloned()
            .collect();
        Ok(paginate(&matching, filter.page))
    }

    async fn find(&self, token: &AccessToken, id: i64) -> Result<Option<Driver>, AppError> {
        check(token)?;
        let store = self.store.lock().unwrap();
        Ok(store.drivers.iter().find(|d| d.id == id).cloned())
    }

    async fn create(&self, token: &AccessToken, driver: NewDriver) -> Result<Driver, AppError> {
        check(token)?;
        let mut store = self.store.lock().unwrap();
        if store.drivers.iter().any(|d| d.phone == driver.phone) {
            return Err(AppError::conflict(
                "Phone number already registered",
                json!({ "phone": ["Phone number already registered"] }),
            ));
        }
        let created = Driver {
            id: store.next_id(),
            full_name: driver.full_name,
            phone: driver.phone,
            email: driver.email,
            national_id: driver.national_id,
            company_id: driver.company_id,
            company_name: None,
            status: driver.status,
            hired_on: driver.hired_on,
            created_at: Utc::now(),
        };
        store.drivers.push(created.clone());
        Ok(created)
    }

    async fn update(&self, token: &AccessToken, id: i64, patch: DriverPatch) -> Result<Driver, AppError> {
        check(token)?;
        let mut store = self.store.lock().unwrap();
        let driver = store
            .drivers
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| AppError::not_found("Driver not found", json!({ "id": id })))?;
        if let Some(name) = patch.full_name {
            driver.full_name = name;
        }
        if let Some(phone) = patch.phone {
            driver.phone = phone;
        }
        if let Some(status) = patch.status {
            driver.status = status;
        }
        Ok(driver.clone())
    }

    async fn delete(&self, token: &AccessToken, id: i64) -> Result<bool, AppError> {
        check(token)?;
        let mut store = self.store.lock().unwrap();
        let before = store.drivers.len();
        store.drivers.retain(|d| d.id != id);
        Ok(store.drivers.len() < before)
    }

    async fn companies(&self, token: &AccessToken) -> Result<Vec<Company>, AppError> {
        check(token)?;
        Ok(vec![Company {
            id: 1,
            name: "Northwind Cabs".to_string(),
        }])
    }
}

#[async_trait]
impl DocumentRepository for FakeBackend {
    async fn list_for_driver(
        &self,
        token: &AccessToken,
        driver_id: i64,
    ) -> Result<Vec<DriverDocument>, AppError> {
        check(token)?;
        let store = self.store.lock().unwrap();
        Ok(store
            .documents
            .iter()
            .filter(|d| d.driver_id == driver_id)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        token: &AccessToken,
        driver_id: i64,
        document: NewDocument,
    ) -> Result<DriverDocument, AppError> {
        check(token)?;
        let mut store = self.store.lock().unwrap();
        let created = DriverDocument {
            id: store.next_id(),
            driver_id,
            kind: document.kind,
            number: document.number,
            issued_on: document.issued_on,
            expires_on: document.expires_on,
            file_url: document.file_url,
            created_at: Utc::now(),
        };
        store.documents.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        token: &AccessToken,
        document_id: i64,
        patch: DocumentPatch,
    ) -> Result<DriverDocument, AppError> {
        check(token)?;
        let mut store = self.store.lock().unwrap();
        let document = store
            .documents
            .iter_mut()
            .find(|d| d.id == document_id)
            .ok_or_else(|| AppError::not_found("Document not found", json!({ "id": document_id })))?;
        if let Some(number) = patch.number {
            document.number = number;
        }
        if let Some(expires_on) = patch.expires_on {
            document.expires_on = Some(expires_on);
        }
        Ok(document.clone())
    }

    async fn delete(&self, token: &AccessToken, document_id: i64) -> Result<bool, AppError> {
        check(token)?;
        let mut store = self.store.lock().unwrap();
        let before = store.documents.len();
        store.documents.retain(|d| d.id != document_id);
        Ok(store.documents.len() < before)
    }
}

#[async_trait]
impl RecordRepository for FakeBackend {
    async fn payments(
        &self,
        token: &AccessToken,
        filter: RecordFilter,
    ) -> Result<Page<PaymentRecord>, AppError> {
        check(token)?;
        Ok(Page::empty(filter.page))
    }

    async fn trips(&self, token: &AccessToken, filter: RecordFilter) -> Result<Page<TripRecord>, AppError> {
        check(token)?;
        Ok(Page::empty(filter.page))
    }
}

#[async_trait]
impl ImportRepository for FakeBackend {
    async fn upload(&self, token: &AccessToken, file: UploadFile) -> Result<FileImport, AppError> {
        check(token)?;
        let mut store = self.store.lock().unwrap();
        let import = FileImport {
            id: store.next_id(),
            kind: file.kind,
            file_name: file.file_name,
            status: ImportStatus::Pending,
            rows_total: None,
            rows_failed: None,
            error: None,
            uploaded_at: Utc::now(),
            uploaded_by: Some(ADMIN_EMAIL.to_string()),
        };
        store.imports.push(import.clone());
        Ok(import)
    }

    async fn list(&self, token: &AccessToken, page: PageRequest) -> Result<Page<FileImport>, AppError> {
        check(token)?;
        let store = self.store.lock().unwrap();
        Ok(paginate(&store.imports, page))
    }
}

#[async_trait]
impl AnalyticsRepository for FakeBackend {
    async fn summary(&self, token: &AccessToken) -> Result<DashboardSummary, AppError> {
        check(token)?;
        let store = self.store.lock().unwrap();
        Ok(DashboardSummary {
            total_drivers: store.drivers.len() as u64,
            active_drivers: store.drivers.len() as u64,
            expiring_documents: 0,
            expired_documents: 0,
            trips_this_month: 42,
            payouts_this_month: 1250.5,
            currency: Some("EUR".to_string()),
        })
    }

    async fn trips_by_company(
        &self,
        token: &AccessToken,
        _range: DateRange,
    ) -> Result<Vec<ChartSlice>, AppError> {
        check(token)?;
        Ok(vec![
            ChartSlice {
                label: "Northwind Cabs".to_string(),
                value: 30.0,
                share: 0.0,
            },
            ChartSlice {
                label: "Harbour Taxi".to_string(),
                value: 10.0,
                share: 0.0,
            },
        ])
    }

    async fn trips_over_time(
        &self,
        token: &AccessToken,
        range: DateRange,
    ) -> Result<Vec<SeriesPoint>, AppError> {
        check(token)?;
        Ok(vec![SeriesPoint {
            date: range.from,
            value: 5.0,
        }])
    }
}

/// State wired to a fresh [`FakeBackend`] with caching disabled.
pub fn create_test_state() -> (AppState, Arc<FakeBackend>) {
    let backend = Arc::new(FakeBackend::new());
    let repositories = Repositories {
        auth: backend.clone(),
        drivers: backend.clone(),
        documents: backend.clone(),
        records: backend.clone(),
        imports: backend.clone(),
        analytics: backend.clone(),
        health: backend.clone(),
    };
    let state = AppState::new(
        repositories,
        Arc::new(NullCache::new()),
        SessionSigner::new(SESSION_SECRET),
        30,
        DEFAULT_MAX_UPLOAD_BYTES,
        UiSettings::default(),
    );
    (state, backend)
}

/// Full application router without rate limiting.
pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state, RateLimit::Disabled)).unwrap()
}

/// `Cookie` header value carrying a valid dashboard session.
pub fn session_cookie(state: &AppState) -> String {
    let sealed = state.auth_service.seal(&AccessToken::new(VALID_TOKEN));
    format!("{SESSION_COOKIE}={sealed}")
}

/// Session sealed around a token the backend no longer accepts.
pub fn expired_session_cookie(state: &AppState) -> String {
    let sealed = state.auth_service.seal(&AccessToken::new("token-revoked"));
    format!("{SESSION_COOKIE}={sealed}")
}
