//! Driver entity and the inputs used to create or change one.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::pagination::PageRequest;

/// International or local phone number: optional `+`, digits, spaces, dashes.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{6,18}[0-9]$").expect("valid phone regex"));

/// Employment status of a driver as tracked by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl DriverStatus {
    pub const ALL: [DriverStatus; 3] = [
        DriverStatus::Active,
        DriverStatus::Inactive,
        DriverStatus::Suspended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Active => "active",
            DriverStatus::Inactive => "inactive",
            DriverStatus::Suspended => "suspended",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DriverStatus::Active => "Active",
            DriverStatus::Inactive => "Inactive",
            DriverStatus::Suspended => "Suspended",
        }
    }
}

/// A driver registered with the fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub national_id: Option<String>,
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub status: DriverStatus,
    #[serde(default)]
    pub hired_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Input data for registering a driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewDriver {
    #[validate(length(min = 2, max = 120, message = "Name must be 2-120 characters"))]
    pub full_name: String,

    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number"))]
    pub phone: String,

    #[validate(email(message = "Invalid email address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[validate(length(min = 4, max = 32, message = "National ID must be 4-32 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,

    pub status: DriverStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hired_on: Option<NaiveDate>,
}

/// Partial update of a driver; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct DriverPatch {
    #[validate(length(min = 2, max = 120, message = "Name must be 2-120 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[validate(length(min = 4, max = 32, message = "National ID must be 4-32 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DriverStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hired_on: Option<NaiveDate>,
}

impl DriverPatch {
    pub fn is_empty(&self) -> bool {
        *self == DriverPatch::default()
    }
}

/// A company drivers can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
}

/// Filters for the paginated driver browser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverFilter {
    pub page: PageRequest,
    pub search: Option<String>,
    pub status: Option<DriverStatus>,
    pub company_id: Option<i64>,
}

impl DriverFilter {
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    pub fn with_status(mut self, status: Option<DriverStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn with_company(mut self, company_id: Option<i64>) -> Self {
        self.company_id = company_id;
        self
    }

    /// Stable key fragment identifying this filter in the query cache.
    pub fn cache_key(&self) -> String {
        format!(
            "p{}:s{}:q{}:st{}:c{}",
            self.page.page,
            self.page.page_size,
            self.search.as_deref().unwrap_or(""),
            self.status.map(|s| s.as_str()).unwrap_or(""),
            self.company_id.map(|c| c.to_string()).unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_driver() -> NewDriver {
        NewDriver {
            full_name: "Amina Yusuf".to_string(),
            phone: "+254 712 345678".to_string(),
            email: Some("amina@example.com".to_string()),
            national_id: Some("29384756".to_string()),
            company_id: Some(3),
            status: DriverStatus::Active,
            hired_on: None,
        }
    }

    #[test]
    fn test_new_driver_valid() {
        assert!(new_driver().validate().is_ok());
    }

    #[test]
    fn test_new_driver_invalid_phone() {
        let mut driver = new_driver();
        driver.phone = "call me".to_string();
        let errors = driver.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }

    #[test]
    fn test_new_driver_invalid_email_and_name() {
        let mut driver = new_driver();
        driver.full_name = "A".to_string();
        driver.email = Some("not-an-email".to_string());
        let errors = driver.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("full_name"));
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = DriverPatch {
            status: Some(DriverStatus::Suspended),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"status": "suspended"}));
        assert!(!patch.is_empty());
        assert!(DriverPatch::default().is_empty());
    }

    #[test]
    fn test_driver_deserializes_with_defaults() {
        let json = r#"{
            "id": 9,
            "full_name": "Jonas Berg",
            "phone": "+4670123456",
            "created_at": "2026-01-10T08:00:00Z"
        }"#;
        let driver: Driver = serde_json::from_str(json).unwrap();
        assert_eq!(driver.status, DriverStatus::Active);
        assert!(driver.email.is_none());
    }

    #[test]
    fn test_filter_cache_key_differs_per_search() {
        let a = DriverFilter::new(PageRequest::new(1, 20)).with_search(Some("ali".into()));
        let b = DriverFilter::new(PageRequest::new(1, 20)).with_search(Some("bo".into()));
        assert_ne!(a.cache_key(), b.cache_key());
    }
}
