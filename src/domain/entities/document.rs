//! Driver compliance documents and their expiry evaluation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::expiry::{ExpiryStatus, days_until};

/// Kinds of documents a driver has to keep on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    DrivingLicense,
    NationalId,
    VehicleLicense,
    Contract,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::DrivingLicense,
        DocumentKind::NationalId,
        DocumentKind::VehicleLicense,
        DocumentKind::Contract,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::DrivingLicense => "driving_license",
            DocumentKind::NationalId => "national_id",
            DocumentKind::VehicleLicense => "vehicle_license",
            DocumentKind::Contract => "contract",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::DrivingLicense => "Driving license",
            DocumentKind::NationalId => "National ID",
            DocumentKind::VehicleLicense => "Vehicle license",
            DocumentKind::Contract => "Contract",
        }
    }

    /// Contracts may be open-ended; every other document must expire.
    pub fn requires_expiry(&self) -> bool {
        !matches!(self, DocumentKind::Contract)
    }
}

/// A document stored for a driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverDocument {
    pub id: i64,
    pub driver_id: i64,
    pub kind: DocumentKind,
    pub number: String,
    #[serde(default)]
    pub issued_on: Option<NaiveDate>,
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
    #[serde(default)]
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn validate_date_order(
    issued_on: Option<NaiveDate>,
    expires_on: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    if let (Some(issued), Some(expires)) = (issued_on, expires_on)
        && expires < issued
    {
        return Err(ValidationError::new("date_order")
            .with_message("Expiry date cannot be before issue date".into()));
    }
    Ok(())
}

fn validate_new_document(doc: &NewDocument) -> Result<(), ValidationError> {
    if doc.kind.requires_expiry() && doc.expires_on.is_none() {
        return Err(ValidationError::new("expiry_required")
            .with_message(format!("{} requires an expiry date", doc.kind.label()).into()));
    }
    validate_date_order(doc.issued_on, doc.expires_on)
}

fn validate_document_patch(patch: &DocumentPatch) -> Result<(), ValidationError> {
    validate_date_order(patch.issued_on, patch.expires_on)
}

/// Input data for attaching a document to a driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_new_document"))]
pub struct NewDocument {
    pub kind: DocumentKind,

    #[validate(length(min = 1, max = 64, message = "Document number is required"))]
    pub number: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_on: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,

    #[validate(url(message = "Invalid file URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// Partial update of a document; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_document_patch"))]
pub struct DocumentPatch {
    #[validate(length(min = 1, max = 64, message = "Document number is required"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_on: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,

    #[validate(url(message = "Invalid file URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// A document paired with its expiry status relative to a reference day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentView {
    pub document: DriverDocument,
    pub status: ExpiryStatus,
    /// Days until expiry; negative once expired, `None` without expiry date.
    pub days_left: Option<i64>,
}

impl DocumentView {
    pub fn new(document: DriverDocument, today: NaiveDate, window_days: u32) -> Self {
        let status = ExpiryStatus::evaluate(document.expires_on, today, window_days);
        let days_left = document.expires_on.map(|d| days_until(d, today));
        Self {
            document,
            status,
            days_left,
        }
    }
}

/// Summary of a driver's document compliance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    /// Required kinds with no document on file.
    pub missing: Vec<DocumentKind>,
    pub expired: Vec<DocumentKind>,
    pub expiring_soon: Vec<DocumentKind>,
}

impl ComplianceReport {
    /// Builds the report from evaluated documents.
    ///
    /// When several documents of one kind exist, the one expiring last wins.
    pub fn from_views(views: &[DocumentView]) -> Self {
        let mut missing = Vec::new();
        let mut expired = Vec::new();
        let mut expiring_soon = Vec::new();

        for kind in DocumentKind::ALL {
            let latest = views
                .iter()
                .filter(|v| v.document.kind == kind)
                .max_by_key(|v| v.document.expires_on);

            match latest.map(|v| v.status) {
                None if kind.requires_expiry() => missing.push(kind),
                None => {}
                Some(ExpiryStatus::Expired) => expired.push(kind),
                Some(ExpiryStatus::ExpiringSoon) => expiring_soon.push(kind),
                Some(_) => {}
            }
        }

        Self {
            missing,
            expired,
            expiring_soon,
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.missing.is_empty() && self.expired.is_empty()
    }
}
