//! HTML form payloads and their conversion into domain requests.
//!
//! Browsers submit every field as text, blank when left empty, so form
//! structs hold `String`s and parsing happens here with field-level errors
//! in the same shape `validator` produces.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::domain::entities::{
    Company, Credentials, DocumentKind, DocumentPatch, Driver, DriverDocument, DriverPatch,
    DriverStatus, ImportKind, NewDocument, NewDriver,
};
use crate::error::AppError;
use crate::web::error::error_lines;

/// `<option>` entry for select inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>, selected: &str) -> Self {
        let value = value.into();
        Self {
            selected: value == selected,
            label: label.into(),
            value,
        }
    }
}

pub fn status_options(selected: &str) -> Vec<SelectOption> {
    DriverStatus::ALL
        .iter()
        .map(|s| SelectOption::new(s.as_str(), s.label(), selected))
        .collect()
}

pub fn kind_options(selected: &str) -> Vec<SelectOption> {
    DocumentKind::ALL
        .iter()
        .map(|k| SelectOption::new(k.as_str(), k.label(), selected))
        .collect()
}

pub fn import_kind_options(selected: &str) -> Vec<SelectOption> {
    ImportKind::ALL
        .iter()
        .map(|k| SelectOption::new(k.as_str(), k.label(), selected))
        .collect()
}

/// Company choices with a leading "no company" entry.
pub fn company_options(companies: &[Company], selected: &str) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", "(none)", selected))
        .chain(
            companies
                .iter()
                .map(|c| SelectOption::new(c.id.to_string(), c.name.clone(), selected)),
        )
        .collect()
}

fn field_error(field: &str, message: &str) -> AppError {
    AppError::bad_request("Validation failed", json!({ field: [message] }))
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_date(field: &str, value: &str) -> Result<Option<NaiveDate>, AppError> {
    non_empty(value)
        .map(|v| {
            NaiveDate::parse_from_str(&v, "%Y-%m-%d")
                .map_err(|_| field_error(field, "Use the YYYY-MM-DD format"))
        })
        .transpose()
}

fn parse_id(field: &str, value: &str) -> Result<Option<i64>, AppError> {
    non_empty(value)
        .map(|v| v.parse::<i64>().map_err(|_| field_error(field, "Unknown selection")))
        .transpose()
}

fn parse_status(value: &str) -> Result<Option<DriverStatus>, AppError> {
    let Some(value) = non_empty(value) else {
        return Ok(None);
    };
    DriverStatus::ALL
        .into_iter()
        .find(|s| s.as_str() == value)
        .map(Some)
        .ok_or_else(|| field_error("status", "Unknown status"))
}

fn parse_kind(value: &str) -> Result<DocumentKind, AppError> {
    DocumentKind::ALL
        .into_iter()
        .find(|k| k.as_str() == value.trim())
        .ok_or_else(|| field_error("kind", "Choose a document type"))
}

/// Keeps `new` only if it differs from the stored value.
fn changed<T: PartialEq>(new: Option<T>, current: Option<T>) -> Option<T> {
    new.filter(|n| current.as_ref() != Some(n))
}

fn date_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn into_credentials(self) -> Credentials {
        Credentials {
            email: self.email,
            password: self.password,
        }
    }
}

/// Driver create/edit form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DriverForm {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub national_id: String,
    pub company_id: String,
    pub status: String,
    pub hired_on: String,
}

impl DriverForm {
    /// Prefills the edit form.
    pub fn from_driver(driver: &Driver) -> Self {
        Self {
            full_name: driver.full_name.clone(),
            phone: driver.phone.clone(),
            email: driver.email.clone().unwrap_or_default(),
            national_id: driver.national_id.clone().unwrap_or_default(),
            company_id: driver
                .company_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            status: driver.status.as_str().to_string(),
            hired_on: date_value(driver.hired_on),
        }
    }

    pub fn to_new_driver(&self) -> Result<NewDriver, AppError> {
        Ok(NewDriver {
            full_name: self.full_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: non_empty(&self.email),
            national_id: non_empty(&self.national_id),
            company_id: parse_id("company_id", &self.company_id)?,
            status: parse_status(&self.status)?.unwrap_or_default(),
            hired_on: parse_date("hired_on", &self.hired_on)?,
        })
    }

    /// Patch holding the fields that differ from `current`.
    ///
    /// Blank optional inputs leave the stored value unchanged.
    pub fn to_patch(&self, current: &Driver) -> Result<DriverPatch, AppError> {
        Ok(DriverPatch {
            full_name: changed(non_empty(&self.full_name), Some(current.full_name.clone())),
            phone: changed(non_empty(&self.phone), Some(current.phone.clone())),
            email: changed(non_empty(&self.email), current.email.clone()),
            national_id: changed(non_empty(&self.national_id), current.national_id.clone()),
            company_id: changed(parse_id("company_id", &self.company_id)?, current.company_id),
            status: changed(parse_status(&self.status)?, Some(current.status)),
            hired_on: changed(parse_date("hired_on", &self.hired_on)?, current.hired_on),
        })
    }
}

/// Document create/edit form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocumentForm {
    pub kind: String,
    pub number: String,
    pub issued_on: String,
    pub expires_on: String,
    pub file_url: String,
}

impl DocumentForm {
    pub fn from_document(document: &DriverDocument) -> Self {
        Self {
            kind: document.kind.as_str().to_string(),
            number: document.number.clone(),
            issued_on: date_value(document.issued_on),
            expires_on: date_value(document.expires_on),
            file_url: document.file_url.clone().unwrap_or_default(),
        }
    }

    pub fn to_new_document(&self) -> Result<NewDocument, AppError> {
        Ok(NewDocument {
            kind: parse_kind(&self.kind)?,
            number: self.number.trim().to_string(),
            issued_on: parse_date("issued_on", &self.issued_on)?,
            expires_on: parse_date("expires_on", &self.expires_on)?,
            file_url: non_empty(&self.file_url),
        })
    }

    /// Patch holding the fields that differ from `current`. The kind of an
    /// existing document cannot change.
    pub fn to_patch(&self, current: &DriverDocument) -> Result<DocumentPatch, AppError> {
        Ok(DocumentPatch {
            number: changed(non_empty(&self.number), Some(current.number.clone())),
            issued_on: changed(parse_date("issued_on", &self.issued_on)?, current.issued_on),
            expires_on: changed(parse_date("expires_on", &self.expires_on)?, current.expires_on),
            file_url: changed(non_empty(&self.file_url), current.file_url.clone()),
        })
    }
}

/// Whether `err` should be shown next to the form instead of on an error page.
pub fn is_form_error(err: &AppError) -> bool {
    matches!(err, AppError::Validation { .. } | AppError::Conflict { .. })
}

/// Lines to list above a re-rendered form.
pub fn form_errors(err: &AppError) -> Vec<String> {
    let lines = error_lines(err);
    if lines.is_empty() {
        vec![err.to_string()]
    } else {
        lines
    }
}
