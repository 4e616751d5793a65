//! Expiry checks for compliance documents.

use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Default number of days before expiry at which a document is flagged.
pub const DEFAULT_WARNING_DAYS: u32 = 30;

/// Returns `true` once the expiry date lies in the past.
///
/// A document expiring today is still valid for the rest of the day.
pub fn is_expired(expires_on: NaiveDate, today: NaiveDate) -> bool {
    expires_on < today
}

/// Returns `true` if the document is still valid but expires within
/// `window_days` days (inclusive).
pub fn is_expiring_soon(expires_on: NaiveDate, today: NaiveDate, window_days: u32) -> bool {
    if is_expired(expires_on, today) {
        return false;
    }
    match today.checked_add_days(Days::new(u64::from(window_days))) {
        Some(limit) => expires_on <= limit,
        None => true,
    }
}

/// Signed number of days from `today` until `expires_on` (negative once expired).
pub fn days_until(expires_on: NaiveDate, today: NaiveDate) -> i64 {
    (expires_on - today).num_days()
}

/// Compliance state of a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Valid,
    ExpiringSoon,
    Expired,
    /// The document carries no expiry date.
    NoExpiry,
}

impl ExpiryStatus {
    pub fn evaluate(expires_on: Option<NaiveDate>, today: NaiveDate, window_days: u32) -> Self {
        match expires_on {
            None => ExpiryStatus::NoExpiry,
            Some(date) if is_expired(date, today) => ExpiryStatus::Expired,
            Some(date) if is_expiring_soon(date, today, window_days) => ExpiryStatus::ExpiringSoon,
            Some(_) => ExpiryStatus::Valid,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpiryStatus::Valid => "Valid",
            ExpiryStatus::ExpiringSoon => "Expiring soon",
            ExpiryStatus::Expired => "Expired",
            ExpiryStatus::NoExpiry => "No expiry",
        }
    }

    /// CSS modifier used by the dashboard badges.
    pub fn css_class(&self) -> &'static str {
        match self {
            ExpiryStatus::Valid => "ok",
            ExpiryStatus::ExpiringSoon => "warn",
            ExpiryStatus::Expired => "danger",
            ExpiryStatus::NoExpiry => "muted",
        }
    }

    pub fn needs_attention(&self) -> bool {
        matches!(self, ExpiryStatus::ExpiringSoon | ExpiryStatus::Expired)
    }
}
