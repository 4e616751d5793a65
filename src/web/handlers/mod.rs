//! HTML template rendering handlers for the web dashboard.

mod dashboard;
mod documents;
mod drivers;
mod imports;
mod login;
mod records;

pub use dashboard::dashboard_handler;
pub use documents::{
    create_document_handler, delete_document_handler, edit_document_handler,
    new_document_handler, update_document_handler,
};
pub use drivers::{
    create_driver_handler, delete_driver_handler, driver_handler, drivers_handler,
    edit_driver_handler, new_driver_handler, update_driver_handler,
};
pub use imports::{imports_handler, upload_handler};
pub use login::{login_handler, login_submit_handler, logout_handler};
pub use records::{payments_handler, trips_handler};

use chrono::{Local, NaiveDate};

/// Flash message for the `?notice=` code set by redirects after a mutation.
pub(crate) fn notice_message(code: Option<&str>) -> Option<String> {
    let message = match code? {
        "created" => "Driver created.",
        "updated" => "Driver updated.",
        "deleted" => "Driver deleted.",
        "unchanged" => "Nothing changed.",
        "document_added" => "Document added.",
        "document_updated" => "Document updated.",
        "document_deleted" => "Document deleted.",
        "uploaded" => "File uploaded. Rows appear once the backend finishes processing it.",
        "logged_out" => "You have been signed out.",
        _ => return None,
    };
    Some(message.to_string())
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub(crate) fn format_amount(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}").trim_end().to_string()
}
