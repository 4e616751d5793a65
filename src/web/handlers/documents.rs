//! Document pages nested under a driver.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::domain::entities::{AccessToken, DocumentKind, DocumentPatch, DocumentView};
use crate::state::AppState;
use crate::web::error::WebError;
use crate::web::forms::{DocumentForm, SelectOption, form_errors, is_form_error, kind_options};
use crate::web::handlers::format_date;

/// Document fields preformatted for the driver page.
pub struct DocumentRow {
    pub id: i64,
    pub kind: &'static str,
    pub number: String,
    pub issued_on: String,
    pub expires_on: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub days_left: String,
    pub file_url: Option<String>,
}

fn days_left_text(days: Option<i64>) -> String {
    match days {
        None => String::new(),
        Some(0) => "expires today".to_string(),
        Some(1) => "1 day left".to_string(),
        Some(n) if n > 0 => format!("{n} days left"),
        Some(-1) => "expired yesterday".to_string(),
        Some(n) => format!("expired {} days ago", -n),
    }
}

impl From<&DocumentView> for DocumentRow {
    fn from(view: &DocumentView) -> Self {
        let doc = &view.document;
        Self {
            id: doc.id,
            kind: doc.kind.label(),
            number: doc.number.clone(),
            issued_on: format_date(doc.issued_on),
            expires_on: format_date(doc.expires_on),
            status_label: view.status.label(),
            status_class: view.status.css_class(),
            days_left: days_left_text(view.days_left),
            file_url: doc.file_url.clone(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "documents/form.html")]
struct DocumentFormTemplate {
    heading: String,
    action: String,
    driver_id: i64,
    driver_name: String,
    form: DocumentForm,
    kind_options: Vec<SelectOption>,
    /// The kind of a stored document is fixed.
    kind_locked: bool,
    errors: Vec<String>,
}

impl DocumentFormTemplate {
    fn create(driver_id: i64, driver_name: String, form: DocumentForm) -> Self {
        Self {
            heading: "Add document".to_string(),
            action: format!("/dashboard/drivers/{driver_id}/documents"),
            driver_id,
            driver_name,
            kind_options: kind_options(&form.kind),
            kind_locked: false,
            form,
            errors: Vec::new(),
        }
    }

    fn edit(driver_id: i64, document_id: i64, driver_name: String, form: DocumentForm) -> Self {
        Self {
            heading: "Edit document".to_string(),
            action: format!("/dashboard/drivers/{driver_id}/documents/{document_id}"),
            kind_locked: true,
            ..Self::create(driver_id, driver_name, form)
        }
    }

    fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

fn driver_href(driver_id: i64, notice: &str) -> String {
    format!("/dashboard/drivers/{driver_id}?notice={notice}")
}

/// `GET /dashboard/drivers/{id}/documents/new`
pub async fn new_document_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Path(driver_id): Path<i64>,
) -> Result<impl IntoResponse, WebError> {
    let driver = state.driver_service.get(&token, driver_id).await?;
    let form = DocumentForm {
        kind: DocumentKind::DrivingLicense.as_str().to_string(),
        ..Default::default()
    };
    Ok(DocumentFormTemplate::create(driver_id, driver.full_name, form))
}

/// Attaches a document; invalid input re-renders the form.
///
/// # Endpoint
///
/// `POST /dashboard/drivers/{id}/documents`
pub async fn create_document_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Path(driver_id): Path<i64>,
    Form(form): Form<DocumentForm>,
) -> Result<Response, WebError> {
    let result = match form.to_new_document() {
        Ok(document) => {
            state
                .document_service
                .create(&token, driver_id, document)
                .await
        }
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => Ok(Redirect::to(&driver_href(driver_id, "document_added")).into_response()),
        Err(err) if is_form_error(&err) => {
            let driver = state.driver_service.get(&token, driver_id).await?;
            let page = DocumentFormTemplate::create(driver_id, driver.full_name, form)
                .with_errors(form_errors(&err));
            Ok((err.status(), page).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// `GET /dashboard/drivers/{id}/documents/{document_id}/edit`
pub async fn edit_document_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Path((driver_id, document_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, WebError> {
    let (driver, document) = tokio::try_join!(
        state.driver_service.get(&token, driver_id),
        state.document_service.get(&token, driver_id, document_id),
    )?;
    Ok(DocumentFormTemplate::edit(
        driver_id,
        document_id,
        driver.full_name,
        DocumentForm::from_document(&document),
    ))
}

/// Saves changed document fields.
///
/// # Endpoint
///
/// `POST /dashboard/drivers/{id}/documents/{document_id}`
pub async fn update_document_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Path((driver_id, document_id)): Path<(i64, i64)>,
    Form(form): Form<DocumentForm>,
) -> Result<Response, WebError> {
    let current = state
        .document_service
        .get(&token, driver_id, document_id)
        .await?;

    let result = match form.to_patch(&current) {
        Ok(patch) if patch == DocumentPatch::default() => {
            return Ok(Redirect::to(&driver_href(driver_id, "unchanged")).into_response());
        }
        Ok(patch) => state.document_service.update(&token, document_id, patch).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => Ok(Redirect::to(&driver_href(driver_id, "document_updated")).into_response()),
        Err(err) if is_form_error(&err) => {
            let driver = state.driver_service.get(&token, driver_id).await?;
            let mut form = form;
            // Disabled selects are not submitted.
            form.kind = current.kind.as_str().to_string();
            let page = DocumentFormTemplate::edit(driver_id, document_id, driver.full_name, form)
                .with_errors(form_errors(&err));
            Ok((err.status(), page).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// `POST /dashboard/drivers/{id}/documents/{document_id}/delete`
pub async fn delete_document_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Path((driver_id, document_id)): Path<(i64, i64)>,
) -> Result<Redirect, WebError> {
    // Only documents listed for this driver may be removed through its page.
    state
        .document_service
        .get(&token, driver_id, document_id)
        .await?;
    state.document_service.delete(&token, document_id).await?;
    Ok(Redirect::to(&driver_href(driver_id, "document_deleted")))
}
