//! Driver browser and CRUD pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};

use crate::api::dto::pagination::PaginationParams;
use crate::domain::entities::{
    AccessToken, Company, ComplianceReport, DocumentKind, Driver, DriverFilter, DriverStatus,
};
use crate::state::AppState;
use crate::web::error::WebError;
use crate::web::forms::{
    DriverForm, SelectOption, company_options, form_errors, is_form_error, status_options,
};
use crate::web::handlers::documents::DocumentRow;
use crate::web::handlers::{format_date, notice_message, today};
use crate::web::pager::Pager;

/// Driver fields preformatted for display.
pub struct DriverRow {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub national_id: String,
    pub company: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub hired_on: String,
    pub created_at: String,
}

impl From<&Driver> for DriverRow {
    fn from(driver: &Driver) -> Self {
        let status_class = match driver.status {
            DriverStatus::Active => "ok",
            DriverStatus::Inactive => "muted",
            DriverStatus::Suspended => "danger",
        };
        Self {
            id: driver.id,
            full_name: driver.full_name.clone(),
            phone: driver.phone.clone(),
            email: driver.email.clone().unwrap_or_else(|| "-".to_string()),
            national_id: driver.national_id.clone().unwrap_or_else(|| "-".to_string()),
            company: driver
                .company_name
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            status_label: driver.status.label(),
            status_class,
            hired_on: format_date(driver.hired_on),
            created_at: driver.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct DriverListQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page_size: Option<u32>,

    #[serde(default)]
    pub search: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub company_id: String,

    pub notice: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "drivers/list.html")]
struct DriverListTemplate {
    rows: Vec<DriverRow>,
    pager: Pager,
    search: String,
    status_options: Vec<SelectOption>,
    company_options: Vec<SelectOption>,
    notice: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "drivers/show.html")]
struct DriverShowTemplate {
    driver: DriverRow,
    documents: Vec<DocumentRow>,
    compliant: bool,
    missing: Vec<&'static str>,
    expired: Vec<&'static str>,
    expiring: Vec<&'static str>,
    warning_days: u32,
    notice: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "drivers/form.html")]
struct DriverFormTemplate {
    heading: String,
    action: String,
    cancel_href: String,
    form: DriverForm,
    status_options: Vec<SelectOption>,
    company_options: Vec<SelectOption>,
    errors: Vec<String>,
}

impl DriverFormTemplate {
    fn new(
        heading: String,
        action: String,
        cancel_href: String,
        form: DriverForm,
        companies: &[Company],
    ) -> Self {
        Self {
            heading,
            action,
            cancel_href,
            status_options: status_options(&form.status),
            company_options: company_options(companies, &form.company_id),
            form,
            errors: Vec::new(),
        }
    }

    fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

fn labels(kinds: &[DocumentKind]) -> Vec<&'static str> {
    kinds.iter().map(DocumentKind::label).collect()
}

/// Driver list with search, status/company filters and page controls.
///
/// # Endpoint
///
/// `GET /dashboard/drivers?search=&status=&company_id=&page=&page_size=`
pub async fn drivers_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<DriverListQuery>,
) -> Result<impl IntoResponse, WebError> {
    let pagination = PaginationParams {
        page: query.page,
        page_size: query.page_size,
    };
    let status = DriverStatus::ALL
        .into_iter()
        .find(|s| s.as_str() == query.status.trim());
    let company_id = query.company_id.trim().parse::<i64>().ok();

    let filter = DriverFilter::new(pagination.to_request(state.settings.default_page_size))
        .with_search(Some(query.search.clone()))
        .with_status(status)
        .with_company(company_id);

    let (page, companies) = tokio::try_join!(
        state.driver_service.list(&token, filter),
        state.driver_service.companies(&token),
    )?;

    let mut params = vec![
        ("search", query.search.clone()),
        ("status", query.status.clone()),
        ("company_id", query.company_id.clone()),
    ];
    if let Some(size) = query.page_size {
        params.push(("page_size", size.to_string()));
    }
    let pager = Pager::new(&page, "/dashboard/drivers", &params);

    Ok(DriverListTemplate {
        rows: page.items.iter().map(DriverRow::from).collect(),
        pager,
        search: query.search,
        status_options: status_options(&query.status),
        company_options: company_options(&companies, &query.company_id),
        notice: notice_message(query.notice.as_deref()),
    })
}

/// Driver profile with documents and their compliance summary.
///
/// # Endpoint
///
/// `GET /dashboard/drivers/{id}`
pub async fn driver_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Path(id): Path<i64>,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse, WebError> {
    let today = today();
    let (driver, documents) = tokio::try_join!(
        state.driver_service.get(&token, id),
        state.document_service.list(&token, id, today),
    )?;
    let compliance = ComplianceReport::from_views(&documents);

    Ok(DriverShowTemplate {
        driver: DriverRow::from(&driver),
        documents: documents.iter().map(DocumentRow::from).collect(),
        compliant: compliance.is_compliant(),
        missing: labels(&compliance.missing),
        expired: labels(&compliance.expired),
        expiring: labels(&compliance.expiring_soon),
        warning_days: state.document_service.warning_days(),
        notice: notice_message(query.notice.as_deref()),
    })
}

/// Empty driver form.
///
/// # Endpoint
///
/// `GET /dashboard/drivers/new`
pub async fn new_driver_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
) -> Result<impl IntoResponse, WebError> {
    let companies = state.driver_service.companies(&token).await?;
    let form = DriverForm {
        status: DriverStatus::Active.as_str().to_string(),
        ..Default::default()
    };
    Ok(DriverFormTemplate::new(
        "New driver".to_string(),
        "/dashboard/drivers".to_string(),
        "/dashboard/drivers".to_string(),
        form,
        &companies,
    ))
}

/// Creates a driver; invalid input re-renders the form with `400`.
///
/// # Endpoint
///
/// `POST /dashboard/drivers`
pub async fn create_driver_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Form(form): Form<DriverForm>,
) -> Result<Response, WebError> {
    let result = match form.to_new_driver() {
        Ok(new_driver) => state.driver_service.create(&token, new_driver).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(driver) => Ok(
            Redirect::to(&format!("/dashboard/drivers/{}?notice=created", driver.id))
                .into_response(),
        ),
        Err(err) if is_form_error(&err) => {
            let companies = state.driver_service.companies(&token).await?;
            let page = DriverFormTemplate::new(
                "New driver".to_string(),
                "/dashboard/drivers".to_string(),
                "/dashboard/drivers".to_string(),
                form,
                &companies,
            )
            .with_errors(form_errors(&err));
            Ok((err.status(), page).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

fn edit_form(id: i64, form: DriverForm, companies: &[Company]) -> DriverFormTemplate {
    DriverFormTemplate::new(
        "Edit driver".to_string(),
        format!("/dashboard/drivers/{id}"),
        format!("/dashboard/drivers/{id}"),
        form,
        companies,
    )
}

/// Edit form prefilled with the stored values.
///
/// # Endpoint
///
/// `GET /dashboard/drivers/{id}/edit`
pub async fn edit_driver_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, WebError> {
    let (driver, companies) = tokio::try_join!(
        state.driver_service.get(&token, id),
        state.driver_service.companies(&token),
    )?;
    Ok(edit_form(id, DriverForm::from_driver(&driver), &companies))
}

/// Saves changed fields. Submitting an unchanged form redirects with
/// `notice=unchanged` instead of calling the backend.
///
/// # Endpoint
///
/// `POST /dashboard/drivers/{id}`
pub async fn update_driver_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Path(id): Path<i64>,
    Form(form): Form<DriverForm>,
) -> Result<Response, WebError> {
    let current = state.driver_service.get(&token, id).await?;

    let result = match form.to_patch(&current) {
        Ok(patch) if patch.is_empty() => {
            return Ok(
                Redirect::to(&format!("/dashboard/drivers/{id}?notice=unchanged")).into_response(),
            );
        }
        Ok(patch) => state.driver_service.update(&token, id, patch).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => Ok(Redirect::to(&format!("/dashboard/drivers/{id}?notice=updated")).into_response()),
        Err(err) if is_form_error(&err) => {
            let companies = state.driver_service.companies(&token).await?;
            let page = edit_form(id, form, &companies).with_errors(form_errors(&err));
            Ok((err.status(), page).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// Deletes a driver and returns to the list.
///
/// # Endpoint
///
/// `POST /dashboard/drivers/{id}/delete`
pub async fn delete_driver_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Path(id): Path<i64>,
) -> Result<Redirect, WebError> {
    state.driver_service.delete(&token, id).await?;
    Ok(Redirect::to("/dashboard/drivers?notice=deleted"))
}
