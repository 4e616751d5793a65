//! Data file upload and import history.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Multipart, Query, State, multipart::MultipartError},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;
use serde_with::{NoneAsEmptyString, serde_as};

use crate::api::dto::pagination::PaginationParams;
use crate::domain::entities::{AccessToken, FileImport, ImportKind, ImportStatus, UploadFile};
use crate::domain::pagination::PageRequest;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::error::WebError;
use crate::web::forms::{SelectOption, form_errors, import_kind_options, is_form_error};
use crate::web::handlers::notice_message;
use crate::web::pager::Pager;

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ImportsQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page_size: Option<u32>,

    pub notice: Option<String>,
}

pub struct ImportRow {
    pub id: i64,
    pub kind: &'static str,
    pub file_name: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub rows: String,
    pub uploaded_at: String,
    pub uploaded_by: String,
    pub error: Option<String>,
}

impl From<&FileImport> for ImportRow {
    fn from(import: &FileImport) -> Self {
        let status_class = match import.status {
            ImportStatus::Completed => "ok",
            ImportStatus::Failed => "danger",
            ImportStatus::Pending | ImportStatus::Processing => "warn",
        };
        let rows = match (import.rows_total, import.rows_failed) {
            (Some(total), Some(failed)) if failed > 0 => format!("{total} ({failed} failed)"),
            (Some(total), _) => total.to_string(),
            (None, _) => "-".to_string(),
        };
        Self {
            id: import.id,
            kind: import.kind.label(),
            file_name: import.file_name.clone(),
            status_label: import.status.label(),
            status_class,
            rows,
            uploaded_at: import.uploaded_at.format("%Y-%m-%d %H:%M").to_string(),
            uploaded_by: import
                .uploaded_by
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            error: import.error.clone(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "imports.html")]
struct ImportsTemplate {
    rows: Vec<ImportRow>,
    pager: Pager,
    kind_options: Vec<SelectOption>,
    max_upload: String,
    errors: Vec<String>,
    notice: Option<String>,
}

fn format_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else if bytes >= 1024 {
        format!("{} KB", bytes / 1024)
    } else {
        format!("{bytes} bytes")
    }
}

async fn render(
    state: &AppState,
    token: &AccessToken,
    request: PageRequest,
    page_size: Option<u32>,
    selected_kind: &str,
    errors: Vec<String>,
    notice: Option<String>,
) -> Result<ImportsTemplate, AppError> {
    let page = state.import_service.list(token, request).await?;
    let params: Vec<(&str, String)> = page_size
        .map(|size| ("page_size", size.to_string()))
        .into_iter()
        .collect();
    Ok(ImportsTemplate {
        rows: page.items.iter().map(ImportRow::from).collect(),
        pager: Pager::new(&page, "/dashboard/imports", &params),
        kind_options: import_kind_options(selected_kind),
        max_upload: format_size(state.import_service.max_upload_bytes()),
        errors,
        notice,
    })
}

/// Upload form and paginated import history.
///
/// # Endpoint
///
/// `GET /dashboard/imports?page=`
pub async fn imports_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<ImportsQuery>,
) -> Result<impl IntoResponse, WebError> {
    let request = PaginationParams {
        page: query.page,
        page_size: query.page_size,
    }
    .to_request(state.settings.default_page_size);

    let page = render(
        &state,
        &token,
        request,
        query.page_size,
        ImportKind::Payroll.as_str(),
        Vec::new(),
        notice_message(query.notice.as_deref()),
    )
    .await?;
    Ok(page)
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::bad_request(
        "Upload could not be read",
        json!({ "file": [err.body_text()] }),
    )
}

fn missing_field(field: &str, message: &str) -> AppError {
    AppError::bad_request("Validation failed", json!({ field: [message] }))
}

/// Reads the `kind` and `file` parts of the upload form.
async fn read_upload(multipart: &mut Multipart) -> Result<UploadFile, AppError> {
    let mut kind = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "kind" => {
                let value = field.text().await.map_err(multipart_error)?;
                kind = Some(
                    value
                        .parse::<ImportKind>()
                        .map_err(|_| missing_field("kind", "Choose what the file contains"))?,
                );
            }
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                if !file_name.is_empty() {
                    file = Some((file_name, content_type, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    let kind = kind.ok_or_else(|| missing_field("kind", "Choose what the file contains"))?;
    let (file_name, content_type, bytes) =
        file.ok_or_else(|| missing_field("file", "Choose a file to upload"))?;

    Ok(UploadFile {
        kind,
        file_name,
        content_type,
        bytes,
    })
}

/// Sends a payroll or trip file to the backend for processing.
///
/// # Endpoint
///
/// `POST /dashboard/imports` (multipart: `kind`, `file`)
///
/// # Responses
///
/// - `303` to `/dashboard/imports?notice=uploaded` once the backend accepts it
/// - `400` upload page listing the problem (empty, too large, wrong type)
pub async fn upload_handler(
    State(state): State<AppState>,
    Extension(token): Extension<AccessToken>,
    mut multipart: Multipart,
) -> Result<Response, WebError> {
    let result = match read_upload(&mut multipart).await {
        Ok(file) => state.import_service.upload(&token, file).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => Ok(Redirect::to("/dashboard/imports?notice=uploaded").into_response()),
        Err(err) if is_form_error(&err) => {
            let page = render(
                &state,
                &token,
                PageRequest::new(1, state.settings.default_page_size),
                None,
                ImportKind::Payroll.as_str(),
                form_errors(&err),
                None,
            )
            .await?;
            Ok((err.status(), page).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_size(1536), "1 KB");
        assert_eq!(format_size(512), "512 bytes");
    }
}
