//! Web dashboard route configuration.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;
use crate::web::handlers::{
    create_document_handler, create_driver_handler, dashboard_handler, delete_document_handler,
    delete_driver_handler, driver_handler, drivers_handler, edit_document_handler,
    edit_driver_handler, imports_handler, login_handler, login_submit_handler, logout_handler,
    new_document_handler, new_driver_handler, payments_handler, trips_handler,
    update_document_handler, update_driver_handler, upload_handler,
};

/// Room for multipart boundaries and the `kind` field on top of the file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Dashboard routes requiring a session.
///
/// Protected via [`crate::web::middleware::web_auth`]. HTML forms only
/// submit GET and POST, so updates and deletes are POSTs.
///
/// # Endpoints
///
/// - `GET  /`                                      - Summary cards and charts
/// - `GET  /drivers`                               - Driver list (search, filters, pager)
/// - `GET  /drivers/new`, `POST /drivers`          - Create a driver
/// - `GET  /drivers/{id}`                          - Driver profile, documents, compliance
/// - `GET  /drivers/{id}/edit`, `POST /drivers/{id}` - Update a driver
/// - `POST /drivers/{id}/delete`                   - Delete a driver
/// - `GET  /drivers/{id}/documents/new`, `POST /drivers/{id}/documents` - Add a document
/// - `GET  /drivers/{id}/documents/{doc}/edit`, `POST /drivers/{id}/documents/{doc}` - Update
/// - `POST /drivers/{id}/documents/{doc}/delete`   - Delete a document
/// - `GET  /records/payments`, `GET /records/trips` - Record browsers
/// - `GET  /imports`, `POST /imports`              - Import history and upload
pub fn protected_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/drivers", get(drivers_handler).post(create_driver_handler))
        .route("/drivers/new", get(new_driver_handler))
        .route("/drivers/{id}", get(driver_handler).post(update_driver_handler))
        .route("/drivers/{id}/edit", get(edit_driver_handler))
        .route("/drivers/{id}/delete", post(delete_driver_handler))
        .route(
            "/drivers/{id}/documents",
            post(create_document_handler),
        )
        .route("/drivers/{id}/documents/new", get(new_document_handler))
        .route(
            "/drivers/{id}/documents/{document_id}",
            post(update_document_handler),
        )
        .route(
            "/drivers/{id}/documents/{document_id}/edit",
            get(edit_document_handler),
        )
        .route(
            "/drivers/{id}/documents/{document_id}/delete",
            post(delete_document_handler),
        )
        .route("/records/payments", get(payments_handler))
        .route("/records/trips", get(trips_handler))
        .route(
            "/imports",
            get(imports_handler)
                .post(upload_handler)
                .layer(DefaultBodyLimit::max(max_upload_bytes + MULTIPART_OVERHEAD)),
        )
}

/// Login endpoints, reachable without a session.
///
/// # Endpoints
///
/// - `GET  /login`  - Login page
/// - `POST /login`  - Exchange credentials for a session cookie
/// - `POST /logout` - Revoke the token and clear the cookie
pub fn login_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_handler).post(login_submit_handler))
        .route("/logout", post(logout_handler))
}
