//! Route table for the journal application

use super::handlers::{
    AppState, create_entry, detail_view, edit_entry_form, list_entries, login, login_form, logout,
    new_entry_form, update_entry,
};
use axum::Router;
use axum::routing::{any, get};
use tower_http::trace::TraceLayer;

/// Build the application router
///
/// - GET  `/`                          — entry list, public
/// - GET  `/journal/{id}`              — entry detail, public
/// - GET/POST `/journal/new-entry`     — create form / create, secret privilege
/// - GET/POST `/journal/{id}/edit-entry` — edit form / update, secret privilege
/// - GET/POST `/login`                 — login form / authenticate
/// - ANY  `/logout`                    — clear session
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_entries))
        .route("/journal/new-entry", get(new_entry_form).post(create_entry))
        .route("/journal/{id}", get(detail_view))
        .route(
            "/journal/{id}/edit-entry",
            get(edit_entry_form).post(update_entry),
        )
        .route("/login", get(login_form).post(login))
        .route("/logout", any(logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
