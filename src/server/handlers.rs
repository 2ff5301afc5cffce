//! HTTP handlers for the journal routes
//!
//! Six handlers: list, detail, create (GET form + POST), update (GET form +
//! POST), login (GET form + POST), logout. Each reads the request-scoped
//! [`AuthContext`], performs at most one store read or write, and returns
//! either a rendered view or a redirect.
//!
//! Create and update are gated twice: the session must carry the secret
//! privilege (403 otherwise), and POSTs must present the CSRF token the form
//! was rendered with. Login and logout are ungated.

use crate::config::AppConfig;
use crate::core::auth::AuthContext;
use crate::core::csrf::CsrfGuard;
use crate::core::entry::{EntryDraft, display_date};
use crate::core::error::{AppError, AppResult};
use crate::core::session::SessionManager;
use crate::core::store::EntryStore;
use crate::views::{DetailView, EntryFormView, IndexView, LoginView, ViewEngine};
use anyhow::Result;
use axum::Form;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Local;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntryStore>,
    pub sessions: Arc<SessionManager>,
    pub csrf: Arc<CsrfGuard>,
    pub views: Arc<ViewEngine>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire the shared state from configuration and a store.
    ///
    /// The session manager and the CSRF guard share one signing key; the
    /// CSRF guard domain-separates its MACs internally.
    pub fn new(config: AppConfig, store: Arc<dyn EntryStore>) -> Result<Self> {
        let key = config.session.key_bytes()?;
        let sessions = SessionManager::new(
            key.clone(),
            config.session.cookie_name.clone(),
            config.session.max_age_secs,
        );

        Ok(Self {
            store,
            sessions: Arc::new(sessions),
            csrf: Arc::new(CsrfGuard::new(key)),
            views: Arc::new(ViewEngine::new()?),
            config: Arc::new(config),
        })
    }
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(AuthContext::from_headers(&parts.headers, &state.sessions))
    }
}

/// Raw create/edit form body
///
/// Every field is optional at the wire level; presence and non-emptiness are
/// checked by the explicit validation step in [`EntryForm::into_draft`], so
/// a missing field is a 400 rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct EntryForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

impl EntryForm {
    fn into_draft(self) -> AppResult<EntryDraft> {
        let title = require_field(self.title, "title")?;
        let body = require_field(self.content, "content")?;
        Ok(EntryDraft { title, body })
    }
}

fn require_field(value: Option<String>, field: &'static str) -> AppResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(AppError::MissingField { field })
}

/// Login form body; absent fields fall back to empty strings, which can
/// never match the configured credential.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn check_csrf(state: &AppState, username: &str, token: Option<&str>) -> AppResult<()> {
    if token.is_some_and(|t| state.csrf.verify(username, t)) {
        Ok(())
    } else {
        Err(AppError::Forbidden {
            message: "invalid or missing CSRF token".to_string(),
        })
    }
}

/// GET /
///
/// Render a list of all entries, newest (highest id) first.
pub async fn list_entries(
    State(state): State<AppState>,
    context: AuthContext,
) -> AppResult<Html<String>> {
    let mut journals = state.store.list().await?;
    journals.sort_by(|a, b| b.id.cmp(&a.id));

    state.views.render(
        "index.html",
        &IndexView {
            site_title: state.config.site_title.clone(),
            logged_in: context.is_editor(),
            journals,
        },
    )
}

/// GET /journal/{id}
///
/// Render a detailed view of one entry. Unknown identifiers are a 404; a
/// non-integer identifier never reaches here (the path extractor rejects it
/// with a 400).
pub async fn detail_view(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    context: AuthContext,
) -> AppResult<Html<String>> {
    let entry = state
        .store
        .get(id)
        .await?
        .ok_or(AppError::EntryNotFound { id })?;

    state.views.render(
        "detail.html",
        &DetailView {
            site_title: state.config.site_title.clone(),
            logged_in: context.is_editor(),
            entry,
        },
    )
}

/// GET /journal/new-entry
pub async fn new_entry_form(
    State(state): State<AppState>,
    context: AuthContext,
) -> AppResult<Html<String>> {
    let username = context.require_editor()?;

    state.views.render(
        "create.html",
        &EntryFormView {
            site_title: state.config.site_title.clone(),
            logged_in: true,
            csrf_token: state.csrf.token_for(username),
            entry: None,
        },
    )
}

/// POST /journal/new-entry
///
/// Persist a new entry stamped with the current date and redirect home.
pub async fn create_entry(
    State(state): State<AppState>,
    context: AuthContext,
    Form(form): Form<EntryForm>,
) -> AppResult<Response> {
    let username = context.require_editor()?.to_string();
    check_csrf(&state, &username, form.csrf_token.as_deref())?;

    let draft = form.into_draft()?;
    let entry = state.store.insert(draft, display_date(Local::now())).await?;
    tracing::info!(id = entry.id, "created journal entry");

    Ok(Redirect::to("/").into_response())
}

/// GET /journal/{id}/edit-entry
pub async fn edit_entry_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    context: AuthContext,
) -> AppResult<Html<String>> {
    let username = context.require_editor()?.to_string();

    let entry = state
        .store
        .get(id)
        .await?
        .ok_or(AppError::EntryNotFound { id })?;

    state.views.render(
        "edit.html",
        &EntryFormView {
            site_title: state.config.site_title.clone(),
            logged_in: true,
            csrf_token: state.csrf.token_for(&username),
            entry: Some(entry),
        },
    )
}

/// POST /journal/{id}/edit-entry
///
/// Overwrite title and body, restamp the date, and redirect to the entry's
/// detail page. An unknown identifier short-circuits to a 404 before
/// anything is mutated.
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    context: AuthContext,
    Form(form): Form<EntryForm>,
) -> AppResult<Response> {
    let username = context.require_editor()?.to_string();
    check_csrf(&state, &username, form.csrf_token.as_deref())?;

    let draft = form.into_draft()?;
    state
        .store
        .update(id, draft, display_date(Local::now()))
        .await?
        .ok_or(AppError::EntryNotFound { id })?;
    tracing::info!(id, "updated journal entry");

    Ok(Redirect::to(&format!("/journal/{}", id)).into_response())
}

/// GET /login
pub async fn login_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    state.views.render(
        "login.html",
        &LoginView {
            site_title: state.config.site_title.clone(),
            logged_in: false,
            error: None,
        },
    )
}

/// POST /login
///
/// Verify the submitted pair against the configured credential. Success
/// redirects home carrying session-issuance headers; failure re-renders the
/// form, with a visible message only when the configuration asks for one.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if state.config.credential.verify(&form.username, &form.password) {
        tracing::info!(username = %form.username, "login succeeded");
        let headers = state.sessions.issue(&form.username);
        return Ok((headers, Redirect::to("/")).into_response());
    }

    tracing::warn!(username = %form.username, "login failed");
    let error = state
        .config
        .show_login_error
        .then(|| "Invalid username or password.".to_string());

    let page = state.views.render(
        "login.html",
        &LoginView {
            site_title: state.config.site_title.clone(),
            logged_in: false,
            error,
        },
    )?;
    Ok(page.into_response())
}

/// Any method on /logout
///
/// Unconditionally clears the session and redirects home.
pub async fn logout(State(state): State<AppState>) -> Response {
    let headers = state.sessions.clear();
    (headers, Redirect::to("/")).into_response()
}
