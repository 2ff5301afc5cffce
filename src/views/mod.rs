//! Template rendering and view-models
//!
//! Handlers never touch HTML: they build one of the typed view-models below
//! and hand it to [`ViewEngine::render`]. Templates are compiled into the
//! binary, so neither the server nor the tests depend on a runtime asset
//! directory.

use crate::core::entry::JournalEntry;
use crate::core::error::AppError;
use axum::response::Html;
use serde::Serialize;
use tera::Tera;

const BASE: &str = include_str!("templates/base.html");
const INDEX: &str = include_str!("templates/index.html");
const DETAIL: &str = include_str!("templates/detail.html");
const CREATE: &str = include_str!("templates/create.html");
const EDIT: &str = include_str!("templates/edit.html");
const LOGIN: &str = include_str!("templates/login.html");

/// View-model for the home page: all entries, newest first.
#[derive(Debug, Serialize)]
pub struct IndexView {
    pub site_title: String,
    pub logged_in: bool,
    pub journals: Vec<JournalEntry>,
}

/// View-model for a single entry page.
#[derive(Debug, Serialize)]
pub struct DetailView {
    pub site_title: String,
    pub logged_in: bool,
    pub entry: JournalEntry,
}

/// View-model for the create and edit forms.
///
/// `entry` is `None` for the blank create form and `Some` for the
/// pre-filled edit form.
#[derive(Debug, Serialize)]
pub struct EntryFormView {
    pub site_title: String,
    pub logged_in: bool,
    pub csrf_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<JournalEntry>,
}

/// View-model for the login form.
#[derive(Debug, Serialize)]
pub struct LoginView {
    pub site_title: String,
    pub logged_in: bool,
    /// Message shown after a failed login, when configured.
    pub error: Option<String>,
}

/// Renders view-models through the embedded tera templates.
pub struct ViewEngine {
    tera: Tera,
}

impl ViewEngine {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", BASE),
            ("index.html", INDEX),
            ("detail.html", DETAIL),
            ("create.html", CREATE),
            ("edit.html", EDIT),
            ("login.html", LOGIN),
        ])?;
        Ok(Self { tera })
    }

    /// Render a template with the given view-model.
    pub fn render<T: Serialize>(&self, template: &str, model: &T) -> Result<Html<String>, AppError> {
        let context = tera::Context::from_serialize(model)?;
        Ok(Html(self.tera.render(template, &context)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ViewEngine {
        ViewEngine::new().expect("embedded templates must compile")
    }

    fn entry(id: i64, title: &str) -> JournalEntry {
        JournalEntry {
            id,
            title: title.to_string(),
            date: "April 05, 2024".to_string(),
            body: "Wrote some Rust.".to_string(),
        }
    }

    #[test]
    fn test_index_renders_entries() {
        let Html(html) = engine()
            .render(
                "index.html",
                &IndexView {
                    site_title: "My Journal".to_string(),
                    logged_in: false,
                    journals: vec![entry(2, "Second"), entry(1, "First")],
                },
            )
            .unwrap();

        assert!(html.contains("/journal/2"));
        assert!(html.contains("Second"));
        assert!(html.contains("/journal/1"));
        assert!(html.contains("April 05, 2024"));
    }

    #[test]
    fn test_index_empty_state() {
        let Html(html) = engine()
            .render(
                "index.html",
                &IndexView {
                    site_title: "My Journal".to_string(),
                    logged_in: false,
                    journals: vec![],
                },
            )
            .unwrap();

        assert!(html.contains("No entries yet."));
    }

    #[test]
    fn test_detail_shows_edit_link_only_when_logged_in() {
        let render = |logged_in| {
            let Html(html) = engine()
                .render(
                    "detail.html",
                    &DetailView {
                        site_title: "My Journal".to_string(),
                        logged_in,
                        entry: entry(3, "A day"),
                    },
                )
                .unwrap();
            html
        };

        assert!(render(true).contains("/journal/3/edit-entry"));
        assert!(!render(false).contains("edit-entry"));
    }

    #[test]
    fn test_create_form_embeds_csrf_token() {
        let Html(html) = engine()
            .render(
                "create.html",
                &EntryFormView {
                    site_title: "My Journal".to_string(),
                    logged_in: true,
                    csrf_token: "tok123".to_string(),
                    entry: None,
                },
            )
            .unwrap();

        assert!(html.contains(r#"name="csrf_token" value="tok123""#));
        assert!(html.contains(r#"action="/journal/new-entry""#));
    }

    #[test]
    fn test_edit_form_prefills_entry() {
        let Html(html) = engine()
            .render(
                "edit.html",
                &EntryFormView {
                    site_title: "My Journal".to_string(),
                    logged_in: true,
                    csrf_token: "tok123".to_string(),
                    entry: Some(entry(5, "Editable")),
                },
            )
            .unwrap();

        assert!(html.contains(r#"action="/journal/5/edit-entry""#));
        assert!(html.contains("Editable"));
        assert!(html.contains("Wrote some Rust."));
    }

    #[test]
    fn test_login_error_visibility() {
        let render = |error: Option<&str>| {
            let Html(html) = engine()
                .render(
                    "login.html",
                    &LoginView {
                        site_title: "My Journal".to_string(),
                        logged_in: false,
                        error: error.map(str::to_string),
                    },
                )
                .unwrap();
            html
        };

        assert!(render(Some("Invalid username or password.")).contains("Invalid username"));
        assert!(!render(None).contains("class=\"error\""));
    }

    #[test]
    fn test_html_is_escaped() {
        let mut evil = entry(1, "<script>alert(1)</script>");
        evil.body = "<b>bold</b>".to_string();
        let Html(html) = engine()
            .render(
                "detail.html",
                &DetailView {
                    site_title: "My Journal".to_string(),
                    logged_in: false,
                    entry: evil,
                },
            )
            .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b>bold</b>"));
    }
}
