//! # Quill
//!
//! A minimal personal journaling web application: visitors browse a list of
//! journal entries and read entry details; an authenticated editor (one
//! shared credential) creates and edits entries; login and logout are
//! handled with a signed session cookie.
//!
//! ## Architecture
//!
//! - **`core`**: domain types — entries, the storage trait, the credential
//!   and session machinery, CSRF tokens, and the handler error type
//! - **`storage`**: `EntryStore` backends (in-memory)
//! - **`views`**: tera templates and the typed view-models handlers return
//! - **`server`**: axum handlers, the route table, and the serve loop
//! - **`config`**: YAML configuration with development defaults
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quill::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::default_config();
//!     quill::server::serve(config).await
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod views;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{AuthContext, Credential},
        csrf::CsrfGuard,
        entry::{DATE_FORMAT, EntryDraft, JournalEntry, display_date},
        error::{AppError, AppResult},
        session::SessionManager,
        store::EntryStore,
    };

    // === Config ===
    pub use crate::config::{AppConfig, ConfigError, SessionConfig};

    // === Storage ===
    pub use crate::storage::InMemoryEntryStore;

    // === Server ===
    pub use crate::server::{AppState, build_router, serve};

    // === Views ===
    pub use crate::views::ViewEngine;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use axum::Router;
}
