//! Core domain types: entries, storage seam, authentication, sessions,
//! CSRF tokens, and the handler error type.

pub mod auth;
pub mod csrf;
pub mod entry;
pub mod error;
pub mod session;
pub mod store;

pub use auth::{AuthContext, Credential};
pub use csrf::CsrfGuard;
pub use entry::{EntryDraft, JournalEntry};
pub use error::{AppError, AppResult, ErrorResponse};
pub use session::SessionManager;
pub use store::EntryStore;
