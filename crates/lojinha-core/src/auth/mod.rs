//! Authentication module for managing the user session and credential.
//!
//! This module provides:
//! - `TokenStore`: durable single-credential persistence
//! - `SessionManager`: authenticated/unauthenticated state machine
//!
//! The credential is persisted to disk and re-read on every API request,
//! so a cleared token takes effect on the very next call.

pub mod session;
pub mod store;

pub use session::{AuthUser, SessionManager, SessionState};
pub use store::{StoreError, TokenStore};
