//! Core library for the lojinha store client.
//!
//! This crate provides everything the client surfaces share:
//! - `ApiClient`: authenticated REST dispatch with bearer-token injection
//! - `TokenStore`: durable persistence for the auth credential
//! - `SessionManager`: login/logout state machine
//! - `EventBus`: in-process logout notifications
//! - Data models for products, orders, and users

pub mod api;
pub mod auth;
pub mod config;
pub mod events;
pub mod models;

pub use api::{ApiClient, ApiError, ApiResponse};
pub use auth::{AuthUser, SessionManager, SessionState, StoreError, TokenStore};
pub use config::Config;
pub use events::{EventBus, SessionEvent, Subscription};
