//! REST API client module for the lojinha store server.
//!
//! This module provides the `ApiClient` for communicating with the store
//! API: product catalog, user accounts, and order history.
//!
//! The API uses bearer token authentication; the token is read from the
//! `TokenStore` on every request and a 401 response clears it globally.

pub mod client;
pub mod error;

pub use client::{ApiClient, ApiResponse};
pub use error::ApiError;
