//! Data models for the store API wire format.
//!
//! All types use camelCase field names on the wire, matching the server:
//!
//! - `Product`: catalog entries with stock and optional image
//! - `Order`, `OrderItem`: purchase history
//! - `User`, `RegisterRequest`, `LoginRequest`, `LoginResponse`: accounts

pub mod order;
pub mod product;
pub mod user;

pub use order::{Order, OrderItem};
pub use product::Product;
pub use user::{LoginRequest, LoginResponse, RegisterRequest, User};
