//! HTTP request handlers (route handlers).
//!
//! Each handler receives the authenticated owner and the request contents,
//! performs the store operation and returns a JSON response or an
//! [`AppError`](crate::error::AppError).

/// Health check endpoint
pub mod health;
/// Payload shape validation shared by the write handlers
pub mod payload;
/// Pizza resource endpoints
pub mod pizza;
