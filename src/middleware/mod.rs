//! HTTP middleware components.
//!
//! Middleware run before route handlers and may short-circuit a request
//! (pre-flight answers, unauthorized callers).

/// API key authentication middleware
pub mod auth;
/// CORS headers and pre-flight handling
pub mod cors;
