//! Business logic services.
//!
//! Services contain logic shared between HTTP handlers and the CLI.

pub mod key_service;
