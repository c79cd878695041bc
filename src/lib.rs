//! Pizza ordering API.
//!
//! A REST-like CRUD API over pizza records, secured by per-owner API keys.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: [`store::KeyStore`] / [`store::PizzaStore`] traits, backed by
//!   PostgreSQL via sqlx in production and by memory in tests
//! - **Authentication**: `X-API-Key` header, stored as SHA-256 hashes
//! - **Format**: JSON requests/responses with permissive CORS

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
