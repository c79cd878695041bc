//! Data models representing stored records and API payloads.

/// API key authentication model
pub mod api_key;
/// Pizza records, payload shapes and filters
pub mod pizza;
