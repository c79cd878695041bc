//! API Key model for authentication.
//!
//! Every owner holds exactly one API key. Keys are stored as SHA-256 hashes,
//! so the plaintext is only ever seen when it is issued or regenerated.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents an API key record from the key store.
///
/// # Database Table
///
/// Maps to the `api_keys` table with columns:
/// - `id`: Unique identifier (UUID)
/// - `owner`: User identifier the key belongs to (unique)
/// - `key_hash`: SHA-256 hash of the actual API key (unique)
/// - `created_at`: When the key was first issued
/// - `updated_at`: When the key was last regenerated
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKey {
    /// Unique identifier for this API key record
    pub id: Uuid,

    /// User identifier that owns this key
    pub owner: String,

    /// SHA-256 hash of the actual API key (64 hex characters)
    ///
    /// When a request comes in with `X-API-Key: abc123`, we:
    /// 1. Hash "abc123" with SHA-256
    /// 2. Look up this hash in the key store
    /// 3. If found, the request acts on behalf of `owner`
    pub key_hash: String,

    /// Timestamp when this key record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last regeneration
    ///
    /// Regeneration replaces `key_hash` in place; no history is kept.
    pub updated_at: DateTime<Utc>,
}

/// A freshly issued (or regenerated) key.
///
/// This is the only place the plaintext key exists. It is handed back to the
/// caller once and never stored.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedKey {
    /// Owner the key was issued for
    pub owner: String,

    /// Plaintext key (64 hex characters)
    pub key: String,
}
