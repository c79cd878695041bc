//! Key service - issuing and rotating API keys.
//!
//! A key is 32 random bytes, hex-encoded. Only its SHA-256 digest reaches the
//! store; the plaintext is returned to the caller once.
//!
//! Neither operation retries. Store errors are returned unchanged so the
//! caller sees exactly what failed.

use sha2::{Digest, Sha256};

use crate::{
    models::api_key::IssuedKey,
    store::{KeyStore, StoreError},
};

/// Issue the first key for `owner`.
///
/// # Errors
///
/// Fails if the store refuses the insert, e.g. because the owner already
/// holds a key.
pub async fn issue(store: &dyn KeyStore, owner: &str) -> Result<IssuedKey, StoreError> {
    let key = generate_key();
    store.insert_key(owner, &hash_key(&key)).await?;

    tracing::info!(owner, "API key issued");

    Ok(IssuedKey {
        owner: owner.to_string(),
        key,
    })
}

/// Replace the key of `owner` with a new one.
///
/// The previous key stops authenticating as soon as the store has swapped
/// the hash. An owner without a key gets a fresh one. Two concurrent
/// regenerations race; the last write wins.
pub async fn regenerate(store: &dyn KeyStore, owner: &str) -> Result<IssuedKey, StoreError> {
    let key = generate_key();
    let key_hash = hash_key(&key);

    if store.replace_key(owner, &key_hash).await?.is_none() {
        tracing::info!(owner, "no API key to regenerate, issuing a new one");
        store.insert_key(owner, &key_hash).await?;
    } else {
        tracing::info!(owner, "API key regenerated");
    }

    Ok(IssuedKey {
        owner: owner.to_string(),
        key,
    })
}

/// Resolve a presented key to its owner.
pub async fn resolve_owner(store: &dyn KeyStore, key: &str) -> Result<Option<String>, StoreError> {
    let record = store.find_by_hash(&hash_key(key)).await?;
    Ok(record.map(|r| r.owner))
}

/// Generate cryptographically secure random key material.
///
/// # Output
///
/// 64 hex characters (32 random bytes)
pub fn generate_key() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

/// SHA-256 digest of a key, hex-encoded.
pub fn hash_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}
