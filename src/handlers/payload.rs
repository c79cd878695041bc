//! Request payload shape checks.
//!
//! Write requests carry a JSON object in the body. A payload passes only if
//! it is a non-empty object without `null` values or NUL characters that
//! deserializes into the verb's request struct (which rejects unknown
//! fields). Any failure becomes a 403 carrying the verb's shape message.
//!
//! NUL is refused because PostgreSQL text columns cannot store it.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Parse `body` into a non-empty JSON object.
///
/// Fields named in `ignored` are removed before any other check.
pub fn parse_object(
    body: &[u8],
    message: &'static str,
    ignored: &[&str],
) -> Result<Map<String, Value>, AppError> {
    let value: Value = serde_json::from_slice(body).map_err(|err| {
        tracing::debug!(error = %err, "payload is not valid JSON");
        AppError::InvalidPayload(message)
    })?;

    let Value::Object(mut object) = value else {
        return Err(AppError::InvalidPayload(message));
    };

    for field in ignored {
        object.remove(*field);
    }

    if object.is_empty() || object.values().any(|v| v.is_null() || contains_nul(v)) {
        return Err(AppError::InvalidPayload(message));
    }

    Ok(object)
}

fn contains_nul(value: &Value) -> bool {
    match value {
        Value::String(s) => s.contains('\0'),
        Value::Array(items) => items.iter().any(contains_nul),
        Value::Object(fields) => fields.values().any(contains_nul),
        _ => false,
    }
}

/// Deserialize a checked object into the request struct for the verb.
pub fn into_shape<T>(object: Map<String, Value>, message: &'static str) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    serde_json::from_value(Value::Object(object)).map_err(|err| {
        tracing::debug!(error = %err, "payload does not match required shape");
        AppError::InvalidPayload(message)
    })
}

/// [`parse_object`] followed by [`into_shape`].
pub fn parse<T>(body: &[u8], message: &'static str) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    into_shape(parse_object(body, message, &[])?, message)
}
