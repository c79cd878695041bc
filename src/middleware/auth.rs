//! API key authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the API key from the `X-API-Key` header
//! 2. Hash it and resolve the owner through the key store
//! 3. Inject the owner into the request
//! 4. Reject unknown or missing keys with HTTP 401

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, services::key_service, state::AppState};

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Authentication context attached to authenticated requests.
///
/// Inserted into the request's extension map; handlers extract it with
/// `Extension<AuthContext>` to scope every store call to the caller.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User identifier that owns the presented key
    pub owner: String,
}

/// API key authentication middleware function.
///
/// # Headers
///
/// ```text
/// X-API-Key: 3f9a...c01d
/// ```
///
/// There is no expiry and no scope: a valid key grants full access to every
/// pizza of its owner.
///
/// # Returns
///
/// - `Ok(Response)` if authenticated successfully (calls next handler)
/// - `Err(AppError::InvalidApiKey)` if authentication fails (returns 401)
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            tracing::debug!("request without API key");
            AppError::InvalidApiKey
        })?;

    let owner = key_service::resolve_owner(state.keys.as_ref(), api_key)
        .await?
        .ok_or_else(|| {
            tracing::debug!("unknown API key presented");
            AppError::InvalidApiKey
        })?;

    request.extensions_mut().insert(AuthContext { owner });

    Ok(next.run(request).await)
}
