//! Decode middleware
//!
//! Attaches a verified [`Identity`] to the request when the caller presents
//! a valid bearer token naming a user that still exists. The middleware
//! never rejects a request on its own: an absent, malformed, invalid, or
//! orphaned token simply leaves the identity unset and defers the access
//! decision to the downstream guards. A storage failure during the user
//! lookup is the one fatal case and propagates as a 500.

use crate::auth::identity::Identity;
use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Decode the bearer token and attach the identity, if any
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    if let Some(identity) = resolve_identity(&state, header.as_deref()).await? {
        req.extensions_mut().insert(identity);
    }

    Ok(next.run(req).await)
}

/// Resolve an authorization header value to a verified identity.
///
/// `Ok(None)` covers every non-fatal failure: no header, no `Bearer `
/// prefix, a header shorter than 8 characters, a bad signature, an expired
/// token, a malformed subject, or a user that no longer exists.
async fn resolve_identity(
    state: &AppState,
    header: Option<&str>,
) -> Result<Option<Identity>, ApiError> {
    let Some(raw) = header else {
        return Ok(None);
    };
    if raw.len() < 8 {
        debug!("No token found, proceeding unauthenticated");
        return Ok(None);
    }
    let Some(token) = raw.strip_prefix("Bearer ") else {
        debug!("No token found, proceeding unauthenticated");
        return Ok(None);
    };

    let claims = match state.jwt().verify(token) {
        Ok(claims) => claims,
        Err(err) => {
            debug!("Token verification failed: {}", err);
            return Ok(None);
        }
    };

    let Some(identity) = Identity::from_claims(&claims) else {
        debug!("Token subject is not a well-formed user id");
        return Ok(None);
    };

    // Fresh existence check: tokens for deleted accounts carry no identity.
    // A lookup error here is a storage fault, not an auth outcome.
    match UserRepository::find_by_id(state.db(), identity.id).await? {
        Some(_) => Ok(Some(identity)),
        None => {
            debug!(user_id = %identity.id, "Token subject no longer exists");
            Ok(None)
        }
    }
}
