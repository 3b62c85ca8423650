//! Authorization guards
//!
//! Composable middleware predicates over the optional [`Identity`]
//! extension. Each guard either lets the request through or short-circuits
//! with an error response; a route may stack several, and evaluation stops
//! at the first unmet guard.
//!
//! Status convention: 401 when no verified identity is attached, 403 when
//! an identity is present but lacks the required privilege. The login-state
//! guards (`require_anonymous`/`require_authenticated`) answer 403 in both
//! directions, matching the platform's published behavior.

use crate::auth::identity::Identity;
use crate::error::ApiError;
use axum::{extract::Request, middleware::Next, response::Response};

/// 401 body text
pub const AUTHENTICATION_FAILED: &str = "Authentication Failed. Please provide valid credentials.";
/// 403 body text
pub const PERMISSION_DENIED: &str = "You do not have permission to access this resource.";

fn not_authenticated() -> ApiError {
    ApiError::authentication(AUTHENTICATION_FAILED).enveloped()
}

fn not_permitted() -> ApiError {
    ApiError::authorization(PERMISSION_DENIED).enveloped()
}

/// Pass only requests carrying no identity (login, registration)
pub async fn require_anonymous(req: Request, next: Next) -> Result<Response, ApiError> {
    if req.extensions().get::<Identity>().is_some() {
        return Err(not_permitted());
    }
    Ok(next.run(req).await)
}

/// Pass only requests carrying a verified identity
pub async fn require_authenticated(req: Request, next: Next) -> Result<Response, ApiError> {
    if req.extensions().get::<Identity>().is_none() {
        return Err(not_permitted());
    }
    Ok(next.run(req).await)
}

/// Boolean-flag access control: pass only administrators
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    match req.extensions().get::<Identity>() {
        None => Err(not_authenticated()),
        Some(identity) if !identity.is_admin => Err(not_permitted()),
        Some(_) => Ok(next.run(req).await),
    }
}

/// Boolean-flag access control: pass only non-administrators
pub async fn forbid_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    match req.extensions().get::<Identity>() {
        None => Err(not_authenticated()),
        Some(identity) if identity.is_admin => Err(not_permitted()),
        Some(_) => Ok(next.run(req).await),
    }
}

/// Role-based access control: pass when the identity holds any allowed role.
///
/// Compose with a closure:
///
/// ```rust,ignore
/// use axum::middleware;
///
/// router.route_layer(middleware::from_fn(|req, next| {
///     require_role(&["editor", "moderator"], req, next)
/// }));
/// ```
pub async fn require_role(
    allowed: &'static [&'static str],
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match req.extensions().get::<Identity>() {
        None => Err(not_authenticated()),
        Some(identity) if !identity.has_any_role(allowed) => Err(not_permitted()),
        Some(_) => Ok(next.run(req).await),
    }
}

/// Role-based access control: pass when the identity holds none of the roles
pub async fn forbid_role(
    denied: &'static [&'static str],
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match req.extensions().get::<Identity>() {
        None => Err(not_authenticated()),
        Some(identity) if identity.has_any_role(denied) => Err(not_permitted()),
        Some(_) => Ok(next.run(req).await),
    }
}
