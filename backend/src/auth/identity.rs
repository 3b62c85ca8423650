//! The per-request identity
//!
//! A typed request-context value carrying the verified claims about the
//! requester, inserted into the request extensions by the decode middleware
//! and consumed by guards and handlers. It lives only for the duration of
//! the request.

use crate::auth::guards::AUTHENTICATION_FAILED;
use crate::auth::jwt::Claims;
use crate::error::ApiError;
use axum::http::request::Parts;
use std::convert::Infallible;
use uuid::Uuid;

/// Verified requester identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: String,
    pub is_admin: bool,
    pub roles: Vec<String>,
}

impl Identity {
    /// Build an identity from decoded token claims.
    ///
    /// Returns `None` when the subject is not a well-formed id; such a token
    /// is treated the same as an invalid one.
    pub fn from_claims(claims: &Claims) -> Option<Self> {
        let id = claims.sub.parse::<Uuid>().ok()?;
        Some(Self {
            id,
            username: claims.username.clone(),
            email: claims.email.clone(),
            is_admin: claims.is_admin,
            roles: claims.roles.clone(),
        })
    }

    /// True when the identity holds at least one of the given roles
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|r| self.roles.iter().any(|own| own == r))
    }
}

/// Extractor requiring a verified identity; rejects with 401 when absent
#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or_else(|| ApiError::authentication(AUTHENTICATION_FAILED).enveloped())
    }
}

/// Extractor yielding the identity when present, without rejecting
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Option<Identity>);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeIdentity(parts.extensions.get::<Identity>().cloned()))
    }
}
