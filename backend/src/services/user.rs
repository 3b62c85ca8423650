//! User service for registration, login, and profile management

use crate::auth::{Identity, JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{UpdateUser, UserRecord, UserRepository};
use sqlx::PgPool;
use wanderwords_shared::types::{LoginRequest, RegisterRequest, UpdateUserRequest, UserResponse};
use wanderwords_shared::validation::{is_valid_email, is_valid_password, is_valid_username};

/// Generic login failure; identical for unknown email and bad password so
/// account existence never leaks.
const INVALID_CREDENTIALS: &str = "Access denied. Please provide valid credentials.";

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user
    pub async fn register(pool: &PgPool, req: &RegisterRequest) -> Result<(), ApiError> {
        let (Some(email), Some(password)) = (req.email.as_deref(), req.password.as_deref()) else {
            return Err(ApiError::validation("Required inputs missing"));
        };
        if !is_valid_email(email) {
            return Err(ApiError::validation("Invalid email"));
        }
        if !is_valid_password(password) {
            return Err(ApiError::validation("Invalid password"));
        }
        if let Some(username) = req.username.as_deref() {
            if !is_valid_username(username) {
                return Err(ApiError::validation("Invalid username"));
            }
        }

        if UserRepository::email_exists(pool, email).await? {
            return Err(ApiError::conflict("Email already registered"));
        }

        // Hash on the blocking thread pool (CPU-intensive)
        let password_hash = PasswordService::hash_async(password.to_string()).await?;

        UserRepository::create(pool, req.username.as_deref(), email, &password_hash).await?;

        Ok(())
    }

    /// Login with email and password, returning a bearer token
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtService,
        req: &LoginRequest,
    ) -> Result<String, ApiError> {
        let (Some(email), Some(password)) = (req.email.as_deref(), req.password.as_deref()) else {
            return Err(ApiError::validation("Required inputs missing"));
        };
        if !is_valid_email(email) {
            return Err(ApiError::validation("Invalid email"));
        }

        let user = UserRepository::find_by_email(pool, email)
            .await?
            .ok_or_else(|| ApiError::authentication(INVALID_CREDENTIALS))?;

        let valid =
            PasswordService::verify_async(password.to_string(), user.password_hash.clone()).await?;
        if !valid {
            return Err(ApiError::authentication(INVALID_CREDENTIALS));
        }

        let token = jwt.issue(&Self::identity_of(&user))?;
        Ok(token)
    }

    /// Fetch the caller's own user record
    pub async fn profile(pool: &PgPool, identity: &Identity) -> Result<UserResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, identity.id)
            .await?
            .ok_or_else(|| ApiError::not_found("User data not found."))?;

        Ok(Self::to_response(user))
    }

    /// Update the caller's own profile
    pub async fn update(
        pool: &PgPool,
        identity: &Identity,
        req: &UpdateUserRequest,
    ) -> Result<UserResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, identity.id)
            .await?
            .ok_or_else(|| ApiError::validation("User not found."))?;

        if let Some(email) = req.email.as_deref() {
            if !is_valid_email(email) {
                return Err(ApiError::validation("Invalid email"));
            }
        }
        if let Some(password) = req.password.as_deref() {
            if !is_valid_password(password) {
                return Err(ApiError::validation("Invalid password"));
            }
        }
        if let Some(username) = req.username.as_deref() {
            if !is_valid_username(username) {
                return Err(ApiError::validation("Invalid username"));
            }
        }

        let password_hash = match req.password.as_deref() {
            Some(password) => Some(PasswordService::hash_async(password.to_string()).await?),
            None => None,
        };

        let updated = UserRepository::update(
            pool,
            user.id,
            UpdateUser {
                username: req.username.clone(),
                email: req.email.clone(),
                password_hash,
            },
        )
        .await?;

        Ok(Self::to_response(updated))
    }

    /// The identity snapshot a token is issued over
    pub fn identity_of(user: &UserRecord) -> Identity {
        Identity {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            roles: user.roles.clone(),
        }
    }

    fn to_response(user: UserRecord) -> UserResponse {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            roles: user.roles,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
