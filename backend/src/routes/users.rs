//! User routes: registration, login, and profile management
//!
//! Registration and login are gated on being anonymous; the profile
//! endpoints require a verified identity.

use crate::auth::{require_anonymous, require_authenticated, Identity};
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use wanderwords_shared::types::{
    LoginRequest, LoginResponse, RegisterRequest, StatusResponse, UpdateUserRequest, UserEnvelope,
};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    let anonymous = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route_layer(middleware::from_fn(require_anonymous));

    let authenticated = Router::new()
        .route("/", get(user_details).patch(update_user))
        .route_layer(middleware::from_fn(require_authenticated));

    anonymous.merge(authenticated)
}

/// POST /users/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<StatusResponse>)> {
    UserService::register(state.db(), &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse {
            success: true,
            message: "Registered Successfully".to_string(),
        }),
    ))
}

/// POST /users/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let access = UserService::login(state.db(), state.jwt(), &req).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "User access granted.".to_string(),
        access,
    }))
}

/// GET /users
async fn user_details(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Json<UserEnvelope>> {
    let user = UserService::profile(state.db(), &identity).await?;

    Ok(Json(UserEnvelope {
        success: true,
        message: "User data found.".to_string(),
        user,
    }))
}

/// PATCH /users
async fn update_user(
    State(state): State<AppState>,
    identity: Identity,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserEnvelope>> {
    let user = UserService::update(state.db(), &identity, &req).await?;

    Ok(Json(UserEnvelope {
        success: true,
        message: "User updated successfully.".to_string(),
        user,
    }))
}
