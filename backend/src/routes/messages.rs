//! Contact message routes
//!
//! Anyone may leave a message; reading the inbox and marking messages as
//! read are admin-only (boolean-flag access control).

use crate::auth::require_admin;
use crate::error::ApiResult;
use crate::services::MessageService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use wanderwords_shared::types::{CreateMessageRequest, MessageEnvelope, MessageListEnvelope};

/// Create message routes
pub fn message_routes() -> Router<AppState> {
    let public = Router::new().route("/", post(post_message));

    let admin = Router::new()
        .route("/", get(get_all_messages))
        .route("/:message_id", patch(mark_message_as_read))
        .route_layer(middleware::from_fn(require_admin));

    public.merge(admin)
}

/// GET /messages
async fn get_all_messages(State(state): State<AppState>) -> ApiResult<Json<MessageListEnvelope>> {
    let messages = MessageService::list(state.db()).await?;

    let message = if messages.is_empty() {
        "No messages found."
    } else {
        "Messages retrieved."
    };

    Ok(Json(MessageListEnvelope {
        success: true,
        message: message.to_string(),
        messages,
    }))
}

/// POST /messages
async fn post_message(
    State(state): State<AppState>,
    Json(req): Json<CreateMessageRequest>,
) -> ApiResult<(StatusCode, Json<MessageEnvelope>)> {
    let data = MessageService::create(state.db(), &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageEnvelope {
            success: true,
            message: "Message created.".to_string(),
            data,
        }),
    ))
}

/// PATCH /messages/:message_id
async fn mark_message_as_read(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> ApiResult<Json<MessageEnvelope>> {
    let data = MessageService::mark_read(state.db(), &message_id).await?;

    Ok(Json(MessageEnvelope {
        success: true,
        message: "Message updated successfully".to_string(),
        data,
    }))
}
