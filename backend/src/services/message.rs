//! Contact message service
//!
//! These handlers answer failures in the envelope style
//! (`{"success": false, "message": ...}`), unlike the user/blog surface.

use crate::error::ApiError;
use crate::repositories::{MessageRecord, MessageRepository, NewMessage};
use sqlx::PgPool;
use uuid::Uuid;
use wanderwords_shared::types::{ContactMessageResponse, CreateMessageRequest};
use wanderwords_shared::validation::is_valid_email;

/// Contact message service
pub struct MessageService;

impl MessageService {
    /// List all contact messages
    pub async fn list(pool: &PgPool) -> Result<Vec<ContactMessageResponse>, ApiError> {
        let messages = MessageRepository::list_all(pool).await?;
        Ok(messages.into_iter().map(Self::to_response).collect())
    }

    /// Create a contact message
    pub async fn create(
        pool: &PgPool,
        req: &CreateMessageRequest,
    ) -> Result<ContactMessageResponse, ApiError> {
        let (Some(email), Some(message)) = (req.email.as_deref(), req.message.as_deref()) else {
            return Err(ApiError::validation("Required inputs missing").enveloped());
        };
        if !is_valid_email(email) {
            return Err(ApiError::validation("Invalid email").enveloped());
        }

        let created = MessageRepository::create(
            pool,
            NewMessage {
                name: req.name.clone(),
                email: email.to_string(),
                message: message.to_string(),
            },
        )
        .await?;

        Ok(Self::to_response(created))
    }

    /// Mark a message as read; idempotent
    pub async fn mark_read(
        pool: &PgPool,
        message_id: &str,
    ) -> Result<ContactMessageResponse, ApiError> {
        let message_id = message_id
            .parse::<Uuid>()
            .map_err(|_| ApiError::validation("Invalid ID").enveloped())?;

        let updated = MessageRepository::mark_read(pool, message_id)
            .await?
            .ok_or_else(|| ApiError::not_found("No message found.").enveloped())?;

        Ok(Self::to_response(updated))
    }

    fn to_response(message: MessageRecord) -> ContactMessageResponse {
        ContactMessageResponse {
            id: message.id,
            name: message.name,
            email: message.email,
            message: message.message,
            is_read: message.is_read,
            created_at: message.created_at,
            updated_at: message.updated_at,
        }
    }
}
