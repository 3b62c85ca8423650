//! Contact message repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Contact message record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRecord {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a contact message
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub name: Option<String>,
    pub email: String,
    pub message: String,
}

/// Contact message repository for database operations
pub struct MessageRepository;

impl MessageRepository {
    /// List all messages, oldest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<MessageRecord>> {
        let messages = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT id, name, email, message, is_read, created_at, updated_at
            FROM messages
            ORDER BY created_at
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(messages)
    }

    /// Create a contact message
    pub async fn create(pool: &PgPool, new: NewMessage) -> Result<MessageRecord> {
        let message = sqlx::query_as::<_, MessageRecord>(
            r#"
            INSERT INTO messages (name, email, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, message, is_read, created_at, updated_at
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.message)
        .fetch_one(pool)
        .await?;

        Ok(message)
    }

    /// Mark a message as read.
    ///
    /// Idempotent single-statement update; returns `None` when no such
    /// message exists.
    pub async fn mark_read(pool: &PgPool, id: Uuid) -> Result<Option<MessageRecord>> {
        let message = sqlx::query_as::<_, MessageRecord>(
            r#"
            UPDATE messages SET
                is_read = TRUE,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, message, is_read, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    // Covered by DB-backed integration tests under backend/tests/
    // Run with: cargo test -- --ignored
}
