//! API request and response types
//!
//! The wire format is camelCase, matching the platform's published API
//! (`posterId`, `commenterEmail`, `isRead`, ...). Request bodies use
//! `Option` fields so handlers can distinguish a missing input from an
//! invalid one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Envelopes
// ============================================================================

/// Bare success/message envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

/// Login envelope carrying the bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub access: String,
}

/// Single-user envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

/// Blog list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogListEnvelope {
    pub success: bool,
    pub message: String,
    pub blogs: Vec<BlogResponse>,
}

/// Single-blog envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogEnvelope {
    pub success: bool,
    pub message: String,
    pub blog: BlogResponse,
}

/// Contact message list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageListEnvelope {
    pub success: bool,
    pub message: String,
    pub messages: Vec<ContactMessageResponse>,
}

/// Single contact message envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub success: bool,
    pub message: String,
    pub data: ContactMessageResponse,
}

// ============================================================================
// Users
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Profile update request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User payload. The password hash is never part of the wire type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: String,
    pub is_admin: bool,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Blogs
// ============================================================================

/// Blog creation request. `posterId`/`posterEmail` default to the caller's
/// identity when either is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub poster_id: Option<String>,
    pub poster_email: Option<String>,
    pub content: Option<String>,
    pub comments: Option<Vec<CommentInput>>,
}

/// Blog update request; `comments`, when present, replaces the whole list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub comments: Option<Vec<CommentInput>>,
}

/// A comment supplied inline with a blog create/update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInput {
    pub commenter_id: String,
    pub commenter_email: Option<String>,
    pub comment: String,
}

/// Comment create/update request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRequest {
    pub comment: Option<String>,
}

/// Blog payload with its embedded comment list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub poster_id: Uuid,
    pub poster_email: String,
    pub content: Option<String>,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment payload. Commenter fields are null for anonymous comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub commenter_id: Option<Uuid>,
    pub commenter_email: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Contact messages
// ============================================================================

/// Contact message creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Contact message payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blog_response_uses_camel_case_wire_names() {
        let blog = BlogResponse {
            id: Uuid::new_v4(),
            title: "T".to_string(),
            poster_id: Uuid::new_v4(),
            poster_email: "poster@example.com".to_string(),
            content: None,
            comments: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&blog).unwrap();
        assert!(json.get("posterId").is_some());
        assert!(json.get("posterEmail").is_some());
        assert!(json.get("poster_id").is_none());
    }

    #[test]
    fn message_response_exposes_is_read() {
        let msg = ContactMessageResponse {
            id: Uuid::new_v4(),
            name: None,
            email: "a@b.co".to_string(),
            message: "hi".to_string(),
            is_read: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["isRead"], serde_json::Value::Bool(true));
    }

    #[test]
    fn missing_request_fields_deserialize_to_none() {
        let req: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(req.username.is_none());
        assert!(req.email.is_none());
        assert!(req.password.is_none());
    }
}
