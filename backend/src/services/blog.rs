//! Blog service: CRUD over posts and their nested comments
//!
//! Validation mirrors the platform's contract: the first violated rule
//! answers immediately. Ownership is enforced inline: a post may be
//! updated only by its poster, deleted by its poster or an admin, and a
//! comment may be mutated by its commenter or an admin.

use crate::auth::Identity;
use crate::error::ApiError;
use crate::repositories::{
    BlogRecord, BlogRepository, CommentRecord, NewBlog, NewComment, UpdateBlog,
};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;
use wanderwords_shared::types::{
    BlogResponse, CommentInput, CommentRequest, CommentResponse, CreateBlogRequest,
    UpdateBlogRequest,
};
use wanderwords_shared::validation::is_valid_email;

const NO_BLOG_FOUND: &str = "No blog found.";
const COMMENT_NOT_FOUND: &str = "Comment not found.";
const ACTION_FORBIDDEN: &str = "Action Forbidden";

/// Blog service
pub struct BlogService;

impl BlogService {
    /// List every blog with its comments
    pub async fn list(pool: &PgPool) -> Result<Vec<BlogResponse>, ApiError> {
        let blogs = BlogRepository::list_all(pool).await?;
        Self::assemble_all(pool, blogs).await
    }

    /// List the caller's blogs with their comments
    pub async fn list_own(pool: &PgPool, identity: &Identity) -> Result<Vec<BlogResponse>, ApiError> {
        let blogs = BlogRepository::list_by_poster(pool, identity.id).await?;
        Self::assemble_all(pool, blogs).await
    }

    /// Fetch one blog by id
    pub async fn get(pool: &PgPool, blog_id: &str) -> Result<BlogResponse, ApiError> {
        let blog_id = Self::parse_blog_id(blog_id)?;
        let blog = BlogRepository::find_by_id(pool, blog_id)
            .await?
            .ok_or_else(|| ApiError::not_found(NO_BLOG_FOUND))?;
        let comments = BlogRepository::comments_for(pool, blog.id).await?;
        Ok(Self::assemble(blog, comments))
    }

    /// Create a blog; poster fields default to the caller's identity
    pub async fn create(
        pool: &PgPool,
        identity: &Identity,
        req: &CreateBlogRequest,
    ) -> Result<BlogResponse, ApiError> {
        let Some(title) = req.title.as_deref() else {
            return Err(ApiError::validation("Required inputs missing"));
        };

        // Either poster field absent means both come from the identity
        let (poster_id, poster_email) = match (req.poster_id.as_deref(), req.poster_email.as_deref())
        {
            (Some(id), Some(email)) => {
                let id = id
                    .parse::<Uuid>()
                    .map_err(|_| ApiError::validation("Invalid posterId"))?;
                if !is_valid_email(email) {
                    return Err(ApiError::validation("Invalid posterEmail"));
                }
                (id, email.to_string())
            }
            _ => (identity.id, identity.email.clone()),
        };

        let comments = Self::parse_comment_inputs(req.comments.as_deref())?;

        let (blog, comments) = BlogRepository::create(
            pool,
            NewBlog {
                title: title.to_string(),
                poster_id,
                poster_email,
                content: req.content.clone(),
                comments,
            },
        )
        .await?;

        Ok(Self::assemble(blog, comments))
    }

    /// Update a blog; poster only
    pub async fn update(
        pool: &PgPool,
        identity: &Identity,
        blog_id: &str,
        req: &UpdateBlogRequest,
    ) -> Result<BlogResponse, ApiError> {
        let blog_id = Self::parse_blog_id(blog_id)?;
        let blog = BlogRepository::find_by_id(pool, blog_id)
            .await?
            .ok_or_else(|| ApiError::not_found(NO_BLOG_FOUND))?;

        let Some(title) = req.title.as_deref() else {
            return Err(ApiError::validation("Invalid title"));
        };
        let comments = Self::parse_comment_inputs(req.comments.as_deref())?;
        let comments = req.comments.as_ref().map(|_| comments);

        if blog.poster_id != identity.id {
            return Err(ApiError::validation(
                "You do not have permission to access this resource.",
            ));
        }

        let (blog, comments) = BlogRepository::update(
            pool,
            blog.id,
            UpdateBlog {
                title: title.to_string(),
                content: req.content.clone(),
                comments,
            },
        )
        .await?;

        Ok(Self::assemble(blog, comments))
    }

    /// Delete a blog; poster or admin
    pub async fn delete(
        pool: &PgPool,
        identity: &Identity,
        blog_id: &str,
    ) -> Result<BlogResponse, ApiError> {
        let blog_id = Self::parse_blog_id(blog_id)?;
        let blog = BlogRepository::find_by_id(pool, blog_id)
            .await?
            .ok_or_else(|| ApiError::not_found(NO_BLOG_FOUND))?;

        if !identity.is_admin && blog.poster_id != identity.id {
            return Err(ApiError::authorization(ACTION_FORBIDDEN));
        }

        // Capture the payload before the row disappears
        let comments = BlogRepository::comments_for(pool, blog.id).await?;
        BlogRepository::delete(pool, blog.id).await?;

        Ok(Self::assemble(blog, comments))
    }

    /// Append a comment; anonymous callers leave the commenter fields null
    pub async fn add_comment(
        pool: &PgPool,
        identity: Option<&Identity>,
        blog_id: &str,
        req: &CommentRequest,
    ) -> Result<BlogResponse, ApiError> {
        let Some(comment) = req.comment.as_deref() else {
            return Err(ApiError::validation("Required inputs missing"));
        };
        let blog_id = Self::parse_blog_id(blog_id)?;
        let blog = BlogRepository::find_by_id(pool, blog_id)
            .await?
            .ok_or_else(|| ApiError::not_found(NO_BLOG_FOUND))?;

        BlogRepository::add_comment(
            pool,
            blog.id,
            NewComment {
                commenter_id: identity.map(|i| i.id),
                commenter_email: identity.map(|i| i.email.clone()),
                comment: comment.to_string(),
            },
        )
        .await?;

        let comments = BlogRepository::comments_for(pool, blog.id).await?;
        Ok(Self::assemble(blog, comments))
    }

    /// Update a comment's text; commenter or admin
    pub async fn update_comment(
        pool: &PgPool,
        identity: &Identity,
        blog_id: &str,
        comment_id: &str,
        req: &CommentRequest,
    ) -> Result<BlogResponse, ApiError> {
        let Some(text) = req.comment.as_deref() else {
            return Err(ApiError::validation("Required inputs missing"));
        };
        let comment_id = comment_id
            .parse::<Uuid>()
            .map_err(|_| ApiError::not_found("No comment found."))?;
        let blog_id = Self::parse_blog_id(blog_id)?;

        let blog = BlogRepository::find_by_id(pool, blog_id)
            .await?
            .ok_or_else(|| ApiError::not_found(NO_BLOG_FOUND))?;
        let comment = BlogRepository::find_comment(pool, blog.id, comment_id)
            .await?
            .ok_or_else(|| ApiError::not_found(COMMENT_NOT_FOUND))?;

        if !identity.is_admin && comment.commenter_id != Some(identity.id) {
            return Err(ApiError::authorization(ACTION_FORBIDDEN));
        }

        BlogRepository::update_comment(pool, comment.id, text).await?;

        let comments = BlogRepository::comments_for(pool, blog.id).await?;
        Ok(Self::assemble(blog, comments))
    }

    /// Delete a comment; commenter or admin
    pub async fn delete_comment(
        pool: &PgPool,
        identity: &Identity,
        blog_id: &str,
        comment_id: &str,
    ) -> Result<BlogResponse, ApiError> {
        let blog_id = Self::parse_blog_id(blog_id)?;
        let comment_id = comment_id
            .parse::<Uuid>()
            .map_err(|_| ApiError::not_found(COMMENT_NOT_FOUND))?;

        let blog = BlogRepository::find_by_id(pool, blog_id)
            .await?
            .ok_or_else(|| ApiError::not_found(NO_BLOG_FOUND))?;
        let comment = BlogRepository::find_comment(pool, blog.id, comment_id)
            .await?
            .ok_or_else(|| ApiError::not_found(COMMENT_NOT_FOUND))?;

        if !identity.is_admin && comment.commenter_id != Some(identity.id) {
            return Err(ApiError::authorization(ACTION_FORBIDDEN));
        }

        BlogRepository::delete_comment(pool, comment.id).await?;

        let comments = BlogRepository::comments_for(pool, blog.id).await?;
        Ok(Self::assemble(blog, comments))
    }

    fn parse_blog_id(blog_id: &str) -> Result<Uuid, ApiError> {
        blog_id
            .parse::<Uuid>()
            .map_err(|_| ApiError::not_found(NO_BLOG_FOUND))
    }

    /// Validate inline comment payloads, normalizing commenter ids
    fn parse_comment_inputs(inputs: Option<&[CommentInput]>) -> Result<Vec<NewComment>, ApiError> {
        let Some(inputs) = inputs else {
            return Ok(Vec::new());
        };

        inputs
            .iter()
            .map(|input| {
                let commenter_id = input
                    .commenter_id
                    .parse::<Uuid>()
                    .map_err(|_| ApiError::validation("Invalid comments"))?;
                Ok(NewComment {
                    commenter_id: Some(commenter_id),
                    commenter_email: input.commenter_email.clone(),
                    comment: input.comment.clone(),
                })
            })
            .collect()
    }

    async fn assemble_all(
        pool: &PgPool,
        blogs: Vec<BlogRecord>,
    ) -> Result<Vec<BlogResponse>, ApiError> {
        let ids: Vec<Uuid> = blogs.iter().map(|b| b.id).collect();
        let mut by_blog: HashMap<Uuid, Vec<CommentRecord>> = HashMap::new();
        for comment in BlogRepository::comments_for_blogs(pool, &ids).await? {
            by_blog.entry(comment.blog_id).or_default().push(comment);
        }

        Ok(blogs
            .into_iter()
            .map(|blog| {
                let comments = by_blog.remove(&blog.id).unwrap_or_default();
                Self::assemble(blog, comments)
            })
            .collect())
    }

    fn assemble(blog: BlogRecord, comments: Vec<CommentRecord>) -> BlogResponse {
        BlogResponse {
            id: blog.id,
            title: blog.title,
            poster_id: blog.poster_id,
            poster_email: blog.poster_email,
            content: blog.content,
            comments: comments
                .into_iter()
                .map(|c| CommentResponse {
                    id: c.id,
                    commenter_id: c.commenter_id,
                    commenter_email: c.commenter_email,
                    comment: c.comment,
                    created_at: c.created_at,
                    updated_at: c.updated_at,
                })
                .collect(),
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}
