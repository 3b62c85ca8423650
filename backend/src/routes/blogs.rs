//! Blog routes, including the nested comment surface
//!
//! Reads and comment creation are public (a comment simply records no
//! commenter when the caller is anonymous); every mutation of a blog or an
//! existing comment requires a verified identity, with ownership enforced
//! in the service.

use crate::auth::{require_authenticated, Identity, MaybeIdentity};
use crate::error::ApiResult;
use crate::services::BlogService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use wanderwords_shared::types::{
    BlogEnvelope, BlogListEnvelope, CommentRequest, CreateBlogRequest, UpdateBlogRequest,
};

/// Create blog routes
pub fn blog_routes() -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_blogs))
        .route("/:blog_id", get(get_blog))
        .route("/:blog_id/comments", post(post_comment));

    let authenticated = Router::new()
        .route("/own", get(get_own_blogs))
        .route("/", post(create_blog))
        .route("/:blog_id", patch(update_blog).delete(delete_blog))
        .route(
            "/:blog_id/comments/:comment_id",
            patch(update_comment).delete(delete_comment),
        )
        .route_layer(middleware::from_fn(require_authenticated));

    public.merge(authenticated)
}

fn list_envelope(blogs: Vec<wanderwords_shared::types::BlogResponse>) -> BlogListEnvelope {
    let message = if blogs.is_empty() {
        "No blogs found."
    } else {
        "Blogs retrieved."
    };
    BlogListEnvelope {
        success: true,
        message: message.to_string(),
        blogs,
    }
}

/// GET /blogs
async fn list_blogs(State(state): State<AppState>) -> ApiResult<Json<BlogListEnvelope>> {
    let blogs = BlogService::list(state.db()).await?;
    Ok(Json(list_envelope(blogs)))
}

/// GET /blogs/own
async fn get_own_blogs(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Json<BlogListEnvelope>> {
    let blogs = BlogService::list_own(state.db(), &identity).await?;
    Ok(Json(list_envelope(blogs)))
}

/// GET /blogs/:blog_id
async fn get_blog(
    State(state): State<AppState>,
    Path(blog_id): Path<String>,
) -> ApiResult<Json<BlogEnvelope>> {
    let blog = BlogService::get(state.db(), &blog_id).await?;

    Ok(Json(BlogEnvelope {
        success: true,
        message: "Blog retrieved.".to_string(),
        blog,
    }))
}

/// POST /blogs
async fn create_blog(
    State(state): State<AppState>,
    identity: Identity,
    Json(req): Json<CreateBlogRequest>,
) -> ApiResult<(StatusCode, Json<BlogEnvelope>)> {
    let blog = BlogService::create(state.db(), &identity, &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(BlogEnvelope {
            success: true,
            message: "Blog created.".to_string(),
            blog,
        }),
    ))
}

/// PATCH /blogs/:blog_id
async fn update_blog(
    State(state): State<AppState>,
    identity: Identity,
    Path(blog_id): Path<String>,
    Json(req): Json<UpdateBlogRequest>,
) -> ApiResult<Json<BlogEnvelope>> {
    let blog = BlogService::update(state.db(), &identity, &blog_id, &req).await?;

    Ok(Json(BlogEnvelope {
        success: true,
        message: "Blog updated successfully".to_string(),
        blog,
    }))
}

/// DELETE /blogs/:blog_id
async fn delete_blog(
    State(state): State<AppState>,
    identity: Identity,
    Path(blog_id): Path<String>,
) -> ApiResult<Json<BlogEnvelope>> {
    let blog = BlogService::delete(state.db(), &identity, &blog_id).await?;

    Ok(Json(BlogEnvelope {
        success: true,
        message: "Blog deleted successfully".to_string(),
        blog,
    }))
}

/// POST /blogs/:blog_id/comments
async fn post_comment(
    State(state): State<AppState>,
    MaybeIdentity(identity): MaybeIdentity,
    Path(blog_id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> ApiResult<(StatusCode, Json<BlogEnvelope>)> {
    let blog = BlogService::add_comment(state.db(), identity.as_ref(), &blog_id, &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(BlogEnvelope {
            success: true,
            message: "Comment added.".to_string(),
            blog,
        }),
    ))
}

/// PATCH /blogs/:blog_id/comments/:comment_id
async fn update_comment(
    State(state): State<AppState>,
    identity: Identity,
    Path((blog_id, comment_id)): Path<(String, String)>,
    Json(req): Json<CommentRequest>,
) -> ApiResult<Json<BlogEnvelope>> {
    let blog =
        BlogService::update_comment(state.db(), &identity, &blog_id, &comment_id, &req).await?;

    Ok(Json(BlogEnvelope {
        success: true,
        message: "Comment updated.".to_string(),
        blog,
    }))
}

/// DELETE /blogs/:blog_id/comments/:comment_id
async fn delete_comment(
    State(state): State<AppState>,
    identity: Identity,
    Path((blog_id, comment_id)): Path<(String, String)>,
) -> ApiResult<Json<BlogEnvelope>> {
    let blog = BlogService::delete_comment(state.db(), &identity, &blog_id, &comment_id).await?;

    Ok(Json(BlogEnvelope {
        success: true,
        message: "Comment deleted successfully".to_string(),
        blog,
    }))
}
