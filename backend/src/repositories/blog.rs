//! Blog and comment repository for database operations
//!
//! Comments live in their own table so that appending one is a single
//! `INSERT`; concurrent appends to the same post cannot overwrite each
//! other. Whole-list replacement (blog update with a `comments` payload)
//! runs inside one transaction.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Blog record from database (comments are fetched separately)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogRecord {
    pub id: Uuid,
    pub title: String,
    pub poster_id: Uuid,
    pub poster_email: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRecord {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub commenter_id: Option<Uuid>,
    pub commenter_email: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a blog
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub poster_id: Uuid,
    pub poster_email: String,
    pub content: Option<String>,
    pub comments: Vec<NewComment>,
}

/// Input for creating a comment
#[derive(Debug, Clone)]
pub struct NewComment {
    pub commenter_id: Option<Uuid>,
    pub commenter_email: Option<String>,
    pub comment: String,
}

/// Input for updating a blog; `comments`, when present, replaces the list
#[derive(Debug, Clone)]
pub struct UpdateBlog {
    pub title: String,
    pub content: Option<String>,
    pub comments: Option<Vec<NewComment>>,
}

/// Blog repository for database operations
pub struct BlogRepository;

impl BlogRepository {
    /// List all blogs, oldest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<BlogRecord>> {
        let blogs = sqlx::query_as::<_, BlogRecord>(
            r#"
            SELECT id, title, poster_id, poster_email, content, created_at, updated_at
            FROM blogs
            ORDER BY created_at
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(blogs)
    }

    /// List blogs posted by the given user, oldest first
    pub async fn list_by_poster(pool: &PgPool, poster_id: Uuid) -> Result<Vec<BlogRecord>> {
        let blogs = sqlx::query_as::<_, BlogRecord>(
            r#"
            SELECT id, title, poster_id, poster_email, content, created_at, updated_at
            FROM blogs
            WHERE poster_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(poster_id)
        .fetch_all(pool)
        .await?;

        Ok(blogs)
    }

    /// Find blog by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<BlogRecord>> {
        let blog = sqlx::query_as::<_, BlogRecord>(
            r#"
            SELECT id, title, poster_id, poster_email, content, created_at, updated_at
            FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(blog)
    }

    /// Create a blog and any seed comments in one transaction
    pub async fn create(pool: &PgPool, new: NewBlog) -> Result<(BlogRecord, Vec<CommentRecord>)> {
        let mut tx = pool.begin().await?;

        let blog = sqlx::query_as::<_, BlogRecord>(
            r#"
            INSERT INTO blogs (title, poster_id, poster_email, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, poster_id, poster_email, content, created_at, updated_at
            "#,
        )
        .bind(&new.title)
        .bind(new.poster_id)
        .bind(&new.poster_email)
        .bind(&new.content)
        .fetch_one(&mut *tx)
        .await?;

        let mut comments = Vec::with_capacity(new.comments.len());
        for comment in &new.comments {
            comments.push(Self::insert_comment(&mut *tx, blog.id, comment).await?);
        }

        tx.commit().await?;

        Ok((blog, comments))
    }

    /// Update a blog; a `comments` payload replaces the full list
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: UpdateBlog,
    ) -> Result<(BlogRecord, Vec<CommentRecord>)> {
        let mut tx = pool.begin().await?;

        let blog = sqlx::query_as::<_, BlogRecord>(
            r#"
            UPDATE blogs SET
                title = $2,
                content = COALESCE($3, content),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, poster_id, poster_email, content, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&updates.title)
        .bind(&updates.content)
        .fetch_one(&mut *tx)
        .await?;

        let comments = match updates.comments {
            Some(replacement) => {
                sqlx::query("DELETE FROM comments WHERE blog_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;

                let mut inserted = Vec::with_capacity(replacement.len());
                for comment in &replacement {
                    inserted.push(Self::insert_comment(&mut *tx, id, comment).await?);
                }
                inserted
            }
            None => Self::comments_for(&mut *tx, id).await?,
        };

        tx.commit().await?;

        Ok((blog, comments))
    }

    /// Delete a blog; its comments go with it (ON DELETE CASCADE)
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Append a comment to a blog.
    ///
    /// A single `INSERT`, atomic at the store level; the existing comment
    /// list is never read in the write path.
    pub async fn add_comment(
        pool: &PgPool,
        blog_id: Uuid,
        comment: NewComment,
    ) -> Result<CommentRecord> {
        Self::insert_comment(pool, blog_id, &comment).await
    }

    /// List a blog's comments, oldest first
    pub async fn comments_for<'e, E>(executor: E, blog_id: Uuid) -> Result<Vec<CommentRecord>>
    where
        E: PgExecutor<'e>,
    {
        let comments = sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT id, blog_id, commenter_id, commenter_email, comment, created_at, updated_at
            FROM comments
            WHERE blog_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(blog_id)
        .fetch_all(executor)
        .await?;

        Ok(comments)
    }

    /// List comments for a set of blogs, oldest first
    pub async fn comments_for_blogs(pool: &PgPool, blog_ids: &[Uuid]) -> Result<Vec<CommentRecord>> {
        let comments = sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT id, blog_id, commenter_id, commenter_email, comment, created_at, updated_at
            FROM comments
            WHERE blog_id = ANY($1)
            ORDER BY created_at
            "#,
        )
        .bind(blog_ids)
        .fetch_all(pool)
        .await?;

        Ok(comments)
    }

    /// Find one comment within a blog
    pub async fn find_comment(
        pool: &PgPool,
        blog_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Option<CommentRecord>> {
        let comment = sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT id, blog_id, commenter_id, commenter_email, comment, created_at, updated_at
            FROM comments
            WHERE id = $1 AND blog_id = $2
            "#,
        )
        .bind(comment_id)
        .bind(blog_id)
        .fetch_optional(pool)
        .await?;

        Ok(comment)
    }

    /// Update a comment's text
    pub async fn update_comment(
        pool: &PgPool,
        comment_id: Uuid,
        text: &str,
    ) -> Result<CommentRecord> {
        let comment = sqlx::query_as::<_, CommentRecord>(
            r#"
            UPDATE comments SET
                comment = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, blog_id, commenter_id, commenter_email, comment, created_at, updated_at
            "#,
        )
        .bind(comment_id)
        .bind(text)
        .fetch_one(pool)
        .await?;

        Ok(comment)
    }

    /// Delete a comment
    pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    async fn insert_comment<'e, E>(
        executor: E,
        blog_id: Uuid,
        comment: &NewComment,
    ) -> Result<CommentRecord>
    where
        E: PgExecutor<'e>,
    {
        let comment = sqlx::query_as::<_, CommentRecord>(
            r#"
            INSERT INTO comments (blog_id, commenter_id, commenter_email, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, blog_id, commenter_id, commenter_email, comment, created_at, updated_at
            "#,
        )
        .bind(blog_id)
        .bind(comment.commenter_id)
        .bind(&comment.commenter_email)
        .bind(&comment.comment)
        .fetch_one(executor)
        .await?;

        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    // Covered by DB-backed integration tests under backend/tests/
    // Run with: cargo test -- --ignored
}
