//! Comment Store
//!
//! Database operations over the `comments` table.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::error::{map_write_error, BackendError, BackendResult};
use crate::backend::posts;
use crate::shared::blog::{CommentResponse, CommentSummary, CreateCommentRequest, UserResponse};

const COMMENT_COLUMNS: &str = "id, content, post_id, author_id, created_at, updated_at";

const COMMENT_WITH_AUTHOR: &str = r#"
    SELECT c.id, c.content, c.post_id, c.author_id, c.created_at, c.updated_at,
           u.username AS author_username, u.email AS author_email,
           u.full_name AS author_full_name, u.bio AS author_bio,
           u.avatar_url AS author_avatar_url,
           u.created_at AS author_created_at, u.updated_at AS author_updated_at
    FROM comments c
    JOIN users u ON u.id = c.author_id
"#;

/// Comment row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentSummary {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            post_id: comment.post_id,
            author_id: comment.author_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct CommentAuthorRow {
    #[sqlx(flatten)]
    comment: Comment,
    author_username: String,
    author_email: String,
    author_full_name: String,
    author_bio: Option<String>,
    author_avatar_url: Option<String>,
    author_created_at: DateTime<Utc>,
    author_updated_at: DateTime<Utc>,
}

impl From<CommentAuthorRow> for CommentResponse {
    fn from(row: CommentAuthorRow) -> Self {
        let author = UserResponse {
            id: row.comment.author_id,
            username: row.author_username,
            email: row.author_email,
            full_name: row.author_full_name,
            bio: row.author_bio,
            avatar_url: row.author_avatar_url,
            created_at: row.author_created_at,
            updated_at: row.author_updated_at,
        };
        Self {
            comment: row.comment.into(),
            author,
        }
    }
}

/// Add a comment by `author_id` to a post
pub async fn create_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    fields: &CreateCommentRequest,
    author_id: Uuid,
) -> BackendResult<CommentResponse> {
    if !posts::db::exists(pool, post_id).await? {
        return Err(posts::db::post_not_found(post_id));
    }

    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO comments (id, content, post_id, author_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&fields.content)
    .bind(post_id)
    .bind(author_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    // The post can vanish between the check and the insert.
    .map_err(|e| map_write_error(e, "Comment already exists", "Post or author not found"))?;

    tracing::info!(comment_id = %id, post_id = %post_id, "comment created");

    sqlx::query_as::<_, CommentAuthorRow>(&format!("{COMMENT_WITH_AUTHOR} WHERE c.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(CommentResponse::from)
        .ok_or_else(|| comment_not_found(id))
}

/// Comments on a post, oldest first
pub async fn find_by_post_id(pool: &SqlitePool, post_id: Uuid) -> BackendResult<Vec<CommentResponse>> {
    if !posts::db::exists(pool, post_id).await? {
        return Err(posts::db::post_not_found(post_id));
    }
    Ok(list_for_posts(pool, &[post_id]).await?)
}

/// Comments with authors for a set of posts, oldest first
pub async fn list_for_posts(
    pool: &SqlitePool,
    post_ids: &[Uuid],
) -> Result<Vec<CommentResponse>, sqlx::Error> {
    if post_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(COMMENT_WITH_AUTHOR);
    query.push(" WHERE c.post_id IN (");
    let mut ids = query.separated(", ");
    for id in post_ids {
        ids.push_bind(*id);
    }
    ids.push_unseparated(") ORDER BY c.created_at ASC, c.rowid ASC");

    let rows = query
        .build_query_as::<CommentAuthorRow>()
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(CommentResponse::from).collect())
}

/// Comments written by a user, newest first
pub async fn list_by_author(
    pool: &SqlitePool,
    author_id: Uuid,
) -> Result<Vec<CommentSummary>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(&format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE author_id = ? ORDER BY created_at DESC, rowid DESC"
    ))
    .bind(author_id)
    .fetch_all(pool)
    .await?;
    Ok(comments.into_iter().map(CommentSummary::from).collect())
}

pub async fn find_row_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Delete a comment on behalf of `caller`
pub async fn delete_comment(pool: &SqlitePool, id: Uuid, caller: Uuid) -> BackendResult<()> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ? AND author_id = ?")
        .bind(id)
        .bind(caller)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return match find_row_by_id(pool, id).await? {
            Some(_) => Err(BackendError::forbidden(
                "You are not authorized to delete this comment",
            )),
            None => Err(comment_not_found(id)),
        };
    }

    tracing::info!(comment_id = %id, "comment deleted");
    Ok(())
}

fn comment_not_found(id: Uuid) -> BackendError {
    BackendError::not_found(format!("Comment with ID {id} not found"))
}
