//! Post Store
//!
//! Database operations over the `posts` table. The author of a post is fixed
//! at creation; only the author may update or delete it. Ownership-checked
//! writes and like toggles are single conditional statements, so a concurrent
//! writer can never slip between the check and the write.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::comments;
use crate::backend::error::{map_write_error, BackendError, BackendResult};
use crate::shared::blog::{
    CreatePostRequest, PageParams, Paginated, PostResponse, PostSummary, UpdatePostRequest,
    UserResponse,
};

const POST_COLUMNS: &str =
    "id, title, content, image_url, likes_count, author_id, created_at, updated_at";

/// Post joined with its author
const POST_WITH_AUTHOR: &str = r#"
    SELECT p.id, p.title, p.content, p.image_url, p.likes_count, p.author_id,
           p.created_at, p.updated_at,
           u.username AS author_username, u.email AS author_email,
           u.full_name AS author_full_name, u.bio AS author_bio,
           u.avatar_url AS author_avatar_url,
           u.created_at AS author_created_at, u.updated_at AS author_updated_at
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

/// Post row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    /// Never negative (CHECK constraint)
    pub likes_count: i64,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            likes_count: post.likes_count,
            author_id: post.author_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Row produced by `POST_WITH_AUTHOR`
#[derive(Debug, Clone, sqlx::FromRow)]
struct PostAuthorRow {
    #[sqlx(flatten)]
    post: Post,
    author_username: String,
    author_email: String,
    author_full_name: String,
    author_bio: Option<String>,
    author_avatar_url: Option<String>,
    author_created_at: DateTime<Utc>,
    author_updated_at: DateTime<Utc>,
}

impl PostAuthorRow {
    fn into_parts(self) -> (PostSummary, UserResponse) {
        let author = UserResponse {
            id: self.post.author_id,
            username: self.author_username,
            email: self.author_email,
            full_name: self.author_full_name,
            bio: self.author_bio,
            avatar_url: self.author_avatar_url,
            created_at: self.author_created_at,
            updated_at: self.author_updated_at,
        };
        (self.post.into(), author)
    }
}

/// Create a post owned by `author_id`
pub async fn create_post(
    pool: &SqlitePool,
    fields: &CreatePostRequest,
    author_id: Uuid,
) -> BackendResult<PostResponse> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO posts (id, title, content, image_url, likes_count, author_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, 0, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&fields.title)
    .bind(&fields.content)
    .bind(&fields.image_url)
    .bind(author_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| map_write_error(e, "Post already exists", "Author not found"))?;

    tracing::info!(post_id = %id, author_id = %author_id, "post created");
    find_by_id(pool, id).await
}

/// List posts newest first, each with its author and comments
pub async fn find_all(pool: &SqlitePool, params: &PageParams) -> BackendResult<Paginated<PostResponse>> {
    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await?;

    let rows = sqlx::query_as::<_, PostAuthorRow>(&format!(
        "{POST_WITH_AUTHOR} ORDER BY p.created_at DESC, p.rowid DESC LIMIT ? OFFSET ?"
    ))
    .bind(params.limit())
    .bind(params.offset())
    .fetch_all(pool)
    .await?;

    let post_ids: Vec<Uuid> = rows.iter().map(|row| row.post.id).collect();
    let mut comments_by_post: HashMap<Uuid, Vec<_>> = HashMap::new();
    for comment in comments::db::list_for_posts(pool, &post_ids).await? {
        comments_by_post
            .entry(comment.comment.post_id)
            .or_default()
            .push(comment);
    }

    let data = rows
        .into_iter()
        .map(|row| {
            let (post, author) = row.into_parts();
            let comments = comments_by_post.remove(&post.id).unwrap_or_default();
            PostResponse {
                post,
                author,
                comments,
            }
        })
        .collect();

    Ok(Paginated::new(data, u64::try_from(total).unwrap_or(0), params))
}

/// Get a post with its author and its comments (with their authors)
pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> BackendResult<PostResponse> {
    let row = sqlx::query_as::<_, PostAuthorRow>(&format!("{POST_WITH_AUTHOR} WHERE p.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| post_not_found(id))?;

    let (post, author) = row.into_parts();
    let comments = comments::db::list_for_posts(pool, &[id]).await?;

    Ok(PostResponse {
        post,
        author,
        comments,
    })
}

/// Posts written by a user, newest first
pub async fn list_by_author(pool: &SqlitePool, author_id: Uuid) -> Result<Vec<PostSummary>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE author_id = ? ORDER BY created_at DESC, rowid DESC"
    ))
    .bind(author_id)
    .fetch_all(pool)
    .await?;
    Ok(posts.into_iter().map(PostSummary::from).collect())
}

/// Apply a partial update on behalf of `caller`
///
/// Fails with `NotFound` when the post is absent and with `Forbidden` when
/// the caller is not its author.
pub async fn update_post(
    pool: &SqlitePool,
    id: Uuid,
    changes: &UpdatePostRequest,
    caller: Uuid,
) -> BackendResult<PostResponse> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET title = COALESCE(?, title),
            content = COALESCE(?, content),
            image_url = COALESCE(?, image_url),
            updated_at = ?
        WHERE id = ? AND author_id = ?
        "#,
    )
    .bind(&changes.title)
    .bind(&changes.content)
    .bind(&changes.image_url)
    .bind(Utc::now())
    .bind(id)
    .bind(caller)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(explain_rejected_write(pool, id, "update").await);
    }

    tracing::info!(post_id = %id, "post updated");
    find_by_id(pool, id).await
}

/// Delete a post on behalf of `caller`; its comments go with it
pub async fn delete_post(pool: &SqlitePool, id: Uuid, caller: Uuid) -> BackendResult<()> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ? AND author_id = ?")
        .bind(id)
        .bind(caller)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(explain_rejected_write(pool, id, "delete").await);
    }

    tracing::info!(post_id = %id, "post deleted");
    Ok(())
}

/// Add or remove one like
///
/// Likes are a bare counter: nothing records who liked what, so repeated
/// likes keep counting up and an unlike is not tied to an earlier like.
/// Fails with `BadRequest` when an unlike would take the counter below zero.
pub async fn toggle_like(pool: &SqlitePool, id: Uuid, increment: bool) -> BackendResult<PostResponse> {
    let statement = if increment {
        "UPDATE posts SET likes_count = likes_count + 1, updated_at = ? WHERE id = ?"
    } else {
        "UPDATE posts SET likes_count = likes_count - 1, updated_at = ? WHERE id = ? AND likes_count > 0"
    };

    let result = sqlx::query(statement)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        if !exists(pool, id).await? {
            return Err(post_not_found(id));
        }
        return Err(BackendError::bad_request("Cannot unlike post that is not liked"));
    }

    find_by_id(pool, id).await
}

/// Whether a post row exists
pub async fn exists(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM posts WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Work out why a conditional write touched no rows
async fn explain_rejected_write(pool: &SqlitePool, id: Uuid, action: &str) -> BackendError {
    match exists(pool, id).await {
        Ok(true) => BackendError::forbidden(format!("You are not authorized to {action} this post")),
        Ok(false) => post_not_found(id),
        Err(e) => BackendError::Database(e),
    }
}

pub(crate) fn post_not_found(id: Uuid) -> BackendError {
    BackendError::not_found(format!("Post with ID {id} not found"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::backend::users::db::tests::{registration, test_hasher, test_pool};
    use crate::backend::users::db::{create_user, delete_user};
    use crate::shared::blog::CreateCommentRequest;

    pub(crate) fn draft(title: &str) -> CreatePostRequest {
        CreatePostRequest {
            title: title.to_string(),
            content: "Some content that is long enough".to_string(),
            image_url: None,
        }
    }

    async fn author(pool: &SqlitePool, name: &str) -> Uuid {
        create_user(pool, &test_hasher(), &registration(name)).await.unwrap().id
    }

    #[tokio::test]
    async fn test_create_post_starts_with_zero_likes() {
        let pool = test_pool().await;
        let alice = author(&pool, "alice").await;

        let post = create_post(&pool, &draft("First post"), alice).await.unwrap();
        assert_eq!(post.post.likes_count, 0);
        assert_eq!(post.author.id, alice);
        assert!(post.comments.is_empty());
    }

    #[tokio::test]
    async fn test_create_post_for_missing_author() {
        let pool = test_pool().await;
        let err = create_post(&pool, &draft("Orphan post"), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_find_all_pagination() {
        let pool = test_pool().await;
        let alice = author(&pool, "alice").await;
        for i in 1..=25 {
            create_post(&pool, &draft(&format!("Post number {i}")), alice)
                .await
                .unwrap();
        }

        let page = find_all(&pool, &PageParams::new(2, 10)).await.unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.data.len(), 10);

        // Newest first: page 2 holds the 11th to 20th newest posts.
        let titles: Vec<String> = page.data.iter().map(|p| p.post.title.clone()).collect();
        let expected: Vec<String> = (6..=15).rev().map(|i| format!("Post number {i}")).collect();
        assert_eq!(titles, expected);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let pool = test_pool().await;
        let err = find_by_id(&pool, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_by_author() {
        let pool = test_pool().await;
        let alice = author(&pool, "alice").await;
        let post = create_post(&pool, &draft("Original title"), alice).await.unwrap();

        let changes = UpdatePostRequest {
            title: Some("Updated title".to_string()),
            ..Default::default()
        };
        let updated = update_post(&pool, post.post.id, &changes, alice).await.unwrap();
        assert_eq!(updated.post.title, "Updated title");
        assert_eq!(updated.post.content, post.post.content);
    }

    #[tokio::test]
    async fn test_update_by_other_user_is_forbidden() {
        let pool = test_pool().await;
        let alice = author(&pool, "alice").await;
        let bob = author(&pool, "bob").await;
        let post = create_post(&pool, &draft("Original title"), alice).await.unwrap();

        let changes = UpdatePostRequest {
            title: Some("Hijacked title".to_string()),
            ..Default::default()
        };
        let err = update_post(&pool, post.post.id, &changes, bob).await.unwrap_err();
        assert!(matches!(err, BackendError::Forbidden { .. }));

        let unchanged = find_by_id(&pool, post.post.id).await.unwrap();
        assert_eq!(unchanged.post.title, "Original title");
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let pool = test_pool().await;
        let alice = author(&pool, "alice").await;
        let err = update_post(&pool, Uuid::new_v4(), &UpdatePostRequest::default(), alice)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_by_other_user_is_forbidden() {
        let pool = test_pool().await;
        let alice = author(&pool, "alice").await;
        let bob = author(&pool, "bob").await;
        let post = create_post(&pool, &draft("Keep this post"), alice).await.unwrap();

        let err = delete_post(&pool, post.post.id, bob).await.unwrap_err();
        assert!(matches!(err, BackendError::Forbidden { .. }));
        assert!(exists(&pool, post.post.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_likes_and_unlikes() {
        let pool = test_pool().await;
        let alice = author(&pool, "alice").await;
        let post = create_post(&pool, &draft("Likeable post"), alice).await.unwrap();
        let id = post.post.id;

        for _ in 0..5 {
            toggle_like(&pool, id, true).await.unwrap();
        }
        for _ in 0..3 {
            toggle_like(&pool, id, false).await.unwrap();
        }
        let post = find_by_id(&pool, id).await.unwrap();
        assert_eq!(post.post.likes_count, 2);
    }

    #[tokio::test]
    async fn test_unlike_at_zero_is_rejected() {
        let pool = test_pool().await;
        let alice = author(&pool, "alice").await;
        let post = create_post(&pool, &draft("Unloved post"), alice).await.unwrap();

        let err = toggle_like(&pool, post.post.id, false).await.unwrap_err();
        assert!(matches!(err, BackendError::BadRequest { .. }));

        let post = find_by_id(&pool, post.post.id).await.unwrap();
        assert_eq!(post.post.likes_count, 0);
    }

    #[tokio::test]
    async fn test_like_missing_post() {
        let pool = test_pool().await;
        let err = toggle_like(&pool, Uuid::new_v4(), true).await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_post_cascades_comments() {
        let pool = test_pool().await;
        let alice = author(&pool, "alice").await;
        let bob = author(&pool, "bob").await;
        let post = create_post(&pool, &draft("Discussed post"), alice).await.unwrap();
        let comment = comments::db::create_comment(
            &pool,
            post.post.id,
            &CreateCommentRequest {
                content: "First!".to_string(),
            },
            bob,
        )
        .await
        .unwrap();

        delete_post(&pool, post.post.id, alice).await.unwrap();
        assert!(comments::db::find_row_by_id(&pool, comment.comment.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_user_cascades_posts_and_comments() {
        let pool = test_pool().await;
        let alice = author(&pool, "alice").await;
        let bob = author(&pool, "bob").await;
        let alice_post = create_post(&pool, &draft("Alice writes"), alice).await.unwrap();
        let bob_post = create_post(&pool, &draft("Bob writes too"), bob).await.unwrap();
        let comment = comments::db::create_comment(
            &pool,
            bob_post.post.id,
            &CreateCommentRequest {
                content: "Alice was here".to_string(),
            },
            alice,
        )
        .await
        .unwrap();

        delete_user(&pool, alice).await.unwrap();

        assert!(!exists(&pool, alice_post.post.id).await.unwrap());
        assert!(exists(&pool, bob_post.post.id).await.unwrap());
        assert!(comments::db::find_row_by_id(&pool, comment.comment.id)
            .await
            .unwrap()
            .is_none());
    }
}
