//! User Store
//!
//! Database operations over the `users` table. Usernames and emails are
//! unique; deleting a user cascades to their posts and comments through the
//! foreign keys declared in `schema.sql`.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::passwords::PasswordHasher;
use crate::backend::error::{map_write_error, BackendError, BackendResult};
use crate::backend::{comments, posts};
use crate::shared::blog::{
    PageParams, RegisterRequest, UpdateUserRequest, UserProfileResponse, UserResponse,
    UserWithPosts,
};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, full_name, bio, avatar_url, created_at, updated_at";

const DUPLICATE_USER: &str = "User with this email or username already exists";

/// User row, including the password hash
///
/// Only the auth flow should see this type; everything sent to a client goes
/// through `UserResponse`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, 3-20 chars)
    pub username: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            bio: user.bio,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Create a new user
///
/// Fails with `Conflict` when the username or email is already taken.
/// The password is hashed before it reaches the database and the returned
/// value carries no password.
pub async fn create_user(
    pool: &SqlitePool,
    hasher: &PasswordHasher,
    candidate: &RegisterRequest,
) -> BackendResult<UserResponse> {
    if find_conflicting(pool, Some(&candidate.username), Some(&candidate.email), None)
        .await?
        .is_some()
    {
        tracing::warn!(username = %candidate.username, "registration rejected: duplicate user");
        return Err(BackendError::conflict(DUPLICATE_USER));
    }

    let password_hash = hasher.hash(&candidate.password).await?;
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, username, email, password_hash, full_name, bio, avatar_url, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&candidate.username)
    .bind(&candidate.email)
    .bind(&password_hash)
    .bind(&candidate.full_name)
    .bind(&candidate.bio)
    .bind(&candidate.avatar_url)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| map_write_error(e, DUPLICATE_USER, "User not found"))?;

    tracing::info!(user_id = %user.id, username = %user.username, "user created");
    Ok(user.into())
}

/// Get user by email, including the password hash
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Get the bare user row by ID
pub async fn find_row_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Get a user with their posts and comments
pub async fn find_by_id(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<UserProfileResponse>, sqlx::Error> {
    let Some(user) = find_row_by_id(pool, id).await? else {
        return Ok(None);
    };

    let posts = posts::db::list_by_author(pool, id).await?;
    let comments = comments::db::list_by_author(pool, id).await?;

    Ok(Some(UserProfileResponse {
        user: user.into(),
        posts,
        comments,
    }))
}

/// List users, oldest account first, each with their posts
pub async fn find_all(pool: &SqlitePool, params: &PageParams) -> Result<Vec<UserWithPosts>, sqlx::Error> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, rowid ASC LIMIT ? OFFSET ?"
    ))
    .bind(params.limit())
    .bind(params.offset())
    .fetch_all(pool)
    .await?;

    let mut listing = Vec::with_capacity(users.len());
    for user in users {
        let posts = posts::db::list_by_author(pool, user.id).await?;
        listing.push(UserWithPosts {
            user: user.into(),
            posts,
        });
    }
    Ok(listing)
}

/// Apply a partial profile update
///
/// Fails with `NotFound` when the user is absent and with `Conflict` when the
/// new username or email belongs to a different user.
pub async fn update_user(
    pool: &SqlitePool,
    id: Uuid,
    changes: &UpdateUserRequest,
) -> BackendResult<UserProfileResponse> {
    if changes.username.is_some() || changes.email.is_some() {
        let conflict =
            find_conflicting(pool, changes.username.as_deref(), changes.email.as_deref(), Some(id))
                .await?;
        if conflict.is_some() {
            return Err(BackendError::conflict("This email or username is already taken"));
        }
    }

    let result = sqlx::query(
        r#"
        UPDATE users
        SET username = COALESCE(?, username),
            email = COALESCE(?, email),
            full_name = COALESCE(?, full_name),
            bio = COALESCE(?, bio),
            avatar_url = COALESCE(?, avatar_url),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&changes.username)
    .bind(&changes.email)
    .bind(&changes.full_name)
    .bind(&changes.bio)
    .bind(&changes.avatar_url)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| map_write_error(e, "This email or username is already taken", "User not found"))?;

    if result.rows_affected() == 0 {
        return Err(user_not_found(id));
    }

    tracing::info!(user_id = %id, "user updated");
    find_by_id(pool, id).await?.ok_or_else(|| user_not_found(id))
}

/// Delete a user together with their posts and comments
pub async fn delete_user(pool: &SqlitePool, id: Uuid) -> BackendResult<()> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(user_not_found(id));
    }

    tracing::info!(user_id = %id, "user deleted");
    Ok(())
}

/// Whether a user row exists
pub async fn exists(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Find another user holding the given username or email
async fn find_conflicting(
    pool: &SqlitePool,
    username: Option<&str>,
    email: Option<&str>,
    except: Option<Uuid>,
) -> Result<Option<Uuid>, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        SELECT id FROM users
        WHERE (username = ? OR email = ?)
          AND (? IS NULL OR id != ?)
        LIMIT 1
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(except)
    .bind(except)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id,)| id))
}

pub(crate) fn user_not_found(id: Uuid) -> BackendError {
    BackendError::not_found(format!("User with ID {id} not found"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::backend::server::config::open_database;

    pub(crate) async fn test_pool() -> SqlitePool {
        open_database("sqlite::memory:", 1).await.unwrap()
    }

    pub(crate) fn test_hasher() -> PasswordHasher {
        PasswordHasher::new(4).unwrap()
    }

    pub(crate) fn registration(name: &str) -> RegisterRequest {
        RegisterRequest {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password: "password123".to_string(),
            full_name: format!("{name} Tester"),
            bio: None,
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let pool = test_pool().await;
        let hasher = test_hasher();

        let user = create_user(&pool, &hasher, &registration("alice")).await.unwrap();
        assert_eq!(user.username, "alice");

        let row = find_by_email(&pool, "alice@example.com").await.unwrap().unwrap();
        assert_eq!(row.id, user.id);
        assert_ne!(row.password_hash, "password123");
        assert!(hasher.verify("password123", &row.password_hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let pool = test_pool().await;
        let hasher = test_hasher();
        create_user(&pool, &hasher, &registration("alice")).await.unwrap();

        let candidate = RegisterRequest {
            username: "alice2".to_string(),
            ..registration("alice")
        };
        let err = create_user(&pool, &hasher, &candidate).await.unwrap_err();
        assert!(matches!(err, BackendError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let pool = test_pool().await;
        let hasher = test_hasher();
        create_user(&pool, &hasher, &registration("alice")).await.unwrap();

        let candidate = RegisterRequest {
            email: "other@example.com".to_string(),
            ..registration("alice")
        };
        let err = create_user(&pool, &hasher, &candidate).await.unwrap_err();
        assert!(matches!(err, BackendError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_find_all_paginates() {
        let pool = test_pool().await;
        let hasher = test_hasher();
        for name in ["amy", "ben", "cat", "dan", "eve"] {
            create_user(&pool, &hasher, &registration(name)).await.unwrap();
        }

        let page = find_all(&pool, &PageParams::new(2, 2)).await.unwrap();
        let names: Vec<&str> = page.iter().map(|u| u.user.username.as_str()).collect();
        assert_eq!(names, vec!["cat", "dan"]);
    }

    #[tokio::test]
    async fn test_update_leaves_unspecified_fields() {
        let pool = test_pool().await;
        let hasher = test_hasher();
        let user = create_user(&pool, &hasher, &registration("alice")).await.unwrap();

        let changes = UpdateUserRequest {
            bio: Some("Curious".to_string()),
            ..Default::default()
        };
        let updated = update_user(&pool, user.id, &changes).await.unwrap();
        assert_eq!(updated.user.bio.as_deref(), Some("Curious"));
        assert_eq!(updated.user.username, "alice");
        assert_eq!(updated.user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_update_to_own_email_is_not_a_conflict() {
        let pool = test_pool().await;
        let hasher = test_hasher();
        let user = create_user(&pool, &hasher, &registration("alice")).await.unwrap();

        let changes = UpdateUserRequest {
            email: Some("alice@example.com".to_string()),
            ..Default::default()
        };
        assert!(update_user(&pool, user.id, &changes).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_colliding_with_other_user() {
        let pool = test_pool().await;
        let hasher = test_hasher();
        let alice = create_user(&pool, &hasher, &registration("alice")).await.unwrap();
        create_user(&pool, &hasher, &registration("bob")).await.unwrap();

        let changes = UpdateUserRequest {
            username: Some("bob".to_string()),
            ..Default::default()
        };
        let err = update_user(&pool, alice.id, &changes).await.unwrap_err();
        assert!(matches!(err, BackendError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let pool = test_pool().await;
        let err = update_user(&pool, Uuid::new_v4(), &UpdateUserRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let pool = test_pool().await;
        let err = delete_user(&pool, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let pool = test_pool().await;
        let hasher = test_hasher();
        let user = create_user(&pool, &hasher, &registration("alice")).await.unwrap();

        delete_user(&pool, user.id).await.unwrap();
        assert!(!exists(&pool, user.id).await.unwrap());
        assert!(find_by_id(&pool, user.id).await.unwrap().is_none());
    }
}
