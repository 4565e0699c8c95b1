/**
 * Password Hashing
 *
 * bcrypt hashing and verification with a configurable work factor. Both run
 * on tokio's blocking pool because a single bcrypt round at the default cost
 * takes tens of milliseconds.
 */

use std::sync::Arc;

use crate::backend::error::BackendResult;

/// Password hasher shared through `AppState`
///
/// Holds the bcrypt cost and a dummy hash that login verifies against when
/// no user matches the submitted email, so an unknown email and a wrong
/// password take the same time to reject.
#[derive(Clone, Debug)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: Arc<str>,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost
    pub fn new(cost: u32) -> Result<Self, bcrypt::BcryptError> {
        let dummy_hash = bcrypt::hash(uuid::Uuid::new_v4().to_string(), cost)?;
        Ok(Self {
            cost,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password
    pub async fn hash(&self, password: &str) -> BackendResult<String> {
        let password = password.to_owned();
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hash)
    }

    /// Verify a plaintext password against a stored hash
    pub async fn verify(&self, password: &str, hash: &str) -> BackendResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(valid)
    }

    /// Burn one verification against the dummy hash
    ///
    /// Always reports `false`.
    pub async fn verify_dummy(&self, password: &str) -> BackendResult<bool> {
        let dummy = self.dummy_hash.clone();
        self.verify(password, &dummy).await?;
        Ok(false)
    }
}
