//! # Credential Store
//!
//! Identity lookup and creation, with Argon2id password hashing.
//! Plaintext passwords never leave this module.

use crate::error::{PlatformError, PlatformResult, StoreError};
use crate::identity::{normalize_email, Identity, Role};
use crate::store::SharedStore;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{debug, instrument};

/// Registration input before hashing
pub struct NewIdentity {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}

impl std::fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewIdentity")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Per-user identity and secret storage
#[derive(Clone)]
pub struct CredentialStore {
    store: SharedStore,
}

impl CredentialStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Look up an identity by email
    pub async fn find_by_email(&self, email: &str) -> PlatformResult<Option<Identity>> {
        Ok(self
            .store
            .find_identity_by_email(&normalize_email(email))
            .await?)
    }

    /// Hash the password and persist a new identity.
    ///
    /// The existence check here gives the common case a clean error; the
    /// store's email index decides concurrent registrations.
    #[instrument(skip(self, draft), fields(email = %draft.email, role = %draft.role))]
    pub async fn create(&self, draft: NewIdentity) -> PlatformResult<Identity> {
        let email = normalize_email(&draft.email);

        if self.store.find_identity_by_email(&email).await?.is_some() {
            return Err(PlatformError::DuplicateEmail { email });
        }

        let password_hash = hash_secret(draft.password).await?;
        let identity = Identity::new(draft.username, email, draft.role, password_hash);

        let identity = self
            .store
            .insert_identity(identity)
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation { value, .. } => {
                    PlatformError::DuplicateEmail { email: value }
                }
                other => PlatformError::Storage(other),
            })?;

        debug!("Created identity {}", identity.id);
        Ok(identity)
    }

    /// Check a plaintext password against a stored hash
    pub async fn verify_secret(&self, password: &str, stored_hash: &str) -> PlatformResult<bool> {
        verify_secret(password.to_string(), stored_hash.to_string()).await
    }
}

/// Hash a password with Argon2id and a random salt, off the async runtime.
pub async fn hash_secret(password: String) -> PlatformResult<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| PlatformError::PasswordHash)
    })
    .await
    .map_err(|e| PlatformError::Internal(format!("hashing task failed: {}", e)))?
}

/// Verify a password against a PHC hash string.
///
/// A hash that does not parse counts as a mismatch.
pub async fn verify_secret(password: String, stored_hash: String) -> PlatformResult<bool> {
    tokio::task::spawn_blocking(move || {
        let Ok(parsed) = PasswordHash::new(&stored_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
    .await
    .map_err(|e| PlatformError::Internal(format!("verification task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use std::sync::Arc;

    fn draft(email: &str) -> NewIdentity {
        NewIdentity {
            username: "alice".into(),
            email: email.into(),
            role: Role::Customer,
            password: "pw123".into(),
        }
    }

    #[tokio::test]
    async fn test_hash_is_salted_and_verifiable() {
        let first = hash_secret("pw123".into()).await.unwrap();
        let second = hash_secret("pw123".into()).await.unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(verify_secret("pw123".into(), first.clone()).await.unwrap());
        assert!(!verify_secret("wrong".into(), first).await.unwrap());
    }

    #[tokio::test]
    async fn test_garbage_hash_does_not_verify() {
        assert!(!verify_secret("pw".into(), "not-a-hash".into()).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_stores_hash_not_plaintext() {
        let credentials = CredentialStore::new(Arc::new(MemoryStore::new()));
        let identity = credentials.create(draft("A@X.com")).await.unwrap();

        assert_eq!(identity.email, "a@x.com");
        assert_ne!(identity.password_hash, "pw123");
        assert!(credentials
            .verify_secret("pw123", &identity.password_hash)
            .await
            .unwrap());

        let found = credentials.find_by_email(" a@x.COM").await.unwrap().unwrap();
        assert_eq!(found.id, identity.id);
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let credentials = CredentialStore::new(Arc::new(MemoryStore::new()));
        credentials.create(draft("a@x.com")).await.unwrap();

        let err = credentials.create(draft("a@x.com")).await.unwrap_err();
        assert!(matches!(err, PlatformError::DuplicateEmail { .. }));
    }
}
