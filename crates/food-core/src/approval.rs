//! # Approval State Machine
//!
//! Administrator-driven transitions of an identity's approval state.
//!
//! | from \ call | `approve`  | `reject`   |
//! |-------------|------------|------------|
//! | `pending`   | `approved` | `rejected` |
//! | `approved`  | `approved` | `rejected` |
//! | `rejected`  | `approved` | `rejected` |
//!
//! Any state may move to `approved` or `rejected`, including itself.
//! Nothing moves back to `pending`.

use crate::error::{PlatformError, PlatformResult, StoreError};
use crate::identity::{ApprovalState, Identity};
use crate::store::SharedStore;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct ApprovalService {
    store: SharedStore,
}

impl ApprovalService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Move an identity to `approved`
    #[instrument(skip(self))]
    pub async fn approve(&self, identity_id: &str) -> PlatformResult<Identity> {
        self.transition(identity_id, ApprovalState::Approved).await
    }

    /// Move an identity to `rejected`
    #[instrument(skip(self))]
    pub async fn reject(&self, identity_id: &str) -> PlatformResult<Identity> {
        self.transition(identity_id, ApprovalState::Rejected).await
    }

    async fn transition(&self, identity_id: &str, to: ApprovalState) -> PlatformResult<Identity> {
        let identity = self
            .store
            .set_approval(identity_id, to)
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => PlatformError::UserNotFound {
                    user_id: identity_id.to_string(),
                },
                other => PlatformError::Storage(other),
            })?;

        info!("Identity {} is now {}", identity.id, identity.approval);
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;
    use crate::memory::MemoryStore;
    use crate::store::DocumentStore;
    use std::sync::Arc;

    async fn setup() -> (ApprovalService, String) {
        let store = Arc::new(MemoryStore::new());
        let owner = store
            .insert_identity(Identity::new("bob", "b@x.com", Role::Restaurant, "h"))
            .await
            .unwrap();
        (ApprovalService::new(store), owner.id)
    }

    #[tokio::test]
    async fn test_approve_is_idempotent() {
        let (approvals, id) = setup().await;

        approvals.approve(&id).await.unwrap();
        let identity = approvals.approve(&id).await.unwrap();

        assert_eq!(identity.approval, ApprovalState::Approved);
    }

    #[tokio::test]
    async fn test_reject_after_approve() {
        let (approvals, id) = setup().await;

        approvals.approve(&id).await.unwrap();
        let identity = approvals.reject(&id).await.unwrap();
        assert_eq!(identity.approval, ApprovalState::Rejected);

        let identity = approvals.approve(&id).await.unwrap();
        assert_eq!(identity.approval, ApprovalState::Approved);
    }

    #[tokio::test]
    async fn test_unknown_identity() {
        let (approvals, _) = setup().await;

        let err = approvals.reject("nope").await.unwrap_err();
        assert!(matches!(err, PlatformError::UserNotFound { ref user_id } if user_id == "nope"));
    }
}
