//! # Identity Types
//!
//! Registered principals, their roles and approval states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Platform role of an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End customer placing orders
    #[serde(alias = "user")]
    Customer,
    /// Restaurant owner (gated by approval)
    Restaurant,
    /// Platform administrator
    #[serde(alias = "administrator")]
    Admin,
}

impl Role {
    /// Parse the `usertype` strings clients send
    pub fn parse(usertype: &str) -> Option<Self> {
        match usertype.trim().to_lowercase().as_str() {
            "customer" | "user" => Some(Role::Customer),
            "restaurant" => Some(Role::Restaurant),
            "admin" | "administrator" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Restaurant => "restaurant",
            Role::Admin => "admin",
        }
    }

    /// Approval state an identity with this role starts in
    pub fn initial_approval(&self) -> ApprovalState {
        match self {
            Role::Restaurant => ApprovalState::Pending,
            Role::Customer | Role::Admin => ApprovalState::Approved,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an identity may act on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalState {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalState::Pending => "pending",
            ApprovalState::Approved => "approved",
            ApprovalState::Rejected => "rejected",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, ApprovalState::Approved)
    }
}

impl std::fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered principal as stored.
///
/// Carries the password hash, so it is never handed to clients directly;
/// see [`PublicIdentity`].
#[derive(Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identity ID (generated)
    pub id: String,

    /// Display name
    pub username: String,

    /// Normalized email, unique across identities
    pub email: String,

    /// Platform role
    pub role: Role,

    /// Argon2 PHC hash of the password
    pub password_hash: String,

    /// Current approval state
    pub approval: ApprovalState,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Create a new identity with generated ID, starting in the role's initial approval state
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            email: email.into(),
            role,
            password_hash: password_hash.into(),
            approval: role.initial_approval(),
            created_at: Utc::now(),
        }
    }

    /// Client-facing view without the password hash
    pub fn to_public(&self) -> PublicIdentity {
        PublicIdentity::from(self)
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("password_hash", &"<redacted>")
            .field("approval", &self.approval)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Identity as returned to API callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicIdentity {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub usertype: Role,
    pub approval: ApprovalState,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<&Identity> for PublicIdentity {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.clone(),
            username: identity.username.clone(),
            email: identity.email.clone(),
            usertype: identity.role,
            approval: identity.approval,
            created_at: identity.created_at,
        }
    }
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::parse("customer"), Some(Role::Customer));
        assert_eq!(Role::parse("user"), Some(Role::Customer));
        assert_eq!(Role::parse("Restaurant"), Some(Role::Restaurant));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("courier"), None);
    }

    #[test]
    fn test_initial_approval_by_role() {
        assert_eq!(Role::Customer.initial_approval(), ApprovalState::Approved);
        assert_eq!(Role::Admin.initial_approval(), ApprovalState::Approved);
        assert_eq!(Role::Restaurant.initial_approval(), ApprovalState::Pending);
    }

    #[test]
    fn test_public_identity_hides_hash() {
        let identity = Identity::new("alice", "a@x.com", Role::Customer, "$argon2id$v=19$secret");
        let json = serde_json::to_value(identity.to_public()).unwrap();

        assert_eq!(json["username"], "alice");
        assert_eq!(json["usertype"], "customer");
        assert_eq!(json["approval"], "approved");
        assert!(json.get("password_hash").is_none());
        assert!(!format!("{:?}", identity).contains("secret"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Bob@Example.COM "), "bob@example.com");
    }
}
