//! # Platform Error Types
//!
//! Typed error handling for the food-delivery platform.
//! All core operations return `Result<T, PlatformError>`.

use thiserror::Error;

/// Broad failure category, used by callers to pick a response class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed input
    Validation,
    /// An id or email does not resolve
    NotFound,
    /// The request collides with existing state (duplicate email)
    Conflict,
    /// Bad credentials
    Authentication,
    /// Storage or unexpected failure
    Internal,
}

/// Core error type for all platform operations
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Required request fields were absent or empty
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    /// Request data present but malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// `usertype` did not name a known role
    #[error("Invalid user type: {usertype}")]
    InvalidUserType { usertype: String },

    /// Another identity already owns this email
    #[error("User already exists: {email}")]
    DuplicateEmail { email: String },

    /// Unknown email or wrong password (deliberately indistinguishable)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Identity id does not resolve
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    /// Restaurant id does not resolve
    #[error("Restaurant not found: {restaurant_id}")]
    RestaurantNotFound { restaurant_id: String },

    /// The administrator singleton has not been provisioned
    #[error("Admin record not found")]
    AdminRecordMissing,

    /// Document store failure
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Hashing a secret failed
    #[error("Password hashing failed")]
    PasswordHash,

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlatformError {
    /// Returns the failure category for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlatformError::MissingFields(_)
            | PlatformError::InvalidRequest(_)
            | PlatformError::InvalidUserType { .. } => ErrorKind::Validation,
            PlatformError::DuplicateEmail { .. } => ErrorKind::Conflict,
            PlatformError::InvalidCredentials => ErrorKind::Authentication,
            PlatformError::UserNotFound { .. }
            | PlatformError::RestaurantNotFound { .. }
            | PlatformError::AdminRecordMissing => ErrorKind::NotFound,
            PlatformError::Storage(StoreError::UniqueViolation { .. }) => ErrorKind::Conflict,
            PlatformError::Storage(_) | PlatformError::PasswordHash | PlatformError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Duplicate registrations answer 400 rather than 409, matching the
    /// behavior existing clients expect.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::Conflict => 400,
            ErrorKind::Authentication => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::Internal => 500,
        }
    }

    /// Returns true if the underlying cause must not be shown to clients
    pub fn is_internal(&self) -> bool {
        self.kind() == ErrorKind::Internal
    }
}

/// Errors raised by a [`DocumentStore`](crate::store::DocumentStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed record does not exist
    #[error("{collection} record not found: {id}")]
    NotFound { collection: String, id: String },

    /// A unique index rejected the write
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Backend I/O failure
    #[error("Backend error: {0}")]
    Backend(String),

    /// Snapshot could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
