//! # Account Service
//!
//! Registration and login, composed from the credential store, the
//! approval rules and the restaurant directory.
//!
//! Registering a restaurant owner writes two records. If the profile
//! insert fails, the identity written just before it is deleted again
//! and the original error is returned.

use crate::credentials::{CredentialStore, NewIdentity};
use crate::directory::RestaurantDirectory;
use crate::error::{PlatformError, PlatformResult};
use crate::identity::{Identity, Role};
use crate::restaurant::RestaurantProfile;
use crate::store::SharedStore;
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

/// Registration request as sent by clients
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub usertype: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub restaurant_address: Option<String>,
    #[serde(default)]
    pub restaurant_image: Option<String>,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("usertype", &self.usertype)
            .finish_non_exhaustive()
    }
}

/// What a successful registration produced
#[derive(Debug, Clone)]
pub struct RegistrationResult {
    pub identity: Identity,
    /// Present for restaurant owners only
    pub restaurant: Option<RestaurantProfile>,
}

#[derive(Clone)]
pub struct AccountService {
    store: SharedStore,
    credentials: CredentialStore,
    directory: RestaurantDirectory,
}

impl AccountService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            credentials: CredentialStore::new(store.clone()),
            directory: RestaurantDirectory::new(store.clone()),
            store,
        }
    }

    /// Register a new identity, and a restaurant profile for restaurant owners.
    #[instrument(skip(self, request), fields(email = ?request.email, usertype = ?request.usertype))]
    pub async fn register(&self, request: Registration) -> PlatformResult<RegistrationResult> {
        let (Some(username), Some(email), Some(usertype), Some(password)) = (
            present(request.username),
            present(request.email),
            present(request.usertype),
            present(request.password),
        ) else {
            return Err(PlatformError::MissingFields(
                "username, email, usertype and password are required".to_string(),
            ));
        };

        let role = Role::parse(&usertype).ok_or(PlatformError::InvalidUserType { usertype })?;

        let identity = self
            .credentials
            .create(NewIdentity {
                username: username.clone(),
                email,
                role,
                password,
            })
            .await?;

        if role != Role::Restaurant {
            info!("Registered {} {}", role, identity.id);
            return Ok(RegistrationResult {
                identity,
                restaurant: None,
            });
        }

        let restaurant = match self
            .directory
            .create(
                &identity.id,
                &username,
                request.restaurant_address,
                request.restaurant_image,
            )
            .await
        {
            Ok(restaurant) => restaurant,
            Err(e) => {
                warn!(
                    "Restaurant profile for {} failed, removing identity: {}",
                    identity.id, e
                );
                if let Err(undo) = self.store.delete_identity(&identity.id).await {
                    error!(
                        "Could not remove identity {} after failed registration: {}",
                        identity.id, undo
                    );
                }
                return Err(e);
            }
        };

        info!(
            "Registered restaurant owner {} with restaurant {} (pending approval)",
            identity.id, restaurant.id
        );
        Ok(RegistrationResult {
            identity,
            restaurant: Some(restaurant),
        })
    }

    /// Check credentials and return the identity, whatever its approval state.
    ///
    /// Unknown email and wrong password fail identically.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> PlatformResult<Identity> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(PlatformError::MissingFields(
                "email and password are required".to_string(),
            ));
        }

        let Some(identity) = self.credentials.find_by_email(email).await? else {
            warn!("Login failed");
            return Err(PlatformError::InvalidCredentials);
        };

        if !self
            .credentials
            .verify_secret(password, &identity.password_hash)
            .await?
        {
            warn!("Login failed");
            return Err(PlatformError::InvalidCredentials);
        }

        info!("Login succeeded for {}", identity.id);
        Ok(identity)
    }

    /// Every registered identity, in registration order
    pub async fn list_identities(&self) -> PlatformResult<Vec<Identity>> {
        Ok(self.store.list_identities().await?)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
