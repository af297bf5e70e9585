use crate::core::errors::ClientError;
use crate::core::models::AuthenticatedUser;
use crate::infrastructure::storage::DurableStorage;
use crate::stores::Revision;
use log::{debug, info, warn};
use serde_json::Value;
use tokio::sync::watch;

/// Durable storage key holding the serialized current user.
pub const USER_STORAGE_KEY: &str = "user";

/// Holds at most one authenticated identity and mirrors it into durable
/// storage so it survives restarts.
///
/// This is the only place the current user is written. The session cookie
/// that actually authenticates requests lives in the HTTP client and is never
/// checked here.
pub struct AuthStore<S: DurableStorage> {
    storage: S,
    user: Option<AuthenticatedUser>,
    loading: bool,
    last_error: Option<String>,
    revision: Revision,
}

impl<S: DurableStorage> AuthStore<S> {
    pub fn new(storage: S) -> Self {
        AuthStore {
            storage,
            user: None,
            loading: false,
            last_error: None,
            revision: Revision::new(),
        }
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Records the user from a successful login response (`{"user": {...}}`).
    ///
    /// Subscribers are only notified when a user was actually recorded; a
    /// rejected response leaves the identity untouched and only sets
    /// [`last_error`](Self::last_error).
    pub async fn login(&mut self, response: &Value) -> Result<AuthenticatedUser, ClientError> {
        self.loading = true;
        self.last_error = None;
        let result = self.store_login(response).await;
        self.loading = false;

        match result {
            Ok(_) => self.revision.bump(),
            Err(ref e) => {
                warn!("Recording login failed: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
        result
    }

    async fn store_login(&mut self, response: &Value) -> Result<AuthenticatedUser, ClientError> {
        let user = response
            .get("user")
            .ok_or_else(|| ClientError::MalformedLoginResponse("missing `user` field".to_string()))?;
        let user: AuthenticatedUser = serde_json::from_value(user.clone())
            .map_err(|e| ClientError::MalformedLoginResponse(e.to_string()))?;

        let serialized =
            serde_json::to_string(&user).map_err(|e| ClientError::LocalState(format!("Serialize user: {}", e)))?;
        self.storage.set_item(USER_STORAGE_KEY, &serialized).await?;

        info!("User {} logged in", user.email);
        self.user = Some(user.clone());
        Ok(user)
    }

    /// Forgets the current user here and in durable storage. Never fails;
    /// a storage error is logged and the in-memory state is cleared anyway.
    pub async fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!("User {} logged out", user.email);
        }
        self.last_error = None;
        if let Err(e) = self.storage.remove_item(USER_STORAGE_KEY).await {
            warn!("Failed to clear stored user: {}", e);
        }
        self.revision.bump();
    }

    /// Restores the user saved by a previous [`login`](Self::login).
    ///
    /// Returns `Ok(false)` when nothing is stored. Only local state is read;
    /// whether the Gateway still honours the session is not checked.
    pub async fn check_auth(&mut self) -> Result<bool, ClientError> {
        let Some(stored) = self.storage.get_item(USER_STORAGE_KEY).await? else {
            debug!("No stored user to rehydrate");
            return Ok(false);
        };
        let user: AuthenticatedUser = serde_json::from_str(&stored)
            .map_err(|e| ClientError::LocalState(format!("Stored user is unreadable: {}", e)))?;

        debug!("Rehydrated user {}", user.email);
        self.user = Some(user);
        self.revision.bump();
        Ok(true)
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}
