use crate::api::ApiClient;
use crate::core::errors::ClientError;
use crate::core::models::{AuthenticatedUser, Group, GroupDetails, NewGroupForm, UserId};
use crate::infrastructure::storage::DurableStorage;
use crate::stores::{AuthStore, ExpenseStore, GroupStore};
use log::{info, warn};
use serde_json::Value;
use tokio::sync::RwLock;

/// Process-wide client state: the API client plus the three stores.
///
/// Create one with [`Session::init`] at startup and end it with
/// [`Session::sign_out`]. Each store sits behind its own lock, so a task
/// updating groups never waits on one rehydrating auth.
pub struct Session<S: DurableStorage> {
    api: ApiClient,
    auth: RwLock<AuthStore<S>>,
    expenses: RwLock<ExpenseStore>,
    groups: RwLock<GroupStore>,
}

impl<S: DurableStorage> Session<S> {
    /// Builds the session and restores any user saved by an earlier run.
    pub async fn init(api: ApiClient, storage: S) -> Self {
        let mut auth = AuthStore::new(storage);
        match auth.check_auth().await {
            Ok(true) => info!("Session restored from durable storage"),
            Ok(false) => info!("Starting without a stored session"),
            Err(e) => warn!("Ignoring stored session: {}", e),
        }

        Session {
            api,
            auth: RwLock::new(auth),
            expenses: RwLock::new(ExpenseStore::new()),
            groups: RwLock::new(GroupStore::new()),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn auth(&self) -> &RwLock<AuthStore<S>> {
        &self.auth
    }

    pub fn expenses(&self) -> &RwLock<ExpenseStore> {
        &self.expenses
    }

    pub fn groups(&self) -> &RwLock<GroupStore> {
        &self.groups
    }

    pub async fn current_user(&self) -> Option<AuthenticatedUser> {
        self.auth.read().await.user().cloned()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser, ClientError> {
        let response = self.api.login(email, password).await?;
        self.auth.write().await.login(&response).await
    }

    /// Registers a new account. The caller still has to sign in.
    pub async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<Value, ClientError> {
        self.api.register(email, password, display_name).await
    }

    /// Logs out and drops the cached groups and expenses of the previous user.
    pub async fn sign_out(&self) {
        self.auth.write().await.logout().await;
        self.groups.write().await.set_groups(Vec::new());
        self.expenses.write().await.clear_all_expenses();
    }

    /// Replaces the cached groups with the Gateway's list. Returns the new count.
    pub async fn refresh_groups(&self) -> Result<usize, ClientError> {
        let groups = self.api.get_all_groups().await?;
        let mut store = self.groups.write().await;
        store.set_groups(groups);
        Ok(store.total_groups())
    }

    /// Creates a group and caches the Gateway's copy of it.
    pub async fn create_group(&self, form: NewGroupForm) -> Result<Group, ClientError> {
        let created = self.api.create_new_group(form).await?;
        let group = parse_created_group(created)?;
        self.groups.write().await.add_group(group.clone());
        Ok(group)
    }

    /// Detail records for one group. Nothing is cached; an unknown group
    /// yields an empty list.
    pub async fn group_details(&self, group_id: &str) -> Result<Vec<GroupDetails>, ClientError> {
        self.api.get_group_details(group_id).await
    }

    /// Adds a member, then refetches the group list so the cache is never
    /// older than the change. A failed refetch is logged; the membership
    /// change itself already succeeded.
    pub async fn add_member(&self, group_id: &str, user_id: &UserId) -> Result<Value, ClientError> {
        let data = self.api.add_member_to_group(group_id, user_id).await?;
        if let Err(e) = self.refresh_groups().await {
            warn!("Groups not refreshed after adding {} to {}: {}", user_id, group_id, e);
        }
        Ok(data)
    }
}

// The Gateway returns the group either bare or as `{"group": {...}}`.
fn parse_created_group(created: Value) -> Result<Group, ClientError> {
    let candidate = match created.get("group") {
        Some(group) => group.clone(),
        None => created,
    };
    serde_json::from_value(candidate).map_err(|e| ClientError::MalformedResponse(format!("Create group: {}", e)))
}
