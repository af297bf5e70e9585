use crate::api::models::{
    AddMemberRequest, DetailsPayload, ErrorResponse, GroupsPayload, LoginRequest, RegisterRequest, UsersPayload,
};
use crate::config::{Config, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::core::errors::ClientError;
use crate::core::models::{Group, GroupDetails, NewGroupForm, User, UserId};
use http::header::ACCEPT;
use log::{debug, error, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS);

/// HTTP client for the expense Gateway.
///
/// Each method issues exactly one request. Cookies set by the Gateway (the
/// session cookie from login) are kept in the client's cookie store and sent
/// back on every later request; the client never inspects them.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::with_timeout(config.api_base_url.clone(), config.request_timeout())
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Initializing ApiClient for {}", base_url);
        Ok(ApiClient { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<Response, ClientError> {
        request.header(ACCEPT, "application/json").send().await.map_err(|e| {
            error!("{} error: {}", operation, e);
            ClientError::from(e)
        })
    }

    async fn read_json<T: DeserializeOwned>(operation: &'static str, response: Response) -> Result<T, ClientError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!("{} returned an unexpected body: {}", operation, e);
            ClientError::MalformedResponse(format!("{}: {}", operation, e))
        })
    }

    fn status_error(operation: &'static str, response: &Response) -> ClientError {
        let status = response.status().as_u16();
        error!("{} failed with status {}", operation, status);
        ClientError::RequestFailed { operation, status }
    }

    // AUTHENTICATION

    pub async fn login(&self, email: &str, password: &str) -> Result<Value, ClientError> {
        let request = self
            .http
            .post(self.url("/api/login/"))
            .json(&LoginRequest { email, password });
        let response = self.send("Login", request).await?;
        if !response.status().is_success() {
            return Err(Self::status_error("Login", &response));
        }

        let data: Value = Self::read_json("Login", response).await?;
        info!("Login successful for {}", email);
        debug!("Login payload: {}", data);
        Ok(data)
    }

    pub async fn register(&self, email: &str, password: &str, display_name: &str) -> Result<Value, ClientError> {
        let request = self.http.post(self.url("/api/register/")).json(&RegisterRequest {
            email,
            password,
            display_name,
        });
        let response = self.send("Registration", request).await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| "Registration failed".to_string());
            error!("Registration error ({}): {}", status, message);
            return Err(ClientError::RegistrationFailed(message));
        }

        let data: Value = Self::read_json("Registration", response).await?;
        info!("Registration successful for {}", email);
        debug!("Registration payload: {}", data);
        Ok(data)
    }

    // USERS

    pub async fn fetch_users(&self) -> Result<Vec<User>, ClientError> {
        let response = self.send("Fetch users", self.http.get(self.url("/api/users"))).await?;
        if !response.status().is_success() {
            return Err(Self::status_error("Fetch users", &response));
        }

        let users: Vec<User> = Self::read_json::<UsersPayload>("Fetch users", response).await?.into();
        info!("Users fetched: {}", users.len());
        Ok(users)
    }

    /// Searches users by name or email. A rejected search yields no users.
    pub async fn search_users(&self, search_term: &str) -> Result<Vec<User>, ClientError> {
        let request = self.http.get(self.url("/api/users/")).query(&[("search", search_term)]);
        let response = self.send("Search users", request).await?;
        if !response.status().is_success() {
            warn!(
                "Search for '{}' failed with status {}, returning no users",
                search_term,
                response.status()
            );
            return Ok(Vec::new());
        }

        let users: Vec<User> = Self::read_json::<UsersPayload>("Search users", response).await?.into();
        debug!("Search for '{}' matched {} users", search_term, users.len());
        Ok(users)
    }

    // GROUPS

    pub async fn get_all_groups(&self) -> Result<Vec<Group>, ClientError> {
        let response = self.send("Fetch groups", self.http.get(self.url("/api/groups/"))).await?;
        if !response.status().is_success() {
            return Err(Self::status_error("Fetch groups", &response));
        }

        let groups: Vec<Group> = Self::read_json::<GroupsPayload>("Fetch groups", response).await?.into();
        info!("Groups fetched: {}", groups.len());
        Ok(groups)
    }

    /// Fetches the extended view of one group. Any non-2xx answer yields no details.
    pub async fn get_group_details(&self, group_id: &str) -> Result<Vec<GroupDetails>, ClientError> {
        let request = self.http.get(self.url(&format!("/api/groups/{}", group_id)));
        let response = self.send("Fetch group details", request).await?;
        if !response.status().is_success() {
            warn!(
                "Details for group {} unavailable (status {}), returning none",
                group_id,
                response.status()
            );
            return Ok(Vec::new());
        }

        let details: Vec<GroupDetails> = Self::read_json::<DetailsPayload>("Fetch group details", response)
            .await?
            .into();
        debug!("Group {} details: {} records", group_id, details.len());
        Ok(details)
    }

    pub async fn create_new_group(&self, form: NewGroupForm) -> Result<Value, ClientError> {
        let mut multipart = Form::new()
            .text("name", form.name.clone())
            .text("description", form.description)
            .text("group_type", form.group_type);
        if let Some(image) = form.image {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime_type)?;
            multipart = multipart.part("image", part);
        }

        let request = self.http.post(self.url("/api/groups/")).multipart(multipart);
        let response = self.send("Create group", request).await?;
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Create group '{}' rejected: {}", form.name, body);
            return Err(ClientError::GroupCreationFailed(body));
        }

        let data: Value = Self::read_json("Create group", response).await?;
        info!("Group '{}' created", form.name);
        debug!("Create group payload: {}", data);
        Ok(data)
    }

    /// Adds a user to a group. The caller decides whether to refetch groups afterwards.
    pub async fn add_member_to_group(&self, group_id: &str, user_id: &UserId) -> Result<Value, ClientError> {
        let request = self
            .http
            .post(self.url(&format!("/api/groups/{}/members/", group_id)))
            .json(&AddMemberRequest { user_id });
        let response = self.send("Add member", request).await?;
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Adding user {} to group {} rejected: {}", user_id, group_id, body);
            return Err(ClientError::MemberAddFailed(body));
        }

        let data: Value = Self::read_json("Add member", response).await?;
        info!("User {} added to group {}", user_id, group_id);
        Ok(data)
    }
}

/// Races a request against a cancellation token.
///
/// Cancelling drops the in-flight request; the future resolves to
/// [`ClientError::Cancelled`].
pub async fn cancellable<T, F>(token: &CancellationToken, request: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            warn!("Request cancelled");
            Err(ClientError::Cancelled)
        }
        result = request => result,
    }
}
