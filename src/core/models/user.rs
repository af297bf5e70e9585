use serde::{Deserialize, Serialize};
use std::fmt;

/// Gateway user ids arrive either as numbers or as strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum UserId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Numeric(id) => write!(f, "{}", id),
            UserId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        UserId::Numeric(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Text(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        UserId::Text(id)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(from = "UserRecord")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub email: String,
    // Sent on registration only, never read back from the Gateway
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// Wire shape of a user record. Some Gateway endpoints send `name`, some
// `display_name`, some both.
#[derive(Deserialize)]
struct UserRecord {
    #[serde(default)]
    id: Option<UserId>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    display_name: Option<String>,
    email: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        let name = match (record.name.is_empty(), &record.display_name) {
            (true, Some(display_name)) => display_name.clone(),
            _ => record.name,
        };
        User {
            id: record.id,
            name,
            display_name: record.display_name,
            email: record.email,
            password: None,
        }
    }
}

/// The identity kept by the auth store and persisted for session rehydration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
