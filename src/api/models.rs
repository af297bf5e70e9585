use serde::{Deserialize, Serialize};

use crate::core::models::{Group, GroupDetails, User, UserId};

// Request structs for JSON payloads
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub display_name: &'a str,
}

#[derive(Serialize)]
pub struct AddMemberRequest<'a> {
    pub user_id: &'a UserId,
}

#[derive(Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
}

// The Gateway answers list endpoints either with a bare array or with the
// array wrapped in a named field. Each payload type folds both into a Vec.

#[derive(Deserialize)]
#[serde(untagged)]
pub enum UsersPayload {
    Envelope { users: Vec<User> },
    Bare(Vec<User>),
}

impl From<UsersPayload> for Vec<User> {
    fn from(payload: UsersPayload) -> Self {
        match payload {
            UsersPayload::Envelope { users } => users,
            UsersPayload::Bare(users) => users,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum GroupsPayload {
    Envelope { groups: Vec<Group> },
    Bare(Vec<Group>),
}

impl From<GroupsPayload> for Vec<Group> {
    fn from(payload: GroupsPayload) -> Self {
        match payload {
            GroupsPayload::Envelope { groups } => groups,
            GroupsPayload::Bare(groups) => groups,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum DetailsPayload {
    Many(Vec<GroupDetails>),
    Empty(()),
    One(GroupDetails),
}

impl From<DetailsPayload> for Vec<GroupDetails> {
    fn from(payload: DetailsPayload) -> Self {
        match payload {
            DetailsPayload::Many(details) => details,
            DetailsPayload::Empty(()) => Vec::new(),
            DetailsPayload::One(details) => vec![details],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn users_payload_accepts_both_shapes() {
        let bare: UsersPayload = serde_json::from_value(json!([{"id": 1, "name": "A", "email": "a@b.com"}])).unwrap();
        let wrapped: UsersPayload =
            serde_json::from_value(json!({"users": [{"id": "u1", "display_name": "B", "email": "b@b.com"}]})).unwrap();

        let bare: Vec<User> = bare.into();
        let wrapped: Vec<User> = wrapped.into();
        assert_eq!(bare[0].id, Some(UserId::Numeric(1)));
        assert_eq!(wrapped[0].id, Some(UserId::Text("u1".to_string())));
        assert_eq!(wrapped[0].name, "B");
    }

    #[test]
    fn users_payload_accepts_name_and_display_name_together() {
        let users: Vec<User> = serde_json::from_value::<UsersPayload>(json!([
            {"id": 1, "name": "alice", "display_name": "Alice", "email": "a@b.com"},
            {"id": 2, "name": "", "display_name": "Bob", "email": "b@b.com"}
        ]))
        .unwrap()
        .into();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "alice");
        assert_eq!(users[0].display_name.as_deref(), Some("Alice"));
        assert_eq!(users[1].name, "Bob");
        assert!(users.iter().all(|u| u.password.is_none()));
    }

    #[test]
    fn details_payload_normalizes_null_and_single_object() {
        let null: Vec<GroupDetails> = serde_json::from_value::<DetailsPayload>(json!(null)).unwrap().into();
        let single: Vec<GroupDetails> =
            serde_json::from_value::<DetailsPayload>(json!({"id": "g1", "members": []})).unwrap().into();

        assert!(null.is_empty());
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].get("id"), Some(&json!("g1")));
    }
}
