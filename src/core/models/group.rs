use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub group_type: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Extended group view (members, expenses). Its layout belongs to the Gateway,
/// so it is carried as raw JSON.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct GroupDetails(pub serde_json::Value);

impl GroupDetails {
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.0.get(field)
    }
}

/// An image attached to a new group.
#[derive(Clone, Debug)]
pub struct GroupImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Form data for creating a group, sent as a multipart body.
#[derive(Clone, Debug, Default)]
pub struct NewGroupForm {
    pub name: String,
    pub description: String,
    pub group_type: String,
    pub image: Option<GroupImage>,
}

impl NewGroupForm {
    pub fn new(name: impl Into<String>, description: impl Into<String>, group_type: impl Into<String>) -> Self {
        NewGroupForm {
            name: name.into(),
            description: description.into(),
            group_type: group_type.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: GroupImage) -> Self {
        self.image = Some(image);
        self
    }
}
