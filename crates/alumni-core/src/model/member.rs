use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::list::Filterable;
use crate::traits::Entity;
use crate::types::EntityId;

/// An entry in the member directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub following: bool,
}

impl Member {
    /// First and last name joined by a space.
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

impl Entity for Member {
    const RESOURCE: &'static str = "members";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Filterable for Member {
    fn display_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.full_name())
    }

    fn category(&self) -> Option<&str> {
        self.department.as_deref()
    }

    fn kind(&self) -> Option<&str> {
        self.role.as_deref()
    }
}
