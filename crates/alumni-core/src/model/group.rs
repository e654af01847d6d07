use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::list::Filterable;
use crate::traits::Entity;
use crate::types::EntityId;

/// An alumni group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub member_count: u64,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub created_by: Option<EntityId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Group {
    const RESOURCE: &'static str = "groups";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Filterable for Group {
    fn display_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn kind(&self) -> Option<&str> {
        Some(if self.is_private { "private" } else { "public" })
    }
}

/// Body for creating a group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub is_private: bool,
}

/// An admin's answer to a request to join a private group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipDecision {
    Accepted,
    Rejected,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_wire_shape() {
        let group: Group = serde_json::from_value(json!({
            "_id": "g1",
            "name": "Class of 2015",
            "category": "Batch",
            "memberCount": 42,
            "isPrivate": true,
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(group.id.as_str(), "g1");
        assert_eq!(group.member_count, 42);
        assert_eq!(group.kind(), Some("private"));
        assert_eq!(group.category(), Some("Batch"));
    }

    #[test]
    fn optional_fields_default() {
        let group: Group = serde_json::from_value(json!({"_id": "g2", "name": "Hikers"})).unwrap();
        assert_eq!(group.member_count, 0);
        assert!(!group.is_private);
        assert!(group.created_at.is_none());
    }
}
