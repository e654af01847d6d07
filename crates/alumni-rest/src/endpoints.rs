//! Endpoint paths and wire request/response types.

use serde::{Deserialize, Serialize};

use alumni_core::model::{ApplicationStatus, MembershipDecision};
use alumni_core::EntityId;

// ============================================================================
// Paths
// ============================================================================

/// POST, unauthenticated.
pub const LOGIN: &str = "auth/login";

/// PUT, the signed-in member's profile.
pub const PROFILE: &str = "profile";

pub fn collection(resource: &str) -> String {
    resource.to_string()
}

pub fn item(resource: &str, id: &EntityId) -> String {
    format!("{}/{}", resource, id)
}

pub fn profile_of(member: &EntityId) -> String {
    format!("profile/{}", member)
}

pub fn join_group(group: &EntityId) -> String {
    format!("groups/{}/join", group)
}

pub fn group_member(group: &EntityId, member: &EntityId) -> String {
    format!("groups/{}/members/{}", group, member)
}

pub fn group_request(group: &EntityId, member: &EntityId) -> String {
    format!("groups/{}/requests/{}", group, member)
}

pub fn apply_to_job(job: &EntityId) -> String {
    format!("jobs/{}/apply", job)
}

pub fn application(job: &EntityId, application: &EntityId) -> String {
    format!("jobs/{}/applications/{}", job, application)
}

pub fn follow(member: &EntityId) -> String {
    format!("members/{}/follow", member)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query string of a collection request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery<'a> {
    pub page: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
}

/// Request body for login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response from login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Request body for a join request decision.
#[derive(Debug, Serialize)]
pub struct DecisionRequest {
    pub status: MembershipDecision,
}

/// Request body for an application status change.
#[derive(Debug, Serialize)]
pub struct StatusRequest {
    pub status: ApplicationStatus,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_omits_missing_user() {
        let query = ListQuery {
            page: 2,
            size: 10,
            user_id: None,
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({"page": 2, "size": 10})
        );
    }

    #[test]
    fn paths() {
        let g = EntityId::new("g1").unwrap();
        let m = EntityId::new("m1").unwrap();
        assert_eq!(group_member(&g, &m), "groups/g1/members/m1");
        assert_eq!(item("jobs", &g), "jobs/g1");
        assert_eq!(
            serde_json::to_value(DecisionRequest {
                status: MembershipDecision::Accepted
            })
            .unwrap(),
            serde_json::json!({"status": "accepted"})
        );
    }
}
