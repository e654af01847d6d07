//! Authenticated session trait.

use async_trait::async_trait;

use crate::model::{
    Application, ApplicationForm, ApplicationStatus, Group, Job, MembershipDecision, NewGroup,
    NewJob, Profile, ProfileUpdate,
};
use crate::types::{ApiUrl, EntityId};
use crate::{AccessToken, Result};

/// A signed-in member and the mutations they can perform.
///
/// Every request made through a session carries its bearer token.
#[async_trait]
pub trait Session: Send + Sync {
    /// Returns the id of the signed-in member.
    fn member_id(&self) -> &EntityId;

    /// Returns the API this session talks to.
    fn api(&self) -> &ApiUrl;

    /// Returns the bearer token of this session.
    fn access_token(&self) -> AccessToken;

    /// Create a group owned by the signed-in member.
    async fn create_group(&self, group: &NewGroup) -> Result<Group>;

    /// Join a group, or request to join a private one.
    async fn join_group(&self, group: &EntityId) -> Result<()>;

    /// Leave a group.
    async fn leave_group(&self, group: &EntityId) -> Result<()>;

    /// Accept or reject a pending join request (group admins only).
    async fn decide_membership(
        &self,
        group: &EntityId,
        member: &EntityId,
        decision: MembershipDecision,
    ) -> Result<()>;

    /// Post a job or internship.
    async fn post_job(&self, job: &NewJob) -> Result<Job>;

    /// Apply to a job.
    ///
    /// A second application to the same job while the first is in flight
    /// fails with [`Error::InFlight`](crate::Error::InFlight) without
    /// reaching the server.
    async fn apply_to_job(&self, job: &EntityId, form: ApplicationForm) -> Result<Application>;

    /// Move an application to a new review state (job poster only).
    async fn update_application_status(
        &self,
        job: &EntityId,
        application: &EntityId,
        status: ApplicationStatus,
    ) -> Result<Application>;

    /// Follow a member.
    async fn follow(&self, member: &EntityId) -> Result<()>;

    /// Stop following a member.
    async fn unfollow(&self, member: &EntityId) -> Result<()>;

    /// Fetch a member's profile.
    async fn profile(&self, member: &EntityId) -> Result<Profile>;

    /// Update the signed-in member's profile.
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile>;
}
