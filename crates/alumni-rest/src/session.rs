//! Authenticated session against the alumni API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, instrument};

use alumni_core::error::{Error, TransportError};
use alumni_core::list::{ListPage, PageQuery};
use alumni_core::model::{
    Application, ApplicationForm, ApplicationStatus, Group, Job, MembershipDecision, NewGroup,
    NewJob, Profile, ProfileUpdate,
};
use alumni_core::{
    AccessToken, ApiUrl, Entity, EntityId, Fetcher, MutationGuard, Result, Session,
};

use crate::api::RestApi;
use crate::endpoints::{self, DecisionRequest, StatusRequest};

/// A signed-in member.
///
/// Cheap to clone; clones share the token and the in-flight mutation set.
#[derive(Clone)]
pub struct RestSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    api: RestApi,
    member: EntityId,
    token: AccessToken,
    guard: MutationGuard,
}

impl RestSession {
    pub(crate) fn new(api: RestApi, member: EntityId, token: AccessToken) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                api,
                member,
                token,
                guard: MutationGuard::new(),
            }),
        }
    }

    /// Restore a session from a persisted token.
    pub fn from_persisted(api: RestApi, member: EntityId, token: AccessToken) -> Self {
        Self::new(api, member, token)
    }

    /// The unauthenticated handle this session was opened from.
    pub fn rest_api(&self) -> &RestApi {
        &self.inner.api
    }

    fn token(&self) -> Option<&str> {
        Some(self.inner.token.as_str())
    }

    fn client(&self) -> &crate::client::RestClient {
        self.inner.api.client()
    }

    async fn mutate(&self, key: String, method: Method, path: String) -> Result<()> {
        let _permit = self.inner.guard.acquire(key)?;
        self.client()
            .send_no_response(method, &path, None::<&()>, self.token())
            .await
    }
}

#[async_trait]
impl Session for RestSession {
    fn member_id(&self) -> &EntityId {
        &self.inner.member
    }

    fn api(&self) -> &ApiUrl {
        self.inner.api.url()
    }

    fn access_token(&self) -> AccessToken {
        self.inner.token.clone()
    }

    #[instrument(skip(self, group), fields(member = %self.inner.member, name = %group.name))]
    async fn create_group(&self, group: &NewGroup) -> Result<Group> {
        info!("Creating group");
        self.client()
            .send(
                Method::POST,
                &endpoints::collection(Group::RESOURCE),
                Some(group),
                self.token(),
            )
            .await
    }

    #[instrument(skip(self), fields(member = %self.inner.member))]
    async fn join_group(&self, group: &EntityId) -> Result<()> {
        debug!("Joining group");
        self.mutate(
            format!("join:{}", group),
            Method::POST,
            endpoints::join_group(group),
        )
        .await
    }

    #[instrument(skip(self), fields(member = %self.inner.member))]
    async fn leave_group(&self, group: &EntityId) -> Result<()> {
        debug!("Leaving group");
        self.mutate(
            format!("leave:{}", group),
            Method::DELETE,
            endpoints::group_member(group, &self.inner.member),
        )
        .await
    }

    #[instrument(skip(self), fields(admin = %self.inner.member))]
    async fn decide_membership(
        &self,
        group: &EntityId,
        member: &EntityId,
        decision: MembershipDecision,
    ) -> Result<()> {
        debug!(?decision, "Deciding join request");
        let _permit = self
            .inner
            .guard
            .acquire(format!("decide:{}:{}", group, member))?;
        self.client()
            .send_no_response(
                Method::PUT,
                &endpoints::group_request(group, member),
                Some(&DecisionRequest { status: decision }),
                self.token(),
            )
            .await
    }

    #[instrument(skip(self, job), fields(member = %self.inner.member, title = %job.title))]
    async fn post_job(&self, job: &NewJob) -> Result<Job> {
        info!("Posting job");
        self.client()
            .send(
                Method::POST,
                &endpoints::collection(Job::RESOURCE),
                Some(job),
                self.token(),
            )
            .await
    }

    #[instrument(skip(self, form), fields(member = %self.inner.member))]
    async fn apply_to_job(&self, job: &EntityId, form: ApplicationForm) -> Result<Application> {
        let _permit = self.inner.guard.acquire(format!("apply:{}", job))?;
        info!(with_resume = form.resume.is_some(), "Applying to job");

        let mut multipart = Form::new();
        if let Some(cover_letter) = form.cover_letter {
            multipart = multipart.text("coverLetter", cover_letter);
        }
        if let Some(resume) = form.resume {
            let part = Part::bytes(resume.bytes)
                .file_name(resume.file_name)
                .mime_str(&resume.mime_type)
                .map_err(|e| TransportError::Http {
                    message: format!("invalid resume content type: {}", e),
                })?;
            multipart = multipart.part("resume", part);
        }

        self.client()
            .post_multipart(&endpoints::apply_to_job(job), multipart, self.token())
            .await
    }

    #[instrument(skip(self), fields(member = %self.inner.member))]
    async fn update_application_status(
        &self,
        job: &EntityId,
        application: &EntityId,
        status: ApplicationStatus,
    ) -> Result<Application> {
        debug!(?status, "Updating application status");
        let _permit = self
            .inner
            .guard
            .acquire(format!("status:{}", application))?;
        self.client()
            .send(
                Method::PATCH,
                &endpoints::application(job, application),
                Some(&StatusRequest { status }),
                self.token(),
            )
            .await
    }

    #[instrument(skip(self), fields(member = %self.inner.member))]
    async fn follow(&self, member: &EntityId) -> Result<()> {
        debug!("Following member");
        self.mutate(
            format!("follow:{}", member),
            Method::POST,
            endpoints::follow(member),
        )
        .await
    }

    #[instrument(skip(self), fields(member = %self.inner.member))]
    async fn unfollow(&self, member: &EntityId) -> Result<()> {
        debug!("Unfollowing member");
        self.mutate(
            format!("follow:{}", member),
            Method::DELETE,
            endpoints::follow(member),
        )
        .await
    }

    #[instrument(skip(self), fields(member = %self.inner.member))]
    async fn profile(&self, member: &EntityId) -> Result<Profile> {
        debug!(profile = %member, "Fetching profile");
        self.client()
            .get(&endpoints::profile_of(member), &(), self.token())
            .await
            .map_err(|e| match e {
                Error::Protocol(p) if p.status == 404 => Error::NotFound {
                    resource: "profile".to_string(),
                    id: member.to_string(),
                },
                other => other,
            })
    }

    #[instrument(skip(self, update), fields(member = %self.inner.member))]
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile> {
        info!("Updating profile");
        let _permit = self.inner.guard.acquire("profile")?;
        self.client()
            .send(Method::PUT, endpoints::PROFILE, Some(update), self.token())
            .await
    }
}

#[async_trait]
impl<E: Entity> Fetcher<E> for RestSession {
    async fn fetch_page(&self, query: &PageQuery) -> Result<ListPage<E>> {
        self.inner.api.fetch_page_with(query, self.token()).await
    }

    async fn fetch_one(&self, id: &EntityId) -> Result<E> {
        self.inner.api.fetch_one_with(id, self.token()).await
    }
}

impl std::fmt::Debug for RestSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestSession")
            .field("member", &self.inner.member)
            .field("api", self.inner.api.url())
            .field("token", &"[REDACTED]")
            .finish()
    }
}
