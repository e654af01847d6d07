//! Unauthenticated access to the alumni API.

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info, instrument};

use alumni_core::error::{AuthError, Error};
use alumni_core::list::{ListPage, PageQuery};
use alumni_core::{AccessToken, ApiUrl, Credentials, Entity, EntityId, Fetcher, Result};

use crate::client::RestClient;
use crate::config::ClientConfig;
use crate::endpoints::{self, ListQuery, LoginRequest, LoginResponse};
use crate::session::RestSession;

/// Entry point to the API: public collections and login.
#[derive(Debug, Clone)]
pub struct RestApi {
    client: RestClient,
}

impl RestApi {
    /// Create an API handle with default settings.
    pub fn new(base_url: ApiUrl) -> Result<Self> {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: RestClient::new(config)?,
        })
    }

    pub fn url(&self) -> &ApiUrl {
        &self.client.config().base_url
    }

    pub fn config(&self) -> &ClientConfig {
        self.client.config()
    }

    pub(crate) fn client(&self) -> &RestClient {
        &self.client
    }

    /// Sign in and open a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the server rejects the
    /// email/password pair.
    #[instrument(skip(self, credentials), fields(api = %self.url(), email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<RestSession> {
        info!("Signing in");

        let request = LoginRequest {
            email: credentials.email(),
            password: credentials.password(),
        };

        let response: LoginResponse = self
            .client
            .send(Method::POST, endpoints::LOGIN, Some(&request), None)
            .await
            .map_err(|e| match e {
                Error::Protocol(p) if p.status == 400 || p.is_auth_error() => {
                    debug!(status = p.status, "Login rejected");
                    Error::Auth(AuthError::InvalidCredentials)
                }
                other => other,
            })?;

        debug!(member = %response.user.id, "Signed in");
        Ok(RestSession::new(
            self.clone(),
            response.user.id,
            AccessToken::new(response.token),
        ))
    }

    pub(crate) async fn fetch_page_with<E: Entity>(
        &self,
        query: &PageQuery,
        token: Option<&str>,
    ) -> Result<ListPage<E>> {
        debug!(resource = E::RESOURCE, page = query.page, size = query.size, "Fetching page");

        let params = ListQuery {
            page: query.page,
            size: query.size,
            user_id: query.user_id.as_ref().map(EntityId::as_str),
        };

        self.client
            .get(&endpoints::collection(E::RESOURCE), &params, token)
            .await
    }

    pub(crate) async fn fetch_one_with<E: Entity>(
        &self,
        id: &EntityId,
        token: Option<&str>,
    ) -> Result<E> {
        debug!(resource = E::RESOURCE, %id, "Fetching entity");

        self.client
            .get(&endpoints::item(E::RESOURCE, id), &(), token)
            .await
            .map_err(|e| match e {
                Error::Protocol(p) if p.status == 404 => Error::NotFound {
                    resource: E::RESOURCE.to_string(),
                    id: id.to_string(),
                },
                other => other,
            })
    }
}

#[async_trait]
impl<E: Entity> Fetcher<E> for RestApi {
    async fn fetch_page(&self, query: &PageQuery) -> Result<ListPage<E>> {
        self.fetch_page_with(query, None).await
    }

    async fn fetch_one(&self, id: &EntityId) -> Result<E> {
        self.fetch_one_with(id, None).await
    }
}
