//! HTTP client for the alumni REST API.

use reqwest::{Method, RequestBuilder, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use alumni_core::error::{Error, ProtocolError, TransportError};
use alumni_core::Result;

use crate::config::ClientConfig;
use crate::endpoints::ErrorResponse;

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl RestClient {
    /// Create a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Http {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET a resource with query parameters.
    #[instrument(skip(self, token), fields(api = %self.config.base_url))]
    pub async fn get<Q, R>(&self, path: &str, params: &Q, token: Option<&str>) -> Result<R>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        debug!(path, "GET");
        trace!(?params, "query parameters");

        let response = self
            .request(Method::GET, path, token)
            .query(params)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.handle_response(response).await
    }

    /// Send a request with an optional JSON body and decode a JSON reply.
    #[instrument(skip(self, body, token), fields(api = %self.config.base_url))]
    pub async fn send<B, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(%method, path, "request");

        let mut request = self.request(method, path, token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        self.handle_response(response).await
    }

    /// Send a request whose reply body is ignored.
    #[instrument(skip(self, body, token), fields(api = %self.config.base_url))]
    pub async fn send_no_response<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        debug!(%method, path, "request (no response)");

        let mut request = self.request(method, path, token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Protocol(self.parse_error_response(response).await))
        }
    }

    /// POST a multipart form and decode a JSON reply.
    #[instrument(skip(self, form, token), fields(api = %self.config.base_url))]
    pub async fn post_multipart<R>(&self, path: &str, form: Form, token: Option<&str>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!(path, "POST multipart");

        let response = self
            .request(Method::POST, path, token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.handle_response(response).await
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = self.config.base_url.endpoint(path);
        let request = self.client.request(method, url);
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn handle_response<R: DeserializeOwned>(&self, response: reqwest::Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            response.json::<R>().await.map_err(|e| self.transport_error(e))
        } else {
            Err(Error::Protocol(self.parse_error_response(response).await))
        }
    }

    async fn parse_error_response(&self, response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<ErrorResponse>().await {
            Ok(body) => ProtocolError::new(status, body.error, body.message),
            Err(_) => ProtocolError::new(status, None, None),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        let err = if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: self.config.timeout.as_millis() as u64,
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        Error::Transport(err)
    }
}
