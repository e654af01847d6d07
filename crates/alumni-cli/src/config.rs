//! Settings shared by every command.

use std::time::Duration;

use anyhow::{Context, Result};

use alumni_core::ApiUrl;
use alumni_rest::ClientConfig;

/// API base used when neither `--api` nor a stored session names one.
pub const DEFAULT_API: &str = "http://localhost:8080/api";

/// Global options resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Explicit `--api` / `ALUMNI_API`; overrides the stored session's URL.
    pub api: Option<String>,
    pub page_size: u32,
    pub timeout: Duration,
}

impl Settings {
    /// The API to talk to when there is no stored session.
    pub fn api_url(&self) -> Result<ApiUrl> {
        let api = self.api.as_deref().unwrap_or(DEFAULT_API);
        ApiUrl::new(api).context("Invalid API URL")
    }

    pub fn client_config(&self, api: ApiUrl) -> Result<ClientConfig> {
        let config = ClientConfig::new(api)
            .with_page_size(self.page_size)
            .context("Invalid page size")?
            .with_timeout(self.timeout)
            .with_user_agent(concat!("alumni-cli/", env!("ALUMNI_VERSION")));
        Ok(config)
    }
}
