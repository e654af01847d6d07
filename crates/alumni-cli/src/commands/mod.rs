//! Subcommand implementations.

pub mod auth;
pub mod groups;
pub mod jobs;
pub mod list;
pub mod members;
pub mod profile;

use anyhow::{Context, Result};

use alumni_core::{EntityId, Session};
use alumni_rest::RestApi;

use crate::config::Settings;
use crate::session::storage;

/// Parse a positional id argument.
pub fn parse_id(value: &str, what: &str) -> Result<EntityId> {
    EntityId::new(value).with_context(|| format!("Invalid {} id", what))
}

/// The stored session if there is one, otherwise an unauthenticated API
/// handle. Public collections are readable either way.
pub enum Source {
    Session(alumni_rest::RestSession),
    Anonymous(RestApi),
}

impl Source {
    pub async fn open(settings: &Settings) -> Result<Self> {
        match storage::load_session(settings).await? {
            Some(session) => Ok(Source::Session(session)),
            None => {
                let api = RestApi::with_config(settings.client_config(settings.api_url()?)?)?;
                Ok(Source::Anonymous(api))
            }
        }
    }

    pub fn member_id(&self) -> Option<&EntityId> {
        match self {
            Source::Session(session) => Some(session.member_id()),
            Source::Anonymous(_) => None,
        }
    }
}
