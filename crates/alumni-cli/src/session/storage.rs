//! Session storage for persisting login state.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use alumni_core::{AccessToken, ApiUrl, EntityId, Session};
use alumni_rest::{RestApi, RestSession};

use crate::config::Settings;

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

/// Stored session data.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    api: String,
    member_id: String,
    token: String,
    saved_at: DateTime<Utc>,
}

/// Get the session file path.
fn session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "alumni").context("Could not determine config directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Save a session to disk.
pub async fn save_session(session: &RestSession) -> Result<()> {
    let stored = StoredSession {
        api: session.api().to_string(),
        member_id: session.member_id().to_string(),
        token: session.access_token().as_str().to_string(),
        saved_at: Utc::now(),
    };

    let path = session_path()?;
    let json = serde_json::to_string_pretty(&stored)?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    // The file holds a bearer token: never readable by others, not even briefly.
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options
        .open(&path)
        .context("Failed to open session file")?;

    // `mode` only applies on creation; tighten a file left by an older login.
    #[cfg(unix)]
    file.set_permissions(fs::Permissions::from_mode(0o600))?;

    file.write_all(json.as_bytes())
        .context("Failed to write session file")?;

    Ok(())
}

/// A stored session, or the API it belongs to when `--api` points elsewhere.
enum Stored {
    Usable(RestSession),
    OtherApi { stored: ApiUrl, requested: ApiUrl },
}

/// Read the session file. The token is only ever sent to the API that
/// issued it.
async fn read_session(settings: &Settings) -> Result<Option<Stored>> {
    let path = session_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read session file")?;
    let stored: StoredSession = serde_json::from_str(&json).context("Invalid session file")?;

    let stored_api = ApiUrl::new(&stored.api).context("Invalid API URL in session")?;
    if let Some(api) = &settings.api {
        let requested = ApiUrl::new(api).context("Invalid API URL")?;
        if requested != stored_api {
            return Ok(Some(Stored::OtherApi {
                stored: stored_api,
                requested,
            }));
        }
    }

    let member = EntityId::new(&stored.member_id).context("Invalid member id in session")?;

    tracing::debug!(saved_at = %stored.saved_at, "Loaded stored session");

    let api = RestApi::with_config(settings.client_config(stored_api)?)?;
    Ok(Some(Stored::Usable(RestSession::from_persisted(
        api,
        member,
        AccessToken::new(stored.token),
    ))))
}

/// Load a session from disk.
///
/// Returns `None` when there is no session, or when `--api` names a
/// different API than the one the session was issued by.
pub async fn load_session(settings: &Settings) -> Result<Option<RestSession>> {
    match read_session(settings).await? {
        Some(Stored::Usable(session)) => Ok(Some(session)),
        Some(Stored::OtherApi { stored, requested }) => {
            tracing::warn!(
                stored = %stored,
                requested = %requested,
                "Stored session belongs to another API; continuing signed out"
            );
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Load a session or fail with a hint to log in.
pub async fn require_session(settings: &Settings) -> Result<RestSession> {
    match read_session(settings)
        .await
        .context("Failed to load session")?
    {
        Some(Stored::Usable(session)) => Ok(session),
        Some(Stored::OtherApi { stored, requested }) => bail!(
            "Session belongs to {}; run 'alumni login --api {}' first.",
            stored,
            requested
        ),
        None => bail!("No active session. Run 'alumni login' first."),
    }
}

/// Clear the stored session. Returns false if there was none.
pub async fn clear_session() -> Result<bool> {
    let path = session_path()?;

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove session file")?;
        return Ok(true);
    }

    Ok(false)
}
