//! Login, whoami and logout.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use alumni_core::{Credentials, Session};
use alumni_rest::RestApi;

use crate::config::Settings;
use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "ALUMNI_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn login(args: LoginArgs, settings: &Settings) -> Result<()> {
    let api_url = settings.api_url()?;
    let api = RestApi::with_config(settings.client_config(api_url)?)?;
    let credentials = Credentials::new(&args.email, &args.password);

    eprintln!("{}", "Signing in...".dimmed());

    let session = api.login(&credentials).await.context("Failed to login")?;

    storage::save_session(&session)
        .await
        .context("Failed to save session")?;

    output::success("Logged in successfully");
    println!();
    output::field("Member", session.member_id().as_str());
    output::field("API", session.api().as_str());

    Ok(())
}

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn whoami(_args: WhoamiArgs, settings: &Settings) -> Result<()> {
    let session = storage::require_session(settings).await?;

    output::field("Member", session.member_id().as_str());
    output::field("API", session.api().as_str());

    Ok(())
}

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn logout(_args: LogoutArgs) -> Result<()> {
    if storage::clear_session().await? {
        output::success("Logged out");
    } else {
        output::note("No active session.");
    }
    Ok(())
}
