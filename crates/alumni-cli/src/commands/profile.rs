//! Profile commands.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use alumni_core::Session;
use alumni_core::model::{Profile, ProfileUpdate};

use super::parse_id;
use crate::config::Settings;
use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileSubcommand {
    /// Show a profile (your own by default)
    Show(ShowProfileArgs),

    /// Update your profile
    Update(UpdateProfileArgs),
}

#[derive(Args, Debug)]
pub struct ShowProfileArgs {
    /// Member id
    pub id: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UpdateProfileArgs {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub bio: Option<String>,

    #[arg(long)]
    pub current_company: Option<String>,

    #[arg(long)]
    pub linkedin: Option<String>,
}

impl From<UpdateProfileArgs> for ProfileUpdate {
    fn from(args: UpdateProfileArgs) -> Self {
        ProfileUpdate {
            first_name: args.first_name,
            last_name: args.last_name,
            bio: args.bio,
            current_company: args.current_company,
            linkedin: args.linkedin,
        }
    }
}

pub async fn handle(cmd: ProfileCommand, settings: &Settings) -> Result<()> {
    match cmd.command {
        ProfileSubcommand::Show(args) => show(args, settings).await,
        ProfileSubcommand::Update(args) => update(args, settings).await,
    }
}

fn print(profile: &Profile) {
    output::field("Id", profile.id.as_str());
    output::field(
        "Name",
        &format!("{} {}", profile.first_name, profile.last_name),
    );
    output::field_opt("Email", profile.email.as_deref());
    output::field_opt("Department", profile.department.as_deref());
    output::field_opt("Batch", profile.batch.as_deref());
    output::field_opt("Company", profile.current_company.as_deref());
    output::field_opt("LinkedIn", profile.linkedin.as_deref());
    output::field_opt("Bio", profile.bio.as_deref());
    output::field("Followers", &profile.followers.to_string());
    output::field("Following", &profile.following.to_string());
}

async fn show(args: ShowProfileArgs, settings: &Settings) -> Result<()> {
    let session = storage::require_session(settings).await?;
    let id = match args.id {
        Some(id) => parse_id(&id, "member")?,
        None => session.member_id().clone(),
    };

    let profile = session.profile(&id).await.context("Failed to fetch profile")?;

    if args.json {
        return output::json_pretty(&profile);
    }
    print(&profile);
    Ok(())
}

async fn update(args: UpdateProfileArgs, settings: &Settings) -> Result<()> {
    let update = ProfileUpdate::from(args);
    if update.is_empty() {
        bail!("Nothing to update. Pass at least one field, e.g. --bio.");
    }

    let session = storage::require_session(settings).await?;
    let profile = session
        .update_profile(&update)
        .await
        .context("Failed to update profile")?;

    output::success("Profile updated");
    println!();
    print(&profile);
    Ok(())
}
