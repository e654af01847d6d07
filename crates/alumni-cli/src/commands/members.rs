//! Member directory commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use alumni_core::list::{FilterState, Selector};
use alumni_core::model::Member;
use alumni_core::{Fetcher, MemberDirectory, Session};

use super::list::{self, ListArgs};
use super::{Source, parse_id};
use crate::config::Settings;
use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct MembersCommand {
    #[command(subcommand)]
    pub command: MembersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum MembersSubcommand {
    /// List members page by page
    List(ListMembersArgs),

    /// Show one member
    Show(ShowMemberArgs),

    /// Load the whole directory and search it by name
    Find(FindArgs),

    /// Follow a member
    Follow(MemberIdArgs),

    /// Stop following a member
    Unfollow(MemberIdArgs),
}

#[derive(Args, Debug)]
pub struct ListMembersArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Only members with this role (e.g. alumni, student)
    #[arg(long, default_value = Selector::ALL)]
    pub role: Selector,
}

#[derive(Args, Debug)]
pub struct ShowMemberArgs {
    /// Member id
    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Text to look for in member names
    pub query: String,

    /// Only members from this department
    #[arg(long, default_value = Selector::ALL)]
    pub department: Selector,
}

#[derive(Args, Debug)]
pub struct MemberIdArgs {
    /// Member id
    pub id: String,
}

pub async fn handle(cmd: MembersCommand, settings: &Settings) -> Result<()> {
    match cmd.command {
        MembersSubcommand::List(args) => {
            list::run::<Member>(settings, &args.list, args.role, render).await
        }
        MembersSubcommand::Show(args) => show(args, settings).await,
        MembersSubcommand::Find(args) => find(args, settings).await,
        MembersSubcommand::Follow(args) => follow(args, settings, true).await,
        MembersSubcommand::Unfollow(args) => follow(args, settings, false).await,
    }
}

fn render(member: &Member) {
    output::row(
        member.id.as_str(),
        &member.full_name(),
        &[
            member.role.as_deref(),
            member.department.as_deref(),
            member.batch.as_deref(),
            member.following.then_some("following"),
        ],
    );
}

async fn show(args: ShowMemberArgs, settings: &Settings) -> Result<()> {
    let id = parse_id(&args.id, "member")?;
    let member: Member = match Source::open(settings).await? {
        Source::Session(s) => Fetcher::<Member>::fetch_one(&s, &id).await,
        Source::Anonymous(api) => Fetcher::<Member>::fetch_one(&api, &id).await,
    }
    .context("Failed to fetch member")?;

    if args.json {
        return output::json_pretty(&member);
    }

    output::field("Id", member.id.as_str());
    output::field("Name", &member.full_name());
    output::field_opt("Email", member.email.as_deref());
    output::field_opt("Role", member.role.as_deref());
    output::field_opt("Department", member.department.as_deref());
    output::field_opt("Batch", member.batch.as_deref());
    Ok(())
}

async fn find(args: FindArgs, settings: &Settings) -> Result<()> {
    let directory = MemberDirectory::new(settings.page_size).context("Invalid page size")?;
    match Source::open(settings).await? {
        Source::Session(s) => directory.refresh(&s).await,
        Source::Anonymous(api) => directory.refresh(&api).await,
    }
    .context("Failed to load member directory")?;

    let snapshot = directory.snapshot();
    let filter = FilterState::search(args.query).with_category(args.department);
    let matches: Vec<&Member> = snapshot
        .members
        .iter()
        .filter(|m| filter.matches(*m))
        .collect();

    if matches.is_empty() {
        output::note("No members found.");
    }
    for member in &matches {
        render(member);
    }
    output::note(&format!(
        "{} of {} members match",
        matches.len(),
        snapshot.members.len()
    ));
    Ok(())
}

async fn follow(args: MemberIdArgs, settings: &Settings, follow: bool) -> Result<()> {
    let session = storage::require_session(settings).await?;
    let id = parse_id(&args.id, "member")?;

    if follow {
        session.follow(&id).await.context("Failed to follow member")?;
        output::success(&format!("Following {}", id));
    } else {
        session.unfollow(&id).await.context("Failed to unfollow member")?;
        output::success(&format!("No longer following {}", id));
    }
    Ok(())
}
