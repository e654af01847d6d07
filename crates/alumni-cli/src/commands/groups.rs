//! Group commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use alumni_core::list::Selector;
use alumni_core::model::{Group, MembershipDecision, NewGroup};
use alumni_core::{Fetcher, Session};

use super::list::{self, ListArgs};
use super::{Source, parse_id};
use crate::config::Settings;
use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct GroupsCommand {
    #[command(subcommand)]
    pub command: GroupsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GroupsSubcommand {
    /// List groups
    List(ListGroupsArgs),

    /// Show one group
    Show(ShowGroupArgs),

    /// Create a group
    Create(CreateGroupArgs),

    /// Join a group (or ask to, for private groups)
    Join(GroupIdArgs),

    /// Leave a group
    Leave(GroupIdArgs),

    /// Accept or reject a join request (group admins)
    Decide(DecideArgs),
}

#[derive(Args, Debug)]
pub struct ListGroupsArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Only public or private groups
    #[arg(long)]
    pub visibility: Option<Visibility>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Args, Debug)]
pub struct ShowGroupArgs {
    /// Group id
    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CreateGroupArgs {
    /// Group name
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Require admin approval to join
    #[arg(long)]
    pub private: bool,
}

#[derive(Args, Debug)]
pub struct GroupIdArgs {
    /// Group id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct DecideArgs {
    /// Group id
    pub group: String,

    /// Id of the member who asked to join
    pub member: String,

    #[arg(value_enum)]
    pub decision: Decision,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Decision {
    Accept,
    Reject,
}

impl From<Decision> for MembershipDecision {
    fn from(d: Decision) -> Self {
        match d {
            Decision::Accept => MembershipDecision::Accepted,
            Decision::Reject => MembershipDecision::Rejected,
        }
    }
}

pub async fn handle(cmd: GroupsCommand, settings: &Settings) -> Result<()> {
    match cmd.command {
        GroupsSubcommand::List(args) => run_list(args, settings).await,
        GroupsSubcommand::Show(args) => show(args, settings).await,
        GroupsSubcommand::Create(args) => create(args, settings).await,
        GroupsSubcommand::Join(args) => join(args, settings).await,
        GroupsSubcommand::Leave(args) => leave(args, settings).await,
        GroupsSubcommand::Decide(args) => decide(args, settings).await,
    }
}

fn render(group: &Group) {
    let members = format!("{} members", group.member_count);
    output::row(
        group.id.as_str(),
        &group.name,
        &[
            group.category.as_deref(),
            Some(&members),
            group.is_private.then_some("private"),
        ],
    );
}

async fn run_list(args: ListGroupsArgs, settings: &Settings) -> Result<()> {
    let kind = match args.visibility {
        None => Selector::All,
        Some(Visibility::Public) => Selector::only("public"),
        Some(Visibility::Private) => Selector::only("private"),
    };
    list::run::<Group>(settings, &args.list, kind, render).await
}

async fn show(args: ShowGroupArgs, settings: &Settings) -> Result<()> {
    let id = parse_id(&args.id, "group")?;
    let group: Group = match Source::open(settings).await? {
        Source::Session(s) => Fetcher::<Group>::fetch_one(&s, &id).await,
        Source::Anonymous(api) => Fetcher::<Group>::fetch_one(&api, &id).await,
    }
    .context("Failed to fetch group")?;

    if args.json {
        return output::json_pretty(&group);
    }

    output::field("Id", group.id.as_str());
    output::field("Name", &group.name);
    output::field_opt("Category", group.category.as_deref());
    output::field_opt("Description", group.description.as_deref());
    output::field("Members", &group.member_count.to_string());
    output::field("Private", if group.is_private { "yes" } else { "no" });
    Ok(())
}

async fn create(args: CreateGroupArgs, settings: &Settings) -> Result<()> {
    let session = storage::require_session(settings).await?;
    let group = session
        .create_group(&NewGroup {
            name: args.name,
            description: args.description,
            category: args.category,
            is_private: args.private,
        })
        .await
        .context("Failed to create group")?;

    println!("{}", group.id);
    output::success(&format!("Created group '{}'", group.name));
    Ok(())
}

async fn join(args: GroupIdArgs, settings: &Settings) -> Result<()> {
    let session = storage::require_session(settings).await?;
    let id = parse_id(&args.id, "group")?;
    session.join_group(&id).await.context("Failed to join group")?;
    output::success(&format!("Joined group {}", id));
    Ok(())
}

async fn leave(args: GroupIdArgs, settings: &Settings) -> Result<()> {
    let session = storage::require_session(settings).await?;
    let id = parse_id(&args.id, "group")?;
    session.leave_group(&id).await.context("Failed to leave group")?;
    output::success(&format!("Left group {}", id));
    Ok(())
}

async fn decide(args: DecideArgs, settings: &Settings) -> Result<()> {
    let session = storage::require_session(settings).await?;
    let group = parse_id(&args.group, "group")?;
    let member = parse_id(&args.member, "member")?;
    session
        .decide_membership(&group, &member, args.decision.into())
        .await
        .context("Failed to update join request")?;
    let verb = match args.decision {
        Decision::Accept => "Accepted",
        Decision::Reject => "Rejected",
    };
    output::success(&format!("{} join request of {}", verb, member));
    Ok(())
}
