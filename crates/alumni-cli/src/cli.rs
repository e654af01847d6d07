//! CLI argument definitions.

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::commands::auth::{LoginArgs, LogoutArgs, WhoamiArgs};
use crate::commands::groups::GroupsCommand;
use crate::commands::jobs::JobsCommand;
use crate::commands::members::MembersCommand;
use crate::commands::profile::ProfileCommand;
use crate::config::Settings;

/// Browse and act on an alumni network from the terminal.
#[derive(Parser, Debug)]
#[command(name = "alumni")]
#[command(author, version = env!("ALUMNI_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// API base URL (overrides the one stored at login)
    #[arg(long, env = "ALUMNI_API", global = true)]
    pub api: Option<String>,

    /// Records fetched per page
    #[arg(long, env = "ALUMNI_PAGE_SIZE", default_value_t = alumni_rest::DEFAULT_PAGE_SIZE, global = true)]
    pub page_size: u32,

    /// Request timeout in seconds
    #[arg(long, env = "ALUMNI_TIMEOUT", default_value_t = 30, global = true)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            api: self.api.clone(),
            page_size: self.page_size,
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session
    Login(LoginArgs),

    /// Display the active session
    Whoami(WhoamiArgs),

    /// Forget the stored session
    Logout(LogoutArgs),

    /// Alumni groups
    Groups(GroupsCommand),

    /// Job and internship board
    Jobs(JobsCommand),

    /// Member directory
    Members(MembersCommand),

    /// Member profiles
    Profile(ProfileCommand),
}
