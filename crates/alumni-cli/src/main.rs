//! alumni - CLI for browsing and acting on an alumni network.
//!
//! This is a thin wrapper over `alumni-rest`: every list command fetches
//! through the shared list controller and prints the filtered result.

mod cli;
mod commands;
mod config;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{auth, groups, jobs, members, profile};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let settings = cli.settings();
    match cli.command {
        Commands::Login(args) => auth::login(args, &settings).await,
        Commands::Whoami(args) => auth::whoami(args, &settings).await,
        Commands::Logout(args) => auth::logout(args).await,
        Commands::Groups(cmd) => groups::handle(cmd, &settings).await,
        Commands::Jobs(cmd) => jobs::handle(cmd, &settings).await,
        Commands::Members(cmd) => members::handle(cmd, &settings).await,
        Commands::Profile(cmd) => profile::handle(cmd, &settings).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
