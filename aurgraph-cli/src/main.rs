use anyhow::Result;
use aurgraph_core::{AurConfig, console};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Command};

#[tokio::main]
async fn main() {
    init_tracing();

    let args = Cli::parse();

    let mut config = AurConfig::from_env();
    if let Some(baseurl) = args.baseurl {
        config.baseurl = baseurl;
    }
    if let Some(database) = args.database {
        config.database = Some(database);
    }

    if let Err(err) = dispatch(&config, args.command).await {
        console::error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

async fn dispatch(config: &AurConfig, command: Command) -> Result<()> {
    match command {
        Command::Buildorder(args) => commands::buildorder::run(config, args).await,
        Command::Resolve(args) => commands::resolve::run(config, args).await,
        Command::Info(args) => commands::info::run(config, args).await,
        Command::Search(args) => commands::search::run(config, args).await,
        Command::Outdated(args) => commands::outdated::run(config, args).await,
        Command::Clone(args) => commands::clone::run(config, args).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Ordered command output owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
