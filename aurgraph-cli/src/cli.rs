use crate::commands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "aurgraph",
    about = "dependency graphs and build order for the AUR",
    version,
    color = clap::ColorChoice::Auto
)]
pub struct Cli {
    /// Base URL of the AUR instance to query
    #[arg(long, global = true)]
    pub baseurl: Option<String>,

    /// Path to a local database snapshot (installed + sync packages)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a dependency-first build order for AUR targets
    Buildorder(commands::buildorder::BuildorderArgs),
    /// List packages that could satisfy dependency specs
    Resolve(commands::resolve::ResolveArgs),
    /// Show package details
    Info(commands::info::InfoArgs),
    /// Search the AUR
    Search(commands::search::SearchArgs),
    /// List foreign packages with a newer AUR version
    Outdated(commands::outdated::OutdatedArgs),
    /// Clone package-base repositories from the AUR
    Clone(commands::clone::CloneArgs),
}
