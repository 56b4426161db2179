use anyhow::Result;
use aurgraph_core::rpc::HttpClient;
use aurgraph_core::{AurConfig, operations};
use clap::Args;

#[derive(Args, Debug)]
pub struct OutdatedArgs {
    /// Only print package names
    #[arg(long, short)]
    pub quiet: bool,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(config: &AurConfig, args: OutdatedArgs) -> Result<()> {
    let client = HttpClient::new(&config.baseurl);
    let local = super::load_database(config)?;
    let entries = operations::outdated(&client, &local).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        if args.quiet {
            println!("{}", entry.name);
        } else {
            println!("{} {} -> {}", entry.name, entry.installed, entry.remote);
        }
    }

    Ok(())
}
