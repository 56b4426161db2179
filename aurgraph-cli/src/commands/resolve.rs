use anyhow::Result;
use aurgraph_core::rpc::HttpClient;
use aurgraph_core::{AurConfig, operations};
use clap::Args;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Dependency specs to find providers for, as name or name<op>version
    #[arg(required = true)]
    pub specs: Vec<String>,
}

pub async fn run(config: &AurConfig, args: ResolveArgs) -> Result<()> {
    let client = HttpClient::new(&config.baseurl);
    let local = super::load_database(config)?;

    let groups = operations::resolve(&client, &local, &args.specs).await?;
    for group in &groups {
        for provider in &group.providers {
            println!("{provider}");
        }
    }

    Ok(())
}
