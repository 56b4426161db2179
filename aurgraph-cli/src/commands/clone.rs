use anyhow::Result;
use aurgraph_core::depend::{default_kinds, parse_kind_spec};
use aurgraph_core::rpc::HttpClient;
use aurgraph_core::{AurConfig, operations};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Packages whose bases should be cloned
    #[arg(required = true)]
    pub targets: Vec<String>,

    /// Also clone every AUR dependency, dependencies first
    #[arg(long)]
    pub recurse: bool,

    /// Directory to clone into
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    /// Dependency kinds to follow when recursing
    #[arg(long = "resolve-deps", value_name = "SPEC")]
    pub resolve_deps: Option<String>,
}

pub async fn run(config: &AurConfig, args: CloneArgs) -> Result<()> {
    let mut kinds = default_kinds();
    if let Some(spec) = &args.resolve_deps {
        parse_kind_spec(spec, &mut kinds)?;
    }

    let client = HttpClient::new(&config.baseurl);
    let local = super::load_database(config)?;
    let options = operations::CloneOptions {
        directory: args.directory,
        recurse: args.recurse,
        kinds,
    };

    let outcome =
        operations::clone(&client, &local, &config.baseurl, &args.targets, &options).await?;
    for base in &outcome.cloned {
        println!("cloned {base}");
    }
    for base in &outcome.updated {
        println!("updated {base}");
    }

    Ok(())
}
