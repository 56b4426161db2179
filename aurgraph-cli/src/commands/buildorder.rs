use anyhow::Result;
use aurgraph_core::depend::{default_kinds, parse_kind_spec};
use aurgraph_core::rpc::HttpClient;
use aurgraph_core::{AurConfig, console, operations};
use clap::Args;

#[derive(Args, Debug)]
pub struct BuildorderArgs {
    /// Packages to order, as name or name<op>version
    #[arg(required = true)]
    pub targets: Vec<String>,

    /// Dependency kinds to follow: comma list of depends, makedepends,
    /// checkdepends, optionally prefixed with !/^ (remove) or + (append)
    #[arg(long = "resolve-deps", value_name = "SPEC")]
    pub resolve_deps: Option<String>,
}

pub async fn run(config: &AurConfig, args: BuildorderArgs) -> Result<()> {
    let mut kinds = default_kinds();
    if let Some(spec) = &args.resolve_deps {
        parse_kind_spec(spec, &mut kinds)?;
    }

    let client = HttpClient::new(&config.baseurl);
    let local = super::load_database(config)?;
    let plan = operations::buildorder(&client, &local, &args.targets, &kinds).await?;

    for cycle in &plan.cycles {
        console::warn(&format!("found dependency cycle: {cycle}"));
    }
    for step in &plan.steps {
        println!("{step}");
    }

    if plan.has_unknown() {
        std::process::exit(1);
    }

    Ok(())
}
