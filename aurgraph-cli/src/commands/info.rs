use anyhow::Result;
use aurgraph_core::rpc::{HttpClient, Package};
use aurgraph_core::{AurConfig, console, operations};
use clap::Args;

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Package names to look up
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(config: &AurConfig, args: InfoArgs) -> Result<()> {
    let client = HttpClient::new(&config.baseurl);
    let result = operations::info(&client, &args.names).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.packages)?);
    } else {
        for package in &result.packages {
            print_package(package);
        }
    }

    for name in &result.missing {
        console::warn(&format!("no results for {name}"));
    }

    Ok(())
}

fn print_package(package: &Package) {
    println!("Name            : {}", package.name);
    println!("Package Base    : {}", package.pkgbase);
    println!("Version         : {}", package.version);
    println!("Description     : {}", package.description);
    print_list("Depends On", &package.depends);
    print_list("Makedepends", &package.makedepends);
    print_list("Checkdepends", &package.checkdepends);
    print_list("Optional Deps", &package.optdepends);
    print_list("Provides", &package.provides);
    println!();
}

fn print_list(label: &str, values: &[String]) {
    let joined = if values.is_empty() {
        "None".to_string()
    } else {
        values.join("  ")
    };
    println!("{label:<16}: {joined}");
}
