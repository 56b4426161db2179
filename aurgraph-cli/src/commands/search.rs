use anyhow::Result;
use aurgraph_core::rpc::{HttpClient, SearchBy};
use aurgraph_core::{AurConfig, operations};
use clap::{Args, ValueEnum};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search terms
    #[arg(required = true)]
    pub terms: Vec<String>,

    /// Field to search in
    #[arg(long, value_enum, default_value_t = SearchField::NameDesc)]
    pub by: SearchField,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SearchField {
    Name,
    NameDesc,
    Provides,
}

impl From<SearchField> for SearchBy {
    fn from(field: SearchField) -> Self {
        match field {
            SearchField::Name => SearchBy::Name,
            SearchField::NameDesc => SearchBy::NameDesc,
            SearchField::Provides => SearchBy::Provides,
        }
    }
}

pub async fn run(config: &AurConfig, args: SearchArgs) -> Result<()> {
    let client = HttpClient::new(&config.baseurl);
    let packages = operations::search(&client, &args.terms, args.by.into()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&packages)?);
        return Ok(());
    }

    for package in &packages {
        println!("aur/{} {}", package.name, package.version);
        if !package.description.is_empty() {
            println!("    {}", package.description);
        }
    }

    Ok(())
}
