use anyhow::Result;
use aurgraph_core::AurConfig;
use aurgraph_core::local::LocalDatabase;

pub mod buildorder;
pub mod clone;
pub mod info;
pub mod outdated;
pub mod resolve;
pub mod search;

pub(crate) fn load_database(config: &AurConfig) -> Result<LocalDatabase> {
    match &config.database {
        Some(path) => Ok(LocalDatabase::load(path)?),
        None => Ok(LocalDatabase::default()),
    }
}
