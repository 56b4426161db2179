use crate::depend::Depstring;
use crate::local::LocalDatabase;
use crate::rpc::{AurClient, SearchBy};
use crate::Result;
use futures::future::try_join_all;

/// Providers for one base name, across every constraint given for it.
#[derive(Debug, PartialEq, Eq)]
pub struct ProviderGroup {
    pub name: String,
    pub constraints: Vec<Depstring>,
    /// Sorted, deduplicated provider package names.
    pub providers: Vec<String>,
}

/// Answers "which packages could satisfy these dependency specs". Specs on
/// the same base name are grouped and their constraints unioned: a provider
/// matching any of them is listed. Candidates come from the sync databases
/// and a provides-search against the AUR; an empty group is not an error.
pub async fn resolve<C: AurClient>(
    client: &C,
    local: &LocalDatabase,
    specs: &[String],
) -> Result<Vec<ProviderGroup>> {
    // Parse everything up front so malformed input fails before any request
    // goes out.
    let mut groups: Vec<ProviderGroup> = Vec::new();
    for spec in specs {
        let dep = Depstring::parse(spec)?;
        match groups.iter_mut().find(|group| group.name == dep.name()) {
            Some(group) => group.constraints.push(dep),
            None => groups.push(ProviderGroup {
                name: dep.name().to_string(),
                constraints: vec![dep],
                providers: Vec::new(),
            }),
        }
    }

    let searches = try_join_all(
        groups
            .iter()
            .map(|group| client.search(&group.name, SearchBy::Provides)),
    )
    .await?;

    for (group, candidates) in groups.iter_mut().zip(searches) {
        for package in local.sync_packages() {
            if satisfies_any(group, &package.name, &package.version, &package.provides) {
                group.providers.push(package.name.clone());
            }
        }
        for package in candidates {
            if satisfies_any(group, &package.name, &package.version, &package.provides) {
                group.providers.push(package.name.clone());
            }
        }
        group.providers.sort();
        group.providers.dedup();
    }

    Ok(groups)
}

fn satisfies_any(group: &ProviderGroup, name: &str, version: &str, provides: &[String]) -> bool {
    group
        .constraints
        .iter()
        .any(|dep| dep.satisfied_by(name, version, provides))
}
