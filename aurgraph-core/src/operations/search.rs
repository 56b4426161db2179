use crate::rpc::{AurClient, Package, SearchBy};
use crate::Result;
use futures::future::try_join_all;

/// Searches the AUR for each term concurrently and merges the results,
/// deduplicated and sorted by package name.
pub async fn search<C: AurClient>(
    client: &C,
    terms: &[String],
    by: SearchBy,
) -> Result<Vec<Package>> {
    let results = try_join_all(terms.iter().map(|term| client.search(term, by))).await?;

    let mut packages: Vec<Package> = results.into_iter().flatten().collect();
    packages.sort_by(|a, b| a.name.cmp(&b.name));
    packages.dedup_by(|a, b| a.name == b.name);

    Ok(packages)
}
