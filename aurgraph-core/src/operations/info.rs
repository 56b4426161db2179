use crate::rpc::{AurClient, Package};
use crate::{AurError, Result};

#[derive(Debug)]
pub struct InfoResult {
    pub packages: Vec<Package>,
    /// Requested names with no record, in request order.
    pub missing: Vec<String>,
}

/// Looks up package records by exact name, all names in one request. Names
/// without a record are reported back rather than failing, except when
/// nothing at all was found.
pub async fn info<C: AurClient>(client: &C, names: &[String]) -> Result<InfoResult> {
    let mut wanted: Vec<String> = Vec::new();
    for name in names {
        if !wanted.contains(name) {
            wanted.push(name.clone());
        }
    }

    let packages = client.info(&wanted).await?;
    if packages.is_empty() {
        return Err(AurError::NoResults);
    }

    let missing = wanted
        .into_iter()
        .filter(|name| !packages.iter().any(|package| &package.name == name))
        .collect();

    Ok(InfoResult { packages, missing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::fake::{FakeAur, pkg};

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn reports_missing_names() {
        let mut aur = FakeAur::new();
        aur.add(pkg("auracle-git", "r74-1"));

        let result = info(&aur, &names(&["auracle-git", "ghost"])).await.unwrap();
        assert_eq!(1, result.packages.len());
        assert_eq!(vec!["ghost".to_string()], result.missing);
    }

    #[tokio::test]
    async fn batches_into_one_request() {
        let mut aur = FakeAur::new();
        aur.add(pkg("one", "1.0-1"));
        aur.add(pkg("two", "1.0-1"));

        info(&aur, &names(&["one", "two", "one"])).await.unwrap();
        assert_eq!(1, aur.info_calls());
    }

    #[tokio::test]
    async fn no_results_at_all_is_fatal() {
        let aur = FakeAur::new();
        let err = info(&aur, &names(&["ghost"])).await.unwrap_err();
        assert!(matches!(err, AurError::NoResults));
    }
}
