use crate::local::LocalDatabase;
use crate::rpc::AurClient;
use crate::Result;
use aurgraph_vercmp::vercmp;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct OutdatedEntry {
    pub name: String,
    pub installed: String,
    pub remote: String,
}

/// Compares every foreign installed package against its AUR record, all
/// names in one batched lookup. An entry is reported only when the remote
/// version is strictly newer; packages without a record are skipped.
pub async fn outdated<C: AurClient>(
    client: &C,
    local: &LocalDatabase,
) -> Result<Vec<OutdatedEntry>> {
    let names: Vec<String> = local
        .foreign_packages()
        .map(|package| package.name.clone())
        .collect();
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let records = client.info(&names).await?;

    let mut entries = Vec::new();
    for package in local.foreign_packages() {
        let Some(record) = records.iter().find(|record| record.name == package.name) else {
            continue;
        };
        if vercmp(&record.version, &package.version) == Ordering::Greater {
            entries.push(OutdatedEntry {
                name: package.name.clone(),
                installed: package.version.clone(),
                remote: record.version.clone(),
            });
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::{DatabaseSnapshot, InstalledPackage, SyncPackage};
    use crate::rpc::fake::{FakeAur, pkg};

    fn installed(name: &str, version: &str) -> InstalledPackage {
        InstalledPackage {
            name: name.to_string(),
            version: version.to_string(),
            provides: vec![],
        }
    }

    fn database(installed_packages: Vec<InstalledPackage>) -> LocalDatabase {
        LocalDatabase::from_snapshot(DatabaseSnapshot {
            installed: installed_packages,
            sync: vec![SyncPackage {
                repo: "core".to_string(),
                name: "pacman".to_string(),
                version: "6.1.0-1".to_string(),
                provides: vec![],
            }],
        })
    }

    #[tokio::test]
    async fn reports_only_strictly_newer_records() {
        let mut aur = FakeAur::new();
        aur.add(pkg("auracle-git", "r78.1-1"));
        aur.add(pkg("aurutils", "4.0.0-1"));
        aur.add(pkg("pkgfile-git", "30-1"));

        let local = database(vec![
            installed("auracle-git", "r74-1"),
            installed("aurutils", "4.0.0-1"),
            installed("pkgfile-git", "32-1"),
        ]);

        let entries = outdated(&aur, &local).await.unwrap();
        assert_eq!(
            vec![OutdatedEntry {
                name: "auracle-git".to_string(),
                installed: "r74-1".to_string(),
                remote: "r78.1-1".to_string(),
            }],
            entries
        );
    }

    #[tokio::test]
    async fn packages_without_a_record_are_skipped() {
        let aur = FakeAur::new();
        let local = database(vec![installed("some-local-build", "1.0-1")]);

        let entries = outdated(&aur, &local).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn native_packages_are_never_queried() {
        let mut aur = FakeAur::new();
        aur.add(pkg("pacman", "7.0.0-1"));

        // pacman is in a sync database; the lone foreign package drives a
        // single batched call that does not include it.
        let local = database(vec![
            installed("pacman", "6.1.0-1"),
            installed("auracle-git", "r74-1"),
        ]);

        let entries = outdated(&aur, &local).await.unwrap();
        assert!(entries.is_empty());
        assert_eq!(1, aur.info_calls());
    }

    #[tokio::test]
    async fn no_foreign_packages_means_no_request() {
        let aur = FakeAur::new();
        let local = database(vec![installed("pacman", "6.1.0-1")]);

        let entries = outdated(&aur, &local).await.unwrap();
        assert!(entries.is_empty());
        assert_eq!(0, aur.info_calls());
    }

    #[tokio::test]
    async fn versions_compare_segment_wise() {
        let mut aur = FakeAur::new();
        aur.add(pkg("tool", "1.10-1"));

        let local = database(vec![installed("tool", "1.9-1")]);
        let entries = outdated(&aur, &local).await.unwrap();
        assert_eq!(1, entries.len());
        assert_eq!("1.10-1", entries[0].remote);
    }
}
