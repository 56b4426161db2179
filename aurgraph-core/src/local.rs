//! Read-only index over the locally known package set: what is installed,
//! and what the sync databases could install. Loaded once from a snapshot
//! before resolution starts; the resolver never mutates it.

use crate::depend::Depstring;
use crate::{AurError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct InstalledPackage {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub provides: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncPackage {
    pub repo: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub provides: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DatabaseSnapshot {
    #[serde(default)]
    pub installed: Vec<InstalledPackage>,
    #[serde(default)]
    pub sync: Vec<SyncPackage>,
}

/// How a dependency relates to the local repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalResolution {
    /// Already satisfied by the installed package set.
    Installed,
    /// Satisfiable from a sync database, but not installed.
    Available { repo: String },
    NotFound,
}

#[derive(Debug, Default)]
pub struct LocalDatabase {
    installed: Vec<InstalledPackage>,
    sync: Vec<SyncPackage>,
    // Positions into the vectors above, keyed by package name and by the
    // base name of each provide.
    installed_index: HashMap<String, Vec<usize>>,
    sync_index: HashMap<String, Vec<usize>>,
}

impl LocalDatabase {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| AurError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: DatabaseSnapshot =
            serde_json::from_str(&data).map_err(|source| AurError::ParseJson {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_snapshot(snapshot: DatabaseSnapshot) -> Self {
        let mut db = LocalDatabase {
            installed: snapshot.installed,
            sync: snapshot.sync,
            installed_index: HashMap::new(),
            sync_index: HashMap::new(),
        };

        for (idx, package) in db.installed.iter().enumerate() {
            index_entry(&mut db.installed_index, &package.name, &package.provides, idx);
        }
        for (idx, package) in db.sync.iter().enumerate() {
            index_entry(&mut db.sync_index, &package.name, &package.provides, idx);
        }

        db
    }

    /// Classifies a dependency against the local package set. The installed
    /// set wins over sync databases; within each, an exact name match is
    /// checked before provides.
    pub fn resolve(&self, dep: &Depstring) -> LocalResolution {
        if let Some(candidates) = self.installed_index.get(dep.name()) {
            for &idx in candidates {
                let package = &self.installed[idx];
                if dep.satisfied_by(&package.name, &package.version, &package.provides) {
                    return LocalResolution::Installed;
                }
            }
        }

        if let Some(candidates) = self.sync_index.get(dep.name()) {
            for &idx in candidates {
                let package = &self.sync[idx];
                if dep.satisfied_by(&package.name, &package.version, &package.provides) {
                    return LocalResolution::Available {
                        repo: package.repo.clone(),
                    };
                }
            }
        }

        LocalResolution::NotFound
    }

    pub fn sync_packages(&self) -> &[SyncPackage] {
        &self.sync
    }

    /// Installed packages with no sync-database record of the same name —
    /// the ones maintained from the AUR. A sync package merely *providing*
    /// the name does not make it native.
    pub fn foreign_packages(&self) -> impl Iterator<Item = &InstalledPackage> {
        self.installed.iter().filter(|package| {
            self.sync_index.get(&package.name).is_none_or(|candidates| {
                candidates
                    .iter()
                    .all(|&idx| self.sync[idx].name != package.name)
            })
        })
    }
}

fn index_entry(
    index: &mut HashMap<String, Vec<usize>>,
    name: &str,
    provides: &[String],
    idx: usize,
) {
    index.entry(name.to_string()).or_default().push(idx);
    for raw in provides {
        if let Ok(provide) = Depstring::parse(raw) {
            index.entry(provide.name().to_string()).or_default().push(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installed(name: &str, version: &str, provides: &[&str]) -> InstalledPackage {
        InstalledPackage {
            name: name.to_string(),
            version: version.to_string(),
            provides: provides.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn sync(repo: &str, name: &str, version: &str, provides: &[&str]) -> SyncPackage {
        SyncPackage {
            repo: repo.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            provides: provides.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn database() -> LocalDatabase {
        LocalDatabase::from_snapshot(DatabaseSnapshot {
            installed: vec![installed("ocaml", "4.14.1-1", &[])],
            sync: vec![
                sync("community", "dune", "3.11.1-1", &["jbuilder=3.11.1"]),
                sync("core", "curl", "8.7.1-1", &["libcurl.so=4-64"]),
            ],
        })
    }

    fn dep(s: &str) -> Depstring {
        Depstring::parse(s).unwrap()
    }

    #[test]
    fn installed_wins_over_sync() {
        assert_eq!(LocalResolution::Installed, database().resolve(&dep("ocaml")));
    }

    #[test]
    fn sync_match_reports_repo() {
        assert_eq!(
            LocalResolution::Available {
                repo: "community".to_string()
            },
            database().resolve(&dep("dune"))
        );
    }

    #[test]
    fn provide_name_matches() {
        assert_eq!(
            LocalResolution::Available {
                repo: "community".to_string()
            },
            database().resolve(&dep("jbuilder"))
        );
        assert_eq!(
            LocalResolution::Available {
                repo: "core".to_string()
            },
            database().resolve(&dep("libcurl.so"))
        );
    }

    #[test]
    fn version_constraints_are_honored() {
        assert_eq!(
            LocalResolution::Available {
                repo: "core".to_string()
            },
            database().resolve(&dep("curl>=8"))
        );
        assert_eq!(LocalResolution::NotFound, database().resolve(&dep("curl>9")));
    }

    #[test]
    fn unknown_names_are_not_found() {
        assert_eq!(LocalResolution::NotFound, database().resolve(&dep("pacman")));
    }

    #[test]
    fn foreign_packages_are_installed_but_not_in_sync() {
        let db = LocalDatabase::from_snapshot(DatabaseSnapshot {
            installed: vec![
                installed("curl", "8.7.1-1", &[]),
                installed("auracle-git", "r74-1", &[]),
                installed("jbuilder", "1.0-1", &[]),
            ],
            sync: vec![
                sync("core", "curl", "8.7.1-1", &[]),
                sync("community", "dune", "3.11.1-1", &["jbuilder=3.11.1"]),
            ],
        });

        // A sync provide for jbuilder exists, but no sync package of that
        // name, so it stays foreign.
        let foreign: Vec<&str> = db.foreign_packages().map(|p| p.name.as_str()).collect();
        assert_eq!(vec!["auracle-git", "jbuilder"], foreign);
    }

    #[test]
    fn empty_snapshot_resolves_nothing() {
        let db = LocalDatabase::default();
        assert_eq!(LocalResolution::NotFound, db.resolve(&dep("ocaml")));
    }
}
