//! Memoized storage for fetched AUR package records. Records live in an
//! arena vector; the name and provide indexes store positions rather than
//! references so the vector can grow without invalidating them.

use crate::depend::Depstring;
use crate::rpc::Package;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct PackageCache {
    packages: Vec<Package>,
    by_name: HashMap<String, usize>,
    by_provide: HashMap<String, Vec<usize>>,
}

impl PackageCache {
    pub fn new() -> Self {
        PackageCache::default()
    }

    /// Adds a record, deduplicating by name. Returns whether it was new.
    pub fn add(&mut self, package: Package) -> bool {
        if self.by_name.contains_key(&package.name) {
            return false;
        }

        let idx = self.packages.len();
        self.by_name.insert(package.name.clone(), idx);
        for raw in &package.provides {
            if let Ok(provide) = Depstring::parse(raw) {
                self.by_provide
                    .entry(provide.name().to_string())
                    .or_default()
                    .push(idx);
            }
        }
        self.packages.push(package);

        true
    }

    pub fn lookup(&self, name: &str) -> Option<&Package> {
        self.by_name.get(name).map(|&idx| &self.packages[idx])
    }

    /// Finds a fetched record satisfying the dependency: the record named
    /// like it first, then any record providing its name.
    pub fn find_satisfier(&self, dep: &Depstring) -> Option<&Package> {
        if let Some(package) = self.lookup(dep.name())
            && dep.satisfied_by(&package.name, &package.version, &package.provides)
        {
            return Some(package);
        }

        for &idx in self.by_provide.get(dep.name())? {
            let package = &self.packages[idx];
            if dep.satisfied_by(&package.name, &package.version, &package.provides) {
                return Some(package);
            }
        }

        None
    }
}
