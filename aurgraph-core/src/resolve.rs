//! Frontier-based construction of the dependency graph. Dependency metadata
//! is only partially known up front: AUR records are fetched level by level,
//! with every unresolved name of one level coalesced into a single batched
//! RPC call, bounding round trips by graph depth rather than node count.

use crate::cache::PackageCache;
use crate::depend::{Depstring, DependencyKind};
use crate::local::{LocalDatabase, LocalResolution};
use crate::rpc::{AurClient, Package};
use crate::{AurError, Result};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Where a dependency name can be satisfied. Exactly one class is assigned
/// per discovered name; only `Build` nodes are explored further, since
/// repository packages are installed wholesale by the package manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionClass {
    /// Satisfied by the installed system state.
    Installed,
    /// Satisfiable from a sync database.
    Available { repo: String },
    /// Must be built from the named AUR record.
    Build { package: String },
    /// No provider anywhere.
    Unknown,
}

#[derive(Debug)]
pub struct GraphNode {
    pub name: String,
    pub class: ResolutionClass,
    /// Declared dependencies of the satisfying record; empty for leaves.
    pub children: Vec<Depstring>,
}

#[derive(Debug)]
pub struct DepGraph {
    targets: Vec<String>,
    nodes: HashMap<String, GraphNode>,
    cache: PackageCache,
}

impl DepGraph {
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn is_target(&self, name: &str) -> bool {
        self.targets.iter().any(|t| t == name)
    }

    pub fn node(&self, name: &str) -> Option<&GraphNode> {
        self.nodes.get(name)
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.cache.lookup(name)
    }

    pub fn has_unknown(&self) -> bool {
        self.nodes
            .values()
            .any(|node| node.class == ResolutionClass::Unknown)
    }
}

pub async fn build_graph<C: AurClient>(
    client: &C,
    local: &LocalDatabase,
    targets: &[String],
    kinds: &BTreeSet<DependencyKind>,
) -> Result<DepGraph> {
    let mut frontier = Vec::new();
    let mut target_names = Vec::new();
    for target in targets {
        let dep = Depstring::parse(target)?;
        if !target_names.contains(&dep.name().to_string()) {
            target_names.push(dep.name().to_string());
            frontier.push(dep);
        }
    }

    let mut nodes: HashMap<String, GraphNode> = HashMap::new();
    let mut cache = PackageCache::new();
    let mut fetched: HashSet<String> = HashSet::new();
    let mut level = 0usize;

    while !frontier.is_empty() {
        let mut pending: Vec<Depstring> = Vec::new();
        let mut next: Vec<Depstring> = Vec::new();

        for dep in frontier.drain(..) {
            if nodes.contains_key(dep.name()) {
                continue;
            }

            match local.resolve(&dep) {
                LocalResolution::Installed => {
                    insert_leaf(&mut nodes, &dep, ResolutionClass::Installed);
                }
                LocalResolution::Available { repo } => {
                    tracing::debug!(name = dep.name(), repo = %repo, "satisfiable from repo");
                    insert_leaf(&mut nodes, &dep, ResolutionClass::Available { repo });
                }
                LocalResolution::NotFound => {
                    // A record fetched on an earlier level may already
                    // satisfy this name through its provides.
                    if let Some(package) = cache.find_satisfier(&dep) {
                        classify_build(&mut nodes, &mut next, &dep, package, kinds);
                    } else {
                        pending.push(dep);
                    }
                }
            }
        }

        let mut names: Vec<String> = Vec::new();
        for dep in &pending {
            if fetched.insert(dep.name().to_string()) {
                names.push(dep.name().to_string());
            }
        }

        if !names.is_empty() {
            tracing::debug!(level, count = names.len(), "batched metadata fetch");
            for package in client.info(&names).await? {
                cache.add(package);
            }
        }

        for dep in pending {
            if nodes.contains_key(dep.name()) {
                continue;
            }
            match cache.find_satisfier(&dep) {
                Some(package) => classify_build(&mut nodes, &mut next, &dep, package, kinds),
                None => {
                    tracing::debug!(dep = dep.as_str(), "no provider found");
                    insert_leaf(&mut nodes, &dep, ResolutionClass::Unknown);
                }
            }
        }

        frontier = next;
        level += 1;
    }

    for name in &target_names {
        if let Some(node) = nodes.get(name)
            && node.class == ResolutionClass::Unknown
        {
            return Err(AurError::TargetNotFound { name: name.clone() });
        }
    }

    Ok(DepGraph {
        targets: target_names,
        nodes,
        cache,
    })
}

fn insert_leaf(nodes: &mut HashMap<String, GraphNode>, dep: &Depstring, class: ResolutionClass) {
    nodes.insert(
        dep.name().to_string(),
        GraphNode {
            name: dep.name().to_string(),
            class,
            children: Vec::new(),
        },
    );
}

fn classify_build(
    nodes: &mut HashMap<String, GraphNode>,
    next: &mut Vec<Depstring>,
    dep: &Depstring,
    package: &Package,
    kinds: &BTreeSet<DependencyKind>,
) {
    // Lenient parsing here: record contents are packager-authored and a
    // typo in one of them must not take the whole resolution down.
    let mut children = Vec::new();
    for kind in kinds {
        for raw in package.dependencies(*kind) {
            children.push(Depstring::parse_lenient(raw));
        }
    }

    next.extend(children.iter().cloned());
    nodes.insert(
        dep.name().to_string(),
        GraphNode {
            name: dep.name().to_string(),
            class: ResolutionClass::Build {
                package: package.name.clone(),
            },
            children,
        },
    );
}
