//! Post-order linearization of a dependency graph into build steps. Cycles
//! are detected with tri-state visit coloring and reported as diagnostics
//! rather than errors; the member where the walk re-entered is simply not
//! revisited, which still yields a usable order for everything else.

use crate::resolve::{DepGraph, ResolutionClass};
use std::collections::HashMap;
use std::fmt;

/// One line of the build plan, in dependency-first order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStep {
    /// Already installed.
    Satisfied { name: String },
    /// Installable from a sync database.
    Repos { name: String },
    /// Must be built; `package` is the AUR record satisfying `name` and can
    /// differ from it when satisfaction goes through a provide.
    Build {
        name: String,
        package: String,
        target: bool,
    },
    /// No provider found. `ancestors` is the dependency chain that led
    /// here, nearest parent first.
    Unknown {
        name: String,
        ancestors: Vec<String>,
    },
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStep::Satisfied { name } => write!(f, "SATISFIEDREPOS {name}"),
            BuildStep::Repos { name } => write!(f, "REPOS {name}"),
            BuildStep::Build {
                name,
                package,
                target,
            } => {
                let tag = if *target { "TARGETAUR" } else { "AUR" };
                write!(f, "{tag} {name} {package}")
            }
            BuildStep::Unknown { name, ancestors } => {
                write!(f, "UNKNOWN {name}")?;
                for ancestor in ancestors {
                    write!(f, " {ancestor}")?;
                }
                Ok(())
            }
        }
    }
}

/// A cycle found during the walk: the acyclic lead-in from the target, then
/// the members of the loop itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyCycle {
    pub prefix: Vec<String>,
    pub cycle: Vec<String>,
}

impl fmt::Display for DependencyCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.prefix {
            write!(f, "{name} -> ")?;
        }
        write!(f, "[ ")?;
        for name in &self.cycle {
            write!(f, "{name} -> ")?;
        }
        // The loop closes back on its first member.
        write!(f, "{} ]", self.cycle[0])
    }
}

#[derive(Debug)]
pub struct BuildPlan {
    pub steps: Vec<BuildStep>,
    pub cycles: Vec<DependencyCycle>,
}

impl BuildPlan {
    pub fn has_unknown(&self) -> bool {
        self.steps
            .iter()
            .any(|step| matches!(step, BuildStep::Unknown { .. }))
    }
}

pub fn build_plan(graph: &DepGraph) -> BuildPlan {
    let mut walker = Walker {
        graph,
        names: HashMap::new(),
        records: HashMap::new(),
        path: Vec::new(),
        steps: Vec::new(),
        cycles: Vec::new(),
    };

    for target in graph.targets() {
        walker.visit(target);
    }

    BuildPlan {
        steps: walker.steps,
        cycles: walker.cycles,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

struct Walker<'g> {
    graph: &'g DepGraph,
    /// Visit state per dependency name.
    names: HashMap<String, VisitState>,
    /// Visit state per satisfying record. Several names can resolve to one
    /// record through provides; they must share state or alias edges would
    /// duplicate steps and hide cycles.
    records: HashMap<String, VisitState>,
    /// Current chain of build nodes: dependency name plus record name.
    path: Vec<(String, String)>,
    steps: Vec<BuildStep>,
    cycles: Vec<DependencyCycle>,
}

impl Walker<'_> {
    fn visit(&mut self, name: &str) {
        match self.names.get(name) {
            Some(VisitState::Done) => return,
            Some(VisitState::InProgress) => {
                self.record_cycle(name);
                return;
            }
            None => {}
        }

        let Some(node) = self.graph.node(name) else {
            return;
        };

        match &node.class {
            ResolutionClass::Installed => {
                self.names.insert(name.to_string(), VisitState::Done);
                self.steps.push(BuildStep::Satisfied {
                    name: name.to_string(),
                });
            }
            ResolutionClass::Available { .. } => {
                self.names.insert(name.to_string(), VisitState::Done);
                self.steps.push(BuildStep::Repos {
                    name: name.to_string(),
                });
            }
            ResolutionClass::Unknown => {
                self.names.insert(name.to_string(), VisitState::Done);
                let ancestors = self.path.iter().rev().map(|(n, _)| n.clone()).collect();
                self.steps.push(BuildStep::Unknown {
                    name: name.to_string(),
                    ancestors,
                });
            }
            ResolutionClass::Build { package } => {
                let package = package.clone();
                match self.records.get(&package) {
                    Some(VisitState::Done) => {
                        self.names.insert(name.to_string(), VisitState::Done);
                        return;
                    }
                    Some(VisitState::InProgress) => {
                        self.names.insert(name.to_string(), VisitState::Done);
                        self.record_cycle(&package);
                        return;
                    }
                    None => {}
                }

                self.names
                    .insert(name.to_string(), VisitState::InProgress);
                self.records
                    .insert(package.clone(), VisitState::InProgress);
                self.path.push((name.to_string(), package.clone()));

                let children: Vec<String> = node
                    .children
                    .iter()
                    .map(|child| child.name().to_string())
                    .collect();
                for child in &children {
                    self.visit(child);
                }

                self.path.pop();
                self.names.insert(name.to_string(), VisitState::Done);
                self.records.insert(package.clone(), VisitState::Done);

                self.steps.push(BuildStep::Build {
                    name: name.to_string(),
                    package,
                    target: self.graph.is_target(name),
                });
            }
        }
    }

    /// `entered` is either a dependency name or a record name currently on
    /// the path.
    fn record_cycle(&mut self, entered: &str) {
        let pos = self
            .path
            .iter()
            .position(|(name, package)| name == entered || package == entered)
            .unwrap_or(0);
        self.cycles.push(DependencyCycle {
            prefix: self.path[..pos].iter().map(|(n, _)| n.clone()).collect(),
            cycle: self.path[pos..].iter().map(|(n, _)| n.clone()).collect(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depend::default_kinds;
    use crate::local::{DatabaseSnapshot, InstalledPackage, LocalDatabase, SyncPackage};
    use crate::resolve::build_graph;
    use crate::rpc::fake::{FakeAur, deps, makedeps, pkg, provides};

    async fn plan(aur: &FakeAur, local: &LocalDatabase, targets: &[&str]) -> BuildPlan {
        let targets: Vec<String> = targets.iter().map(|t| t.to_string()).collect();
        let graph = build_graph(aur, local, &targets, &default_kinds())
            .await
            .unwrap();
        build_plan(&graph)
    }

    fn lines(plan: &BuildPlan) -> Vec<String> {
        plan.steps.iter().map(|step| step.to_string()).collect()
    }

    #[tokio::test]
    async fn emits_dependencies_before_dependents() {
        let mut aur = FakeAur::new();
        aur.add(deps(
            pkg("ocaml-configurator", "0.14.1-1"),
            &["ocaml", "dune", "ocaml-stdio"],
        ));
        aur.add(deps(pkg("ocaml-stdio", "0.14.0-1"), &["ocaml-base"]));
        aur.add(deps(pkg("ocaml-base", "0.14.1-1"), &["ocaml-sexplib0"]));
        aur.add(pkg("ocaml-sexplib0", "0.14.0-1"));

        let local = LocalDatabase::from_snapshot(DatabaseSnapshot {
            installed: vec![InstalledPackage {
                name: "ocaml".to_string(),
                version: "4.14.1-1".to_string(),
                provides: vec![],
            }],
            sync: vec![SyncPackage {
                repo: "community".to_string(),
                name: "dune".to_string(),
                version: "3.11.1-1".to_string(),
                provides: vec![],
            }],
        });

        let plan = plan(&aur, &local, &["ocaml-configurator"]).await;
        assert_eq!(
            vec![
                "SATISFIEDREPOS ocaml",
                "REPOS dune",
                "AUR ocaml-sexplib0 ocaml-sexplib0",
                "AUR ocaml-base ocaml-base",
                "AUR ocaml-stdio ocaml-stdio",
                "TARGETAUR ocaml-configurator ocaml-configurator",
            ],
            lines(&plan)
        );
        assert!(plan.cycles.is_empty());
        assert!(!plan.has_unknown());
    }

    #[tokio::test]
    async fn unknown_steps_carry_the_ancestor_chain() {
        let mut aur = FakeAur::new();
        aur.add(makedeps(
            deps(pkg("auracle-git", "r74-1"), &["pacman"]),
            &["nlohmann-json"],
        ));
        aur.add(makedeps(pkg("nlohmann-json", "3.11.3-1"), &["cmake"]));

        let plan = plan(&aur, &LocalDatabase::default(), &["auracle-git"]).await;
        assert!(plan.has_unknown());
        assert_eq!(
            vec![
                "UNKNOWN pacman auracle-git",
                "UNKNOWN cmake nlohmann-json auracle-git",
                "AUR nlohmann-json nlohmann-json",
                "TARGETAUR auracle-git auracle-git",
            ],
            lines(&plan)
        );
    }

    #[tokio::test]
    async fn cycles_are_reported_not_fatal() {
        let mut aur = FakeAur::new();
        aur.add(deps(
            pkg("python-fontpens", "0.2.4-1"),
            &["python-fontparts"],
        ));
        aur.add(deps(
            pkg("python-fontparts", "0.9.1-1"),
            &["python-fontpens"],
        ));

        let plan = plan(&aur, &LocalDatabase::default(), &["python-fontpens"]).await;
        assert_eq!(1, plan.cycles.len());
        assert_eq!(
            "[ python-fontpens -> python-fontparts -> python-fontpens ]",
            plan.cycles[0].to_string()
        );
        assert_eq!(
            vec![
                "AUR python-fontparts python-fontparts",
                "TARGETAUR python-fontpens python-fontpens",
            ],
            lines(&plan)
        );
    }

    #[tokio::test]
    async fn cycle_below_the_target_keeps_its_lead_in() {
        let mut aur = FakeAur::new();
        aur.add(deps(pkg("app", "1.0-1"), &["liba"]));
        aur.add(deps(pkg("liba", "1.0-1"), &["libb"]));
        aur.add(deps(pkg("libb", "1.0-1"), &["liba"]));

        let plan = plan(&aur, &LocalDatabase::default(), &["app"]).await;
        assert_eq!(1, plan.cycles.len());
        assert_eq!(
            "app -> [ liba -> libb -> liba ]",
            plan.cycles[0].to_string()
        );
    }

    #[tokio::test]
    async fn self_cycle_is_a_one_member_loop() {
        let mut aur = FakeAur::new();
        aur.add(deps(pkg("ouroboros", "1.0-1"), &["ouroboros"]));

        let plan = plan(&aur, &LocalDatabase::default(), &["ouroboros"]).await;
        assert_eq!(1, plan.cycles.len());
        assert_eq!("[ ouroboros -> ouroboros ]", plan.cycles[0].to_string());
    }

    #[tokio::test]
    async fn one_step_per_record_even_across_aliases() {
        let mut aur = FakeAur::new();
        aur.add(deps(pkg("app", "1.0-1"), &["giflib", "libgif"]));
        aur.add(provides(pkg("giflib", "5.2.2-1"), &["libgif=5.2.2"]));

        let plan = plan(&aur, &LocalDatabase::default(), &["app"]).await;
        assert_eq!(
            vec!["AUR giflib giflib", "TARGETAUR app app"],
            lines(&plan)
        );
    }

    #[tokio::test]
    async fn shared_dependency_is_emitted_once() {
        let mut aur = FakeAur::new();
        aur.add(deps(pkg("one", "1.0-1"), &["common"]));
        aur.add(deps(pkg("two", "1.0-1"), &["common"]));
        aur.add(pkg("common", "1.0-1"));

        let plan = plan(&aur, &LocalDatabase::default(), &["one", "two"]).await;
        assert_eq!(
            vec![
                "AUR common common",
                "TARGETAUR one one",
                "TARGETAUR two two",
            ],
            lines(&plan)
        );
    }

    #[tokio::test]
    async fn provide_satisfier_keeps_the_dependency_name() {
        let mut aur = FakeAur::new();
        aur.add(deps(pkg("app", "1.0-1"), &["java-environment", "jdk"]));
        aur.add(provides(pkg("jdk", "21.0.1-1"), &["java-environment=21"]));

        let plan = plan(&aur, &LocalDatabase::default(), &["app"]).await;
        assert_eq!(
            vec!["AUR java-environment jdk", "TARGETAUR app app"],
            lines(&plan)
        );
    }

    #[tokio::test]
    async fn alias_cycle_through_a_provide_is_detected() {
        let mut aur = FakeAur::new();
        aur.add(deps(
            provides(
                pkg("python-fontparts-git", "1.0-1"),
                &["python-fontparts"],
            ),
            &["python-fontpens"],
        ));
        aur.add(deps(
            pkg("python-fontpens", "0.2.4-1"),
            &["python-fontparts"],
        ));

        let plan = plan(&aur, &LocalDatabase::default(), &["python-fontparts-git"]).await;
        assert_eq!(1, plan.cycles.len());
        assert_eq!(
            "[ python-fontparts-git -> python-fontpens -> python-fontparts-git ]",
            plan.cycles[0].to_string()
        );
        assert_eq!(
            vec![
                "AUR python-fontpens python-fontpens",
                "TARGETAUR python-fontparts-git python-fontparts-git",
            ],
            lines(&plan)
        );
    }
}
