use crate::buildorder::{BuildStep, build_plan};
use crate::depend::DependencyKind;
use crate::local::LocalDatabase;
use crate::resolve::build_graph;
use crate::rpc::AurClient;
use crate::{AurError, Result};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct CloneOptions {
    /// Directory the package-base checkouts live under.
    pub directory: PathBuf,
    /// Also clone every AUR dependency, in build order.
    pub recurse: bool,
    pub kinds: BTreeSet<DependencyKind>,
}

#[derive(Debug, Default)]
pub struct CloneOutcome {
    pub cloned: Vec<String>,
    pub updated: Vec<String>,
}

/// Clones (or fast-forwards) the package-base repositories for the targets.
/// With `recurse`, dependencies come first so the checkouts appear in a
/// buildable sequence.
pub async fn clone<C: AurClient>(
    client: &C,
    local: &LocalDatabase,
    baseurl: &str,
    targets: &[String],
    options: &CloneOptions,
) -> Result<CloneOutcome> {
    let bases = if options.recurse {
        let graph = build_graph(client, local, targets, &options.kinds).await?;
        let plan = build_plan(&graph);
        clone_bases(&plan.steps, |name| {
            graph.package(name).map(|package| package.pkgbase.clone())
        })
    } else {
        let packages = client.info(targets).await?;
        let mut bases = Vec::new();
        for target in targets {
            let Some(package) = packages.iter().find(|package| &package.name == target) else {
                return Err(AurError::TargetNotFound {
                    name: target.clone(),
                });
            };
            let base = if package.pkgbase.is_empty() {
                package.name.clone()
            } else {
                package.pkgbase.clone()
            };
            if !bases.contains(&base) {
                bases.push(base);
            }
        }
        bases
    };

    let mut outcome = CloneOutcome::default();
    for base in bases {
        let dest = options.directory.join(&base);
        if dest.join(".git").is_dir() {
            let mut command = Command::new("git");
            command.arg("-C").arg(&dest).args(["pull", "--ff-only"]);
            run_git(&base, command).await?;
            outcome.updated.push(base);
        } else {
            let url = format!("{}/{}.git", baseurl.trim_end_matches('/'), base);
            let mut command = Command::new("git");
            command.args(["clone", &url]).arg(&dest);
            run_git(&base, command).await?;
            outcome.cloned.push(base);
        }
    }

    Ok(outcome)
}

/// Package bases of the plan's build steps, dependency-first, deduplicated.
/// `pkgbase_of` maps a step's record name to its package base; split packages
/// share one base and are cloned once.
fn clone_bases<F>(steps: &[BuildStep], pkgbase_of: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut bases = Vec::new();
    for step in steps {
        if let BuildStep::Build { package, .. } = step {
            let base = pkgbase_of(package).unwrap_or_else(|| package.clone());
            if !bases.contains(&base) {
                bases.push(base);
            }
        }
    }
    bases
}

async fn run_git(package: &str, mut command: Command) -> Result<()> {
    let output = command.output().await.map_err(|err| AurError::Clone {
        package: package.to_string(),
        reason: err.to_string(),
    })?;

    if !output.status.success() {
        return Err(AurError::Clone {
            package: package.to_string(),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}
