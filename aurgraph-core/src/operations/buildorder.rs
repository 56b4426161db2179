use crate::buildorder::{BuildPlan, build_plan};
use crate::depend::DependencyKind;
use crate::local::LocalDatabase;
use crate::resolve::build_graph;
use crate::rpc::AurClient;
use crate::Result;
use std::collections::BTreeSet;

/// Computes the full build plan for the given targets: resolve the graph,
/// then linearize it dependency-first. Cycles and unknown dependencies are
/// carried in the plan; only unresolvable targets and transport faults fail.
pub async fn buildorder<C: AurClient>(
    client: &C,
    local: &LocalDatabase,
    targets: &[String],
    kinds: &BTreeSet<DependencyKind>,
) -> Result<BuildPlan> {
    let graph = build_graph(client, local, targets, kinds).await?;
    Ok(build_plan(&graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depend::default_kinds;
    use crate::rpc::fake::{FakeAur, deps, pkg};
    use crate::AurError;

    #[tokio::test]
    async fn duplicate_targets_produce_one_plan_entry() {
        let mut aur = FakeAur::new();
        aur.add(deps(pkg("tool", "1.0-1"), &["lib"]));
        aur.add(pkg("lib", "1.0-1"));

        let targets = vec!["tool".to_string(), "tool".to_string()];
        let plan = buildorder(&aur, &LocalDatabase::default(), &targets, &default_kinds())
            .await
            .unwrap();

        let lines: Vec<String> = plan.steps.iter().map(|s| s.to_string()).collect();
        assert_eq!(vec!["AUR lib lib", "TARGETAUR tool tool"], lines);
    }

    #[tokio::test]
    async fn missing_target_is_fatal() {
        let aur = FakeAur::new();
        let targets = vec!["ghost".to_string()];
        let err = buildorder(&aur, &LocalDatabase::default(), &targets, &default_kinds())
            .await
            .unwrap_err();
        assert!(matches!(err, AurError::TargetNotFound { name } if name == "ghost"));
    }
}
