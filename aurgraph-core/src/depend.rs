use crate::{AurError, Result};
use aurgraph_vercmp::vercmp;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Comparison operator of a version constraint. `Any` means the dependency
/// carries no version at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Any,
    Eq,
    Ge,
    Gt,
    Le,
    Lt,
}

/// A parsed `name[<op>version]` dependency string, in the same format
/// libalpm uses for depends and provides entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Depstring {
    depstring: String,
    name: String,
    comparison: Comparison,
    version: Option<String>,
}

impl Depstring {
    pub fn parse(input: &str) -> Result<Self> {
        // Two-character operators have to be split off before the
        // single-character ones.
        let (name, comparison, version) = if let Some(pos) = input.find("<=") {
            (&input[..pos], Comparison::Le, &input[pos + 2..])
        } else if let Some(pos) = input.find(">=") {
            (&input[..pos], Comparison::Ge, &input[pos + 2..])
        } else if let Some(pos) = input.find(['<', '>', '=']) {
            let comparison = match input.as_bytes()[pos] {
                b'<' => Comparison::Lt,
                b'>' => Comparison::Gt,
                _ => Comparison::Eq,
            };
            (&input[..pos], comparison, &input[pos + 1..])
        } else {
            (input, Comparison::Any, "")
        };

        if name.is_empty() {
            return Err(AurError::InvalidDepstring {
                input: input.to_string(),
                reason: "missing package name".to_string(),
            });
        }

        if comparison != Comparison::Any && version.is_empty() {
            return Err(AurError::InvalidDepstring {
                input: input.to_string(),
                reason: "missing version after comparison operator".to_string(),
            });
        }

        Ok(Depstring {
            depstring: input.to_string(),
            name: name.to_string(),
            comparison,
            version: (comparison != Comparison::Any).then(|| version.to_string()),
        })
    }

    /// Like [`Depstring::parse`], but total. Remote records carry whatever
    /// a packager typed; a malformed entry there becomes a plain name (which
    /// no provider will match) instead of aborting the resolution. Strict
    /// parsing stays reserved for caller-supplied input.
    pub fn parse_lenient(input: &str) -> Self {
        Depstring::parse(input).unwrap_or_else(|_| Depstring {
            depstring: input.to_string(),
            name: input.to_string(),
            comparison: Comparison::Any,
            version: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_str(&self) -> &str {
        &self.depstring
    }

    pub fn is_versioned(&self) -> bool {
        self.version.is_some()
    }

    fn satisfied_by_version(&self, candidate: &str) -> bool {
        let Some(version) = &self.version else {
            return true;
        };

        match vercmp(candidate, version) {
            Ordering::Equal => matches!(
                self.comparison,
                Comparison::Eq | Comparison::Ge | Comparison::Le
            ),
            Ordering::Greater => matches!(self.comparison, Comparison::Gt | Comparison::Ge),
            Ordering::Less => matches!(self.comparison, Comparison::Lt | Comparison::Le),
        }
    }

    /// Whether a candidate package satisfies this dependency, either through
    /// its own name and version or through one of its provides. An
    /// unversioned provide satisfies every constraint on its name.
    pub fn satisfied_by(&self, name: &str, version: &str, provides: &[String]) -> bool {
        if self.name == name && self.satisfied_by_version(version) {
            return true;
        }

        for raw in provides {
            let Ok(provide) = Depstring::parse(raw) else {
                continue;
            };
            if provide.name != self.name {
                continue;
            }
            match &provide.version {
                None => return true,
                Some(provided) => {
                    if self.satisfied_by_version(provided) {
                        return true;
                    }
                }
            }
        }

        false
    }
}

impl fmt::Display for Depstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.depstring)
    }
}

/// The dependency kinds that participate in build-order resolution.
/// Optional dependencies are never part of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DependencyKind {
    Depend,
    MakeDepend,
    CheckDepend,
}

pub fn default_kinds() -> BTreeSet<DependencyKind> {
    BTreeSet::from([
        DependencyKind::Depend,
        DependencyKind::MakeDepend,
        DependencyKind::CheckDepend,
    ])
}

/// Applies a kind-set spec to `kinds`. The spec is a comma-separated list of
/// kind names, optionally prefixed with `!` or `^` to remove the listed
/// kinds, or `+` to append them; without a prefix the list replaces the set.
pub fn parse_kind_spec(input: &str, kinds: &mut BTreeSet<DependencyKind>) -> Result<()> {
    if input.is_empty() {
        return Ok(());
    }

    let (list, remove, append) = match input.as_bytes()[0] {
        b'!' | b'^' => (&input[1..], true, false),
        b'+' => (&input[1..], false, true),
        _ => (input, false, false),
    };

    let mut parsed = BTreeSet::new();
    for part in list.split(',') {
        if part.is_empty() {
            continue;
        }
        let kind = match part {
            "depends" => DependencyKind::Depend,
            "makedepends" => DependencyKind::MakeDepend,
            "checkdepends" => DependencyKind::CheckDepend,
            _ => {
                return Err(AurError::InvalidKindSpec {
                    input: input.to_string(),
                });
            }
        };
        parsed.insert(kind);
    }

    if remove {
        for kind in parsed {
            kinds.remove(&kind);
        }
    } else if append {
        kinds.extend(parsed);
    } else {
        *kinds = parsed;
    }

    Ok(())
}
