//! Pacman-style version comparison.
//!
//! Versions follow the `[epoch:]pkgver[-pkgrel]` format and compare
//! segment-wise: runs of digits compare numerically, runs of letters compare
//! lexically, and a digit run always sorts newer than a letter run. This is
//! deliberately not semver; package versions in this ecosystem are arbitrary
//! upstream strings.

use std::cmp::Ordering;
use std::fmt;

/// A parsed `[epoch:]pkgver[-pkgrel]` version.
///
/// Parsing is total: every string is some version. A missing epoch is `0`,
/// and the release component is only compared when both sides carry one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    epoch: String,
    pkgver: String,
    pkgrel: Option<String>,
}

impl Version {
    pub fn parse(s: &str) -> Self {
        let (epoch, rest) = match s.find(':') {
            Some(pos) if pos > 0 && s[..pos].bytes().all(|b| b.is_ascii_digit()) => {
                (s[..pos].to_string(), &s[pos + 1..])
            }
            _ => ("0".to_string(), s),
        };

        let (pkgver, pkgrel) = match rest.rfind('-') {
            Some(pos) => (rest[..pos].to_string(), Some(rest[pos + 1..].to_string())),
            None => (rest.to_string(), None),
        };

        Version {
            epoch,
            pkgver,
            pkgrel,
        }
    }

    pub fn pkgver(&self) -> &str {
        &self.pkgver
    }

    pub fn pkgrel(&self) -> Option<&str> {
        self.pkgrel.as_deref()
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        rpmvercmp(&self.epoch, &other.epoch)
            .then_with(|| rpmvercmp(&self.pkgver, &other.pkgver))
            .then_with(|| match (&self.pkgrel, &other.pkgrel) {
                (Some(a), Some(b)) => rpmvercmp(a, b),
                _ => Ordering::Equal,
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != "0" {
            write!(f, "{}:", self.epoch)?;
        }
        write!(f, "{}", self.pkgver)?;
        if let Some(rel) = &self.pkgrel {
            write!(f, "-{}", rel)?;
        }
        Ok(())
    }
}

/// Compare two raw version strings.
pub fn vercmp(a: &str, b: &str) -> Ordering {
    Version::parse(a).cmp(&Version::parse(b))
}

/// Segment-wise comparison of a single version component.
fn rpmvercmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let one = a.as_bytes();
    let two = b.as_bytes();
    let mut i = 0;
    let mut j = 0;

    while i < one.len() && j < two.len() {
        let sep_start_one = i;
        let sep_start_two = j;
        while i < one.len() && !one[i].is_ascii_alphanumeric() {
            i += 1;
        }
        while j < two.len() && !two[j].is_ascii_alphanumeric() {
            j += 1;
        }

        if i >= one.len() || j >= two.len() {
            break;
        }

        // An unequal separator run decides before the segments do: the
        // side with the longer run is newer (1..0 beats 1.0).
        let sep_one = i - sep_start_one;
        let sep_two = j - sep_start_two;
        if sep_one != sep_two {
            return sep_one.cmp(&sep_two);
        }

        let isnum = one[i].is_ascii_digit();
        if isnum != two[j].is_ascii_digit() {
            // A numeric segment is always newer than an alphabetic one.
            return if isnum {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let i_end = segment_end(one, i, isnum);
        let j_end = segment_end(two, j, isnum);
        let seg_one = &a[i..i_end];
        let seg_two = &b[j..j_end];

        let ord = if isnum {
            let t_one = seg_one.trim_start_matches('0');
            let t_two = seg_two.trim_start_matches('0');
            t_one
                .len()
                .cmp(&t_two.len())
                .then_with(|| t_one.cmp(t_two))
        } else {
            seg_one.cmp(seg_two)
        };

        if ord != Ordering::Equal {
            return ord;
        }

        i = i_end;
        j = j_end;
    }

    // One side ran out of segments. A leftover alphabetic segment never
    // beats an empty string: 1.0 is newer than 1.0a.
    match (one.get(i), two.get(j)) {
        (None, None) => Ordering::Equal,
        (None, Some(&c)) => {
            if c.is_ascii_alphabetic() {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (Some(&c), _) => {
            if c.is_ascii_alphabetic() {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
    }
}

fn segment_end(s: &[u8], start: usize, isnum: bool) -> usize {
    let mut end = start;
    while end < s.len() && s[end].is_ascii_digit() == isnum && s[end].is_ascii_alphanumeric() {
        end += 1;
    }
    end
}
