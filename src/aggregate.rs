//! Folding a batch of results into a release decision.

use std::fmt;
use std::str::FromStr;

use crate::{ClassificationResult, FEAT};

/// The semantic-versioning increment implied by a batch of commits.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionBump {
    /// Fixes and everything else.
    #[default]
    Patch,

    /// At least one `feat` commit.
    Minor,

    /// At least one breaking commit.
    Major,
}

impl VersionBump {
    /// Access `str` representation of `VersionBump`
    pub fn as_str(self) -> &'static str {
        match self {
            VersionBump::Patch => "patch",
            VersionBump::Minor => "minor",
            VersionBump::Major => "major",
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionBump {
    type Err = UnknownVersionBump;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = unicase::Ascii::new(s.trim());
        [VersionBump::Patch, VersionBump::Minor, VersionBump::Major]
            .into_iter()
            .find(|bump| s == unicase::Ascii::new(bump.as_str()))
            .ok_or_else(|| UnknownVersionBump(s.into_inner().to_owned()))
    }
}

/// The error returned when a string names no [`VersionBump`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownVersionBump(String);

impl fmt::Display for UnknownVersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown version bump {:?}, expected patch, minor or major",
            self.0
        )
    }
}

impl std::error::Error for UnknownVersionBump {}

/// Summary of a batch of [`ClassificationResult`]s.
///
/// Results are folded in order: the first breaking commit forces a major
/// bump, a `feat` commit raises a patch to minor, and the breaking change
/// note of the last breaking commit is kept.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregateOutcome {
    has_invalid: bool,
    has_breaking: bool,
    breaking_note: String,
    version_bump: VersionBump,
    count: usize,
}

impl AggregateOutcome {
    /// An outcome over no results: patch, nothing invalid or breaking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one more result into the outcome.
    pub fn push(&mut self, result: &ClassificationResult) {
        self.count += 1;

        if result.is_invalid() {
            self.has_invalid = true;
        }

        if result.breaking() {
            self.has_breaking = true;
            self.version_bump = VersionBump::Major;
            result.breaking_change().clone_into(&mut self.breaking_note);
        }

        if result.type_() == FEAT && self.version_bump != VersionBump::Major {
            self.version_bump = VersionBump::Minor;
        }
    }

    /// Whether any result was invalid.
    pub fn has_invalid(&self) -> bool {
        self.has_invalid
    }

    /// Whether any result was breaking.
    pub fn has_breaking(&self) -> bool {
        self.has_breaking
    }

    /// The breaking change footer of the last breaking result.
    pub fn breaking_note(&self) -> &str {
        &self.breaking_note
    }

    /// The increment to release with.
    pub fn version_bump(&self) -> VersionBump {
        self.version_bump
    }

    /// Number of results folded in.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl<'a> Extend<&'a ClassificationResult> for AggregateOutcome {
    fn extend<I: IntoIterator<Item = &'a ClassificationResult>>(&mut self, iter: I) {
        for result in iter {
            self.push(result);
        }
    }
}

impl<'a> FromIterator<&'a ClassificationResult> for AggregateOutcome {
    fn from_iter<I: IntoIterator<Item = &'a ClassificationResult>>(iter: I) -> Self {
        let mut outcome = Self::new();
        outcome.extend(iter);
        outcome
    }
}

/// Fold `results`, in order, into an [`AggregateOutcome`].
///
/// ```rust
/// use conventional_check::{aggregate, classify, Policy, VersionBump};
///
/// let policy = Policy::default();
/// let results: Vec<_> = ["fix: a", "feat: b"]
///     .into_iter()
///     .map(|m| classify(m, &policy))
///     .collect();
/// let outcome = aggregate(&results);
/// assert_eq!(outcome.version_bump(), VersionBump::Minor);
/// assert!(!outcome.has_invalid());
/// ```
pub fn aggregate<'a, I>(results: I) -> AggregateOutcome
where
    I: IntoIterator<Item = &'a ClassificationResult>,
{
    results.into_iter().collect()
}
