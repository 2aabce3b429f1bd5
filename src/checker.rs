//! Checking a batch of commit messages, as a CI gate would.

use crate::{aggregate, classify, AggregateOutcome, ClassificationResult, Policy, MERGE, REVERT};

const MERGE_PREFIX: &str = "Merge ";
const REVERT_PREFIX: &str = "Revert ";

/// Which generated commits bypass the grammar.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SkipRules {
    /// Accept messages starting with `Merge ` as-is.
    pub merge: bool,

    /// Accept messages starting with `Revert ` as-is.
    pub revert: bool,
}

/// A commit message sorted by how it must be checked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Candidate<'a> {
    /// A merge commit that is accepted without matching.
    Merge(&'a str),

    /// A revert commit that is accepted without matching.
    Revert(&'a str),

    /// A message that must satisfy the grammar.
    Conventional(&'a str),
}

impl<'a> Candidate<'a> {
    /// Sort `message` according to `skip`.
    pub fn new(message: &'a str, skip: SkipRules) -> Self {
        if skip.merge && message.starts_with(MERGE_PREFIX) {
            Candidate::Merge(message)
        } else if skip.revert && message.starts_with(REVERT_PREFIX) {
            Candidate::Revert(message)
        } else {
            Candidate::Conventional(message)
        }
    }

    /// The full commit message.
    pub fn message(self) -> &'a str {
        match self {
            Candidate::Merge(m) | Candidate::Revert(m) | Candidate::Conventional(m) => m,
        }
    }

    /// Produce the result for this message.
    pub fn classify(self, policy: &Policy) -> ClassificationResult {
        match self {
            Candidate::Merge(m) => ClassificationResult::passthrough(MERGE, m),
            Candidate::Revert(m) => ClassificationResult::passthrough(REVERT, m),
            Candidate::Conventional(m) => classify(m, policy),
        }
    }
}

/// Checks commit messages against a [`Policy`].
///
/// ```rust
/// use conventional_check::{Checker, Policy, SkipRules, VersionBump};
///
/// let checker = Checker::new(Policy::default()).with_skip(SkipRules {
///     merge: true,
///     revert: false,
/// });
/// let report = checker.check_all([
///     "feat(ui): dark mode",
///     "Merge branch 'main' into dark-mode",
///     "fix: contrast",
/// ]);
/// assert!(report.is_success());
/// assert_eq!(report.results()[1].type_(), "merge");
/// assert_eq!(report.outcome().version_bump(), VersionBump::Minor);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Checker {
    policy: Policy,
    skip: SkipRules,
}

impl Checker {
    /// A checker that runs every message through the grammar.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            skip: SkipRules::default(),
        }
    }

    /// Let merge and/or revert commits bypass the grammar.
    pub fn with_skip(mut self, skip: SkipRules) -> Self {
        self.skip = skip;
        self
    }

    /// The policy messages are matched against.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Which commits bypass the grammar.
    pub fn skip(&self) -> SkipRules {
        self.skip
    }

    /// Check one message.
    pub fn check(&self, message: &str) -> ClassificationResult {
        let candidate = Candidate::new(message, self.skip);
        match candidate {
            Candidate::Merge(m) => tracing::debug!(commit = m, "skip merge"),
            Candidate::Revert(m) => tracing::debug!(commit = m, "skip revert"),
            Candidate::Conventional(_) => {}
        }

        let result = candidate.classify(&self.policy);
        if result.is_invalid() {
            tracing::warn!(
                commit = result.full(),
                error = result.error_message(),
                "invalid commit"
            );
        } else {
            tracing::info!(commit = %result, "valid commit");
        }
        result
    }

    /// Check every message, in order, and fold the results.
    pub fn check_all<I, S>(&self, messages: I) -> Report
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let results: Vec<_> = messages
            .into_iter()
            .map(|m| self.check(m.as_ref()))
            .collect();
        let outcome = aggregate(&results);
        tracing::debug!(
            count = outcome.count(),
            invalid = outcome.has_invalid(),
            breaking = outcome.has_breaking(),
            bump = %outcome.version_bump(),
            "checked commits"
        );

        Report { results, outcome }
    }
}

/// Every result of a batch, in input order, plus their aggregate.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    results: Vec<ClassificationResult>,
    outcome: AggregateOutcome,
}

impl Report {
    /// Per-message results, in input order.
    pub fn results(&self) -> &[ClassificationResult] {
        &self.results
    }

    /// The aggregate over all results.
    pub fn outcome(&self) -> &AggregateOutcome {
        &self.outcome
    }

    /// The invalid results.
    pub fn invalid(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.results.iter().filter(|r| r.is_invalid())
    }

    /// False when at least one message is invalid.
    pub fn is_success(&self) -> bool {
        !self.outcome.has_invalid()
    }

    /// Take the results and the aggregate apart.
    pub fn into_parts(self) -> (Vec<ClassificationResult>, AggregateOutcome) {
        (self.results, self.outcome)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ErrorKind, VersionBump};

    const BOTH: SkipRules = SkipRules {
        merge: true,
        revert: true,
    };

    #[test]
    fn test_candidate() {
        assert_eq!(
            Candidate::new("Merge branch 'x'", BOTH),
            Candidate::Merge("Merge branch 'x'")
        );
        assert_eq!(
            Candidate::new("Revert \"feat: x\"", BOTH),
            Candidate::Revert("Revert \"feat: x\"")
        );
        assert_eq!(
            Candidate::new("Merge branch 'x'", SkipRules::default()),
            Candidate::Conventional("Merge branch 'x'")
        );
        assert_eq!(
            Candidate::new("merge branch 'x'", BOTH),
            Candidate::Conventional("merge branch 'x'")
        );
        assert_eq!(
            Candidate::new("Merged stuff", BOTH),
            Candidate::Conventional("Merged stuff")
        );
        assert_eq!(Candidate::new("fix: x", BOTH).message(), "fix: x");
    }

    #[test]
    fn test_skip_merge() {
        let checker = Checker::new(Policy::default()).with_skip(BOTH);
        let result = checker.check("Merge pull request #3 from a/b");

        assert!(!result.is_invalid());
        assert_eq!(result.type_(), MERGE);
        assert_eq!(result.full(), "Merge pull request #3 from a/b");

        let result = checker.check("Revert \"feat: x\"");
        assert!(!result.is_invalid());
        assert_eq!(result.type_(), REVERT);
    }

    #[test]
    fn test_merge_without_skip_is_invalid() {
        let checker = Checker::new(Policy::default());
        let result = checker.check("Merge pull request #3 from a/b");

        assert!(result.is_invalid());
        assert_eq!(result.error_kind(), Some(ErrorKind::GrammarMismatch));
    }

    #[test]
    fn test_check_all_keeps_order() {
        let checker = Checker::new(Policy::default()).with_skip(BOTH);
        let messages = vec![
            "feat: a".to_owned(),
            "nope".to_owned(),
            "Merge branch 'b'".to_owned(),
            "fix!: c\n\nBREAKING CHANGE: everything".to_owned(),
        ];
        let report = checker.check_all(&messages);

        let full: Vec<_> = report.results().iter().map(|r| r.full()).collect();
        assert_eq!(full, messages);
        assert!(!report.is_success());
        assert_eq!(report.invalid().count(), 1);

        let outcome = report.outcome();
        assert_eq!(outcome.count(), 4);
        assert!(outcome.has_invalid());
        assert!(outcome.has_breaking());
        assert_eq!(outcome.breaking_note(), "everything");
        assert_eq!(outcome.version_bump(), VersionBump::Major);
    }

    #[test]
    fn test_check_all_success() {
        let checker = Checker::new(Policy::default());
        let (results, outcome) = checker.check_all(["fix: a", "feat: b"]).into_parts();

        assert_eq!(results.len(), 2);
        assert!(!outcome.has_invalid());
        assert_eq!(outcome.version_bump(), VersionBump::Minor);
    }

    #[test]
    fn test_check_all_empty() {
        let checker = Checker::default();
        let report = checker.check_all(Vec::<String>::new());

        assert!(report.is_success());
        assert_eq!(report.outcome().version_bump(), VersionBump::Patch);
    }
}
