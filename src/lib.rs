//! Check commit messages against a [Conventional Commit] policy and decide
//! the semantic version bump they imply.
//!
//! [conventional commit]: https://www.conventionalcommits.org
//!
//! # Example
//!
//! ```rust
//! use indoc::indoc;
//! use conventional_check::{Checker, Policy, VersionBump};
//!
//! let policy = Policy::new("feat|fix|docs")
//!     .with_scopes("api|cli")
//!     .with_scope_required(true);
//!
//! let message = indoc!("
//!     fix(api)!: reject unknown fields
//!
//!     Unknown fields used to be ignored silently.
//!
//!     BREAKING CHANGE: clients sending extra fields now get a 400.
//! ");
//!
//! let result = conventional_check::classify(message, &policy);
//!
//! // The header is split into its components.
//! assert_eq!(result.type_(), "fix");
//! assert_eq!(result.scope(), "api");
//! assert_eq!(result.message(), "reject unknown fields");
//!
//! // The breaking change footer is taken out of the body.
//! assert_eq!(result.body(), "Unknown fields used to be ignored silently.");
//! assert_eq!(result.breaking_change(), "clients sending extra fields now get a 400.");
//! assert!(result.breaking());
//!
//! // A scope outside the policy is rejected, with an example of what would pass.
//! let result = conventional_check::classify("docs(web): typo", &policy);
//! assert!(result.is_invalid());
//! assert_eq!(
//!     result.error_message(),
//!     "Invalid message format. Correct Example: 'feat(api|cli): message text'"
//! );
//!
//! // A whole batch decides the release.
//! let report = Checker::new(policy).check_all([message, "feat(cli): add --json"]);
//! assert!(report.is_success());
//! assert_eq!(report.outcome().version_bump(), VersionBump::Major);
//! ```

#![warn(missing_docs)]

mod aggregate;
mod checker;
mod classification;
mod commit;
mod error;
mod parser;
mod policy;

pub use aggregate::{aggregate, AggregateOutcome, UnknownVersionBump, VersionBump};
pub use checker::{Candidate, Checker, Report, SkipRules};
pub use classification::{classify, ClassificationResult};
pub use commit::Commit;
pub use error::{Error, ErrorKind};
pub use policy::{Policy, Scopes, Vocabulary};

/// Commit type when introducing new features (correlates with `minor` in semver)
pub const FEAT: &str = "feat";
/// Commit type when patching a bug (correlates with `patch` in semver)
pub const FIX: &str = "fix";
/// Type given to revert commits that skipped the grammar.
pub const REVERT: &str = "revert";
/// Type given to merge commits that skipped the grammar.
pub const MERGE: &str = "merge";

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
