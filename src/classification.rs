//! The per-message record handed to aggregation and to callers.

use std::fmt;

use crate::commit::write_header;
use crate::{Commit, Error, ErrorKind, Policy};

/// Match a single commit message against `policy`.
///
/// This never fails: a message that does not satisfy the policy yields an
/// invalid result carrying an explanation.
///
/// ```rust
/// use conventional_check::{classify, Policy};
///
/// let policy = Policy::default();
/// let result = classify("feat(api)!: drop v1 endpoints", &policy);
/// assert!(!result.is_invalid());
/// assert_eq!(result.scope(), "api");
/// assert!(result.breaking());
///
/// let result = classify("added stuff", &policy);
/// assert!(result.is_invalid());
/// assert_eq!(result.type_(), "");
/// ```
pub fn classify(message: &str, policy: &Policy) -> ClassificationResult {
    match Commit::parse(message, policy) {
        Ok(commit) => ClassificationResult::valid(message, &commit),
        Err(err) => ClassificationResult::invalid(message, &err),
    }
}

/// The outcome of checking one commit message.
///
/// A result is either valid, with every field populated from the message, or
/// invalid, in which case only [`full`][Self::full] and
/// [`error_message`][Self::error_message] are set.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    invalid: bool,
    breaking: bool,
    full: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    type_: String,
    scope: String,
    message: String,
    body: String,
    breaking_change: String,
    error_message: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    #[cfg_attr(feature = "schemars", schemars(skip))]
    error_kind: Option<ErrorKind>,
}

impl ClassificationResult {
    fn valid(full: &str, commit: &Commit<'_>) -> Self {
        Self {
            breaking: commit.breaking(),
            full: full.to_owned(),
            type_: commit.type_().to_owned(),
            scope: commit.scope().unwrap_or_default().to_owned(),
            message: commit.description().to_owned(),
            body: commit.body().unwrap_or_default().to_owned(),
            breaking_change: commit.breaking_change().unwrap_or_default().to_owned(),
            ..Default::default()
        }
    }

    fn invalid(full: &str, err: &Error) -> Self {
        Self {
            invalid: true,
            full: full.to_owned(),
            error_message: err.to_string(),
            error_kind: Some(err.kind()),
            ..Default::default()
        }
    }

    /// A valid result that skipped grammar matching, e.g. a merge commit.
    ///
    /// `type_` is a sentinel such as [`MERGE`][crate::MERGE]; every other
    /// structured field is empty.
    pub fn passthrough(type_: &str, full: &str) -> Self {
        Self {
            full: full.to_owned(),
            type_: type_.to_owned(),
            ..Default::default()
        }
    }

    /// The original, unmodified message.
    pub fn full(&self) -> &str {
        &self.full
    }

    /// Whether the message failed the grammar or the policy.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Why the message is invalid; empty for valid results.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Which check the message failed, if any.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    /// The commit type.
    pub fn type_(&self) -> &str {
        &self.type_
    }

    /// The scope, or empty when absent.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Set by a `!` in the header or a `BREAKING CHANGE: ` footer.
    pub fn breaking(&self) -> bool {
        self.breaking
    }

    /// The subject line after `: `.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Everything after the header, minus any breaking change footer.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The text of the `BREAKING CHANGE: ` footer.
    pub fn breaking_change(&self) -> &str {
        &self.breaking_change
    }

    /// The canonical header, e.g. `fix(cicd)!: test commit`.
    ///
    /// Only meaningful for valid results.
    pub fn short_message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.type_, &self.scope, self.breaking, &self.message)
    }
}
