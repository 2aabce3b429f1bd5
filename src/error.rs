//! All errors related to checking a commit message.

use std::fmt;

use crate::Scopes;

/// The error returned when a commit message does not satisfy a [`Policy`].
///
/// Every error carries a worked example of a header that would have been
/// accepted, tailored to the scopes the policy allows.
///
/// [`Policy`]: crate::Policy
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,

    example: String,
}

impl Error {
    /// Create a new error from an `ErrorKind` for the given scope policy.
    pub(crate) fn new(kind: ErrorKind, scopes: &Scopes) -> Self {
        Self {
            kind,
            example: format!("feat({}): message text", scopes.example()),
        }
    }

    /// The kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// A header that would satisfy the policy.
    pub fn example(&self) -> &str {
        &self.example
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::GrammarMismatch => write!(
                f,
                "Invalid message format. Correct Example: '{}'",
                self.example
            ),
            ErrorKind::MissingRequiredScope => {
                write!(f, "Scope is required. Example: '{}'", self.example)
            }
        }
    }
}

impl std::error::Error for Error {}

/// All possible error kinds returned when checking a commit message.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The header does not follow `type(scope)!: subject`, or names a type or
    /// scope the policy does not accept.
    GrammarMismatch,

    /// The header is well-formed but the policy requires a scope.
    MissingRequiredScope,
}
