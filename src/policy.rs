//! The caller-supplied rules a commit message is checked against.

use std::fmt;
use std::str::FromStr;

/// Keywords that select [`Scopes::Any`] when parsing a scope configuration.
const ANY_KEYWORDS: [&str; 3] = ["*", ".*", "any"];

/// An ordered set of literal tokens, such as the accepted commit types.
///
/// Tokens are matched exactly and case-sensitively, in the order they were
/// configured.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vocabulary(Vec<String>);

impl Vocabulary {
    /// Build a vocabulary from individual tokens.
    ///
    /// Tokens are trimmed; blank tokens are ignored.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tokens
                .into_iter()
                .map(|t| t.as_ref().trim().to_owned())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    /// Parse a delimited list, e.g. `fix|feat|revert` or `fix, feat`.
    ///
    /// `|`, `,` and `;` are all accepted as separators.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(['|', ',', ';']))
    }

    /// Iterate over the tokens in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Whether `token` is part of the vocabulary.
    pub fn contains(&self, token: &str) -> bool {
        self.iter().any(|t| t == token)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no token was configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.iter().enumerate() {
            if 0 < i {
                f.write_str("|")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}

impl From<&str> for Vocabulary {
    fn from(list: &str) -> Self {
        Self::parse(list)
    }
}

impl FromStr for Vocabulary {
    type Err = std::convert::Infallible;

    fn from_str(list: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(list))
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// The scopes a commit may name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scopes {
    /// Any non-blank scope on the header line is accepted.
    #[default]
    Any,

    /// Only the listed scopes are accepted.
    List(Vocabulary),
}

impl Scopes {
    /// Parse a scope configuration.
    ///
    /// `*`, `.*` and `any` (in any case) select [`Scopes::Any`]; anything else
    /// is read as a delimited [`Vocabulary`].
    pub fn parse(config: &str) -> Self {
        let config = config.trim();
        let is_any = ANY_KEYWORDS
            .iter()
            .any(|k| unicase::eq_ascii(*k, config));
        if is_any {
            Scopes::Any
        } else {
            Scopes::List(Vocabulary::parse(config))
        }
    }

    /// Whether every scope is accepted.
    pub fn is_any(&self) -> bool {
        matches!(self, Scopes::Any)
    }

    /// How the accepted scopes are shown in an example header.
    pub(crate) fn example(&self) -> String {
        match self {
            Scopes::Any => "scope".to_owned(),
            Scopes::List(list) => list.to_string(),
        }
    }
}

impl fmt::Display for Scopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scopes::Any => f.write_str("*"),
            Scopes::List(list) => list.fmt(f),
        }
    }
}

impl From<&str> for Scopes {
    fn from(config: &str) -> Self {
        Self::parse(config)
    }
}

impl From<Vocabulary> for Scopes {
    fn from(list: Vocabulary) -> Self {
        Scopes::List(list)
    }
}

impl FromStr for Scopes {
    type Err = std::convert::Infallible;

    fn from_str(config: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(config))
    }
}

/// The rules a commit message is matched against.
///
/// A policy is built once and shared, read-only, by every check.
///
/// ```rust
/// use conventional_check::{Policy, Scopes};
///
/// let policy = Policy::new("fix|feat")
///     .with_scopes(Scopes::parse("api|ui"))
///     .with_scope_required(true);
/// assert!(policy.types().contains("feat"));
/// assert!(!policy.scopes().is_any());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Policy {
    types: Vocabulary,
    scopes: Scopes,
    scope_required: bool,
}

impl Policy {
    /// A policy accepting `types`, any scope, and commits without a scope.
    pub fn new(types: impl Into<Vocabulary>) -> Self {
        Self {
            types: types.into(),
            scopes: Scopes::Any,
            scope_required: false,
        }
    }

    /// Restrict the accepted scopes.
    pub fn with_scopes(mut self, scopes: impl Into<Scopes>) -> Self {
        self.scopes = scopes.into();
        self
    }

    /// Reject commits that do not name a scope.
    pub fn with_scope_required(mut self, yes: bool) -> Self {
        self.scope_required = yes;
        self
    }

    /// Accepted commit types.
    pub fn types(&self) -> &Vocabulary {
        &self.types
    }

    /// Accepted scopes.
    pub fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    /// Whether a scope must be present.
    pub fn scope_required(&self) -> bool {
        self.scope_required
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::new("fix|feat|revert")
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{Scopes, Vocabulary};

    impl serde::Serialize for Vocabulary {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de> serde::Deserialize<'de> for Vocabulary {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let list = String::deserialize(deserializer)?;
            Ok(Vocabulary::parse(&list))
        }
    }

    impl serde::Serialize for Scopes {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de> serde::Deserialize<'de> for Scopes {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let config = String::deserialize(deserializer)?;
            Ok(Scopes::parse(&config))
        }
    }
}
