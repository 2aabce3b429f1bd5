//! A commit message that satisfied a [`Policy`].

use std::fmt;

use crate::parser::parse;
use crate::{Error, ErrorKind, Policy};

const BREAKING_PHRASE: &str = "BREAKING CHANGE: ";

/// A conventional commit, borrowing from the message it was parsed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit<'a> {
    ty: &'a str,
    scope: Option<&'a str>,
    description: &'a str,
    body: Option<&'a str>,
    breaking: bool,
    breaking_change: Option<&'a str>,
}

impl<'a> Commit<'a> {
    /// Match a commit message against `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::GrammarMismatch`] when the header is not
    /// `type(scope)!: subject` with an accepted type and scope, and
    /// [`ErrorKind::MissingRequiredScope`] when the policy requires a scope
    /// and none is given.
    pub fn parse(string: &'a str, policy: &Policy) -> Result<Self, Error> {
        let (ty, scope, breaking, description, body) = parse(string, policy)
            .map_err(|_| Error::new(ErrorKind::GrammarMismatch, policy.scopes()))?;

        if policy.scope_required() && scope.is_none() {
            return Err(Error::new(
                ErrorKind::MissingRequiredScope,
                policy.scopes(),
            ));
        }

        // Greedy prefix: with several footers, the last one holds the note.
        let (body, breaking_change) = match body.and_then(|b| b.rsplit_once(BREAKING_PHRASE)) {
            Some((body, note)) => (Some(body.trim()).filter(|b| !b.is_empty()), Some(note.trim())),
            None => (body, None),
        };

        Ok(Self {
            ty: ty.trim(),
            scope: scope.map(str::trim),
            description: description.trim(),
            body,
            breaking: breaking || breaking_change.is_some(),
            breaking_change,
        })
    }

    /// The type of the commit.
    pub fn type_(&self) -> &'a str {
        self.ty
    }

    /// The optional scope of the commit.
    pub fn scope(&self) -> Option<&'a str> {
        self.scope
    }

    /// The commit description.
    pub fn description(&self) -> &'a str {
        self.description
    }

    /// The commit body, without any `BREAKING CHANGE: ` footer.
    pub fn body(&self) -> Option<&'a str> {
        self.body
    }

    /// A flag to signal that the commit contains breaking changes.
    ///
    /// This flag is set either when the commit has an exclamation mark after
    /// the message type and scope, e.g.:
    /// ```text
    /// feat(scope)!: this is a breaking change
    /// ```
    ///
    /// Or when the body holds a `BREAKING CHANGE: ` footer:
    /// ```text
    /// feat: my commit description
    ///
    /// BREAKING CHANGE: this is a breaking change
    /// ```
    pub fn breaking(&self) -> bool {
        self.breaking
    }

    /// The text of the `BREAKING CHANGE: ` footer, if any.
    pub fn breaking_change(&self) -> Option<&'a str> {
        self.breaking_change
    }
}

/// Renders the canonical header, e.g. `feat(ui)!: add dark mode`.
impl fmt::Display for Commit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(
            f,
            self.type_(),
            self.scope().unwrap_or_default(),
            self.breaking(),
            self.description(),
        )
    }
}

pub(crate) fn write_header(
    f: &mut fmt::Formatter<'_>,
    ty: &str,
    scope: &str,
    breaking: bool,
    description: &str,
) -> fmt::Result {
    f.write_str(ty)?;
    if !scope.is_empty() {
        write!(f, "({scope})")?;
    }
    if breaking {
        f.write_str("!")?;
    }
    write!(f, ": {description}")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ErrorKind;
    use indoc::indoc;

    fn policy() -> Policy {
        Policy::new("fix|feat|revert")
    }

    #[test]
    fn test_valid_simple_commit() {
        let commit = Commit::parse("feat: test commit", &policy()).unwrap();

        assert_eq!(commit.type_(), "feat");
        assert_eq!(commit.scope(), None);
        assert_eq!(commit.description(), "test commit");
        assert_eq!(commit.body(), None);
        assert!(!commit.breaking());
        assert_eq!(commit.breaking_change(), None);
    }

    #[test]
    fn test_scope_is_trimmed() {
        let commit = Commit::parse("fix( my scope ):   hello world  ", &policy()).unwrap();

        assert_eq!(commit.scope(), Some("my scope"));
        assert_eq!(commit.description(), "hello world");
    }

    #[test]
    fn test_empty_description() {
        let commit = Commit::parse("fix: ", &policy()).unwrap();

        assert_eq!(commit.type_(), "fix");
        assert_eq!(commit.description(), "");
    }

    #[test]
    fn test_trailing_whitespace_without_body() {
        let commit = Commit::parse("fix(cicd): hello world\n\n\n", &policy()).unwrap();

        assert_eq!(commit.scope(), Some("cicd"));
        assert_eq!(commit.description(), "hello world");
        assert_eq!(commit.body(), None);
    }

    #[test]
    fn test_parenthetical_statement() {
        let commit = Commit::parse("fix: hello world (#1)", &policy()).unwrap();

        assert_eq!(commit.scope(), None);
        assert_eq!(commit.description(), "hello world (#1)");
    }

    #[test]
    fn test_body() {
        let commit = Commit::parse("fix(cicd): test commit\n\nsome more text", &policy()).unwrap();

        assert_eq!(commit.body(), Some("some more text"));
        assert!(!commit.breaking());
    }

    #[test]
    fn test_breaking_change() {
        let commit = Commit::parse("feat!: this is a breaking change", &policy()).unwrap();
        assert!(commit.breaking());
        assert_eq!(commit.breaking_change(), None);

        let commit = Commit::parse(
            indoc!(
                "fix(cicd)!: test commit

                more text

                BREAKING CHANGE: API changed"
            ),
            &policy(),
        )
        .unwrap();
        assert_eq!(commit.type_(), "fix");
        assert_eq!(commit.scope(), Some("cicd"));
        assert!(commit.breaking());
        assert_eq!(commit.description(), "test commit");
        assert_eq!(commit.body(), Some("more text"));
        assert_eq!(commit.breaking_change(), Some("API changed"));
    }

    #[test]
    fn test_breaking_footer_without_marker() {
        let commit = Commit::parse(
            indoc!(
                "feat: message

                BREAKING CHANGE: breaking change
                spanning lines
                "
            ),
            &policy(),
        )
        .unwrap();
        assert!(commit.breaking());
        assert_eq!(commit.body(), None);
        assert_eq!(
            commit.breaking_change(),
            Some("breaking change\nspanning lines")
        );
    }

    #[test]
    fn test_last_breaking_footer_wins() {
        let commit = Commit::parse(
            indoc!(
                "feat: message

                intro

                BREAKING CHANGE: first

                BREAKING CHANGE: second"
            ),
            &policy(),
        )
        .unwrap();
        assert_eq!(
            commit.body(),
            Some("intro\n\nBREAKING CHANGE: first")
        );
        assert_eq!(commit.breaking_change(), Some("second"));
    }

    #[test]
    fn test_breaking_phrase_needs_space() {
        let commit = Commit::parse("feat: message\n\nBREAKING CHANGE:", &policy()).unwrap();
        assert!(!commit.breaking());
        assert_eq!(commit.body(), Some("BREAKING CHANGE:"));
        assert_eq!(commit.breaking_change(), None);
    }

    #[test]
    fn test_breaking_phrase_is_not_a_footer_in_the_header() {
        let commit = Commit::parse("feat: BREAKING CHANGE: nope", &policy()).unwrap();
        assert!(!commit.breaking());
        assert_eq!(commit.description(), "BREAKING CHANGE: nope");
    }

    #[test]
    fn test_grammar_mismatch() {
        let err = Commit::parse("test commit", &policy()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GrammarMismatch);
        assert_eq!(err.example(), "feat(scope): message text");

        let p = policy().with_scopes("utils");
        let err = Commit::parse("feat(ui): test commit", &p).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GrammarMismatch);
        assert_eq!(err.example(), "feat(utils): message text");

        let err = Commit::parse("feat(): test commit", &policy()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GrammarMismatch);
    }

    #[test]
    fn test_missing_required_scope() {
        let p = policy().with_scopes("ui").with_scope_required(true);
        let err = Commit::parse("feat: test commit", &p).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredScope);
        assert_eq!(
            err.to_string(),
            "Scope is required. Example: 'feat(ui): message text'"
        );

        let commit = Commit::parse("feat(ui): test commit", &p).unwrap();
        assert_eq!(commit.scope(), Some("ui"));
    }

    #[test]
    fn test_mismatch_wins_over_missing_scope() {
        let p = policy().with_scope_required(true);
        let err = Commit::parse("chore: nope", &p).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GrammarMismatch);
    }

    #[test]
    fn test_display() {
        let p = policy();
        let render = |m: &str| Commit::parse(m, &p).unwrap().to_string();

        assert_eq!(render("feat: test commit"), "feat: test commit");
        assert_eq!(render("fix(cicd): a\n\nbody"), "fix(cicd): a");
        assert_eq!(render("fix(cicd)!: a"), "fix(cicd)!: a");
        assert_eq!(
            render("fix: a\n\nBREAKING CHANGE: b"),
            "fix!: a"
        );
        assert_eq!(render("fix:   a  "), "fix: a");
    }
}
