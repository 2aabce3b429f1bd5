use winnow::combinator::{delimited, fail, opt, preceded, trace};
use winnow::error::{ErrMode, StrContext};
use winnow::stream::Stream;
use winnow::token::{literal, rest, take, take_till};
use winnow::{ModalResult, Parser};

use crate::{Policy, Scopes};

type Summary<'a> = (&'a str, Option<&'a str>, bool, &'a str);

type CommitDetails<'a> = (&'a str, Option<&'a str>, bool, &'a str, Option<&'a str>);

pub(crate) fn parse<'a>(i: &'a str, policy: &Policy) -> ModalResult<CommitDetails<'a>> {
    let mut input = i;
    let c = trace("message", |i: &mut &'a str| message(i, policy)).parse_next(&mut input)?;
    debug_assert!(input.is_empty(), "{input:?} remaining");
    Ok(c)
}

// <CR>              ::= "0x000D"
// <LF>              ::= "0x000A"
fn is_line_ending(c: char) -> bool {
    c == '\n' || c == '\r'
}

// <message>         ::= <summary>, [<LF>], [<body>]
fn message<'a>(i: &mut &'a str, policy: &Policy) -> ModalResult<CommitDetails<'a>> {
    let (type_, scope, breaking, description) =
        trace("summary", |i: &mut &'a str| summary(i, policy)).parse_next(i)?;

    let body = preceded(opt(newline), trace("body", body)).parse_next(i)?;

    Ok((type_, scope, breaking, description, body))
}

fn newline(i: &mut &str) -> ModalResult<char> {
    '\n'.parse_next(i)
}

// <summary>         ::= <type>, ["(", <scope>, ")"], ["!"], ":", " ", <text>
fn summary<'a>(i: &mut &'a str, policy: &Policy) -> ModalResult<Summary<'a>> {
    alternatives(
        i,
        policy.types().iter(),
        |i, ty| summary_with_type(i, ty, policy.scopes()),
        TYPE,
    )
}

fn summary_with_type<'a>(i: &mut &'a str, ty: &str, scopes: &Scopes) -> ModalResult<Summary<'a>> {
    let type_ = word(i, ty)?;
    let scope = opt(|i: &mut &'a str| scope_block(i, scopes)).parse_next(i)?;
    let breaking = opt(exclamation_mark).parse_next(i)?.is_some();
    let description = preceded(separator, text)
        .context(StrContext::Label(DESCRIPTION))
        .parse_next(i)?;

    Ok((type_, scope, breaking, description))
}

pub(crate) const TYPE: &str = "type";
pub(crate) const DESCRIPTION: &str = "description";

/// Try `parser` with each word in turn, keeping the first that succeeds.
///
/// This is a regex-style alternation over a vocabulary only known at runtime.
fn alternatives<'a, 'v, O>(
    i: &mut &'a str,
    words: impl Iterator<Item = &'v str>,
    mut parser: impl FnMut(&mut &'a str, &'v str) -> ModalResult<O>,
    label: &'static str,
) -> ModalResult<O> {
    let start = i.checkpoint();
    for w in words {
        match parser(i, w) {
            Ok(o) => return Ok(o),
            Err(ErrMode::Backtrack(_)) => i.reset(&start),
            Err(err) => return Err(err),
        }
    }
    fail.context(StrContext::Label(label)).parse_next(i)
}

fn word<'a>(i: &mut &'a str, expected: &str) -> ModalResult<&'a str> {
    literal(expected).parse_next(i)
}

// <scope-block>     ::= "(", <scope>, ")"
fn scope_block<'a>(i: &mut &'a str, scopes: &Scopes) -> ModalResult<&'a str> {
    match scopes {
        Scopes::Any => delimited('(', any_scope, ')').parse_next(i),
        Scopes::List(list) => alternatives(
            i,
            list.iter(),
            |i, scope| delimited('(', |i: &mut &'a str| word(i, scope), ')').parse_next(i),
            SCOPE,
        ),
    }
}

// <scope>           ::= <any UTF8-octets except newline>+
//
// Greedy: runs to the last ")" on the line that is followed by ["!"], ": ".
fn any_scope<'a>(i: &mut &'a str) -> ModalResult<&'a str> {
    let input: &'a str = *i;
    let line = &input[..input.find(is_line_ending).unwrap_or(input.len())];
    let end = line.rmatch_indices(')').map(|(idx, _)| idx).find(|&idx| {
        !line[..idx].trim().is_empty()
            && (opt(exclamation_mark), separator)
                .parse_peek(&line[idx + 1..])
                .is_ok()
    });

    match end {
        Some(end) => take(line[..end].chars().count()).parse_next(i),
        None => fail.context(StrContext::Label(SCOPE)).parse_next(i),
    }
}

pub(crate) const SCOPE: &str = "scope";

fn exclamation_mark<'a>(i: &mut &'a str) -> ModalResult<&'a str> {
    literal("!").context(StrContext::Label(BREAKER)).parse_next(i)
}

pub(crate) const BREAKER: &str = "exclamation_mark";

fn separator<'a>(i: &mut &'a str) -> ModalResult<&'a str> {
    literal(": ").parse_next(i)
}

// <text>            ::= <any UTF8-octets except newline>*
fn text<'a>(i: &mut &'a str) -> ModalResult<&'a str> {
    take_till(0.., is_line_ending).parse_next(i)
}

// <body>            ::= <any UTF8-octets>*
fn body<'a>(i: &mut &'a str) -> ModalResult<Option<&'a str>> {
    rest.map(|b: &'a str| Some(b.trim()).filter(|b| !b.is_empty()))
        .parse_next(i)
}
