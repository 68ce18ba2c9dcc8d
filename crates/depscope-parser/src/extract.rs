//! Lexical dependency extraction.
//!
//! The extractor walks file text one character at a time. At every position
//! it first tries the profile's trivia parsers (comments, string literals) and
//! skips whatever they consume; otherwise it tries each rule of the profile
//! whose [`Anchor`](crate::profile::Anchor) admits the position. A rule that
//! matches consumes the whole statement and yields one or more references.
//!
//! JavaScript template literals are skipped as text, except for their
//! `${...}` parts which are scanned like any other code.
//!
//! Rules are plain winnow parsers over a [`LocatingSlice`] so every reference
//! carries the byte range of its token.

use std::{collections::HashSet, ops::Range};

use log::trace;
use winnow::{
    Parser as _,
    ascii::{multispace0, multispace1, space0, space1},
    combinator::{alt, delimited, not, opt, preceded, repeat, separated, terminated},
    error::ModalResult,
    stream::{LocatingSlice, Location, Stream},
    token::{any, literal, none_of, one_of, take_till, take_until, take_while},
};

use depscope_core::{Language, RawDependency, Span};

use crate::profile::{Preceding, Profile};

pub(crate) type Input<'a> = LocatingSlice<&'a str>;

/// A dependency token matched by a rule, borrowed from the file text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reference<'a> {
    text: &'a str,
    span: Range<usize>,
}

impl<'a> From<(&'a str, Range<usize>)> for Reference<'a> {
    fn from((text, span): (&'a str, Range<usize>)) -> Self {
        Self { text, span }
    }
}

/// Extracts the dependency tokens of `content` using the rules of `language`.
///
/// Tokens are returned in first-occurrence order; a token that appears more
/// than once in the file is reported once.
pub fn extract(content: &str, language: Language) -> Vec<RawDependency> {
    let profile = Profile::for_language(language);
    let mut input = Input::new(content);
    let mut preceding = Preceding::default();
    let mut templates = Templates::default();
    let mut seen = HashSet::new();
    let mut dependencies = Vec::new();

    while input.eof_offset() > 0 {
        let start = input.current_token_start();

        if !skip_trivia(profile, &mut input) {
            match match_rule(profile, &preceding, &mut input) {
                Some(references) => {
                    for reference in references {
                        if seen.insert(reference.text) {
                            let line = preceding.line()
                                + content[start..reference.span.start].matches('\n').count();
                            dependencies.push(RawDependency::new(
                                reference.text,
                                Span::new(reference.span),
                                line,
                            ));
                        }
                    }
                }
                None => step(profile, &mut templates, &mut input),
            }
        }

        let end = input.current_token_start();
        preceding.advance(&content[start..end]);
    }

    trace!(language:%, count = dependencies.len(); "Extracted dependency tokens");
    dependencies
}

/// Consumes one character of code.
fn step(profile: &Profile, templates: &mut Templates, input: &mut Input<'_>) {
    let token = input.next_token();
    if !profile.interpolated_templates() {
        return;
    }

    match token {
        Some('`') => templates.skip_text(input),
        Some('{') => templates.open_brace(),
        Some('}') => {
            if templates.close_brace() {
                templates.skip_text(input);
            }
        }
        _ => {}
    }
}

/// The `${...}` interpolations the scanner is inside of, innermost last.
///
/// Each entry counts the `{` opened within that interpolation and not yet
/// closed.
#[derive(Debug, Default)]
struct Templates {
    interpolations: Vec<usize>,
}

impl Templates {
    /// Skips template text, stopping after the closing backtick or inside
    /// the next interpolation.
    ///
    /// An unterminated template is left to be scanned as code.
    fn skip_text(&mut self, input: &mut Input<'_>) {
        let checkpoint = input.checkpoint();
        match template_text(input) {
            Ok(true) => self.interpolations.push(0),
            Ok(false) => {}
            Err(_) => input.reset(&checkpoint),
        }
    }

    fn open_brace(&mut self) {
        if let Some(depth) = self.interpolations.last_mut() {
            *depth += 1;
        }
    }

    /// Returns `true` if the brace ends the innermost interpolation.
    fn close_brace(&mut self) -> bool {
        let Some(depth) = self.interpolations.last_mut() else {
            return false;
        };
        if *depth > 0 {
            *depth -= 1;
            return false;
        }
        self.interpolations.pop();
        true
    }
}

/// Consumes one trivia item at the current position, if any.
fn skip_trivia(profile: &Profile, input: &mut Input<'_>) -> bool {
    let checkpoint = input.checkpoint();
    for trivia in profile.trivia() {
        if trivia(input).is_ok() {
            return true;
        }
        input.reset(&checkpoint);
    }
    false
}

/// Tries every admitted rule at the current position.
///
/// On failure the input is left where it was.
fn match_rule<'a>(
    profile: &Profile,
    preceding: &Preceding,
    input: &mut Input<'a>,
) -> Option<Vec<Reference<'a>>> {
    let checkpoint = input.checkpoint();
    let offset = input.current_token_start();
    for rule in profile.rules() {
        if !rule.anchor().admits(preceding) {
            continue;
        }
        match rule.parse(input) {
            Ok(references) => {
                trace!(rule = rule.name(), offset; "Rule matched");
                return Some(references);
            }
            Err(_) => input.reset(&checkpoint),
        }
    }
    None
}

// =============================================================================
// Shared building blocks
// =============================================================================

fn identifier<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '$').parse_next(input)
}

/// A single- or double-quoted token on one line.
fn quoted<'a>(input: &mut Input<'a>) -> ModalResult<Reference<'a>> {
    alt((
        delimited('\'', take_till(1.., ['\'', '\n']).with_span(), '\''),
        delimited('"', take_till(1.., ['"', '\n']).with_span(), '"'),
    ))
    .map(Reference::from)
    .parse_next(input)
}

pub(crate) fn line_comment(input: &mut Input<'_>) -> ModalResult<()> {
    ("//", take_till(0.., '\n')).void().parse_next(input)
}

pub(crate) fn block_comment(input: &mut Input<'_>) -> ModalResult<()> {
    ("/*", take_until(0.., "*/"), "*/").void().parse_next(input)
}

pub(crate) fn hash_comment(input: &mut Input<'_>) -> ModalResult<()> {
    ('#', take_till(0.., '\n')).void().parse_next(input)
}

/// A single-line string literal with backslash escapes.
pub(crate) fn string_literal(input: &mut Input<'_>) -> ModalResult<()> {
    let quote = one_of(['\'', '"']).parse_next(input)?;
    let () = repeat(
        0..,
        alt((
            preceded('\\', any).void(),
            none_of([quote, '\\', '\n']).void(),
        )),
    )
    .parse_next(input)?;
    literal(quote).void().parse_next(input)
}

/// A Go raw string.
pub(crate) fn raw_string(input: &mut Input<'_>) -> ModalResult<()> {
    ('`', take_till(0.., '`'), '`').void().parse_next(input)
}

/// Template literal text after a backtick or an interpolation.
///
/// Consumes up to and including the closing backtick, returning `false`, or
/// the next `${`, returning `true`.
fn template_text(input: &mut Input<'_>) -> ModalResult<bool> {
    let () = repeat(
        0..,
        alt((
            preceded('\\', any).void(),
            none_of(['`', '$', '\\']).void(),
            terminated('$', not('{')).void(),
        )),
    )
    .parse_next(input)?;
    alt(('`'.value(false), "${".value(true))).parse_next(input)
}

/// A Python triple-quoted string.
pub(crate) fn triple_quoted(input: &mut Input<'_>) -> ModalResult<()> {
    alt((
        ("\"\"\"", take_until(0.., "\"\"\""), "\"\"\""),
        ("'''", take_until(0.., "'''"), "'''"),
    ))
    .void()
    .parse_next(input)
}

// =============================================================================
// JavaScript / TypeScript
// =============================================================================

/// `{ a, b as c }`, possibly spanning lines.
fn named_bindings(input: &mut Input<'_>) -> ModalResult<()> {
    ('{', take_till(0.., '}'), '}').void().parse_next(input)
}

/// `* as ns`
fn namespace_binding(input: &mut Input<'_>) -> ModalResult<()> {
    ('*', multispace0, "as", multispace1, identifier)
        .void()
        .parse_next(input)
}

/// The bindings between `import` and `from`.
fn import_clause(input: &mut Input<'_>) -> ModalResult<()> {
    alt((
        preceded(multispace0, alt((named_bindings, namespace_binding))),
        preceded(
            multispace1,
            (
                identifier,
                opt((
                    multispace0,
                    ',',
                    multispace0,
                    alt((named_bindings, namespace_binding)),
                )),
            ),
        )
        .void(),
    ))
    .parse_next(input)
}

fn from_clause<'a>(input: &mut Input<'a>) -> ModalResult<Reference<'a>> {
    preceded((multispace0, "from", multispace0), quoted).parse_next(input)
}

/// `import x from 'm'`, `import type { T } from 'm'`, `import 'm'` and the
/// dynamic `import('m')`.
pub(crate) fn import_statement<'a>(input: &mut Input<'a>) -> ModalResult<Vec<Reference<'a>>> {
    preceded(
        "import",
        alt((
            delimited((multispace0, '(', multispace0), quoted, (multispace0, ')')),
            preceded(multispace0, quoted),
            preceded((multispace1, "type"), preceded(import_clause, from_clause)),
            preceded(import_clause, from_clause),
        )),
    )
    .map(|reference| vec![reference])
    .parse_next(input)
}

/// `export * from 'm'`, `export * as ns from 'm'`, `export { a } from 'm'`
/// and their `export type` forms.
pub(crate) fn export_from<'a>(input: &mut Input<'a>) -> ModalResult<Vec<Reference<'a>>> {
    preceded(
        (
            "export",
            opt((multispace1, "type")),
            multispace0,
            alt((
                ('*', opt((multispace0, "as", multispace1, identifier))).void(),
                named_bindings,
            )),
        ),
        from_clause,
    )
    .map(|reference| vec![reference])
    .parse_next(input)
}

/// CommonJS `require('m')`.
pub(crate) fn require_call<'a>(input: &mut Input<'a>) -> ModalResult<Vec<Reference<'a>>> {
    delimited(
        ("require", multispace0, '(', multispace0),
        quoted,
        (multispace0, ')'),
    )
    .map(|reference| vec![reference])
    .parse_next(input)
}

// =============================================================================
// Python
// =============================================================================

/// A dotted module path, including leading dots of relative imports.
fn dotted_name<'a>(input: &mut Input<'a>) -> ModalResult<Reference<'a>> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '.')
        .with_span()
        .map(Reference::from)
        .parse_next(input)
}

/// `import a.b as c, d`
pub(crate) fn python_import<'a>(input: &mut Input<'a>) -> ModalResult<Vec<Reference<'a>>> {
    preceded(
        ("import", space1),
        separated(
            1..,
            terminated(dotted_name, opt((space1, "as", space1, identifier))),
            (space0, ',', space0),
        ),
    )
    .parse_next(input)
}

/// `from .models import User`
pub(crate) fn python_from_import<'a>(input: &mut Input<'a>) -> ModalResult<Vec<Reference<'a>>> {
    delimited(("from", space1), dotted_name, (space1, "import"))
        .map(|reference| vec![reference])
        .parse_next(input)
}

/// `importlib.import_module('m')`, `import_module('m')` and `__import__('m')`.
pub(crate) fn python_dynamic_import<'a>(
    input: &mut Input<'a>,
) -> ModalResult<Vec<Reference<'a>>> {
    delimited(
        (
            alt(("__import__", preceded(opt("importlib."), "import_module"))),
            space0,
            '(',
            space0,
        ),
        quoted,
        (space0, alt((')', ','))),
    )
    .map(|reference| vec![reference])
    .parse_next(input)
}

// =============================================================================
// C / C++
// =============================================================================

/// `#include <vector>` and `#include "local.h"`
pub(crate) fn include_directive<'a>(input: &mut Input<'a>) -> ModalResult<Vec<Reference<'a>>> {
    preceded(
        ('#', space0, "include", space0),
        alt((
            delimited('<', take_till(1.., ['>', '\n']).with_span(), '>'),
            delimited('"', take_till(1.., ['"', '\n']).with_span(), '"'),
        )),
    )
    .map(|matched| vec![Reference::from(matched)])
    .parse_next(input)
}

// =============================================================================
// Java
// =============================================================================

/// A qualified name, optionally ending in a `.*` wildcard.
fn qualified_name<'a>(input: &mut Input<'a>) -> ModalResult<Reference<'a>> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || matches!(c, '_' | '$' | '.' | '*')
    })
    .with_span()
    .map(Reference::from)
    .parse_next(input)
}

/// `import java.util.List;`, `import static a.B.c;`, `import a.b.*;`
pub(crate) fn java_import<'a>(input: &mut Input<'a>) -> ModalResult<Vec<Reference<'a>>> {
    delimited(
        ("import", multispace1, opt(("static", multispace1))),
        qualified_name,
        (multispace0, ';'),
    )
    .map(|reference| vec![reference])
    .parse_next(input)
}

/// Reflective `Class.forName("a.b.C")`.
pub(crate) fn java_class_for_name<'a>(
    input: &mut Input<'a>,
) -> ModalResult<Vec<Reference<'a>>> {
    delimited(
        ("Class.forName", multispace0, '(', multispace0),
        quoted,
        (multispace0, alt((')', ','))),
    )
    .map(|reference| vec![reference])
    .parse_next(input)
}

// =============================================================================
// Go
// =============================================================================

/// An interpreted (`"..."`) or raw (`` `...` ``) import path.
fn go_string<'a>(input: &mut Input<'a>) -> ModalResult<Reference<'a>> {
    alt((
        delimited('"', take_till(1.., ['"', '\n']).with_span(), '"'),
        delimited('`', take_till(1.., '`').with_span(), '`'),
    ))
    .map(Reference::from)
    .parse_next(input)
}

/// `"fmt"`, `f "fmt"`, `_ "embed"` or `. "math"`
fn go_import_spec<'a>(input: &mut Input<'a>) -> ModalResult<Reference<'a>> {
    preceded(opt((alt((".", identifier)), space1)), go_string).parse_next(input)
}

/// `( ... )`: every quoted path inside the block.
fn go_import_block<'a>(input: &mut Input<'a>) -> ModalResult<Vec<Reference<'a>>> {
    delimited(
        '(',
        repeat(
            0..,
            alt((
                go_string.map(Some),
                line_comment.value(None),
                block_comment.value(None),
                none_of([')', '"', '`']).value(None),
            )),
        )
        .fold(Vec::new, |mut references, reference| {
            references.extend(reference);
            references
        }),
        ')',
    )
    .parse_next(input)
}

/// `import "fmt"` and `import ( ... )`
pub(crate) fn go_import<'a>(input: &mut Input<'a>) -> ModalResult<Vec<Reference<'a>>> {
    preceded(
        ("import", space0),
        alt((
            go_import_block,
            go_import_spec.map(|reference| vec![reference]),
        )),
    )
    .parse_next(input)
}
