//! Resolution of internal references onto known file paths.
//!
//! Only path-relative references (`./x`, `../x`) are resolved. The reference
//! is joined with the directory of the referencing file, normalized, and the
//! language's suffixes are tried in order until one names a file of the run.

use std::collections::HashSet;

use log::debug;

use depscope_core::{
    ClassifiedDependency, DependencyClass, Language, ParsedFile, ResolvedDependency, ResolvedFile,
};

use crate::{
    error::{Diagnostic, ErrorCode},
    profile::Profile,
};

/// The set of file paths present in an analysis run.
#[derive(Debug, Clone, Default)]
pub struct KnownPaths {
    paths: HashSet<String>,
}

impl KnownPaths {
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }
}

impl<S: Into<String>> FromIterator<S> for KnownPaths {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Why a reference could not be mapped onto a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The reference does not start with `./` or `../`.
    NotPathRelative,
    /// A `..` segment climbs above the repository root.
    EscapesRoot,
    /// No suffix applied to `base` names a known path.
    NotFound { base: String },
}

/// The outcome of resolving one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    Unresolved(UnresolvedReason),
}

impl Resolution {
    /// The resolved path, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(path) => Some(path),
            Resolution::Unresolved(_) => None,
        }
    }
}

/// Resolves `token`, referenced from `source_path`, against `known`.
///
/// The suffix conventions are those of the language detected from
/// `source_path`. The first suffix is always empty, so a reference that
/// already names a file exactly resolves to itself.
///
/// # Examples
///
/// ```
/// # use depscope_parser::{KnownPaths, Resolution, resolve};
/// let known: KnownPaths = ["src/a.js", "src/utils/helper.js"].into_iter().collect();
/// assert_eq!(
///     resolve("src/a.js", "./utils/helper", &known),
///     Resolution::Resolved("src/utils/helper.js".to_string()),
/// );
/// ```
pub fn resolve(source_path: &str, token: &str, known: &KnownPaths) -> Resolution {
    resolve_as(Language::detect(source_path), source_path, token, known)
}

fn resolve_as(
    language: Language,
    source_path: &str,
    token: &str,
    known: &KnownPaths,
) -> Resolution {
    if !token.starts_with("./") && !token.starts_with("../") {
        return Resolution::Unresolved(UnresolvedReason::NotPathRelative);
    }

    let Some(base) = join_relative(source_path, token) else {
        return Resolution::Unresolved(UnresolvedReason::EscapesRoot);
    };

    let hit = Profile::for_language(language)
        .resolution_suffixes()
        .iter()
        .map(|suffix| format!("{base}{suffix}"))
        .find(|candidate| known.contains(candidate));

    match hit {
        Some(path) => Resolution::Resolved(path),
        None => Resolution::Unresolved(UnresolvedReason::NotFound { base }),
    }
}

/// Joins `token` onto the directory of `source_path`.
///
/// Returns `None` when a `..` segment has nothing left to pop.
fn join_relative(source_path: &str, token: &str) -> Option<String> {
    let mut segments: Vec<&str> = match source_path.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').filter(|s| !s.is_empty()).collect(),
        None => Vec::new(),
    };

    for segment in token.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    Some(segments.join("/"))
}

/// Resolves every internal dependency of `parsed`.
///
/// External and builtin dependencies pass through untouched. Internal
/// dependencies that cannot be resolved keep an empty target and produce a
/// warning diagnostic each.
pub fn resolve_file(parsed: &ParsedFile, known: &KnownPaths) -> (ResolvedFile, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    let dependencies = parsed
        .dependencies()
        .iter()
        .map(|dependency| {
            if dependency.class() != DependencyClass::Internal {
                return dependency.clone().resolve(None);
            }

            match resolve_as(parsed.language(), parsed.path(), dependency.token(), known) {
                Resolution::Resolved(path) => dependency.clone().resolve(Some(path)),
                Resolution::Unresolved(reason) => {
                    debug!(
                        path = parsed.path(),
                        token = dependency.token(),
                        line = dependency.line();
                        "Unresolved internal reference"
                    );
                    diagnostics.push(unresolved_diagnostic(parsed, dependency, &reason));
                    dependency.clone().resolve(None)
                }
            }
        })
        .collect::<Vec<ResolvedDependency>>();

    (
        ResolvedFile::new(parsed.path(), parsed.language(), dependencies),
        diagnostics,
    )
}

fn unresolved_diagnostic(
    parsed: &ParsedFile,
    dependency: &ClassifiedDependency,
    reason: &UnresolvedReason,
) -> Diagnostic {
    let token = dependency.token();
    let diagnostic = match reason {
        UnresolvedReason::NotFound { base } => {
            let tried = Profile::for_language(parsed.language())
                .resolution_suffixes()
                .iter()
                .map(|suffix| format!("`{base}{suffix}`"))
                .collect::<Vec<_>>()
                .join(", ");
            Diagnostic::warning(format!("cannot resolve internal reference `{token}`"))
                .with_code(ErrorCode::E200)
                .with_label(dependency.span(), "no file of the tree matches")
                .with_help(format!("tried {tried}"))
        }
        UnresolvedReason::EscapesRoot => {
            Diagnostic::warning(format!("internal reference `{token}` escapes the root"))
                .with_code(ErrorCode::E201)
                .with_label(dependency.span(), "climbs above the root directory")
        }
        UnresolvedReason::NotPathRelative => {
            Diagnostic::warning(format!("internal reference `{token}` is not path-relative"))
                .with_code(ErrorCode::E202)
                .with_label(dependency.span(), "not mapped onto a file")
                .with_help("only references starting with `./` or `../` are resolved")
        }
    };
    diagnostic.with_file(parsed.path())
}
