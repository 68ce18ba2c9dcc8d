//! Bridges depscope errors and warnings to miette reports.
//!
//! Option errors and resolution warnings carry a [`Diagnostic`] and are
//! rendered with their code, help and, for warnings, a snippet of the file
//! they were raised for. Other errors are reported as plain messages.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use depscope::{DepscopeError, Diagnostic, Snapshot, Span};

/// An error or warning that miette can render.
pub enum Reportable<'a> {
    /// A structured diagnostic and the text its labels point into.
    Diagnostic { diag: &'a Diagnostic, src: &'a str },
    /// An error without source information.
    Error(&'a DepscopeError),
}

impl fmt::Debug for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic { diag, .. } => {
                f.debug_tuple("Diagnostic").field(diag).finish()
            }
            Reportable::Error(err) => f.debug_tuple("Error").field(err).finish(),
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic { diag, .. } => match diag.file() {
                Some(file) => write!(f, "{file}: {}", diag.message()),
                None => f.write_str(diag.message()),
            },
            Reportable::Error(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Error(err) => std::error::Error::source(*err),
            Reportable::Diagnostic { .. } => None,
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic { diag, .. } => diag
                .code()
                .map(|code| Box::new(code) as Box<dyn fmt::Display>),
            Reportable::Error(DepscopeError::Io(_)) => Some(Box::new("depscope::io")),
            Reportable::Error(DepscopeError::Config(_)) => Some(Box::new("depscope::config")),
            Reportable::Error(DepscopeError::Export(_)) => Some(Box::new("depscope::export")),
            Reportable::Error(DepscopeError::Options(diag)) => diag
                .code()
                .map(|code| Box::new(code) as Box<dyn fmt::Display>),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic { diag, .. } if diag.severity().is_warning() => {
                Some(miette::Severity::Warning)
            }
            _ => Some(miette::Severity::Error),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let Reportable::Diagnostic { diag, .. } = self else {
            return None;
        };
        diag.help().map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic { src, .. } => Some(src as &dyn miette::SourceCode),
            Reportable::Error(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Reportable::Diagnostic { diag, src } = self else {
            return None;
        };

        // Labels past the end of the text cannot be shown as snippets
        let src_len = src.len();
        let mut labels = diag
            .labels()
            .iter()
            .filter(move |label| label.span().end() <= src_len)
            .peekable();
        labels.peek()?;

        Some(Box::new(labels.map(|label| {
            LabeledSpan::new_primary_with_span(
                Some(label.message().to_string()),
                to_source_span(label.span()),
            )
        })))
    }
}

fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`DepscopeError`] into the reports to render.
///
/// Option errors are reported through their [`Diagnostic`], without source
/// text.
pub fn to_reportables(err: &DepscopeError) -> Vec<Reportable<'_>> {
    match err {
        DepscopeError::Options(diag) => vec![Reportable::Diagnostic { diag, src: "" }],
        _ => vec![Reportable::Error(err)],
    }
}

/// Pairs each analysis warning with the content of the file it names.
pub fn warning_reportables<'a>(
    diagnostics: &'a [Diagnostic],
    snapshot: &'a Snapshot,
) -> Vec<Reportable<'a>> {
    diagnostics
        .iter()
        .map(|diag| Reportable::Diagnostic {
            diag,
            src: diag
                .file()
                .and_then(|file| snapshot.content(file))
                .unwrap_or_default(),
        })
        .collect()
}
