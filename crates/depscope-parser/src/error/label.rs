//! Labeled source spans for diagnostic messages.
//!
//! A label associates a message with a span in a file's text,
//! marking the dependency token a diagnostic is about.

use depscope_core::Span;

/// A labeled span in file text.
///
/// # Example
///
/// ```text
/// warning[E200]: cannot resolve internal reference `./missing`
///   --> src/a.js:3:21
///    |
///  3 | import helper from './missing';
///    |                     ^^^^^^^^^ no matching file
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
}

impl Label {
    /// Create a new label.
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
