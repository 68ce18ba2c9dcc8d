//! Error types for depscope operations.
//!
//! This module provides the main error type [`DepscopeError`] which wraps
//! the error conditions that can occur at the public boundary.

use std::io;

use thiserror::Error;

use depscope_parser::error::Diagnostic;

/// The main error type for depscope operations.
///
/// # Diagnostic Variants
///
/// The `Options` variant carries a structured [`Diagnostic`] with an error
/// code and help text describing the rejected option.
#[derive(Debug, Error)]
pub enum DepscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Options(Diagnostic),

    /// A configuration source that could not be read or parsed.
    ///
    /// Displays as the wrapped error and keeps its source chain.
    #[error(transparent)]
    Config(Box<dyn std::error::Error + Send + Sync>),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<Diagnostic> for DepscopeError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::Options(diagnostic)
    }
}
