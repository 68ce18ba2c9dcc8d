//! Diagnostics for the depscope analysis pipeline.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing at the offending dependency token
//! - Severity levels
//!
//! # Overview
//!
//! Extraction and classification never fail. The pipeline reports two kinds
//! of problems through [`Diagnostic`]:
//!
//! - **Warnings** for internal references that could not be resolved against
//!   the known file set. These are retained next to the analysis result while
//!   the reference itself is left out of rendered graphs.
//! - **Errors** for caller-supplied options outside their documented range,
//!   raised before any traversal starts.
//!
//! # Example
//!
//! ```
//! # use depscope_parser::error::{Diagnostic, ErrorCode};
//! # use depscope_core::Span;
//!
//! let diag = Diagnostic::warning("cannot resolve `./missing`")
//!     .with_code(ErrorCode::E200)
//!     .with_file("src/a.js")
//!     .with_label(Span::new(20..29), "no matching file")
//!     .with_help("check the path and the file extension");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use severity::Severity;
