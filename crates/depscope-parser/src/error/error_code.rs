//! Error codes for the depscope diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Render option validation errors
//! - `E2xx` - Resolution warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Option Errors (E1xx)
    // =========================================================================
    /// Invalid render direction.
    ///
    /// The direction is not one of `TB`, `TD`, `BT`, `RL` or `LR`.
    E100,

    /// Negative maximum depth.
    ///
    /// The traversal depth limit must be zero or greater.
    E101,

    // =========================================================================
    // Resolution Warnings (E2xx)
    // =========================================================================
    /// Unresolved internal reference.
    ///
    /// A relative reference did not match any file of the analyzed tree
    /// under any of the language's suffix conventions.
    E200,

    /// Reference escapes the repository root.
    ///
    /// A relative reference climbs above the root directory with `..`.
    E201,

    /// Internal reference is not path-relative.
    ///
    /// The reference is classified internal (a Python relative module or a
    /// Go same-module import) but does not start with `./` or `../`, so it
    /// cannot be mapped onto a file path.
    E202,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E200").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Option errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            // Resolution warnings
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
