//! # depscope Parser
//!
//! Lexical dependency extraction for the depscope analyzer. This crate turns
//! file text into classified dependency records and maps relative references
//! onto the files of an analysis run.
//!
//! The pipeline has three stages:
//!
//! 1. **Extract** - Match import-like statements with per-language rules
//! 2. **Classify** - Tag each token as internal, external or builtin
//! 3. **Resolve** - Map path-relative internal tokens onto known files
//!
//! Extraction is lexical: no file is ever executed or semantically parsed,
//! and text that matches no rule is silently ignored.
//!
//! ## Usage
//!
//! ```
//! # use depscope_core::DependencyClass;
//! # use depscope_parser::parse;
//! let parsed = parse("import React from 'react';\nimport { b } from './b';", "src/a.js");
//!
//! let tokens: Vec<_> = parsed.dependencies().iter().map(|d| d.token()).collect();
//! assert_eq!(tokens, vec!["react", "./b"]);
//! assert_eq!(parsed.dependencies()[1].class(), DependencyClass::Internal);
//! ```

mod classify;
pub mod error;
mod extract;
#[cfg(test)]
mod extract_tests;
mod profile;
mod resolve;

pub use classify::classify;
pub use extract::extract;
pub use resolve::{KnownPaths, Resolution, UnresolvedReason, resolve, resolve_file};

use depscope_core::{Language, ParsedFile};

/// Extracts and classifies the dependencies of the file at `path`.
///
/// The language profile is chosen from the suffix of `path`; unrecognized
/// suffixes fall back to JavaScript. Parsing never fails: a file without
/// any recognizable dependency yields an empty list.
pub fn parse(content: &str, path: &str) -> ParsedFile {
    let language = Language::detect(path);
    let dependencies = extract(content, language)
        .into_iter()
        .map(|raw| {
            let class = classify(raw.token(), language);
            raw.classify(class)
        })
        .collect();

    ParsedFile::new(path, language, dependencies)
}
