//! Dependency records produced by the extraction pipeline.
//!
//! A dependency moves through three shapes:
//!
//! 1. [`RawDependency`] - a token as it appears in file text
//! 2. [`ClassifiedDependency`] - the token tagged with a [`DependencyClass`]
//! 3. [`ResolvedDependency`] - internal tokens mapped to a known file path

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Language, Span};

/// The category of a dependency token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyClass {
    /// A reference to another file of the same repository.
    Internal,
    /// A third-party package.
    External,
    /// A module of the language's standard library.
    Builtin,
}

impl DependencyClass {
    /// Returns the lowercase class name.
    pub fn as_str(self) -> &'static str {
        match self {
            DependencyClass::Internal => "internal",
            DependencyClass::External => "external",
            DependencyClass::Builtin => "builtin",
        }
    }
}

impl fmt::Display for DependencyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dependency token extracted from file text, with no meaning attached yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDependency {
    token: String,
    span: Span,
    line: usize,
}

impl RawDependency {
    pub fn new(token: impl Into<String>, span: Span, line: usize) -> Self {
        Self {
            token: token.into(),
            span,
            line,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Location of the token inside the file text.
    pub fn span(&self) -> Span {
        self.span
    }

    /// 1-based line of the token.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Attaches a class to this token.
    pub fn classify(self, class: DependencyClass) -> ClassifiedDependency {
        ClassifiedDependency {
            token: self.token,
            class,
            span: self.span,
            line: self.line,
        }
    }
}

/// A dependency token tagged with its [`DependencyClass`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedDependency {
    token: String,
    class: DependencyClass,
    #[serde(skip)]
    span: Span,
    line: usize,
}

impl ClassifiedDependency {
    /// Creates a dependency that was not extracted from file text. Its line
    /// is 0.
    pub fn new(token: impl Into<String>, class: DependencyClass) -> Self {
        Self {
            token: token.into(),
            class,
            span: Span::default(),
            line: 0,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn class(&self) -> DependencyClass {
        self.class
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Attaches a resolution outcome to this dependency.
    ///
    /// `target_path` is only kept for internal dependencies; external and
    /// builtin dependencies are rendered by their token.
    pub fn resolve(self, target_path: Option<String>) -> ResolvedDependency {
        let target_path = match self.class {
            DependencyClass::Internal => target_path,
            DependencyClass::External | DependencyClass::Builtin => None,
        };
        ResolvedDependency {
            token: self.token,
            class: self.class,
            span: self.span,
            line: self.line,
            target_path,
        }
    }
}

/// A classified dependency with its resolved target, if any.
///
/// An internal dependency without a `target_path` is unresolved: it did not
/// match any file of the run and is left out of rendered graphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependency {
    token: String,
    class: DependencyClass,
    #[serde(skip)]
    span: Span,
    #[serde(default)]
    line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_path: Option<String>,
}

impl ResolvedDependency {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn class(&self) -> DependencyClass {
        self.class
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// 1-based line of the token in the referencing file.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The resolved file path of an internal dependency.
    pub fn target_path(&self) -> Option<&str> {
        self.target_path.as_deref()
    }

    /// The graph target of this dependency.
    ///
    /// Internal dependencies point at their resolved path, all others at
    /// their raw token. Returns `None` for unresolved internal dependencies.
    pub fn target(&self) -> Option<&str> {
        match self.class {
            DependencyClass::Internal => self.target_path(),
            DependencyClass::External | DependencyClass::Builtin => Some(&self.token),
        }
    }
}

/// The dependencies extracted from one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedFile {
    path: String,
    language: Language,
    dependencies: Vec<ClassifiedDependency>,
}

impl ParsedFile {
    pub fn new(
        path: impl Into<String>,
        language: Language,
        dependencies: Vec<ClassifiedDependency>,
    ) -> Self {
        Self {
            path: path.into(),
            language,
            dependencies,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Dependencies in first-occurrence order. Empty when none were found.
    pub fn dependencies(&self) -> &[ClassifiedDependency] {
        &self.dependencies
    }
}

/// The dependencies of one file after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFile {
    path: String,
    language: Language,
    dependencies: Vec<ResolvedDependency>,
}

impl ResolvedFile {
    pub fn new(
        path: impl Into<String>,
        language: Language,
        dependencies: Vec<ResolvedDependency>,
    ) -> Self {
        Self {
            path: path.into(),
            language,
            dependencies,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn dependencies(&self) -> &[ResolvedDependency] {
        &self.dependencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_target_is_resolved_path() {
        let dep = ClassifiedDependency::new("./b", DependencyClass::Internal)
            .resolve(Some("src/b.js".to_string()));
        assert_eq!(dep.target(), Some("src/b.js"));
        assert_eq!(dep.target_path(), Some("src/b.js"));
    }

    #[test]
    fn test_unresolved_internal_has_no_target() {
        let dep = ClassifiedDependency::new("./missing", DependencyClass::Internal).resolve(None);
        assert_eq!(dep.target(), None);
        assert_eq!(dep.target_path(), None);
    }

    #[test]
    fn test_external_target_is_token() {
        let dep = ClassifiedDependency::new("lodash", DependencyClass::External)
            .resolve(Some("ignored.js".to_string()));
        assert_eq!(dep.target(), Some("lodash"));
        assert_eq!(dep.target_path(), None);
    }

    #[test]
    fn test_line_survives_classify_and_resolve() {
        let dep = RawDependency::new("./b", Span::new(24..27), 3)
            .classify(DependencyClass::Internal)
            .resolve(Some("src/b.js".to_string()));
        assert_eq!(dep.line(), 3);
        assert_eq!(dep.span(), Span::new(24..27));

        let json = serde_json::to_value(&dep).unwrap();
        assert_eq!(json["line"], 3);
        assert_eq!(json["target_path"], "src/b.js");
        assert!(json.get("span").is_none());
    }

    #[test]
    fn test_class_serializes_lowercase() {
        let json = serde_json::to_string(&DependencyClass::Builtin).unwrap();
        assert_eq!(json, "\"builtin\"");
    }
}
