//! Dependency classification.

use depscope_core::{BuiltinRegistry, DependencyClass, Language};

/// Code hosts whose presence marks a Go import as a third-party module.
const GO_MODULE_HOSTS: &[&str] = &[
    "github.com",
    "gitlab.com",
    "bitbucket.org",
    "golang.org",
    "gopkg.in",
    "go.googlesource.com",
];

/// Classifies a dependency token of a file written in `language`.
///
/// Rules apply in order:
///
/// 1. Tokens starting with `.` (`./x`, `../x`, Python's `.mod`) are internal.
/// 2. Tokens matching the language's [`BuiltinRegistry`] are builtin.
/// 3. Go tokens whose first path segment contains no dot and that name no
///    known code host are internal (same-module packages).
/// 4. Everything else is external.
///
/// # Examples
///
/// ```
/// # use depscope_core::{DependencyClass, Language};
/// # use depscope_parser::classify;
/// assert_eq!(classify("./utils", Language::JavaScript), DependencyClass::Internal);
/// assert_eq!(classify("fs/promises", Language::JavaScript), DependencyClass::Builtin);
/// assert_eq!(classify("github.com/pkg/errors", Language::Go), DependencyClass::External);
/// ```
pub fn classify(token: &str, language: Language) -> DependencyClass {
    if token.starts_with('.') {
        return DependencyClass::Internal;
    }

    if BuiltinRegistry::for_language(language).contains(token) {
        return DependencyClass::Builtin;
    }

    match language {
        Language::Go => classify_go_import(token),
        Language::JavaScript | Language::Python | Language::Cpp | Language::Java => {
            DependencyClass::External
        }
    }
}

// Dotless first segments are usually same-module packages, but this also
// catches private hosts without a dot in their name.
fn classify_go_import(token: &str) -> DependencyClass {
    let first_segment = token.split('/').next().unwrap_or(token);
    let names_host = GO_MODULE_HOSTS.iter().any(|host| token.contains(host));

    if first_segment.contains('.') || names_host {
        DependencyClass::External
    } else {
        DependencyClass::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_tokens_are_internal() {
        assert_eq!(classify("./a", Language::JavaScript), DependencyClass::Internal);
        assert_eq!(classify("../lib/b", Language::Cpp), DependencyClass::Internal);
        assert_eq!(classify(".models", Language::Python), DependencyClass::Internal);
        assert_eq!(classify("..", Language::Python), DependencyClass::Internal);
    }

    #[test]
    fn test_relative_wins_over_registry() {
        // `./fs` names a local file even though `fs` is a core module
        assert_eq!(classify("./fs", Language::JavaScript), DependencyClass::Internal);
    }

    #[test]
    fn test_builtins() {
        assert_eq!(classify("fs", Language::JavaScript), DependencyClass::Builtin);
        assert_eq!(classify("node:path", Language::JavaScript), DependencyClass::Builtin);
        assert_eq!(classify("os.path", Language::Python), DependencyClass::Builtin);
        assert_eq!(classify("vector", Language::Cpp), DependencyClass::Builtin);
        assert_eq!(classify("java.util.List", Language::Java), DependencyClass::Builtin);
        assert_eq!(classify("net/http", Language::Go), DependencyClass::Builtin);
    }

    #[test]
    fn test_externals() {
        assert_eq!(classify("react", Language::JavaScript), DependencyClass::External);
        assert_eq!(classify("@scope/pkg", Language::JavaScript), DependencyClass::External);
        assert_eq!(classify("numpy", Language::Python), DependencyClass::External);
        assert_eq!(classify("boost/asio.hpp", Language::Cpp), DependencyClass::External);
        assert_eq!(classify("org.junit.Test", Language::Java), DependencyClass::External);
    }

    #[test]
    fn test_go_module_paths() {
        assert_eq!(classify("github.com/pkg/errors", Language::Go), DependencyClass::External);
        assert_eq!(classify("gopkg.in/yaml.v3", Language::Go), DependencyClass::External);
        assert_eq!(classify("example.com/mod/x", Language::Go), DependencyClass::External);
        assert_eq!(classify("myapp/internal/db", Language::Go), DependencyClass::Internal);
    }

    #[test]
    fn test_dotless_rule_is_go_only() {
        assert_eq!(classify("myapp/internal/db", Language::JavaScript), DependencyClass::External);
    }
}
