//! Language profiles and suffix-based detection.

use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

/// The fixed set of language profiles the extractor understands.
///
/// Each variant selects a rule table for extraction, a builtin registry for
/// classification and a list of candidate suffixes for resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// JavaScript and TypeScript sources. Also the fallback profile.
    #[default]
    JavaScript,
    Python,
    /// C and C++ sources and headers.
    Cpp,
    Java,
    /// Go, the compiled-with-packages profile.
    Go,
}

impl Language {
    /// Every profile, in detection order.
    pub const ALL: [Language; 5] = [
        Language::Python,
        Language::Cpp,
        Language::Java,
        Language::Go,
        Language::JavaScript,
    ];

    /// Returns the ordered file suffixes that select this profile.
    pub fn suffixes(self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => &[".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs"],
            Language::Python => &[".py"],
            Language::Cpp => &[".cpp", ".cc", ".cxx", ".c", ".h", ".hpp", ".hxx"],
            Language::Java => &[".java"],
            Language::Go => &[".go"],
        }
    }

    /// Returns the profile whose suffix list matches `path`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use depscope_core::Language;
    ///
    /// assert_eq!(Language::recognize("src/main.go"), Some(Language::Go));
    /// assert_eq!(Language::recognize("README.md"), None);
    /// ```
    pub fn recognize(path: &str) -> Option<Language> {
        Self::ALL.into_iter().find(|language| {
            language
                .suffixes()
                .iter()
                .any(|suffix| path.ends_with(suffix))
        })
    }

    /// Detects the profile for `path`, falling back to the default profile.
    ///
    /// This never fails: unknown suffixes select [`Language::JavaScript`],
    /// the most permissive rule table.
    pub fn detect(path: &str) -> Language {
        Self::recognize(path).unwrap_or_else(|| {
            trace!(path; "No profile suffix matched, using default profile");
            Language::default()
        })
    }

    /// Returns the lowercase profile name.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Go => "go",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
