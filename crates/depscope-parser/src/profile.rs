//! Per-language extraction and resolution profiles.
//!
//! A [`Profile`] bundles everything language-specific the pipeline needs:
//! the extraction rules, the trivia skipped between them and the suffixes
//! tried when mapping a relative reference onto a file.

use winnow::error::ModalResult;

use depscope_core::Language;

use crate::extract::{self, Input, Reference};

type RuleFn = for<'a> fn(&mut Input<'a>) -> ModalResult<Vec<Reference<'a>>>;
type TriviaFn = for<'a> fn(&mut Input<'a>) -> ModalResult<()>;

/// Where a rule is allowed to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    /// Not preceded by an identifier character or a `.`.
    Word,
    /// Preceded only by blanks on its line.
    LineStart,
}

impl Anchor {
    /// Returns `true` if a rule anchored this way may start right after the
    /// text summarized by `preceding`.
    pub(crate) fn admits(self, preceding: &Preceding) -> bool {
        match self {
            Anchor::Word => preceding
                .last
                .is_none_or(|c| !(c.is_alphanumeric() || matches!(c, '_' | '$' | '.'))),
            Anchor::LineStart => preceding.blank_line,
        }
    }
}

/// What the scanner has seen before its current position.
///
/// Updated with every slice the scanner consumes, so anchors are checked
/// without looking back into the file text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Preceding {
    last: Option<char>,
    blank_line: bool,
    line: usize,
}

impl Default for Preceding {
    fn default() -> Self {
        Self {
            last: None,
            blank_line: true,
            line: 1,
        }
    }
}

impl Preceding {
    /// Moves past `consumed`, the text right after the current position.
    pub(crate) fn advance(&mut self, consumed: &str) {
        for c in consumed.chars() {
            match c {
                '\n' => {
                    self.blank_line = true;
                    self.line += 1;
                }
                ' ' | '\t' => {}
                _ => self.blank_line = false,
            }
        }
        if let Some(c) = consumed.chars().next_back() {
            self.last = Some(c);
        }
    }

    /// 1-based line of the current position.
    pub(crate) fn line(&self) -> usize {
        self.line
    }
}

/// A named extraction rule.
pub(crate) struct Rule {
    name: &'static str,
    anchor: Anchor,
    parse: RuleFn,
}

impl Rule {
    const fn new(name: &'static str, anchor: Anchor, parse: RuleFn) -> Self {
        Self {
            name,
            anchor,
            parse,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub(crate) fn parse<'a>(&self, input: &mut Input<'a>) -> ModalResult<Vec<Reference<'a>>> {
        (self.parse)(input)
    }
}

pub(crate) struct Profile {
    rules: &'static [Rule],
    trivia: &'static [TriviaFn],
    /// Backticks open template literals whose `${...}` parts are code.
    interpolated_templates: bool,
    resolution_suffixes: &'static [&'static str],
}

static JAVASCRIPT: Profile = Profile {
    rules: &[
        Rule::new("import", Anchor::Word, extract::import_statement),
        Rule::new("export-from", Anchor::Word, extract::export_from),
        Rule::new("require", Anchor::Word, extract::require_call),
    ],
    trivia: &[
        extract::line_comment,
        extract::block_comment,
        extract::string_literal,
    ],
    interpolated_templates: true,
    resolution_suffixes: &[
        "",
        ".js",
        ".jsx",
        ".ts",
        ".tsx",
        ".mjs",
        ".cjs",
        "/index.js",
        "/index.ts",
        "/index.jsx",
        "/index.tsx",
    ],
};

static PYTHON: Profile = Profile {
    rules: &[
        Rule::new("import", Anchor::LineStart, extract::python_import),
        Rule::new("from-import", Anchor::LineStart, extract::python_from_import),
        Rule::new("dynamic-import", Anchor::Word, extract::python_dynamic_import),
    ],
    trivia: &[
        extract::hash_comment,
        extract::triple_quoted,
        extract::string_literal,
    ],
    interpolated_templates: false,
    resolution_suffixes: &["", ".py", "/__init__.py"],
};

static CPP: Profile = Profile {
    rules: &[Rule::new("include", Anchor::LineStart, extract::include_directive)],
    trivia: &[
        extract::line_comment,
        extract::block_comment,
        extract::string_literal,
    ],
    interpolated_templates: false,
    resolution_suffixes: &["", ".h", ".hpp", ".hxx", ".cpp", ".cc", ".cxx"],
};

static JAVA: Profile = Profile {
    rules: &[
        Rule::new("import", Anchor::LineStart, extract::java_import),
        Rule::new("class-for-name", Anchor::Word, extract::java_class_for_name),
    ],
    trivia: &[
        extract::line_comment,
        extract::block_comment,
        extract::string_literal,
    ],
    interpolated_templates: false,
    resolution_suffixes: &["", ".java"],
};

static GO: Profile = Profile {
    rules: &[Rule::new("import", Anchor::LineStart, extract::go_import)],
    trivia: &[
        extract::line_comment,
        extract::block_comment,
        extract::string_literal,
        extract::raw_string,
    ],
    interpolated_templates: false,
    resolution_suffixes: &["", ".go"],
};

impl Profile {
    /// Returns the profile of `language`.
    pub(crate) fn for_language(language: Language) -> &'static Profile {
        match language {
            Language::JavaScript => &JAVASCRIPT,
            Language::Python => &PYTHON,
            Language::Cpp => &CPP,
            Language::Java => &JAVA,
            Language::Go => &GO,
        }
    }

    pub(crate) fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    pub(crate) fn trivia(&self) -> &'static [TriviaFn] {
        self.trivia
    }

    pub(crate) fn interpolated_templates(&self) -> bool {
        self.interpolated_templates
    }

    /// Suffixes appended to a joined base path, in trial order.
    pub(crate) fn resolution_suffixes(&self) -> &'static [&'static str] {
        self.resolution_suffixes
    }
}
