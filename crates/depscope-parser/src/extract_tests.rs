//! Unit tests for the per-language extraction rules.

use std::time::{Duration, Instant};

use depscope_core::Language;

use crate::extract::extract;

/// Extracts the tokens of `source` as plain strings.
fn tokens(source: &str, language: Language) -> Vec<String> {
    extract(source, language)
        .into_iter()
        .map(|dependency| dependency.token().to_string())
        .collect()
}

fn assert_tokens(source: &str, language: Language, expected: &[&str]) {
    let actual = tokens(source, language);
    assert_eq!(actual, expected, "source:\n{source}");
}

mod javascript {
    use super::*;

    #[test]
    fn test_import_forms() {
        let source = r#"
import React from 'react';
import { useState, useEffect } from "react-dom";
import * as path from 'path';
import Default, { named } from './mixed';
import './styles.css';
"#;
        assert_tokens(
            source,
            Language::JavaScript,
            &["react", "react-dom", "path", "./mixed", "./styles.css"],
        );
    }

    #[test]
    fn test_multiline_named_imports() {
        let source = "import {\n  a,\n  b as c,\n} from './lib';\n";
        assert_tokens(source, Language::JavaScript, &["./lib"]);
    }

    #[test]
    fn test_type_imports() {
        let source = "import type { Props } from './types';\nimport type Foo from 'foo';\n";
        assert_tokens(source, Language::JavaScript, &["./types", "foo"]);
    }

    #[test]
    fn test_default_import_named_type() {
        assert_tokens("import type from 'kind-of';", Language::JavaScript, &["kind-of"]);
    }

    #[test]
    fn test_dynamic_import_and_require() {
        let source = r#"
const lazy = () => import('./lazy');
const fs = require('fs');
const { join } = require ( "path" );
"#;
        assert_tokens(source, Language::JavaScript, &["./lazy", "fs", "path"]);
    }

    #[test]
    fn test_export_from() {
        let source = r#"
export * from './all';
export * as ns from './ns';
export { a, b } from './named';
export type { T } from './types';
export const x = 1;
"#;
        assert_tokens(
            source,
            Language::JavaScript,
            &["./all", "./ns", "./named", "./types"],
        );
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let source = "import a from './a';\nimport b from './b';\nconst a2 = require('./a');\n";
        assert_tokens(source, Language::JavaScript, &["./a", "./b"]);
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = r#"
// import old from './old';
/* const x = require('./commented');
   import y from './also-commented'; */
import live from './live';
"#;
        assert_tokens(source, Language::JavaScript, &["./live"]);
    }

    #[test]
    fn test_strings_are_skipped() {
        let source = r#"
const glob = "src/*.js";
const msg = 'require("./not-a-dep")';
import real from './real';
"#;
        assert_tokens(source, Language::JavaScript, &["./real"]);
    }

    #[test]
    fn test_member_calls_are_not_requires() {
        let source = "loader.require('./x');\nmyrequire('./y');\nconst z = require('./z');";
        assert_tokens(source, Language::JavaScript, &["./z"]);
    }

    #[test]
    fn test_spans_point_at_tokens() {
        let source = "import x from './x';";
        let deps = extract(source, Language::JavaScript);

        assert_eq!(deps.len(), 1);
        let span = deps[0].span();
        assert_eq!(&source[span.start()..span.end()], "./x");
    }

    #[test]
    fn test_template_text_is_skipped() {
        let source = "const doc = `\nimport x from 'y';\nrequire('./z')\n`;\nimport real from './real';";
        assert_tokens(source, Language::JavaScript, &["./real"]);
    }

    #[test]
    fn test_template_interpolations_are_scanned() {
        assert_tokens(
            "const m = `${require('./m')}`;",
            Language::JavaScript,
            &["./m"],
        );

        let source = r#"
const a = `${ {x: require('./obj')}.x } and ${`${require('./nested')}`} $ {require('no')}`;
const b = require('./after');
"#;
        assert_tokens(
            source,
            Language::JavaScript,
            &["./obj", "./nested", "./after"],
        );
    }

    #[test]
    fn test_unterminated_template_is_scanned_as_code() {
        assert_tokens("const t = `oops;\nrequire('./x');", Language::JavaScript, &["./x"]);
    }

    #[test]
    fn test_lines_are_recorded() {
        let source = "import a from './a';\n\nimport {\n  b,\n} from './b';\n/* x\n */ const c = `${require('./c')}`;";
        let lines: Vec<_> = extract(source, Language::JavaScript)
            .iter()
            .map(|dependency| (dependency.token().to_string(), dependency.line()))
            .collect();
        assert_eq!(
            lines,
            vec![
                ("./a".to_string(), 1),
                ("./b".to_string(), 5),
                ("./c".to_string(), 7),
            ]
        );
    }

    #[test]
    fn test_no_dependencies() {
        assert!(tokens("const x = 1;\n", Language::JavaScript).is_empty());
        assert!(tokens("", Language::JavaScript).is_empty());
    }
}

mod python {
    use super::*;

    #[test]
    fn test_import_statements() {
        let source = "import os\nimport numpy as np\nimport a.b as c, d\n";
        assert_tokens(source, Language::Python, &["os", "numpy", "a.b", "d"]);
    }

    #[test]
    fn test_from_imports() {
        let source = "from collections import OrderedDict\nfrom .models import User\nfrom .. import utils\n";
        assert_tokens(source, Language::Python, &["collections", ".models", ".."]);
    }

    #[test]
    fn test_indented_imports() {
        let source = "try:\n    import ujson as json\nexcept ImportError:\n    import json\n";
        assert_tokens(source, Language::Python, &["ujson", "json"]);
    }

    #[test]
    fn test_dynamic_imports() {
        let source = r#"
import importlib
mod = importlib.import_module("plugins.base")
other = import_module('plugins.extra', package=None)
legacy = __import__('legacy')
"#;
        assert_tokens(
            source,
            Language::Python,
            &["importlib", "plugins.base", "plugins.extra", "legacy"],
        );
    }

    #[test]
    fn test_comments_and_docstrings_are_skipped() {
        let source = r#"
"""
import hidden
"""
# import commented
x = "import quoted"
import visible
"#;
        assert_tokens(source, Language::Python, &["visible"]);
    }

    #[test]
    fn test_import_mid_line_is_ignored() {
        assert_tokens("x = 1; import sys\n", Language::Python, &[]);
    }
}

mod cpp {
    use super::*;

    #[test]
    fn test_includes() {
        let source = "#include <vector>\n#include \"local/util.h\"\n  #  include <sys/types.h>\n";
        assert_tokens(source, Language::Cpp, &["vector", "local/util.h", "sys/types.h"]);
    }

    #[test]
    fn test_commented_include_is_skipped() {
        let source = "// #include <old.h>\n/* #include \"gone.h\" */\n#include <new.h>\n";
        assert_tokens(source, Language::Cpp, &["new.h"]);
    }

    #[test]
    fn test_include_must_start_line() {
        assert_tokens("int x; #include <vector>\n", Language::Cpp, &[]);
    }

    #[test]
    fn test_long_line_scans_in_linear_time() {
        let source = format!(
            "#include <stdio.h>\nint x = 0;{}\n#include \"last.h\"\n",
            " x = x + 1;".repeat(40_000)
        );

        let started = Instant::now();
        let found = tokens(&source, Language::Cpp);
        let elapsed = started.elapsed();

        assert_eq!(found, vec!["stdio.h", "last.h"]);
        assert!(
            elapsed < Duration::from_secs(5),
            "scanning a 440KB line took {elapsed:?}"
        );
    }
}

mod java {
    use super::*;

    #[test]
    fn test_imports() {
        let source = "package app;\n\nimport java.util.List;\nimport static org.junit.Assert.assertEquals;\nimport com.example.model.*;\n";
        assert_tokens(
            source,
            Language::Java,
            &["java.util.List", "org.junit.Assert.assertEquals", "com.example.model.*"],
        );
    }

    #[test]
    fn test_class_for_name() {
        let source = "Class<?> c = Class.forName(\"com.mysql.cj.jdbc.Driver\");\n";
        assert_tokens(source, Language::Java, &["com.mysql.cj.jdbc.Driver"]);
    }

    #[test]
    fn test_import_without_semicolon_is_ignored() {
        assert_tokens("import java.util.List\n", Language::Java, &[]);
    }
}

mod go {
    use super::*;

    #[test]
    fn test_single_imports() {
        let source = "package main\n\nimport \"fmt\"\nimport f \"flag\"\nimport _ \"embed\"\nimport . \"math\"\n";
        assert_tokens(source, Language::Go, &["fmt", "flag", "embed", "math"]);
    }

    #[test]
    fn test_import_block() {
        let source = r#"
package main

import (
    "fmt"
    "net/http"

    // "commented/out"
    log "github.com/sirupsen/logrus"
    _ "github.com/lib/pq"
    "myapp/internal/db"
)
"#;
        assert_tokens(
            source,
            Language::Go,
            &[
                "fmt",
                "net/http",
                "github.com/sirupsen/logrus",
                "github.com/lib/pq",
                "myapp/internal/db",
            ],
        );
    }

    #[test]
    fn test_raw_string_import() {
        assert_tokens("import `fmt`\n", Language::Go, &["fmt"]);
    }
}
