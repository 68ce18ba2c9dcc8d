//! Integration tests for the Analyzer API
//!
//! These tests drive the whole pipeline from a snapshot to rendered output.

use depscope::{
    Analyzer, DependencyClass, DiagramInput, DiagramStats, Direction, FlatNodeKind,
    RenderOptions, Snapshot, annotate_tree, build_tree,
    config::{AnalysisConfig, AppConfig, RenderConfig},
    parse, render_diagram,
};
use depscope_parser::{KnownPaths, Resolution, resolve, resolve_file};

fn scenario_snapshot() -> Snapshot {
    Snapshot::from_files([
        ("src/a.js", "import b from './b';\nconst _ = require('lodash');\n"),
        ("src/b.js", "module.exports = 1;\n"),
    ])
}

#[test]
fn test_analyzer_api_exists() {
    let _analyzer = Analyzer::default();
}

#[test]
fn test_scenario_parse_and_resolve() {
    let parsed = parse("import b from './b';\nconst _ = require('lodash');\n", "src/a.js");

    let deps: Vec<_> = parsed
        .dependencies()
        .iter()
        .map(|d| (d.token(), d.class()))
        .collect();
    assert_eq!(
        deps,
        vec![
            ("./b", DependencyClass::Internal),
            ("lodash", DependencyClass::External),
        ]
    );

    let known: KnownPaths = ["src/a.js", "src/b.js"].into_iter().collect();
    assert_eq!(
        resolve("src/a.js", "./b", &known),
        Resolution::Resolved("src/b.js".to_string())
    );
}

#[test]
fn test_scenario_render_with_external() {
    let analyzer = Analyzer::default();
    let analysis = analyzer.analyze(&scenario_snapshot());
    let diagram = analyzer.render(&analysis).expect("Failed to render diagram");

    let edges: Vec<_> = diagram.lines().filter(|l| l.contains("-->")).collect();
    assert_eq!(
        edges,
        vec![
            r#"    node0["a.js"] --> node1["b.js"]"#,
            r#"    node0["a.js"] --> node2["lodash"]"#,
        ]
    );
    assert!(diagram.contains("    class node1 internalStyle"));
    assert!(diagram.contains("    class node2 externalStyle"));
}

#[test]
fn test_scenario_render_without_external() {
    let render = RenderConfig::default().with_show_external(false);
    let analyzer = Analyzer::new(AppConfig::new(AnalysisConfig::default(), render));
    let analysis = analyzer.analyze(&scenario_snapshot());
    let diagram = analyzer.render(&analysis).expect("Failed to render diagram");

    let edges: Vec<_> = diagram.lines().filter(|l| l.contains("-->")).collect();
    assert_eq!(edges, vec![r#"    node0["a.js"] --> node1["b.js"]"#]);
    assert!(diagram.starts_with("graph LR\n"));
    assert!(!diagram.contains("externalStyle"));
}

#[test]
fn test_render_is_deterministic() {
    let analyzer = Analyzer::default();
    let snapshot = scenario_snapshot();

    let first = analyzer.render(&analyzer.analyze(&snapshot)).unwrap();
    let second = analyzer.render(&analyzer.analyze(&snapshot)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_tree_and_map_forms_agree() {
    let analysis = Analyzer::default().analyze(&scenario_snapshot());
    let options = RenderOptions::default().with_max_depth(Some(1));

    let from_tree = render_diagram(DiagramInput::Tree(analysis.tree()), &options);
    let map = analysis.dependency_map();
    let from_map = render_diagram(DiagramInput::Map(&map), &options);

    assert_eq!(from_tree, from_map);
}

#[test]
fn test_unresolved_reference_is_dropped_and_reported() {
    let snapshot = Snapshot::from_files([(
        "src/a.js",
        "import x from './missing';\nimport y from '../../outside';\n",
    )]);
    let analyzer = Analyzer::default();
    let analysis = analyzer.analyze(&snapshot);

    // Not in the graph
    let diagram = analyzer.render(&analysis).unwrap();
    assert!(!diagram.contains("-->"));
    assert!(analysis.flat_graph().dependencies()["src/a.js"].is_empty());

    // Kept on the tree without a target
    let deps = analysis.files()[0].dependencies();
    assert_eq!(deps.len(), 2);
    assert!(deps.iter().all(|d| d.target_path().is_none()));

    // Reported as warnings
    let codes: Vec<_> = analysis
        .diagnostics()
        .iter()
        .map(|d| d.code().map(|c| c.as_str()))
        .collect();
    assert_eq!(codes, vec![Some("E200"), Some("E201")]);
    assert!(analysis.diagnostics().iter().all(|d| d.severity().is_warning()));
}

#[test]
fn test_invalid_options_rejected_before_render() {
    let render = RenderConfig::default().with_direction("sideways");
    let analyzer = Analyzer::new(AppConfig::new(AnalysisConfig::default(), render));
    let analysis = analyzer.analyze(&scenario_snapshot());

    assert!(analyzer.render(&analysis).is_err());
    assert!(analyzer.render_file(&analysis, "src/a.js").is_err());
}

#[test]
fn test_max_files_caps_parsing() {
    let snapshot = Snapshot::from_files([
        ("a.js", "import x from 'x';"),
        ("b.js", "import y from 'y';"),
        ("c.js", "import z from 'z';"),
    ]);
    let analyzer = Analyzer::new(AppConfig::new(
        AnalysisConfig::new(2, false),
        RenderConfig::default(),
    ));

    let analysis = analyzer.analyze(&snapshot);
    let paths: Vec<_> = analysis.files().iter().map(|f| f.path()).collect();
    assert_eq!(paths, vec!["a.js", "b.js"]);
}

#[test]
fn test_unrecognized_files_are_skipped_by_default() {
    let snapshot = Snapshot::from_files([
        ("README.md", "import x from 'x';"),
        ("main.py", "import os"),
    ]);

    let analysis = Analyzer::default().analyze(&snapshot);
    let paths: Vec<_> = analysis.files().iter().map(|f| f.path()).collect();
    assert_eq!(paths, vec!["main.py"]);

    let analyzer = Analyzer::new(AppConfig::new(
        AnalysisConfig::new(1000, true),
        RenderConfig::default(),
    ));
    assert_eq!(analyzer.analyze(&snapshot).files().len(), 2);
}

#[test]
fn test_multi_language_resolution() {
    let snapshot = Snapshot::from_files([
        ("app/main.cpp", "#include \"../lib/util.h\"\n#include <vector>\n"),
        ("lib/util.h", "#pragma once\n"),
        ("cmd/server/main.go", "import (\n    \"fmt\"\n    \"github.com/pkg/errors\"\n)\n"),
    ]);
    let analysis = Analyzer::default().analyze(&snapshot);
    let summary = analysis.summary();

    assert_eq!(summary.total_files(), 3);
    assert_eq!(summary.by_class().internal(), 1);
    assert_eq!(summary.by_class().external(), 1);
    assert_eq!(summary.by_class().builtin(), 2);

    let flat = analysis.flat_graph();
    assert_eq!(flat.dependencies()["app/main.cpp"], vec!["lib/util.h", "vector"]);
    let kinds: Vec<_> = flat.nodes().iter().map(|n| n.kind()).collect();
    assert_eq!(kinds.iter().filter(|k| **k == FlatNodeKind::File).count(), 3);
}

#[test]
fn test_annotate_and_render_from_parts() {
    let tree = build_tree(["src/a.py", "src/b.py"]);
    let known: KnownPaths = ["src/a.py", "src/b.py"].into_iter().collect();
    let (file, warnings) = resolve_file(&parse("import numpy\n", "src/a.py"), &known);
    assert!(warnings.is_empty());

    let decorated = annotate_tree(&[file], &tree);
    let options = RenderOptions::default().with_direction(Direction::TB).with_styled(false);
    let diagram = render_diagram(DiagramInput::Tree(&decorated), &options);

    assert_eq!(diagram, "graph TB\n    node0[\"a.py\"] --> node1[\"numpy\"]");

    let stats = DiagramStats::from_diagram(&diagram);
    assert_eq!(stats.total_edges(), 1);
    assert_eq!(stats.total_nodes(), 2);
}
