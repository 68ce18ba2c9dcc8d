//! Mermaid flowchart export.
//!
//! Output is a `graph <DIR>` header followed by one line per edge:
//!
//! ```text
//! graph LR
//!     node0["a.js"] --> node1["b.js"]
//!     node0["a.js"] --> node2["react"]
//! ```
//!
//! Styled diagrams end with a `%% Styling` trailer assigning each node to
//! exactly one of the `codeStyle`, `internalStyle`, `externalStyle` and
//! `builtinStyle` classes.

use std::fmt;

use log::{debug, info};
use serde::Serialize;

use crate::{
    export::DiagramInput,
    options::{Direction, RenderOptions},
    structure::{DependencyGraph, NodeRole},
};

/// Renders the dependency graph of `input` as Mermaid flowchart text.
///
/// The output is a pure function of its inputs. An input without any drawn
/// dependency renders as the bare header.
///
/// # Examples
///
/// ```
/// # use depscope::{DiagramInput, RenderOptions, render_diagram};
/// let diagram = render_diagram(DiagramInput::Tree(&[]), &RenderOptions::default().with_styled(false));
/// assert_eq!(diagram, "graph LR");
/// ```
pub fn render_diagram(input: DiagramInput<'_>, options: &RenderOptions) -> String {
    info!(direction:% = options.direction(), styled = options.styled(); "Rendering diagram");
    let graph = DependencyGraph::from_input(&input, options);

    let mut lines = vec![header(options.direction())];
    lines.extend(edge_lines(&graph));

    if options.styled() {
        lines.push(String::new());
        lines.push("    %% Styling".to_string());

        for role in NodeRole::ALL {
            let ids: Vec<&str> = graph
                .nodes()
                .filter(|node| node.role() == role)
                .map(|node| node.id())
                .collect();
            if ids.is_empty() {
                continue;
            }
            lines.push(format!("    classDef {} {}", role.class_name(), role.style()));
            lines.push(format!("    class {} {}", ids.join(","), role.class_name()));
        }
    }

    debug!(lines = lines.len(); "Diagram rendered");
    lines.join("\n")
}

/// Renders a diagram of one file and its direct dependencies.
///
/// Every resolved dependency is drawn regardless of class and no styling is
/// applied. A file that is missing from `input` or was never analyzed
/// renders as a single standalone node; an analyzed file without dependencies
/// renders as the bare header.
pub fn render_file_diagram(input: DiagramInput<'_>, path: &str, direction: Direction) -> String {
    let dependencies = input.dependencies_of(path);
    let graph = DependencyGraph::focused(path, dependencies.unwrap_or_default());

    let mut lines = vec![header(direction)];
    if dependencies.is_some() {
        lines.extend(edge_lines(&graph));
    } else if let Some(node) = graph.node(0) {
        lines.push(format!("    {}[\"{}\"]", node.id(), sanitize_label(node.label())));
    }

    lines.join("\n")
}

fn header(direction: Direction) -> String {
    format!("graph {direction}")
}

fn edge_lines(graph: &DependencyGraph) -> Vec<String> {
    graph
        .edges()
        .filter_map(|edge| {
            let source = graph.node(edge.source())?;
            let target = graph.node(edge.target())?;
            Some(format!(
                "    {}[\"{}\"] --> {}[\"{}\"]",
                source.id(),
                sanitize_label(source.label()),
                target.id(),
                sanitize_label(target.label()),
            ))
        })
        .collect()
}

/// Strips the characters that would break a Mermaid node label.
fn sanitize_label(label: &str) -> String {
    label.chars().filter(|c| !matches!(c, '"' | '[' | ']')).collect()
}

/// Node and edge counts of a rendered diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiagramStats {
    total_nodes: usize,
    total_edges: usize,
    avg_degree: f64,
}

impl DiagramStats {
    /// Computes statistics from diagram text.
    ///
    /// Edges are the lines containing `-->`; nodes are the distinct `nodeN`
    /// ids appearing on those lines outside of labels.
    pub fn from_diagram(diagram: &str) -> Self {
        let mut nodes = indexmap::IndexSet::new();
        let mut total_edges = 0;

        for line in diagram.lines().filter(|line| line.contains("-->")) {
            total_edges += 1;
            nodes.extend(node_ids(line));
        }

        let total_nodes = nodes.len();
        let avg_degree = if total_nodes == 0 {
            0.0
        } else {
            total_edges as f64 / total_nodes as f64
        };

        Self {
            total_nodes,
            total_edges,
            avg_degree,
        }
    }

    pub fn total_nodes(&self) -> usize {
        self.total_nodes
    }

    pub fn total_edges(&self) -> usize {
        self.total_edges
    }

    /// Edges per node; `0.0` for an empty diagram.
    pub fn avg_degree(&self) -> f64 {
        self.avg_degree
    }
}

impl fmt::Display for DiagramStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} edges, average degree {:.2}",
            self.total_nodes, self.total_edges, self.avg_degree
        )
    }
}

/// Yields the `nodeN` ids of one diagram line, skipping quoted labels.
fn node_ids(line: &str) -> Vec<&str> {
    let mut ids = Vec::new();
    let mut in_label = false;
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if c == '"' {
            in_label = !in_label;
            rest = &rest[1..];
            continue;
        }

        if !in_label && rest.starts_with("node") {
            let digits = rest[4..].bytes().take_while(u8::is_ascii_digit).count();
            if digits > 0 {
                ids.push(&rest[..4 + digits]);
                rest = &rest[4 + digits..];
                continue;
            }
        }
        rest = &rest[c.len_utf8()..];
    }
    ids
}

#[cfg(test)]
mod tests {
    use depscope_core::{ClassifiedDependency, DependencyClass, ResolvedDependency, TreeNode};

    use super::*;

    fn dep(token: &str, class: DependencyClass, target: Option<&str>) -> ResolvedDependency {
        ClassifiedDependency::new(token, class).resolve(target.map(str::to_string))
    }

    fn sample_tree() -> Vec<TreeNode> {
        vec![TreeNode::directory(
            "src",
            "src",
            vec![
                TreeNode::file("a.js", "src/a.js").with_dependencies(vec![
                    dep("./b", DependencyClass::Internal, Some("src/b.js")),
                    dep("react", DependencyClass::External, None),
                    dep("fs", DependencyClass::Builtin, None),
                ]),
                TreeNode::file("b.js", "src/b.js").with_dependencies(Vec::new()),
            ],
        )]
    }

    #[test]
    fn test_unstyled_diagram() {
        let tree = sample_tree();
        let options = RenderOptions::default().with_styled(false);

        let diagram = render_diagram(DiagramInput::Tree(&tree), &options);

        assert_eq!(
            diagram,
            "graph LR\n    node0[\"a.js\"] --> node1[\"b.js\"]\n    node0[\"a.js\"] --> node2[\"react\"]"
        );
    }

    #[test]
    fn test_styled_trailer() {
        let tree = sample_tree();
        let options = RenderOptions::default().with_show_builtin(true);

        let diagram = render_diagram(DiagramInput::Tree(&tree), &options);
        let lines: Vec<_> = diagram.lines().collect();

        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "    %% Styling");
        assert_eq!(
            lines[6],
            "    classDef codeStyle fill:#4A90E2,stroke:#2E5C8A,stroke-width:2px,color:#fff"
        );
        assert_eq!(lines[7], "    class node0 codeStyle");
        assert_eq!(lines[9], "    class node1 internalStyle");
        assert_eq!(lines[11], "    class node2 externalStyle");
        assert_eq!(lines[13], "    class node3 builtinStyle");
        assert_eq!(lines.len(), 14);
    }

    #[test]
    fn test_empty_input_renders_header() {
        let options = RenderOptions::default().with_direction(Direction::TB);
        let diagram = render_diagram(DiagramInput::Tree(&[]), &options);

        assert_eq!(diagram, "graph TB\n\n    %% Styling");
    }

    #[test]
    fn test_max_depth_bounds_traversal() {
        let tree = sample_tree();
        let options = RenderOptions::default().with_max_depth(Some(0)).with_styled(false);

        assert_eq!(render_diagram(DiagramInput::Tree(&tree), &options), "graph LR");
    }

    #[test]
    fn test_labels_are_sanitized() {
        let tree = vec![TreeNode::file("a.js", "a.js")
            .with_dependencies(vec![dep("pkg[\"x\"]", DependencyClass::External, None)])];
        let options = RenderOptions::default().with_styled(false);

        let diagram = render_diagram(DiagramInput::Tree(&tree), &options);

        assert!(diagram.ends_with("node1[\"pkgx\"]"), "{diagram}");
    }

    #[test]
    fn test_file_diagram() {
        let tree = sample_tree();
        let diagram = render_file_diagram(DiagramInput::Tree(&tree), "src/a.js", Direction::LR);

        // Focused diagrams ignore the class filters
        assert_eq!(diagram.lines().count(), 4);
        assert!(diagram.contains("node0[\"a.js\"] --> node3[\"fs\"]"));
    }

    #[test]
    fn test_file_diagram_standalone_node() {
        let mut tree = sample_tree();
        tree.push(TreeNode::file("notes.txt", "notes.txt"));

        let missing = render_file_diagram(DiagramInput::Tree(&tree), "src/none.js", Direction::LR);
        assert_eq!(missing, "graph LR\n    node0[\"none.js\"]");

        let unanalyzed = render_file_diagram(DiagramInput::Tree(&tree), "notes.txt", Direction::LR);
        assert_eq!(unanalyzed, "graph LR\n    node0[\"notes.txt\"]");
    }

    #[test]
    fn test_file_diagram_without_dependencies_is_header_only() {
        let tree = sample_tree();

        let lonely = render_file_diagram(DiagramInput::Tree(&tree), "src/b.js", Direction::TD);
        assert_eq!(lonely, "graph TD");
    }

    #[test]
    fn test_hidden_dependencies_keep_source_styled() {
        let tree = vec![
            TreeNode::file("a.js", "a.js")
                .with_dependencies(vec![dep("lodash", DependencyClass::External, None)]),
            TreeNode::file("b.js", "b.js")
                .with_dependencies(vec![dep("./c", DependencyClass::Internal, Some("c.js"))]),
        ];
        let options = RenderOptions::default().with_show_external(false);

        let diagram = render_diagram(DiagramInput::Tree(&tree), &options);
        let lines: Vec<_> = diagram.lines().collect();

        assert_eq!(lines[1], "    node1[\"b.js\"] --> node2[\"c.js\"]");
        assert!(lines.contains(&"    class node0,node1 codeStyle"));
        assert!(lines.contains(&"    class node2 internalStyle"));
    }

    #[test]
    fn test_stats() {
        let tree = sample_tree();
        let options = RenderOptions::default().with_show_builtin(true);
        let stats = DiagramStats::from_diagram(&render_diagram(DiagramInput::Tree(&tree), &options));

        assert_eq!(stats.total_nodes(), 4);
        assert_eq!(stats.total_edges(), 3);
        assert!((stats.avg_degree() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_ignore_ids_in_labels() {
        let stats = DiagramStats::from_diagram("graph LR\n    node0[\"node7.js\"] --> node1[\"x\"]");
        assert_eq!(stats.total_nodes(), 2);
    }

    #[test]
    fn test_stats_empty() {
        let stats = DiagramStats::from_diagram("graph LR");
        assert_eq!(stats.total_nodes(), 0);
        assert_eq!(stats.avg_degree(), 0.0);
        assert_eq!(stats.to_string(), "0 nodes, 0 edges, average degree 0.00");
    }
}
