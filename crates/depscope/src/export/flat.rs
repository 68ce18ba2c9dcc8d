//! Flat graph export: a node list plus an adjacency map.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use depscope_core::{DependencyClass, ResolvedFile};

/// The kind of a [`FlatNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlatNodeKind {
    File,
    External,
    Builtin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatNode {
    name: String,
    #[serde(rename = "type")]
    kind: FlatNodeKind,
}

impl FlatNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FlatNodeKind {
        self.kind
    }
}

/// A dependency graph without hierarchy.
///
/// Every node has an entry in `dependencies`; external and builtin nodes
/// map to an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlatGraph {
    nodes: Vec<FlatNode>,
    dependencies: IndexMap<String, Vec<String>>,
}

impl FlatGraph {
    pub fn nodes(&self) -> &[FlatNode] {
        &self.nodes
    }

    pub fn dependencies(&self) -> &IndexMap<String, Vec<String>> {
        &self.dependencies
    }

    fn add_node(&mut self, name: &str, kind: FlatNodeKind) {
        if !self.dependencies.contains_key(name) {
            self.nodes.push(FlatNode {
                name: name.to_string(),
                kind,
            });
            self.dependencies.insert(name.to_string(), Vec::new());
        }
    }
}

/// Exports resolved files as a flat graph.
///
/// Files come first, in input order; dependency targets follow in
/// first-seen order. Unresolved internal references are left out and each
/// file's target list is deduplicated.
pub fn export_flat_graph(files: &[ResolvedFile]) -> FlatGraph {
    let mut graph = FlatGraph::default();

    for file in files {
        graph.add_node(file.path(), FlatNodeKind::File);
    }

    for file in files {
        let mut targets = IndexSet::new();

        for dependency in file.dependencies() {
            let Some(target) = dependency.target() else {
                continue;
            };
            let kind = match dependency.class() {
                DependencyClass::Internal => FlatNodeKind::File,
                DependencyClass::External => FlatNodeKind::External,
                DependencyClass::Builtin => FlatNodeKind::Builtin,
            };
            graph.add_node(target, kind);
            targets.insert(target.to_string());
        }

        if let Some(list) = graph.dependencies.get_mut(file.path()) {
            list.extend(targets);
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use depscope_core::{ClassifiedDependency, Language};

    use super::*;

    fn file(path: &str, deps: &[(&str, DependencyClass, Option<&str>)]) -> ResolvedFile {
        let deps = deps
            .iter()
            .map(|(token, class, target)| {
                ClassifiedDependency::new(*token, *class).resolve(target.map(str::to_string))
            })
            .collect();
        ResolvedFile::new(path, Language::JavaScript, deps)
    }

    #[test]
    fn test_flat_graph() {
        let files = vec![
            file(
                "src/a.js",
                &[
                    ("./b", DependencyClass::Internal, Some("src/b.js")),
                    ("./b.js", DependencyClass::Internal, Some("src/b.js")),
                    ("react", DependencyClass::External, None),
                    ("./missing", DependencyClass::Internal, None),
                ],
            ),
            file("src/b.js", &[("fs", DependencyClass::Builtin, None)]),
        ];

        let graph = export_flat_graph(&files);

        let nodes: Vec<_> = graph.nodes().iter().map(|n| (n.name(), n.kind())).collect();
        assert_eq!(
            nodes,
            vec![
                ("src/a.js", FlatNodeKind::File),
                ("src/b.js", FlatNodeKind::File),
                ("react", FlatNodeKind::External),
                ("fs", FlatNodeKind::Builtin),
            ]
        );
        assert_eq!(graph.dependencies()["src/a.js"], vec!["src/b.js", "react"]);
        assert_eq!(graph.dependencies()["src/b.js"], vec!["fs"]);
        assert!(graph.dependencies()["react"].is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let graph = export_flat_graph(&[file("a.js", &[("lodash", DependencyClass::External, None)])]);
        let json = serde_json::to_value(&graph).unwrap();

        assert_eq!(json["nodes"][1]["type"], "external");
        assert_eq!(json["dependencies"]["a.js"][0], "lodash");
    }
}
