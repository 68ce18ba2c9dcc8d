//! The transient node/edge graph behind a rendered diagram.

use indexmap::{IndexMap, IndexSet};
use log::trace;

use depscope_core::{DependencyClass, NodeKind, ResolvedDependency, TreeNode};

use crate::{export::DiagramInput, options::RenderOptions};

/// The style role of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum NodeRole {
    /// A file with at least one extracted dependency, drawn or not.
    Source,
    Internal,
    External,
    Builtin,
}

impl NodeRole {
    /// Roles in styling order.
    pub(crate) const ALL: [NodeRole; 4] = [
        NodeRole::Source,
        NodeRole::Internal,
        NodeRole::External,
        NodeRole::Builtin,
    ];

    pub(crate) fn class_name(self) -> &'static str {
        match self {
            NodeRole::Source => "codeStyle",
            NodeRole::Internal => "internalStyle",
            NodeRole::External => "externalStyle",
            NodeRole::Builtin => "builtinStyle",
        }
    }

    pub(crate) fn style(self) -> &'static str {
        match self {
            NodeRole::Source => "fill:#4A90E2,stroke:#2E5C8A,stroke-width:2px,color:#fff",
            NodeRole::Internal => "fill:#50C878,stroke:#2E7D4E,stroke-width:2px,color:#fff",
            NodeRole::External => "fill:#FF6B6B,stroke:#C92A2A,stroke-width:2px,color:#fff",
            NodeRole::Builtin => "fill:#FFA500,stroke:#CC8400,stroke-width:2px,color:#fff",
        }
    }
}

impl From<DependencyClass> for NodeRole {
    fn from(class: DependencyClass) -> Self {
        match class {
            DependencyClass::Internal => NodeRole::Internal,
            DependencyClass::External => NodeRole::External,
            DependencyClass::Builtin => NodeRole::Builtin,
        }
    }
}

/// A node of the graph, keyed by path or token in [`DependencyGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GraphNode {
    id: String,
    label: String,
    role: NodeRole,
}

impl GraphNode {
    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn role(&self) -> NodeRole {
        self.role
    }
}

/// A directed edge between two node indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct GraphEdge {
    from: usize,
    to: usize,
}

impl GraphEdge {
    pub(crate) fn source(&self) -> usize {
        self.from
    }

    pub(crate) fn target(&self) -> usize {
        self.to
    }
}

/// Nodes in first-seen order and deduplicated edges in insertion order.
#[derive(Debug, Default)]
pub(crate) struct DependencyGraph {
    nodes: IndexMap<String, GraphNode>,
    edges: IndexSet<GraphEdge>,
}

impl DependencyGraph {
    /// Builds the graph of every file reachable within the option bounds.
    pub(crate) fn from_input(input: &DiagramInput<'_>, options: &RenderOptions) -> Self {
        let mut graph = Self::default();

        match input {
            DiagramInput::Tree(roots) => graph.visit(roots, 0, options),
            DiagramInput::Map(files) => {
                for (path, dependencies) in files.iter() {
                    if options.admits_depth(path.matches('/').count()) {
                        graph.add_file(path, dependencies, options);
                    }
                }
            }
        }

        trace!(nodes = graph.nodes.len(), edges = graph.edges.len(); "Dependency graph built");
        graph
    }

    /// Builds the graph of one file and all of its resolved dependencies.
    ///
    /// The file node is always present, even without dependencies.
    pub(crate) fn focused(path: &str, dependencies: &[ResolvedDependency]) -> Self {
        let mut graph = Self::default();
        let source = graph.insert_node(path, file_name(path), NodeRole::Source);

        for dependency in dependencies {
            graph.add_edge(source, dependency);
        }
        graph
    }

    pub(crate) fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub(crate) fn node(&self, index: usize) -> Option<&GraphNode> {
        self.nodes.get_index(index).map(|(_, node)| node)
    }

    pub(crate) fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter()
    }

    fn visit(&mut self, nodes: &[TreeNode], depth: usize, options: &RenderOptions) {
        if !options.admits_depth(depth) {
            return;
        }

        for node in nodes {
            match node.kind() {
                NodeKind::File {
                    dependencies: Some(dependencies),
                } => self.add_file(node.path(), dependencies, options),
                NodeKind::File { dependencies: None } => {}
                NodeKind::Directory { children } => self.visit(children, depth + 1, options),
            }
        }
    }

    /// Adds the file as a source node and an edge per shown dependency.
    ///
    /// The file gets its id before the class filters apply, so hiding a
    /// class does not shift the ids of later nodes.
    fn add_file(&mut self, path: &str, dependencies: &[ResolvedDependency], options: &RenderOptions) {
        if dependencies.is_empty() {
            return;
        }

        let source = self.insert_node(path, file_name(path), NodeRole::Source);
        for dependency in dependencies {
            if options.shows(dependency.class()) {
                self.add_edge(source, dependency);
            }
        }
    }

    fn add_edge(&mut self, source: usize, dependency: &ResolvedDependency) {
        let Some(target) = dependency.target() else {
            return;
        };

        let label = match dependency.class() {
            DependencyClass::Internal => file_name(target),
            DependencyClass::External | DependencyClass::Builtin => target,
        };
        let to = self.insert_node(target, label, dependency.class().into());
        self.edges.insert(GraphEdge { from: source, to });
    }

    /// Returns the index of the node keyed by `key`, inserting it if needed.
    ///
    /// A node seen as a source keeps the source role; otherwise the first
    /// role wins.
    fn insert_node(&mut self, key: &str, label: &str, role: NodeRole) -> usize {
        let next_id = self.nodes.len();
        let entry = self.nodes.entry(key.to_string());
        let index = entry.index();
        let node = entry.or_insert_with(|| GraphNode {
            id: format!("node{next_id}"),
            label: label.to_string(),
            role,
        });

        if role == NodeRole::Source {
            node.role = NodeRole::Source;
        }
        index
    }
}

/// The last `/`-separated segment of `path`.
pub(crate) fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
