//! Diagram and graph exporters.
//!
//! - [`mermaid`] - Mermaid flowchart text, full or focused on one file
//! - [`flat`] - A flat node list plus adjacency map

pub mod flat;
pub mod mermaid;

use indexmap::IndexMap;

use depscope_core::{ResolvedDependency, TreeNode};

/// The input of a render call.
#[derive(Debug, Clone, Copy)]
pub enum DiagramInput<'a> {
    /// Root nodes of a decorated tree.
    Tree(&'a [TreeNode]),
    /// File paths mapped to their dependencies.
    ///
    /// A path's depth is its number of `/` separators.
    Map(&'a IndexMap<String, Vec<ResolvedDependency>>),
}

impl<'a> DiagramInput<'a> {
    /// Looks up the dependencies of the file at `path`.
    pub(crate) fn dependencies_of(&self, path: &str) -> Option<&'a [ResolvedDependency]> {
        match *self {
            DiagramInput::Tree(roots) => find_file(roots, path).and_then(TreeNode::dependencies),
            DiagramInput::Map(files) => files.get(path).map(Vec::as_slice),
        }
    }
}

impl<'a> From<&'a [TreeNode]> for DiagramInput<'a> {
    fn from(roots: &'a [TreeNode]) -> Self {
        DiagramInput::Tree(roots)
    }
}

impl<'a> From<&'a IndexMap<String, Vec<ResolvedDependency>>> for DiagramInput<'a> {
    fn from(files: &'a IndexMap<String, Vec<ResolvedDependency>>) -> Self {
        DiagramInput::Map(files)
    }
}

fn find_file<'a>(nodes: &'a [TreeNode], path: &str) -> Option<&'a TreeNode> {
    nodes.iter().find_map(|node| {
        if node.is_file() && node.path() == path {
            Some(node)
        } else {
            find_file(node.children(), path)
        }
    })
}
