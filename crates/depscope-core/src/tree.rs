//! The hierarchical file/directory tree of a repository snapshot.

use serde::{Deserialize, Serialize};

use crate::ResolvedDependency;

/// The kind-specific payload of a [`TreeNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    /// A file. `dependencies` is `None` until the tree is annotated.
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dependencies: Option<Vec<ResolvedDependency>>,
    },
    /// A directory and its children, in listing order.
    #[serde(alias = "dir")]
    Directory {
        #[serde(default)]
        children: Vec<TreeNode>,
    },
}

/// A node of the repository tree.
///
/// Paths are `/`-separated and relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    name: String,
    path: String,
    #[serde(flatten)]
    kind: NodeKind,
}

impl TreeNode {
    /// Creates a file node without dependency information.
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File { dependencies: None },
        }
    }

    /// Creates a directory node.
    pub fn directory(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Directory { children },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// Children of a directory; empty for files.
    pub fn children(&self) -> &[TreeNode] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    /// Dependencies of an annotated file; `None` for directories and for
    /// files that have not been annotated.
    pub fn dependencies(&self) -> Option<&[ResolvedDependency]> {
        match &self.kind {
            NodeKind::File { dependencies } => dependencies.as_deref(),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Returns a copy of this file node carrying `dependencies`.
    ///
    /// Directory nodes are returned unchanged.
    pub fn with_dependencies(&self, dependencies: Vec<ResolvedDependency>) -> Self {
        match self.kind {
            NodeKind::File { .. } => Self {
                name: self.name.clone(),
                path: self.path.clone(),
                kind: NodeKind::File {
                    dependencies: Some(dependencies),
                },
            },
            NodeKind::Directory { .. } => self.clone(),
        }
    }

    /// Returns a copy of this directory node with `children` replacing its own.
    ///
    /// File nodes are returned unchanged.
    pub fn with_children(&self, children: Vec<TreeNode>) -> Self {
        match self.kind {
            NodeKind::Directory { .. } => Self {
                name: self.name.clone(),
                path: self.path.clone(),
                kind: NodeKind::Directory { children },
            },
            NodeKind::File { .. } => self.clone(),
        }
    }
}

/// Collects every file node of `nodes` in depth-first, listing order.
pub fn file_nodes(nodes: &[TreeNode]) -> Vec<&TreeNode> {
    fn visit<'a>(nodes: &'a [TreeNode], out: &mut Vec<&'a TreeNode>) {
        for node in nodes {
            match node.kind() {
                NodeKind::File { .. } => out.push(node),
                NodeKind::Directory { children } => visit(children, out),
            }
        }
    }

    let mut out = Vec::new();
    visit(nodes, &mut out);
    out
}
