//! Tree construction and annotation.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use depscope_core::{NodeKind, ResolvedDependency, ResolvedFile, TreeNode};

/// Returns a copy of `tree` where every file node carries its dependencies.
///
/// Files without an entry in `files` get an empty list. Structure, names,
/// paths and sibling order are preserved; the input tree is not modified.
pub fn annotate_tree(files: &[ResolvedFile], tree: &[TreeNode]) -> Vec<TreeNode> {
    let by_path: HashMap<&str, &[ResolvedDependency]> = files
        .iter()
        .map(|file| (file.path(), file.dependencies()))
        .collect();

    tree.iter().map(|node| annotate_node(node, &by_path)).collect()
}

fn annotate_node(node: &TreeNode, by_path: &HashMap<&str, &[ResolvedDependency]>) -> TreeNode {
    match node.kind() {
        NodeKind::File { .. } => {
            let dependencies = by_path
                .get(node.path())
                .map(|deps| deps.to_vec())
                .unwrap_or_default();
            node.with_dependencies(dependencies)
        }
        NodeKind::Directory { children } => node.with_children(
            children
                .iter()
                .map(|child| annotate_node(child, by_path))
                .collect(),
        ),
    }
}

#[derive(Default)]
struct DirectoryEntry {
    directories: BTreeMap<String, DirectoryEntry>,
    files: BTreeSet<String>,
}

/// Builds a tree from a flat list of `/`-separated file paths.
///
/// Within each directory, subdirectories come before files and both are
/// sorted by name. Empty segments are ignored.
///
/// # Examples
///
/// ```
/// # use depscope::build_tree;
/// let tree = build_tree(["src/b.js", "README.md", "src/a.js"]);
///
/// assert_eq!(tree[0].path(), "src");
/// assert_eq!(tree[0].children()[0].path(), "src/a.js");
/// assert_eq!(tree[1].path(), "README.md");
/// ```
pub fn build_tree<I, S>(paths: I) -> Vec<TreeNode>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut root = DirectoryEntry::default();

    for path in paths {
        let mut segments: Vec<&str> = path.as_ref().split('/').filter(|s| !s.is_empty()).collect();
        let Some(file) = segments.pop() else {
            continue;
        };

        let mut directory = &mut root;
        for segment in segments {
            directory = directory.directories.entry(segment.to_string()).or_default();
        }
        directory.files.insert(file.to_string());
    }

    into_nodes(root, "")
}

fn into_nodes(entry: DirectoryEntry, prefix: &str) -> Vec<TreeNode> {
    let join = |name: &str| {
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}/{name}")
        }
    };

    let mut nodes = Vec::with_capacity(entry.directories.len() + entry.files.len());
    for (name, child) in entry.directories {
        let path = join(&name);
        let children = into_nodes(child, &path);
        nodes.push(TreeNode::directory(name, path, children));
    }
    for name in entry.files {
        let path = join(&name);
        nodes.push(TreeNode::file(name, path));
    }
    nodes
}
