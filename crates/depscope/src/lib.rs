//! depscope - Classified dependency graphs for source trees.
//!
//! Extraction, classification, resolution and rendering of the dependencies
//! between the files of a repository snapshot. JavaScript/TypeScript,
//! Python, C/C++, Java and Go sources are supported through lexical rules;
//! graphs are rendered as Mermaid flowcharts.

pub mod config;

mod annotate;
mod error;
mod export;
mod options;
mod structure;
mod summary;

pub use depscope_core::{
    DependencyClass, Language, ParsedFile, ResolvedDependency, ResolvedFile, Span, TreeNode,
};
pub use depscope_parser::{error::Diagnostic, parse};

pub use annotate::{annotate_tree, build_tree};
pub use error::DepscopeError;
pub use export::{
    DiagramInput,
    flat::{FlatGraph, FlatNode, FlatNodeKind, export_flat_graph},
    mermaid::{DiagramStats, render_diagram, render_file_diagram},
};
pub use options::{Direction, RenderOptions};
pub use summary::{ClassCounts, DependencySummary, DependencyUsage};

use indexmap::IndexMap;
use log::{debug, info, trace, warn};

use depscope_core::file_nodes;
use depscope_parser::{KnownPaths, resolve_file};

use config::AppConfig;

/// A point-in-time view of a repository: its tree and file contents.
///
/// Contents are keyed by file path. Files of the tree without content are
/// treated as empty.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    tree: Vec<TreeNode>,
    contents: IndexMap<String, String>,
}

impl Snapshot {
    pub fn new(tree: Vec<TreeNode>, contents: IndexMap<String, String>) -> Self {
        Self { tree, contents }
    }

    /// Builds a snapshot from `(path, content)` pairs, deriving the tree with
    /// [`build_tree`].
    pub fn from_files<I, P, C>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        let contents: IndexMap<String, String> = files
            .into_iter()
            .map(|(path, content)| (path.into(), content.into()))
            .collect();
        let tree = build_tree(contents.keys());
        Self { tree, contents }
    }

    pub fn tree(&self) -> &[TreeNode] {
        &self.tree
    }

    pub fn content(&self, path: &str) -> Option<&str> {
        self.contents.get(path).map(String::as_str)
    }
}

/// The result of analyzing a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct Analysis {
    tree: Vec<TreeNode>,
    files: Vec<ResolvedFile>,
    diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    /// The snapshot tree with every file node annotated.
    pub fn tree(&self) -> &[TreeNode] {
        &self.tree
    }

    /// The analyzed files, in tree order.
    pub fn files(&self) -> &[ResolvedFile] {
        &self.files
    }

    /// Warnings raised for internal references that could not be resolved.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn summary(&self) -> DependencySummary {
        DependencySummary::from_files(&self.files)
    }

    pub fn flat_graph(&self) -> FlatGraph {
        export_flat_graph(&self.files)
    }

    /// The analyzed files as a path to dependencies map.
    pub fn dependency_map(&self) -> IndexMap<String, Vec<ResolvedDependency>> {
        self.files
            .iter()
            .map(|file| (file.path().to_string(), file.dependencies().to_vec()))
            .collect()
    }
}

/// Runs the extraction pipeline and renders its results.
///
/// # Examples
///
/// ```
/// use depscope::{Analyzer, Snapshot, config::AppConfig};
///
/// let snapshot = Snapshot::from_files([
///     ("src/a.js", "import { b } from './b';\nimport React from 'react';"),
///     ("src/b.js", "export const b = 1;"),
/// ]);
///
/// let analyzer = Analyzer::new(AppConfig::default());
/// let analysis = analyzer.analyze(&snapshot);
/// let diagram = analyzer.render(&analysis).expect("Failed to render");
///
/// assert!(diagram.contains(r#"node0["a.js"] --> node1["b.js"]"#));
/// ```
#[derive(Debug, Default)]
pub struct Analyzer {
    config: AppConfig,
}

impl Analyzer {
    /// Create a new analyzer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parses, resolves and annotates the files of `snapshot`.
    ///
    /// Files are taken in tree order. Only files with a recognized suffix are
    /// parsed unless unrecognized files are enabled in the configuration, and
    /// at most `max_files` files are parsed. Every file of the tree counts
    /// as a resolution target.
    pub fn analyze(&self, snapshot: &Snapshot) -> Analysis {
        let analysis_config = self.config.analysis();
        let all_files = file_nodes(snapshot.tree());
        let known: KnownPaths = all_files.iter().map(|node| node.path()).collect();

        let selected: Vec<&TreeNode> = all_files
            .iter()
            .copied()
            .filter(|node| {
                analysis_config.include_unrecognized()
                    || Language::recognize(node.path()).is_some()
            })
            .collect();

        if selected.len() > analysis_config.max_files() {
            warn!(
                selected = selected.len(),
                max_files = analysis_config.max_files();
                "File limit reached, skipping remaining files"
            );
        }

        info!(files = selected.len().min(analysis_config.max_files()); "Analyzing snapshot");

        let mut files = Vec::new();
        let mut diagnostics = Vec::new();
        for node in selected.into_iter().take(analysis_config.max_files()) {
            let content = snapshot.content(node.path()).unwrap_or_default();
            let parsed = parse(content, node.path());
            trace!(path = node.path(), dependencies = parsed.dependencies().len(); "Parsed file");

            let (resolved, warnings) = resolve_file(&parsed, &known);
            diagnostics.extend(warnings);
            files.push(resolved);
        }

        let tree = annotate_tree(&files, snapshot.tree());
        debug!(
            files = files.len(),
            unresolved = diagnostics.len();
            "Snapshot analyzed"
        );

        Analysis {
            tree,
            files,
            diagnostics,
        }
    }

    /// Renders the decorated tree of `analysis` with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`DepscopeError::Options`] when the render configuration holds
    /// an invalid direction or a negative max depth.
    pub fn render(&self, analysis: &Analysis) -> Result<String, DepscopeError> {
        let options = self.render_options()?;
        Ok(render_diagram(DiagramInput::Tree(analysis.tree()), &options))
    }

    /// Renders the focused diagram of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DepscopeError::Options`] when the render configuration is
    /// invalid.
    pub fn render_file(&self, analysis: &Analysis, path: &str) -> Result<String, DepscopeError> {
        let options = self.render_options()?;
        Ok(render_file_diagram(
            DiagramInput::Tree(analysis.tree()),
            path,
            options.direction(),
        ))
    }

    /// Validates the configured render options.
    pub fn render_options(&self) -> Result<RenderOptions, DepscopeError> {
        RenderOptions::try_from(self.config.render())
    }
}
