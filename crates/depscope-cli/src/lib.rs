//! CLI logic for the depscope dependency graph tool.
//!
//! This module walks an input directory, runs the analysis pipeline and
//! writes the rendered graph to the output file.

pub mod error_adapter;

mod args;
mod config;
mod snapshot;

pub use args::{Args, OutputFormat};
pub use snapshot::load_snapshot;

use std::fs;

use log::{info, warn};
use serde::Serialize;

use depscope::{
    Analysis, Analyzer, DependencySummary, DepscopeError, DiagramStats, FlatGraph, Snapshot,
    TreeNode,
};

use error_adapter::warning_reportables;

/// The JSON document written by `--format json`.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    tree: &'a [TreeNode],
    graph: FlatGraph,
    summary: DependencySummary,
}

/// Run the depscope CLI application
///
/// This function processes the input directory through the depscope
/// pipeline and writes the resulting graph to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `DepscopeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid render options
/// - JSON serialization errors
pub fn run(args: &Args) -> Result<(), DepscopeError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing directory"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;
    let app_config = config::apply_overrides(app_config, args);

    let snapshot = load_snapshot(&args.input, app_config.analysis().include_unrecognized())?;

    let analyzer = Analyzer::new(app_config);
    let analysis = analyzer.analyze(&snapshot);
    report_warnings(&analysis, &snapshot, args.show_warnings);

    let output = match args.format {
        OutputFormat::Mermaid => {
            let diagram = match &args.focus {
                Some(path) => {
                    if !analysis.files().iter().any(|file| file.path() == path.as_str()) {
                        warn!(path = path.as_str(); "Focused file was not analyzed");
                    }
                    analyzer.render_file(&analysis, path)?
                }
                None => analyzer.render(&analysis)?,
            };
            info!(stats:% = DiagramStats::from_diagram(&diagram); "Diagram rendered");
            diagram
        }
        OutputFormat::Json => {
            let report = JsonReport {
                tree: analysis.tree(),
                graph: analysis.flat_graph(),
                summary: analysis.summary(),
            };
            serde_json::to_string_pretty(&report)
                .map_err(|err| DepscopeError::Export(Box::new(err)))?
        }
    };

    // Write output file
    fs::write(&args.output, output)?;

    info!(output_file = args.output; "Graph exported successfully");

    Ok(())
}

/// Logs the unresolved references of `analysis`.
///
/// With `detailed` set every warning is rendered with a source snippet,
/// otherwise only their count is logged.
fn report_warnings(analysis: &Analysis, snapshot: &Snapshot, detailed: bool) {
    let diagnostics = analysis.diagnostics();
    if diagnostics.is_empty() {
        return;
    }

    if !detailed {
        warn!(
            count = diagnostics.len();
            "Unresolved internal references were left out of the graph, use --show-warnings to list them"
        );
        return;
    }

    let reporter = miette::GraphicalReportHandler::new();
    for reportable in warning_reportables(diagnostics, snapshot) {
        let mut writer = String::new();
        if reporter.render_report(&mut writer, &reportable).is_ok() {
            warn!("{writer}");
        }
    }
}
