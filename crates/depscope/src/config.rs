//! Configuration types for depscope analysis and rendering.
//!
//! This module provides configuration structures that control which files
//! are analyzed and how the resulting graph is rendered. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining analysis and render settings.
//! - [`AnalysisConfig`] - Controls which files of a snapshot are analyzed.
//! - [`RenderConfig`] - Raw, unvalidated render options.
//!
//! # Example
//!
//! ```
//! # use depscope::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.analysis().max_files(), 1000);
//! assert_eq!(config.render().direction(), "LR");
//! ```

use serde::Deserialize;

/// Top-level application configuration combining analysis and render settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Analysis configuration section.
    #[serde(default)]
    analysis: AnalysisConfig,

    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    ///
    /// # Arguments
    ///
    /// * `analysis` - File selection settings.
    /// * `render` - Diagram rendering settings.
    pub fn new(analysis: AnalysisConfig, render: RenderConfig) -> Self {
        Self { analysis, render }
    }

    /// Returns the analysis configuration.
    pub fn analysis(&self) -> &AnalysisConfig {
        &self.analysis
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }
}

/// File selection settings for an analysis run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum number of files parsed per run, in tree order.
    max_files: usize,

    /// Parse files with unrecognized suffixes using the default profile.
    include_unrecognized: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_files: 1000,
            include_unrecognized: false,
        }
    }
}

impl AnalysisConfig {
    pub fn new(max_files: usize, include_unrecognized: bool) -> Self {
        Self {
            max_files,
            include_unrecognized,
        }
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub fn include_unrecognized(&self) -> bool {
        self.include_unrecognized
    }
}

/// Render settings as written by the user.
///
/// Values are not validated here; convert into
/// [`RenderOptions`](crate::RenderOptions) to check them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    direction: String,
    show_external: bool,
    show_builtin: bool,
    max_depth: Option<i64>,
    styled: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            direction: "LR".to_string(),
            show_external: true,
            show_builtin: false,
            max_depth: None,
            styled: true,
        }
    }
}

impl RenderConfig {
    pub fn direction(&self) -> &str {
        &self.direction
    }

    pub fn show_external(&self) -> bool {
        self.show_external
    }

    pub fn show_builtin(&self) -> bool {
        self.show_builtin
    }

    pub fn max_depth(&self) -> Option<i64> {
        self.max_depth
    }

    pub fn styled(&self) -> bool {
        self.styled
    }

    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = direction.into();
        self
    }

    pub fn with_show_external(mut self, show_external: bool) -> Self {
        self.show_external = show_external;
        self
    }

    pub fn with_show_builtin(mut self, show_builtin: bool) -> Self {
        self.show_builtin = show_builtin;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<i64>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }
}
