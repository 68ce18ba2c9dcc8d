//! Validated render options.

use std::{fmt, str::FromStr};

use serde::Serialize;

use depscope_core::DependencyClass;
use depscope_parser::error::{Diagnostic, ErrorCode};

use crate::{DepscopeError, config::RenderConfig};

/// Flow direction of a rendered flowchart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Direction {
    /// Top to bottom.
    TB,
    /// Top-down, an alias of `TB`.
    TD,
    /// Bottom to top.
    BT,
    /// Right to left.
    RL,
    /// Left to right.
    #[default]
    LR,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::TB,
        Direction::TD,
        Direction::BT,
        Direction::RL,
        Direction::LR,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::TB => "TB",
            Direction::TD => "TD",
            Direction::BT => "BT",
            Direction::RL => "RL",
            Direction::LR => "LR",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Diagnostic;

    /// Parses a direction, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Diagnostic::error(format!("invalid direction `{s}`"))
                    .with_code(ErrorCode::E100)
                    .with_help("use one of TB, TD, BT, RL, LR")
            })
    }
}

/// Display options for a rendered diagram.
///
/// Instances are either built directly, which cannot produce invalid
/// values, or converted from a [`RenderConfig`], which is validated.
///
/// # Examples
///
/// ```
/// # use depscope::{Direction, RenderOptions, config::RenderConfig};
/// let options = RenderOptions::default()
///     .with_direction(Direction::TB)
///     .with_show_builtin(true);
/// assert_eq!(options.direction(), Direction::TB);
///
/// let invalid = RenderConfig::default().with_max_depth(Some(-1));
/// assert!(RenderOptions::try_from(&invalid).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    direction: Direction,
    show_external: bool,
    show_builtin: bool,
    max_depth: Option<usize>,
    styled: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            show_external: true,
            show_builtin: false,
            max_depth: None,
            styled: true,
        }
    }
}

impl RenderOptions {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn show_external(&self) -> bool {
        self.show_external
    }

    pub fn show_builtin(&self) -> bool {
        self.show_builtin
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn styled(&self) -> bool {
        self.styled
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
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

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    /// Returns `true` if dependencies of `class` are drawn.
    pub(crate) fn shows(&self, class: DependencyClass) -> bool {
        match class {
            DependencyClass::Internal => true,
            DependencyClass::External => self.show_external,
            DependencyClass::Builtin => self.show_builtin,
        }
    }

    /// Returns `true` if nodes at `depth` are within the traversal bound.
    pub(crate) fn admits_depth(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}

impl TryFrom<&RenderConfig> for RenderOptions {
    type Error = DepscopeError;

    fn try_from(config: &RenderConfig) -> Result<Self, Self::Error> {
        let direction = config.direction().parse::<Direction>()?;

        let max_depth = config
            .max_depth()
            .map(|depth| {
                usize::try_from(depth).map_err(|_| {
                    Diagnostic::error(format!("max depth must not be negative, got {depth}"))
                        .with_code(ErrorCode::E101)
                        .with_help("omit the max depth to traverse the whole tree")
                })
            })
            .transpose()?;

        Ok(Self {
            direction,
            show_external: config.show_external(),
            show_builtin: config.show_builtin(),
            max_depth,
            styled: config.styled(),
        })
    }
}
