//! Configuration sources of the CLI.
//!
//! A run reads at most one TOML file. The first existing source wins:
//!
//! 1. the `--config` path, which must exist
//! 2. `depscope/config.toml` under the working directory
//! 3. `config.toml` in the platform configuration directory
//!
//! Without any of them the defaults apply. Command-line flags are layered
//! on top by [`apply_overrides`].

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use depscope::{
    DepscopeError,
    config::{AnalysisConfig, AppConfig},
};

use crate::Args;

const LOCAL_CONFIG: &str = "depscope/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file `{}` does not exist", .0.display())]
    Missing(PathBuf),

    #[error("cannot read configuration file `{}`", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration in `{}`", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl From<ConfigError> for DepscopeError {
    fn from(err: ConfigError) -> Self {
        DepscopeError::Config(Box::new(err))
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    Explicit(PathBuf),
    Local(PathBuf),
    Platform(PathBuf),
}

impl ConfigSource {
    fn path(&self) -> &Path {
        match self {
            ConfigSource::Explicit(path)
            | ConfigSource::Local(path)
            | ConfigSource::Platform(path) => path,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            ConfigSource::Explicit(_) => "explicit",
            ConfigSource::Local(_) => "local",
            ConfigSource::Platform(_) => "platform",
        };
        write!(f, "{kind} {}", self.path().display())
    }
}

/// Picks the configuration file to read, if any.
fn locate(explicit_path: Option<&Path>) -> Option<ConfigSource> {
    if let Some(path) = explicit_path {
        return Some(ConfigSource::Explicit(path.to_path_buf()));
    }

    let local = PathBuf::from(LOCAL_CONFIG);
    if local.is_file() {
        return Some(ConfigSource::Local(local));
    }

    let Some(dirs) = ProjectDirs::from("com", "depscope", "depscope") else {
        debug!("No platform configuration directory");
        return None;
    };
    let platform = dirs.config_dir().join("config.toml");
    if platform.is_file() {
        return Some(ConfigSource::Platform(platform));
    }

    debug!(path:? = platform; "No configuration file found");
    None
}

/// Loads the configuration of a run.
///
/// # Errors
///
/// Returns [`DepscopeError::Config`] when the explicit path does not exist
/// or the chosen file cannot be read or parsed.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, DepscopeError> {
    let explicit_path = explicit_path.as_ref().map(|path| path.as_ref());
    let Some(source) = locate(explicit_path) else {
        return Ok(AppConfig::default());
    };

    info!(source:%; "Loading configuration");
    Ok(read_config(source.path())?)
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::Missing(path.to_path_buf()),
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Applies the command-line overrides of `args` to `config`.
///
/// Flags only ever override in one direction: `--hide-external` hides,
/// `--show-builtin` shows and `--plain` disables styling.
pub fn apply_overrides(config: AppConfig, args: &Args) -> AppConfig {
    let analysis = config.analysis();
    let analysis = AnalysisConfig::new(
        args.max_files.unwrap_or(analysis.max_files()),
        args.all_files || analysis.include_unrecognized(),
    );

    let mut render = config.render().clone();
    if let Some(direction) = &args.direction {
        render = render.with_direction(direction.clone());
    }
    if args.max_depth.is_some() {
        render = render.with_max_depth(args.max_depth);
    }
    if args.hide_external {
        render = render.with_show_external(false);
    }
    if args.show_builtin {
        render = render.with_show_builtin(true);
    }
    if args.plain {
        render = render.with_styled(false);
    }

    AppConfig::new(analysis, render)
}
