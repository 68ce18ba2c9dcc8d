//! Loading a repository snapshot from disk.
//!
//! The walk honors `.gitignore`, `.ignore` and hidden-file rules. Paths are
//! stored relative to the walked directory with `/` separators.

use std::{fs, io, path::Path};

use log::{debug, info};

use depscope::{DepscopeError, Language, Snapshot, build_tree};

/// Walks `root` and reads every file that will be analyzed.
///
/// Contents are only read for files with a recognized suffix, or for every
/// file when `include_unrecognized` is set. Files that are not valid UTF-8
/// are decoded lossily.
///
/// # Errors
///
/// Returns [`DepscopeError::Io`] when `root` is not a directory or the walk
/// fails.
pub fn load_snapshot(
    root: impl AsRef<Path>,
    include_unrecognized: bool,
) -> Result<Snapshot, DepscopeError> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("input directory not found: {}", root.display()),
        )
        .into());
    }

    let mut files = Vec::new();
    for entry in ignore::WalkBuilder::new(root).sort_by_file_name(|a, b| a.cmp(b)).build() {
        let entry = entry.map_err(io::Error::other)?;
        if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
            continue;
        }

        let relative = entry.path().strip_prefix(root).map_err(io::Error::other)?;
        let path = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let content = if include_unrecognized || Language::recognize(&path).is_some() {
            let bytes = fs::read(entry.path())?;
            String::from_utf8_lossy(&bytes).into_owned()
        } else {
            debug!(path = path.as_str(); "Skipping content of unrecognized file");
            String::new()
        };
        files.push((path, content));
    }

    info!(root = root.display().to_string(), files = files.len(); "Snapshot loaded");

    let tree = build_tree(files.iter().map(|(path, _)| path.as_str()));
    Ok(Snapshot::new(tree, files.into_iter().collect()))
}
