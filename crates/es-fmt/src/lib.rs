//! Text reformatters for `.easy` scripts. Neither changes what a script does.

mod indent;
mod reflow;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use indent::indent_functions;
pub use reflow::{reflow, DEFAULT_WIDTH};

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("File '{path}' not found for formatting.")]
    NotFound { path: PathBuf },
    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn rewrite_in_place(
    path: &Path,
    transform: impl FnOnce(&str) -> String,
) -> Result<(), FormatError> {
    if !path.is_file() {
        return Err(FormatError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let source = fs::read_to_string(path).map_err(|source| FormatError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, transform(&source)).map_err(|source| FormatError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Rewrites `path` so that no line is longer than `width` characters.
pub fn reflow_file(path: &Path, width: usize) -> Result<(), FormatError> {
    rewrite_in_place(path, |source| reflow(source, width))
}

/// Re-indents the `function NAME [ ... ]` blocks of `path`.
pub fn indent_file(path: &Path) -> Result<(), FormatError> {
    rewrite_in_place(path, indent_functions)
}
