use std::path::PathBuf;

use clap::Parser;
use es_runtime::{DEFAULT_MAX_CALL_DEPTH, DEFAULT_PYTHON};

#[derive(Debug, Parser)]
#[command(name = "easyscript")]
#[command(about = "Run an EasyScript program")]
pub(crate) struct Cli {
    /// Path of the .easy script to run.
    pub(crate) script: PathBuf,
    /// Interpreter used by runpyfile(...).
    #[arg(long = "python", env = "EASYSCRIPT_PYTHON", default_value = DEFAULT_PYTHON)]
    pub(crate) python: String,
    #[arg(long = "max-call-depth", default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    pub(crate) max_call_depth: usize,
    /// Directory for the variable document shared with external scripts.
    #[arg(long = "state-dir")]
    pub(crate) state_dir: Option<PathBuf>,
}
