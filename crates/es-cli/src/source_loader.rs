use std::fs;
use std::path::Path;

use es_core::{EasyScriptError, ErrorKind, ScriptProgram};
use es_parser::parse_program;
use tracing::debug;

use crate::map_cli_source_read;

pub(crate) fn load_program(path: &Path) -> Result<ScriptProgram, EasyScriptError> {
    if !path.is_file() {
        return Err(EasyScriptError::new(
            ErrorKind::Io,
            format!("File '{}' not found.", path.display()),
        ));
    }

    let source = fs::read_to_string(path).map_err(map_cli_source_read)?;
    let program = parse_program(&source)?;
    debug!(
        script = %path.display(),
        statements = program.main.len(),
        functions = program.functions.len(),
        "loaded script"
    );
    Ok(program)
}
