use std::fmt::Display;

use es_core::{EasyScriptError, ErrorKind};

fn map_error(prefix: &str, error: impl Display) -> EasyScriptError {
    EasyScriptError::new(ErrorKind::Io, format!("{}: {}", prefix, error))
}

pub(crate) fn emit_error(error: EasyScriptError) -> i32 {
    println!("Error: {}", error);
    if let Some(line) = error.line {
        eprintln!("  [{}] at line {}", error.code(), line);
    }
    1
}

pub(crate) fn map_cli_source_read(error: std::io::Error) -> EasyScriptError {
    map_error("Failed to read script", error)
}

pub(crate) fn map_cli_input(error: std::io::Error) -> EasyScriptError {
    map_error("Failed to read input", error)
}

pub(crate) fn map_cli_output(error: std::io::Error) -> EasyScriptError {
    map_error("Failed to write output", error)
}

#[cfg(test)]
mod error_map_tests {
    use super::*;

    #[test]
    fn emit_error_returns_non_zero_exit_code() {
        let code = emit_error(EasyScriptError::syntax("failed"));
        assert_eq!(code, 1);
    }

    #[test]
    fn mapping_helpers_produce_io_errors() {
        let error = map_cli_source_read(std::io::Error::other("denied"));
        assert_eq!(error.kind, ErrorKind::Io);
        assert_eq!(error.message, "Failed to read script: denied");

        assert_eq!(
            map_cli_input(std::io::Error::other("closed")).message,
            "Failed to read input: closed"
        );
        assert_eq!(
            map_cli_output(std::io::Error::other("pipe")).message,
            "Failed to write output: pipe"
        );
    }
}
