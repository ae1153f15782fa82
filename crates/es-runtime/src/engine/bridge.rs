use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use es_core::{EasyScriptError, EngineOutput, ErrorKind, VariableMap};
use tracing::{debug, warn};

use super::EasyScriptEngine;

pub const DEFAULT_PYTHON: &str = "python3";

const STATE_FILE_STEM: &str = "easyscript_vars";

/// Exit status of an external script; `code` is `None` when the process
/// was terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    pub code: Option<i32>,
}

impl ExitOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an external script that reads and rewrites the variable document at
/// `state_path`. Implementations block until the script has finished.
pub trait ScriptRunner: Send + Sync {
    fn run(&self, script: &Path, state_path: &Path) -> Result<ExitOutcome, EasyScriptError>;
}

#[derive(Debug, Clone)]
pub struct PythonScriptRunner {
    pub interpreter: String,
}

impl Default for PythonScriptRunner {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_PYTHON.to_string(),
        }
    }
}

impl ScriptRunner for PythonScriptRunner {
    fn run(&self, script: &Path, state_path: &Path) -> Result<ExitOutcome, EasyScriptError> {
        let status = Command::new(&self.interpreter)
            .arg(script)
            .arg(state_path)
            .status()
            .map_err(|error| {
                EasyScriptError::external_process(format!(
                    "Failed to start '{} {}': {}",
                    self.interpreter,
                    script.display(),
                    error
                ))
            })?;
        Ok(ExitOutcome {
            code: status.code(),
        })
    }
}

/// Where the variable document is written for the external script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeOptions {
    pub state_dir: PathBuf,
    /// Distinguishes concurrent interpreter processes sharing `state_dir`.
    pub run_id: String,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            state_dir: std::env::temp_dir(),
            run_id: std::process::id().to_string(),
        }
    }
}

impl BridgeOptions {
    pub fn state_path(&self) -> PathBuf {
        self.state_dir
            .join(format!("{}-{}.json", STATE_FILE_STEM, self.run_id))
    }
}

fn map_state_io(path: &Path, error: std::io::Error) -> EasyScriptError {
    EasyScriptError::new(
        ErrorKind::Io,
        format!("Variable document {}: {}", path.display(), error),
    )
}

fn write_variables(path: &Path, variables: &VariableMap) -> Result<(), EasyScriptError> {
    let payload = serde_json::to_string_pretty(variables).map_err(|error| {
        EasyScriptError::serialization(format!("Failed to serialize variables: {}", error))
    })?;
    fs::write(path, payload).map_err(|error| map_state_io(path, error))
}

fn read_variables(path: &Path) -> Result<VariableMap, EasyScriptError> {
    let raw = fs::read_to_string(path).map_err(|error| map_state_io(path, error))?;
    serde_json::from_str::<VariableMap>(&raw).map_err(|error| {
        EasyScriptError::serialization(format!(
            "Malformed variable document {}: {}",
            path.display(),
            error
        ))
    })
}

impl EasyScriptEngine {
    /// Hands the environment to an external script and merges back what it
    /// wrote. A non-zero exit leaves the environment untouched and is
    /// reported as a warning rather than an error.
    pub(super) fn run_external_script(
        &mut self,
        path: &str,
    ) -> Result<Option<EngineOutput>, EasyScriptError> {
        let script = Path::new(path);
        if !script.exists() {
            return Err(EasyScriptError::external_process(format!(
                "Script not found: {}",
                path
            )));
        }

        let state_path = self.bridge.state_path();
        write_variables(&state_path, self.environment.as_map())?;
        debug!(script = path, state = %state_path.display(), "running external script");

        let outcome = self.script_runner.run(script, &state_path);
        let result = match outcome {
            Ok(outcome) => self.absorb_external_state(path, outcome, &state_path),
            Err(error) => Err(error),
        };

        if let Err(error) = fs::remove_file(&state_path) {
            debug!(state = %state_path.display(), %error, "could not remove variable document");
        }
        result
    }

    fn absorb_external_state(
        &mut self,
        path: &str,
        outcome: ExitOutcome,
        state_path: &Path,
    ) -> Result<Option<EngineOutput>, EasyScriptError> {
        if !outcome.success() {
            let status = outcome
                .code
                .map(|code| code.to_string())
                .unwrap_or_else(|| "signal".to_string());
            warn!(script = path, %status, "external script failed");
            return Ok(Some(EngineOutput::Warning {
                message: format!("External script '{}' exited with status {}", path, status),
            }));
        }

        let variables = read_variables(state_path).inspect_err(|error| {
            warn!(script = path, %error, "discarding external variable document");
        })?;
        debug!(script = path, count = variables.len(), "merging external variables");
        self.environment.merge(variables);
        Ok(None)
    }
}
