use std::io::{BufRead, Write};

use es_core::{EasyScriptError, EngineOutput};
use es_runtime::EasyScriptEngine;

use crate::{map_cli_input, map_cli_output};

/// Terminal endpoints the engine's outputs are rendered to.
pub(crate) struct Session<R, W, E> {
    pub(crate) input: R,
    pub(crate) output: W,
    pub(crate) diagnostics: E,
    pub(crate) honor_delays: bool,
}

pub(crate) fn run_session<R, W, E>(
    engine: &mut EasyScriptEngine,
    session: &mut Session<R, W, E>,
) -> Result<(), EasyScriptError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    loop {
        match engine.next_output()? {
            EngineOutput::Text { text } => {
                writeln!(session.output, "{}", text).map_err(map_cli_output)?;
            }
            EngineOutput::Input { prompt_text, .. } => {
                writeln!(session.output, "{}", prompt_text).map_err(map_cli_output)?;
                session.output.flush().map_err(map_cli_output)?;
                let mut line = String::new();
                session.input.read_line(&mut line).map_err(map_cli_input)?;
                engine.submit_input(&line)?;
            }
            EngineOutput::Delay { duration } => {
                session.output.flush().map_err(map_cli_output)?;
                if session.honor_delays {
                    std::thread::sleep(duration);
                }
            }
            EngineOutput::Warning { message } => {
                session.output.flush().map_err(map_cli_output)?;
                writeln!(session.diagnostics, "Warning: {}", message).map_err(map_cli_output)?;
            }
            EngineOutput::End => {
                session.output.flush().map_err(map_cli_output)?;
                return Ok(());
            }
        }
    }
}
