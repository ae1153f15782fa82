use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use es_core::EasyScriptError;
use es_runtime::{BridgeOptions, EasyScriptEngine, EasyScriptEngineOptions, PythonScriptRunner};

mod boundary_runner;
mod cli_args;
mod error_map;
mod logging;
mod source_loader;

pub(crate) use boundary_runner::{run_session, Session};
pub(crate) use cli_args::Cli;
pub(crate) use error_map::{emit_error, map_cli_input, map_cli_output, map_cli_source_read};
pub(crate) use logging::init_tracing;
pub(crate) use source_loader::load_program;

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    init_tracing();
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, EasyScriptError> {
    let program = load_program(&cli.script)?;
    let mut bridge = BridgeOptions::default();
    if let Some(state_dir) = cli.state_dir {
        bridge.state_dir = state_dir;
    }

    let mut engine = EasyScriptEngine::new(EasyScriptEngineOptions {
        program,
        max_call_depth: Some(cli.max_call_depth),
        bridge: Some(bridge),
        script_runner: Some(Arc::new(PythonScriptRunner {
            interpreter: cli.python,
        })),
    });

    let mut session = Session {
        input: io::stdin().lock(),
        output: io::stdout().lock(),
        diagnostics: io::stderr(),
        honor_delays: true,
    };
    run_session(&mut engine, &mut session)?;
    Ok(0)
}
