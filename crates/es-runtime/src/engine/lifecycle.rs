use std::sync::Arc;

use es_core::{EsValue, ScriptProgram};

use super::bridge::{BridgeOptions, PythonScriptRunner, ScriptRunner};
use super::scope::Environment;
use super::{CompletionKind, EasyScriptEngine};

pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

pub const LETTER_TEXT: &str = "Dear reader,\n\
\n\
If you are reading this, you went looking in places most people skip.\n\
Every block you open here is closed again, every loop runs out,\n\
and every variable finds its way home.\n\
\n\
Keep writing small scripts.\n\
\n\
- Silsyn";

#[derive(Clone)]
pub struct EasyScriptEngineOptions {
    pub program: ScriptProgram,
    pub max_call_depth: Option<usize>,
    pub bridge: Option<BridgeOptions>,
    pub script_runner: Option<Arc<dyn ScriptRunner>>,
}

impl EasyScriptEngineOptions {
    pub fn new(program: ScriptProgram) -> Self {
        Self {
            program,
            max_call_depth: None,
            bridge: None,
            script_runner: None,
        }
    }
}

impl EasyScriptEngine {
    pub fn new(options: EasyScriptEngineOptions) -> Self {
        let script_runner: Arc<dyn ScriptRunner> = options
            .script_runner
            .unwrap_or_else(|| Arc::new(PythonScriptRunner::default()));

        let main = options.program.main.clone();
        let mut engine = Self {
            program: options.program,
            script_runner,
            bridge: options.bridge.unwrap_or_default(),
            max_call_depth: options.max_call_depth.unwrap_or(DEFAULT_MAX_CALL_DEPTH),
            environment: Environment::new(),
            frames: Vec::new(),
            pending_input: None,
            ended: false,
            call_depth: 0,
            prompt_counter: 0,
        };
        engine.push_frame(main, CompletionKind::Root, None);
        engine
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn variable(&self, name: &str) -> Option<&EsValue> {
        self.environment.get(name)
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: EsValue) {
        self.environment.set(name, value);
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    pub(super) fn end_execution(&mut self) {
        self.ended = true;
        self.frames.clear();
        self.pending_input = None;
        self.call_depth = 0;
    }
}
