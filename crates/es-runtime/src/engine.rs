use std::sync::Arc;

use es_core::{Block, ScriptProgram};

mod boundary;
mod bridge;
mod callstack;
mod control_flow;
mod eval;
mod frame_stack;
mod lifecycle;
mod scope;
mod step;

pub use bridge::{BridgeOptions, ExitOutcome, PythonScriptRunner, ScriptRunner, DEFAULT_PYTHON};
pub use eval::{condition_holds, evaluate_expression, resolve_let_value, resolve_value};
pub use lifecycle::{EasyScriptEngineOptions, DEFAULT_MAX_CALL_DEPTH, LETTER_TEXT};
pub use scope::Environment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompletionKind {
    Root,
    Call,
    LoopBody { remaining: u64 },
    IfBody,
}

#[derive(Debug, Clone)]
struct RuntimeFrame {
    block: Block,
    node_index: usize,
    completion: CompletionKind,
    /// Function name for call frames, used in diagnostics.
    label: Option<String>,
}

#[derive(Debug, Clone)]
struct PendingInput {
    target_var: String,
    prompt_text: String,
}

pub struct EasyScriptEngine {
    program: ScriptProgram,
    script_runner: Arc<dyn ScriptRunner>,
    bridge: BridgeOptions,
    max_call_depth: usize,

    environment: Environment,
    frames: Vec<RuntimeFrame>,
    pending_input: Option<PendingInput>,
    ended: bool,
    call_depth: usize,
    prompt_counter: u64,
}
