mod engine;

pub use engine::{
    condition_holds, evaluate_expression, resolve_let_value, resolve_value, BridgeOptions,
    EasyScriptEngine, EasyScriptEngineOptions, Environment, ExitOutcome, PythonScriptRunner,
    ScriptRunner, DEFAULT_MAX_CALL_DEPTH, DEFAULT_PYTHON, LETTER_TEXT,
};
