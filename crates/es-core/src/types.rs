use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use crate::value::EsValue;

/// Repeat count of a `loop [` header without an explicit count.
pub const DEFAULT_LOOP_COUNT: u64 = 100;

/// An immutable, cheaply shared statement sequence.
pub type Block = Rc<[Statement]>;

/// One `name = value` equality test of an `if` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    RunScript {
        path: String,
        line: usize,
    },
    Delay {
        seconds: String,
        line: usize,
    },
    Letter {
        line: usize,
    },
    Prompt {
        text: String,
        line: usize,
    },
    Let {
        name: String,
        value: String,
        line: usize,
    },
    Print {
        expr: String,
        line: usize,
    },
    Call {
        name: String,
        line: usize,
    },
    Loop {
        count: u64,
        body: Block,
        line: usize,
    },
    If {
        conditions: Vec<Condition>,
        body: Block,
        line: usize,
    },
    /// A line matching no statement shape; fails only when executed.
    Invalid {
        message: String,
        line: usize,
    },
}

impl Statement {
    pub fn line(&self) -> usize {
        match self {
            Self::RunScript { line, .. }
            | Self::Delay { line, .. }
            | Self::Letter { line }
            | Self::Prompt { line, .. }
            | Self::Let { line, .. }
            | Self::Print { line, .. }
            | Self::Call { line, .. }
            | Self::Loop { line, .. }
            | Self::If { line, .. }
            | Self::Invalid { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub body: Block,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptProgram {
    pub main: Block,
    pub functions: BTreeMap<String, FunctionDecl>,
}

impl ScriptProgram {
    pub fn function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions.get(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineOutput {
    Text {
        text: String,
    },
    Input {
        prompt_text: String,
        target_var: String,
    },
    Delay {
        duration: Duration,
    },
    Warning {
        message: String,
    },
    End,
}

/// Snapshot of the variable environment handed across the bridge.
pub type VariableMap = BTreeMap<String, EsValue>;
