use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    UndefinedName,
    Type,
    ExternalProcess,
    Serialization,
    StackOverflow,
    Io,
    Engine,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::Syntax => "SYNTAX",
            Self::UndefinedName => "UNDEFINED_NAME",
            Self::Type => "TYPE",
            Self::ExternalProcess => "EXTERNAL_PROCESS",
            Self::Serialization => "SERIALIZATION",
            Self::StackOverflow => "STACK_OVERFLOW",
            Self::Io => "IO",
            Self::Engine => "ENGINE",
        }
    }
}

#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct EasyScriptError {
    pub kind: ErrorKind,
    pub message: String,
    /// 1-based source line of the statement that raised the error.
    pub line: Option<usize>,
}

impl EasyScriptError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
        }
    }

    pub fn with_line(kind: ErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line: Some(line),
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, message)
    }

    pub fn undefined_name(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedName, message)
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, message)
    }

    pub fn external_process(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalProcess, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Attaches `line` unless a more precise line was already recorded.
    pub fn at_line(mut self, line: usize) -> Self {
        if self.line.is_none() {
            self.line = Some(line);
        }
        self
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn display_renders_message_only() {
        let error = EasyScriptError::undefined_name("Function not defined: greet");
        assert_eq!(error.to_string(), "Function not defined: greet");
        assert_eq!(error.code(), "UNDEFINED_NAME");
    }

    #[test]
    fn at_line_keeps_innermost_line() {
        let error = EasyScriptError::with_line(ErrorKind::Type, "bad", 7).at_line(2);
        assert_eq!(error.line, Some(7));

        let error = EasyScriptError::syntax("bad").at_line(2);
        assert_eq!(error.line, Some(2));
    }
}
