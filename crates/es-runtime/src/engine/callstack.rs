use es_core::{EasyScriptError, ErrorKind};
use tracing::debug;

use super::{CompletionKind, EasyScriptEngine};

impl EasyScriptEngine {
    pub(super) fn execute_call(&mut self, name: &str) -> Result<(), EasyScriptError> {
        let Some(function) = self.program.function(name) else {
            return Err(EasyScriptError::undefined_name(format!(
                "Function not defined: {}",
                name
            )));
        };

        if self.call_depth >= self.max_call_depth {
            return Err(EasyScriptError::new(
                ErrorKind::StackOverflow,
                format!(
                    "Stack overflow: maximum call depth {} exceeded in '{}'",
                    self.max_call_depth, name
                ),
            ));
        }

        let body = function.body.clone();
        debug!(function = name, depth = self.call_depth + 1, "calling function");
        self.push_frame(body, CompletionKind::Call, Some(name.to_string()));
        Ok(())
    }
}
