use es_core::{EasyScriptError, EngineOutput, ErrorKind, EsValue};

use super::{EasyScriptEngine, PendingInput};

impl EasyScriptEngine {
    /// The counter advances even if the input never arrives.
    pub(super) fn begin_prompt(&mut self, text: &str) -> EngineOutput {
        self.prompt_counter += 1;
        let pending = PendingInput {
            target_var: format!("input{}", self.prompt_counter),
            prompt_text: text.to_string(),
        };
        let output = EngineOutput::Input {
            prompt_text: pending.prompt_text.clone(),
            target_var: pending.target_var.clone(),
        };
        self.pending_input = Some(pending);
        output
    }

    pub fn submit_input(&mut self, text: &str) -> Result<(), EasyScriptError> {
        let Some(pending) = self.pending_input.take() else {
            return Err(EasyScriptError::new(
                ErrorKind::Engine,
                "No pending input is available.",
            ));
        };

        let value = text.strip_suffix('\n').unwrap_or(text);
        let value = value.strip_suffix('\r').unwrap_or(value);
        self.environment
            .set(pending.target_var, EsValue::String(value.to_string()));
        Ok(())
    }
}
