use std::rc::Rc;
use std::time::Duration;

use es_core::{EasyScriptError, EngineOutput, Statement};

use super::eval::{evaluate_expression, resolve_let_value};
use super::lifecycle::LETTER_TEXT;
use super::EasyScriptEngine;

impl EasyScriptEngine {
    /// Runs statements until one produces output, a prompt needs input, or
    /// the program ends. Any error ends the run.
    pub fn next_output(&mut self) -> Result<EngineOutput, EasyScriptError> {
        if let Some(pending) = &self.pending_input {
            return Ok(EngineOutput::Input {
                prompt_text: pending.prompt_text.clone(),
                target_var: pending.target_var.clone(),
            });
        }

        if self.ended {
            return Ok(EngineOutput::End);
        }

        match self.run_until_output() {
            Ok(output) => Ok(output),
            Err(error) => {
                self.end_execution();
                Err(error)
            }
        }
    }

    fn run_until_output(&mut self) -> Result<EngineOutput, EasyScriptError> {
        loop {
            let Some(top_frame) = self.frames.last_mut() else {
                self.ended = true;
                return Ok(EngineOutput::End);
            };

            if top_frame.node_index >= top_frame.block.len() {
                self.finish_top_frame();
                continue;
            }

            let block = Rc::clone(&top_frame.block);
            let statement = &block[top_frame.node_index];
            top_frame.node_index += 1;

            let output = self
                .execute_statement(statement)
                .map_err(|error| error.at_line(statement.line()))?;
            if let Some(output) = output {
                return Ok(output);
            }
        }
    }

    fn execute_statement(
        &mut self,
        statement: &Statement,
    ) -> Result<Option<EngineOutput>, EasyScriptError> {
        match statement {
            Statement::RunScript { path, .. } => self.run_external_script(path),
            Statement::Delay { seconds, .. } => {
                let duration = parse_delay(seconds)?;
                Ok(Some(EngineOutput::Delay { duration }))
            }
            Statement::Letter { .. } => Ok(Some(EngineOutput::Text {
                text: LETTER_TEXT.to_string(),
            })),
            Statement::Prompt { text, .. } => Ok(Some(self.begin_prompt(text))),
            Statement::Let { name, value, .. } => {
                let value = resolve_let_value(value, &self.environment);
                self.environment.set(name.as_str(), value);
                Ok(None)
            }
            Statement::Print { expr, .. } => {
                let value = evaluate_expression(expr, &self.environment)?;
                Ok(Some(EngineOutput::Text {
                    text: value.to_string(),
                }))
            }
            Statement::Call { name, .. } => {
                self.execute_call(name)?;
                Ok(None)
            }
            Statement::Loop { count, body, .. } => {
                self.execute_loop(*count, body);
                Ok(None)
            }
            Statement::If {
                conditions, body, ..
            } => {
                self.execute_if(conditions, body);
                Ok(None)
            }
            Statement::Invalid { message, .. } => Err(EasyScriptError::syntax(message.as_str())),
        }
    }
}

fn parse_delay(raw: &str) -> Result<Duration, EasyScriptError> {
    let seconds = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
        .ok_or_else(|| {
            EasyScriptError::type_error(format!(
                "delay() expects a non-negative number of seconds, got '{}'",
                raw
            ))
        })?;
    Ok(Duration::from_secs_f64(seconds))
}

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn parse_delay_accepts_fractional_seconds() {
        assert_eq!(
            parse_delay("0.25").expect("delay"),
            Duration::from_millis(250)
        );
        assert_eq!(parse_delay(" 2 ").expect("delay"), Duration::from_secs(2));
    }

    #[test]
    fn parse_delay_rejects_non_numeric_input() {
        for raw in ["soon", "-1", "NaN", "inf", ""] {
            let error = parse_delay(raw).expect_err("delay should fail");
            assert_eq!(error.kind, es_core::ErrorKind::Type, "input {:?}", raw);
        }
    }
}
