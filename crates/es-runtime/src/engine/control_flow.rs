use es_core::{Block, Condition};
use tracing::debug;

use super::eval::condition_holds;
use super::{CompletionKind, EasyScriptEngine};

impl EasyScriptEngine {
    pub(super) fn execute_loop(&mut self, count: u64, body: &Block) {
        if count == 0 || body.is_empty() {
            return;
        }
        debug!(count, statements = body.len(), "entering loop");
        self.push_frame(
            body.clone(),
            CompletionKind::LoopBody { remaining: count },
            None,
        );
    }

    /// Every conjunct is evaluated and all must hold.
    pub(super) fn execute_if(&mut self, conditions: &[Condition], body: &Block) {
        let matched = conditions
            .iter()
            .all(|condition| condition_holds(condition, &self.environment));
        debug!(matched, conjuncts = conditions.len(), "evaluated if");
        if matched && !body.is_empty() {
            self.push_frame(body.clone(), CompletionKind::IfBody, None);
        }
    }
}
