use es_core::Block;

use super::{CompletionKind, EasyScriptEngine, RuntimeFrame};

impl EasyScriptEngine {
    pub(super) fn push_frame(
        &mut self,
        block: Block,
        completion: CompletionKind,
        label: Option<String>,
    ) {
        if completion == CompletionKind::Call {
            self.call_depth += 1;
        }
        self.frames.push(RuntimeFrame {
            block,
            node_index: 0,
            completion,
            label,
        });
    }

    /// Called when the top frame has run its last statement. A loop body
    /// with iterations left rewinds instead of popping.
    pub(super) fn finish_top_frame(&mut self) {
        let Some(frame) = self.frames.last_mut() else {
            return;
        };

        if let CompletionKind::LoopBody { remaining } = frame.completion {
            if remaining > 1 {
                frame.completion = CompletionKind::LoopBody {
                    remaining: remaining - 1,
                };
                frame.node_index = 0;
                return;
            }
        }

        if frame.completion == CompletionKind::Call {
            self.call_depth = self.call_depth.saturating_sub(1);
        }
        self.frames.pop();
    }

    /// Innermost-first list of the functions currently executing.
    pub fn call_trace(&self) -> Vec<&str> {
        self.frames
            .iter()
            .rev()
            .filter(|frame| frame.completion == CompletionKind::Call)
            .filter_map(|frame| frame.label.as_deref())
            .collect()
    }
}
