use crate::domain::ReleaseMode;
use crate::error::{ReleaseError, Result};
use crate::sequence::{undo_unsupported, Sequence, SequenceExecutionContext};

/// Moves the work area to the next snapshot once a release is out
#[derive(Debug, Default)]
pub struct CompletionSequence {
    state_changed: bool,
}

impl CompletionSequence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sequence for CompletionSequence {
    fn name(&self) -> &str {
        "completion"
    }

    fn execute(&mut self, ctx: &mut SequenceExecutionContext<'_>) -> Result<bool> {
        self.state_changed = false;

        let current = ctx.current_version()?;
        let mode = ctx.mode();
        if mode.is_snapshot() && !current.is_snapshot() {
            return Err(ReleaseError::illegal_state(format!(
                "{} release finished with dot version {}",
                mode.label(),
                current
            )));
        }
        if mode.is_dot() && !current.is_dot() {
            return Err(ReleaseError::illegal_state(format!(
                "{} release finished with snapshot version {}",
                mode.label(),
                current
            )));
        }

        let next = current.next_version(&ReleaseMode::Snapshot)?;
        ctx.runtime_mut()
            .info(&format!("Moving work area from {} to {}", current, next));
        ctx.write_version(&next)?;

        self.state_changed = true;
        Ok(true)
    }

    fn undo(&mut self, _ctx: &mut SequenceExecutionContext<'_>) -> Result<bool> {
        undo_unsupported(self.name(), self.state_changed)
    }

    fn did_execute_change_state(&self) -> bool {
        self.state_changed
    }
}
