//! The release pipeline
//!
//! A release is an ordered list of [Sequence] steps run by the
//! [SequenceController] against one shared [SequenceExecutionContext]:
//!
//! 1. [QualificationSequence] - check the work area, set the release version, run the tests
//! 2. [BuildSequence] - build, with tests unless they already ran
//! 3. [PublishSequence] - publish artifacts, commit, tag, and push source changes
//! 4. [InstallSequence] - install a binary distribution
//! 5. [CompletionSequence] - move the work area to the next snapshot
//!
//! Execution stops at the first failing step. Undo walks the steps in
//! reverse and keeps going when an individual undo fails.

pub mod build;
pub mod completion;
pub mod context;
pub mod controller;
pub mod history;
pub mod install;
pub mod publish;
pub mod qualification;

pub use build::BuildSequence;
pub use completion::CompletionSequence;
pub use context::{SequenceExecutionContext, SharedHistory};
pub use controller::{ControllerState, ReleaseOptions, SequenceController};
pub use history::{ExecutionHistory, Method, SequenceOperation};
pub use install::InstallSequence;
pub use publish::PublishSequence;
pub use qualification::QualificationSequence;

use crate::error::{ReleaseError, Result};

/// One step of the release pipeline
pub trait Sequence {
    /// Name recorded in the execution history
    fn name(&self) -> &str;

    /// Run the step, returning whether it changed persistent or external state
    fn execute(&mut self, ctx: &mut SequenceExecutionContext<'_>) -> Result<bool>;

    /// Revert the step, returning whether anything was changed back.
    ///
    /// A step that was never executed, or whose execution changed nothing,
    /// returns `Ok(false)`.
    fn undo(&mut self, ctx: &mut SequenceExecutionContext<'_>) -> Result<bool>;

    /// The value the last call to [Sequence::execute] returned
    fn did_execute_change_state(&self) -> bool;
}

/// Undo outcome for steps that have no compensating action
fn undo_unsupported(name: &str, state_changed: bool) -> Result<bool> {
    if state_changed {
        Err(ReleaseError::unsupported_undo(name))
    } else {
        Ok(false)
    }
}

/// Fail with a user error when a command did not exit successfully
fn ensure_success(output: &crate::process::CommandOutput, message: &str) -> Result<()> {
    if output.is_success() {
        Ok(())
    } else {
        log::debug!(
            "command failed with exit code {}: {}",
            output.exit_code,
            output.stderr.trim()
        );
        Err(ReleaseError::user(message))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Helpers shared by the sequence tests

    use super::*;
    use crate::config::Config;
    use crate::domain::ReleaseMode;
    use crate::process::{MockRunner, RecordedCall};
    use crate::project::Project;
    use crate::runtime::Runtime;
    use std::cell::RefCell;
    use std::rc::Rc;

    pub type Calls = Rc<RefCell<Vec<RecordedCall>>>;

    pub fn runtime(config: Config, runner: MockRunner) -> (Runtime, Calls) {
        let calls = runner.calls();
        (Runtime::new(config, Box::new(runner)), calls)
    }

    /// Run `sequence.execute` in a fresh context
    pub fn execute(
        sequence: &mut dyn Sequence,
        runtime: &mut Runtime,
        project: &mut dyn Project,
        mode: ReleaseMode,
        no_push: bool,
    ) -> Result<bool> {
        let mut ctx =
            SequenceExecutionContext::new(runtime, project, mode, no_push, SharedHistory::default())?;
        sequence.execute(&mut ctx)
    }

    pub fn commands(calls: &Calls) -> Vec<String> {
        calls.borrow().iter().map(|c| c.command.clone()).collect()
    }
}
