use crate::config::Setting;
use crate::error::Result;
use crate::sequence::{ensure_success, undo_unsupported, Sequence, SequenceExecutionContext};

/// Builds the project, running the tests unless qualification already did
#[derive(Debug, Default)]
pub struct BuildSequence {
    state_changed: bool,
}

impl BuildSequence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sequence for BuildSequence {
    fn name(&self) -> &str {
        "build"
    }

    fn execute(&mut self, ctx: &mut SequenceExecutionContext<'_>) -> Result<bool> {
        self.state_changed = false;

        let skip_tests = ctx.tests_executed() || ctx.runtime().config().behavior.no_tests;
        let setting = if skip_tests {
            Setting::BuildWithoutTests
        } else {
            Setting::BuildWithTests
        };

        let command = ctx.runtime().command(setting)?;
        let base = ctx.project().base_directory().to_path_buf();
        let output = ctx.runtime_mut().run(&command, Some(&base))?;
        ensure_success(&output, "build failed")?;

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
