use crate::error::Result;
use crate::process::{CommandOutput, CommandRunner};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A command the mock was asked to run
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub command: String,
    pub working_dir: Option<PathBuf>,
}

/// Mock runner for testing without spawning processes
///
/// Responses are matched by command prefix, first registered match wins;
/// unmatched commands succeed with empty output. Every call is appended to a
/// log that stays readable after the runner is moved into a runtime.
pub struct MockRunner {
    responses: Vec<(String, CommandOutput)>,
    calls: Rc<RefCell<Vec<RecordedCall>>>,
}

impl MockRunner {
    /// Create a mock runner where every command succeeds
    pub fn new() -> Self {
        MockRunner {
            responses: Vec::new(),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Answer commands starting with `prefix` with `output`
    pub fn respond(mut self, prefix: impl Into<String>, output: CommandOutput) -> Self {
        self.responses.push((prefix.into(), output));
        self
    }

    /// Shared handle on the call log
    pub fn calls(&self) -> Rc<RefCell<Vec<RecordedCall>>> {
        Rc::clone(&self.calls)
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn run(&mut self, command: &str, working_dir: Option<&Path>) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(RecordedCall {
            command: command.to_string(),
            working_dir: working_dir.map(Path::to_path_buf),
        });

        let output = self
            .responses
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_default();
        Ok(output)
    }
}
