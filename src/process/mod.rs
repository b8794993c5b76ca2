//! External command execution
//!
//! Every build, test, publication and source-repository action is an
//! operator-configured shell command. This module defines the
//! [CommandRunner] trait the pipeline depends on, with two implementations:
//!
//! - [system::SystemRunner]: runs commands through the platform shell
//! - [mock::MockRunner]: scripted responses for testing
//!
//! Commands run synchronously, exactly once, with no timeout.

pub mod mock;
pub mod system;

pub use mock::{MockRunner, RecordedCall};
pub use system::SystemRunner;

use crate::error::Result;
use std::path::Path;

/// Captured result of one external command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Process exit code (-1 when terminated by a signal)
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run with the given standard output
    pub fn success(stdout: impl Into<String>) -> Self {
        CommandOutput {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and standard error
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        CommandOutput {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Synchronous command execution
///
/// Implementations return `Err` only when the command cannot be started at
/// all; a command that runs and exits non-zero is reported through
/// [CommandOutput::exit_code].
pub trait CommandRunner {
    /// Run `command` and wait for it to exit
    ///
    /// # Arguments
    /// * `command` - Full command line, already rendered
    /// * `working_dir` - Directory to run in, or the current directory when `None`
    fn run(&mut self, command: &str, working_dir: Option<&Path>) -> Result<CommandOutput>;
}
