use crate::error::{ReleaseError, Result};
use crate::process::{CommandOutput, CommandRunner};
use std::path::Path;
use std::process::Command;

/// Runs commands through the platform shell
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        SystemRunner
    }

    #[cfg(unix)]
    fn shell(command: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }

    #[cfg(windows)]
    fn shell(command: &str) -> Command {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    }
}

impl CommandRunner for SystemRunner {
    /// Execute a command line and capture its output
    ///
    /// If the working directory does not exist, or the shell cannot be
    /// started, the failure is reported as a user error naming the command.
    fn run(&mut self, command: &str, working_dir: Option<&Path>) -> Result<CommandOutput> {
        let mut cmd = Self::shell(command);

        if let Some(dir) = working_dir {
            if !dir.is_dir() {
                return Err(ReleaseError::user(format!(
                    "Working directory for '{}' is not a directory: {}",
                    command,
                    dir.display()
                )));
            }
            cmd.current_dir(dir);
        }

        log::debug!("running '{}' in {:?}", command, working_dir);

        let output = cmd
            .output()
            .map_err(|e| ReleaseError::user(format!("Failed to execute '{}': {}", command, e)))?;

        let result = CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        log::debug!("'{}' exited with code {}", command, result.exit_code);

        Ok(result)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout() {
        let output = SystemRunner::new().run("echo 1.2.3", None).unwrap();
        assert!(output.is_success());
        assert_eq!(output.stdout.trim(), "1.2.3");
    }

    #[test]
    fn test_reports_exit_code() {
        let output = SystemRunner::new().run("echo oops >&2; exit 3", None).unwrap();
        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[test]
    fn test_runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = SystemRunner::new().run("pwd", Some(dir.path())).unwrap();
        let reported = std::fs::canonicalize(output.stdout.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn test_missing_working_directory_fails() {
        let result = SystemRunner::new().run("true", Some(Path::new("/nonexistent/dir")));
        assert!(result.unwrap_err().to_string().contains("not a directory"));
    }
}
