use std::fmt;

/// Non-fatal conditions met while running the pipeline.
/// These are reported to the operator and the run continues.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseWarning {
    /// No command is configured to report the installed version
    InstalledVersionCheckMissing { setting: String },
    /// The installed-version command ran but did not succeed
    InstalledVersionCheckFailed { command: String, exit_code: i32 },
    /// The installed-version command printed something that is not a version
    UnparsableInstalledVersion { output: String, reason: String },
    /// The commit command failed, usually because there was nothing to commit
    CommitFailed { command: String, stderr: String },
    /// A library artifact needs no installation
    LibraryAlreadyPublished { artifact: String },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::InstalledVersionCheckMissing { setting } => {
                write!(
                    f,
                    "Cannot check the installed version: '{}' is not configured",
                    setting
                )
            }
            ReleaseWarning::InstalledVersionCheckFailed { command, exit_code } => {
                write!(
                    f,
                    "Cannot check the installed version: '{}' exited with code {}",
                    command, exit_code
                )
            }
            ReleaseWarning::UnparsableInstalledVersion { output, reason } => {
                let first_line = output.lines().next().unwrap_or("");
                write!(
                    f,
                    "Cannot parse installed version '{}': {}",
                    first_line, reason
                )
            }
            ReleaseWarning::CommitFailed { command, stderr } => {
                write!(f, "Commit '{}' did not succeed", command)?;
                if !stderr.trim().is_empty() {
                    write!(f, ": {}", stderr.trim())?;
                }
                Ok(())
            }
            ReleaseWarning::LibraryAlreadyPublished { artifact } => {
                write!(
                    f,
                    "Skipping library '{}', it was delivered by publishing",
                    artifact
                )
            }
        }
    }
}
