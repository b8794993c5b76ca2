use crate::config::Setting;
use crate::domain::{ReleaseMode, Version};
use crate::error::{ReleaseError, Result};
use crate::sequence::{ensure_success, Sequence, SequenceExecutionContext};
use crate::warning::ReleaseWarning;

/// Checks that the work area can be released, sets the release version, and runs the tests.
///
/// The version is written before the tests run, so the tests see the version
/// about to be released. A test failure does not revert that write, and
/// undo is a noop.
#[derive(Debug, Default)]
pub struct QualificationSequence {
    state_changed: bool,
}

impl QualificationSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// The version a release in `mode` ships when the work area holds `current`.
    ///
    /// Snapshot releases ship the current version as is.
    pub fn release_version(current: &Version, mode: &ReleaseMode) -> Result<Version> {
        match mode {
            ReleaseMode::Custom(custom) => Ok(custom.clone()),
            mode if mode.is_dot() => current.next_version(mode),
            _ => Ok(current.clone()),
        }
    }

    /// Refuse to release a version that is not newer than the installed one.
    ///
    /// Only a successful installed-version check with a parseable answer can
    /// fail the release; anything else is downgraded to a warning.
    fn check_installed_version(
        ctx: &mut SequenceExecutionContext<'_>,
        releasing: &Version,
    ) -> Result<()> {
        let Some(command) = ctx
            .runtime()
            .get(Setting::GetInstalledVersion)
            .map(str::to_string)
        else {
            ctx.runtime_mut()
                .report(&ReleaseWarning::InstalledVersionCheckMissing {
                    setting: Setting::GetInstalledVersion.label().to_string(),
                });
            return Ok(());
        };

        let base = ctx.project().base_directory().to_path_buf();
        let output = match ctx.runtime_mut().run(&command, Some(&base)) {
            Ok(output) => output,
            Err(e) => {
                ctx.runtime_mut()
                    .warn(&format!("Cannot check the installed version: {}", e));
                return Ok(());
            }
        };

        if !output.is_success() {
            ctx.runtime_mut()
                .report(&ReleaseWarning::InstalledVersionCheckFailed {
                    command,
                    exit_code: output.exit_code,
                });
            return Ok(());
        }

        let installed = match Version::parse(&output.stdout) {
            Ok(version) => version,
            Err(e) => {
                ctx.runtime_mut()
                    .report(&ReleaseWarning::UnparsableInstalledVersion {
                        output: output.stdout.clone(),
                        reason: e.to_string(),
                    });
                return Ok(());
            }
        };

        if installed >= *releasing {
            return Err(ReleaseError::user(format!(
                "Installed version {} is not older than release version {}",
                installed, releasing
            )));
        }

        ctx.runtime_mut().info(&format!(
            "Installed version {} is older than {}",
            installed, releasing
        ));
        Ok(())
    }
}

impl Sequence for QualificationSequence {
    fn name(&self) -> &str {
        "qualification"
    }

    fn execute(&mut self, ctx: &mut SequenceExecutionContext<'_>) -> Result<bool> {
        self.state_changed = false;

        let current = ctx.current_version()?;
        if !current.is_snapshot() {
            return Err(ReleaseError::user(format!(
                "A release must start from a snapshot version, but the project holds {}",
                current
            )));
        }

        let next = Self::release_version(&current, ctx.mode())?;
        if next != current {
            if next < current {
                return Err(ReleaseError::illegal_argument(format!(
                    "{} cannot be changed to preceding {}",
                    current, next
                )));
            }
            ctx.runtime_mut()
                .info(&format!("Changing version from {} to {}", current, next));
            ctx.write_version(&next)?;
            self.state_changed = true;
        }

        let releasing = ctx.current_version()?;
        Self::check_installed_version(ctx, &releasing)?;

        let command = ctx.runtime().command(Setting::ExecuteAllTests)?;
        let base = ctx.project().base_directory().to_path_buf();
        let output = ctx.runtime_mut().run(&command, Some(&base))?;
        ctx.set_tests_executed(true);
        ensure_success(&output, "tests failed")?;

        Ok(self.state_changed)
    }

    fn undo(&mut self, _ctx: &mut SequenceExecutionContext<'_>) -> Result<bool> {
        Ok(false)
    }

    fn did_execute_change_state(&self) -> bool {
        self.state_changed
    }
}
