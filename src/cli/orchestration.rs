//! Main release workflow orchestration
//!
//! Turns parsed command-line options into a pipeline run. Kept apart from
//! `main.rs` so the workflow can be driven programmatically, and in tests
//! with a scripted command runner, without depending on clap.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::Config;
use crate::domain::{ReleaseMode, Version};
use crate::process::{CommandRunner, SystemRunner};
use crate::project::{DescriptorProject, Project};
use crate::runtime::Runtime;
use crate::sequence::{ExecutionHistory, ReleaseOptions, SequenceController};
use crate::ui;

/// Arguments for the release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Project descriptor, or the directory holding `project.toml`
    pub project: PathBuf,

    pub mode: ReleaseMode,

    /// Never push to remote repositories
    pub no_push: bool,

    /// Build without running the tests
    pub no_tests: bool,

    /// Leave the install step out
    pub no_install: bool,
}

impl ReleaseWorkflowArgs {
    pub fn new(project: impl Into<PathBuf>, mode: ReleaseMode) -> Self {
        ReleaseWorkflowArgs {
            project: project.into(),
            mode,
            no_push: false,
            no_tests: false,
            no_install: false,
        }
    }
}

/// Result of a finished release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub mode: ReleaseMode,

    /// Version the work area held before the run
    pub initial_version: Version,

    /// Version the work area holds after the run
    pub final_version: Version,

    /// Every sequence call made; empty for an info run
    pub history: ExecutionHistory,
}

/// Resolve the release mode from the `--mode` and `--custom` options.
///
/// A custom version on its own implies a custom release; no options at all
/// means an info run.
pub fn parse_mode(mode: Option<&str>, custom: Option<&str>) -> crate::Result<ReleaseMode> {
    match (mode, custom) {
        (None, None) => Ok(ReleaseMode::Info),
        (None, Some(literal)) => ReleaseMode::custom(literal),
        (Some(label), custom) => ReleaseMode::from_label(label, custom),
    }
}

/// The next version each incrementing release mode would produce from `current`
pub fn version_candidates(current: &Version) -> Vec<(String, std::result::Result<Version, String>)> {
    [
        ReleaseMode::Major,
        ReleaseMode::Minor,
        ReleaseMode::Patch,
        ReleaseMode::Snapshot,
    ]
    .iter()
    .map(|mode| {
        let next = current.next_version(mode).map_err(|e| e.to_string());
        (mode.label().to_string(), next)
    })
    .collect()
}

/// Pipeline options after merging command-line flags with configured behavior
pub fn release_options(args: &ReleaseWorkflowArgs, config: &Config) -> ReleaseOptions {
    ReleaseOptions {
        mode: args.mode.clone(),
        no_push: args.no_push || config.behavior.no_push,
        no_install: args.no_install || config.behavior.no_install,
    }
}

/// Main release workflow, running commands through the platform shell
pub fn run_release_workflow(args: ReleaseWorkflowArgs, config: Config) -> Result<WorkflowResult> {
    run_release_workflow_with(args, config, Box::new(SystemRunner::new()))
}

/// Main release workflow with an explicit command runner
///
/// Orchestrates the release:
/// 1. Open the project descriptor
/// 2. For an info run, show the candidate versions and stop
/// 3. Execute the pipeline
/// 4. On failure, undo the pipeline and return the original error
pub fn run_release_workflow_with(
    args: ReleaseWorkflowArgs,
    mut config: Config,
    runner: Box<dyn CommandRunner>,
) -> Result<WorkflowResult> {
    let mut project = DescriptorProject::open(&args.project)?;
    let initial_version = project.version()?;

    if args.mode == ReleaseMode::Info {
        ui::display_version_info(&initial_version, &version_candidates(&initial_version));
        return Ok(WorkflowResult {
            mode: args.mode,
            final_version: initial_version.clone(),
            initial_version,
            history: ExecutionHistory::new(),
        });
    }

    let options = release_options(&args, &config);
    config.behavior.no_tests |= args.no_tests;
    let mut runtime = Runtime::new(config, runner);
    let mut controller = SequenceController::standard(options);

    log::info!(
        "Releasing {} ({}) through {}",
        project.file().display(),
        args.mode,
        controller.sequence_names().join(", ")
    );

    if let Err(e) = controller.execute(&mut runtime, &mut project) {
        runtime.error(&format!("Release failed: {}", e));
        runtime.info("Undoing the release steps");
        if let Err(undo_error) = controller.undo(&mut runtime, &mut project) {
            log::error!("undo could not start: {}", undo_error);
        }
        ui::display_history(&controller.history().borrow());
        return Err(e.into());
    }

    let history = controller.history().borrow().clone();
    ui::display_history(&history);

    Ok(WorkflowResult {
        mode: args.mode,
        initial_version,
        final_version: project.version()?,
        history,
    })
}
