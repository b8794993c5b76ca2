use anyhow::Result;
use clap::Parser;

use release_pipeline::cli::orchestration::{self, ReleaseWorkflowArgs};
use release_pipeline::config;
use release_pipeline::domain::ReleaseMode;
use release_pipeline::project::{DescriptorProject, Project};
use release_pipeline::sequence::QualificationSequence;
use release_pipeline::ui;

#[derive(clap::Parser)]
#[command(
    name = "release-pipeline",
    version,
    about = "Qualify, build, publish, install, and roll a project forward to its next snapshot"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short,
        long,
        default_value = "project.toml",
        help = "Project descriptor or the directory containing it"
    )]
    project: String,

    #[arg(
        short,
        long,
        help = "Release mode: info, major, minor, patch, snapshot, or custom"
    )]
    mode: Option<String>,

    #[arg(long, value_name = "VERSION", help = "Explicit release version (implies custom mode)")]
    custom: Option<String>,

    #[arg(long, help = "Do not push to remote repositories")]
    no_push: bool,

    #[arg(long, help = "Build without running the tests")]
    no_tests: bool,

    #[arg(long, help = "Skip installing the binary distribution")]
    no_install: bool,

    #[arg(short, long, help = "Skip confirmation prompts")]
    force: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let mode = match orchestration::parse_mode(args.mode.as_deref(), args.custom.as_deref()) {
        Ok(mode) => mode,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if mode != ReleaseMode::Info && !args.force {
        let project = DescriptorProject::open(&args.project)?;
        let current = project.version()?;
        let next = QualificationSequence::release_version(&current, &mode)?;
        ui::display_proposed_release(&current, &next, &mode.to_string());

        if !ui::confirm_action("Proceed with the release?")? {
            println!("Release cancelled by user.");
            return Ok(());
        }
    }

    let workflow_args = ReleaseWorkflowArgs {
        project: args.project.into(),
        mode,
        no_push: args.no_push,
        no_tests: args.no_tests,
        no_install: args.no_install,
    };

    match orchestration::run_release_workflow(workflow_args, config) {
        Ok(result) => {
            if result.mode != ReleaseMode::Info {
                ui::display_success(&format!(
                    "Finished {} release from {}; the project now holds {}",
                    result.mode, result.initial_version, result.final_version
                ));
            }
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
