use release_pipeline::cli::orchestration::{
    parse_mode, run_release_workflow, ReleaseWorkflowArgs, WorkflowResult,
};
use release_pipeline::config::Config;
use release_pipeline::domain::{ReleaseMode, Version};
use release_pipeline::sequence::ExecutionHistory;
use release_pipeline::ReleaseError;
use std::fs;

const DESCRIPTOR: &str = "[project]\nname = \"app\"\nversion = \"1.2.3-SNAPSHOT-4\"\n";

#[test]
fn test_workflow_args_defaults() {
    let args = ReleaseWorkflowArgs::new("work/project.toml", ReleaseMode::Patch);

    assert_eq!(args.project.to_str(), Some("work/project.toml"));
    assert_eq!(args.mode, ReleaseMode::Patch);
    assert!(!args.no_push);
    assert!(!args.no_tests);
    assert!(!args.no_install);
}

#[test]
fn test_workflow_result_structure() {
    let result = WorkflowResult {
        mode: ReleaseMode::Minor,
        initial_version: Version::parse("1.2.3-SNAPSHOT-4").unwrap(),
        final_version: Version::parse("1.3.1-SNAPSHOT-1").unwrap(),
        history: ExecutionHistory::new(),
    };

    assert_eq!(result.mode.label(), "minor");
    assert!(result.initial_version < result.final_version);
    assert!(result.history.is_empty());
}

#[test]
fn test_info_run_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("project.toml");
    fs::write(&file, DESCRIPTOR).unwrap();

    // Info never runs a command, so the system runner is safe here
    let args = ReleaseWorkflowArgs::new(dir.path(), ReleaseMode::Info);
    let result = run_release_workflow(args, Config::default()).unwrap();

    assert_eq!(result.initial_version, result.final_version);
    assert_eq!(result.final_version.literal(), "1.2.3-SNAPSHOT-4");
    assert!(result.history.is_empty());
    assert_eq!(fs::read_to_string(&file).unwrap(), DESCRIPTOR);
}

#[test]
fn test_missing_descriptor_is_a_user_error() {
    let dir = tempfile::tempdir().unwrap();
    let args = ReleaseWorkflowArgs::new(dir.path().join("absent.toml"), ReleaseMode::Info);

    let err = run_release_workflow(args, Config::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ReleaseError>(),
        Some(ReleaseError::User(_))
    ));
}

#[test]
fn test_custom_mode_requires_version() {
    let err = parse_mode(Some("custom"), None).unwrap_err();
    assert!(matches!(err, ReleaseError::IllegalArgument(_)));
}

#[test]
fn test_custom_version_with_other_mode() {
    let err = parse_mode(Some("patch"), Some("1.3")).unwrap_err();
    assert!(matches!(err, ReleaseError::IllegalArgument(_)));
}

#[test]
fn test_malformed_custom_version() {
    let err = parse_mode(None, Some("1.3-SNAPSHOT")).unwrap_err();
    assert!(matches!(err, ReleaseError::User(_)));
    assert!(err.to_string().starts_with("Malformed custom release version"));
}
