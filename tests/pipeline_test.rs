// End-to-end runs of the release pipeline against a descriptor on disk,
// with a scripted command runner standing in for the shell.

use release_pipeline::cli::orchestration::{run_release_workflow_with, ReleaseWorkflowArgs};
use release_pipeline::config::Config;
use release_pipeline::domain::ReleaseMode;
use release_pipeline::process::{CommandOutput, MockRunner};
use release_pipeline::sequence::Method;
use release_pipeline::ReleaseError;
use std::fs;
use std::path::Path;

fn config() -> Config {
    let mut config = Config::default();
    config.commands.build_with_tests = Some("make all".to_string());
    config.commands.build_without_tests = Some("make dist".to_string());
    config.commands.execute_all_tests = Some("make test".to_string());
    config.commands.publish_into_local_repository = Some("make publish".to_string());
    config.source.add = Some("git add -A".to_string());
    config.source.commit = Some("git commit -m 'Release ${current_version}'".to_string());
    config.source.tag = Some("git tag ${tag}".to_string());
    config.source.push = Some("git push".to_string());
    config
}

fn work_area(version: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("project.toml"),
        format!(
            "# app descriptor\n[project]\nname = \"app\"\ngroup = \"org.example\"\nversion = \"{}\"\n\n[[artifacts]]\nname = \"app-core\"\n",
            version
        ),
    )
    .unwrap();
    dir
}

fn descriptor_version(dir: &Path) -> String {
    let text = fs::read_to_string(dir.join("project.toml")).unwrap();
    let line = text
        .lines()
        .find(|line| line.starts_with("version"))
        .unwrap();
    line.split('"').nth(1).unwrap().to_string()
}

fn history_entries(result: &release_pipeline::sequence::ExecutionHistory) -> Vec<(Method, String, bool)> {
    result
        .iter()
        .map(|op| (op.method, op.target.clone(), op.success))
        .collect()
}

#[test]
fn test_patch_release() {
    let dir = work_area("1.2.3-SNAPSHOT-4");
    let runner = MockRunner::new();
    let calls = runner.calls();
    let args = ReleaseWorkflowArgs::new(dir.path(), ReleaseMode::Patch);

    let result = run_release_workflow_with(args, config(), Box::new(runner)).unwrap();

    assert_eq!(result.initial_version.literal(), "1.2.3-SNAPSHOT-4");
    assert_eq!(result.final_version.literal(), "1.2.4-SNAPSHOT-1");
    assert_eq!(descriptor_version(dir.path()), "1.2.4-SNAPSHOT-1");

    let commands: Vec<String> = calls.borrow().iter().map(|c| c.command.clone()).collect();
    assert_eq!(
        commands,
        vec![
            "make test",
            "make dist",
            "make publish",
            "git add -A",
            "git commit -m 'Release 1.2.3'",
            "git tag release-1.2.3",
            "git push",
        ]
    );

    // Only a library is declared, so install runs but has nothing to do
    let entries = history_entries(&result.history);
    assert_eq!(entries.len(), 5);
    assert!(entries.iter().all(|(method, _, success)| *method == Method::Execute && *success));
    let install = result.history.operation(3).unwrap();
    assert_eq!(install.target, "install");
    assert!(!install.state_changed);
}

#[test]
fn test_snapshot_release_without_push() {
    let dir = work_area("2.0.1-SNAPSHOT-3");
    let runner = MockRunner::new();
    let calls = runner.calls();
    let mut args = ReleaseWorkflowArgs::new(dir.path(), ReleaseMode::Snapshot);
    args.no_push = true;
    args.no_install = true;

    let result = run_release_workflow_with(args, config(), Box::new(runner)).unwrap();

    assert_eq!(result.final_version.literal(), "2.0.1-SNAPSHOT-4");
    assert_eq!(result.history.len(), 4);
    let commands: Vec<String> = calls.borrow().iter().map(|c| c.command.clone()).collect();
    assert!(!commands.iter().any(|c| c.starts_with("git tag") || c == "git push"));
    assert!(commands.contains(&"git commit -m 'Release 2.0.1-SNAPSHOT-3'".to_string()));
}

#[test]
fn test_no_tests_builds_without_tests() {
    let dir = work_area("1.0-SNAPSHOT-1");
    let runner = MockRunner::new();
    let calls = runner.calls();
    let mut args = ReleaseWorkflowArgs::new(dir.path(), ReleaseMode::Minor);
    args.no_tests = true;
    args.no_install = true;

    let result = run_release_workflow_with(args, config(), Box::new(runner)).unwrap();

    // Qualification always runs the tests; the build then skips them
    assert_eq!(result.final_version.literal(), "1.1.1-SNAPSHOT-1");
    let commands: Vec<String> = calls.borrow().iter().map(|c| c.command.clone()).collect();
    assert_eq!(&commands[..2], &["make test".to_string(), "make dist".to_string()]);
}

#[test]
fn test_failed_build_is_undone_and_reported() {
    let dir = work_area("1.2.3-SNAPSHOT-4");
    let runner = MockRunner::new().respond("make dist", CommandOutput::failure(2, "link error"));
    let calls = runner.calls();
    let mut args = ReleaseWorkflowArgs::new(dir.path(), ReleaseMode::Patch);
    args.no_install = true;

    let err = run_release_workflow_with(args, config(), Box::new(runner)).unwrap_err();

    match err.downcast_ref::<ReleaseError>() {
        Some(ReleaseError::User(message)) => assert_eq!(message, "build failed"),
        other => panic!("unexpected error: {:?}", other),
    }
    // Qualification's version change is not rolled back
    assert_eq!(descriptor_version(dir.path()), "1.2.3");
    assert!(!calls.borrow().iter().any(|c| c.command == "make publish"));
}

#[test]
fn test_dot_release_without_push_is_refused() {
    let dir = work_area("1.2.3-SNAPSHOT-4");
    let runner = MockRunner::new();
    let calls = runner.calls();
    let mut args = ReleaseWorkflowArgs::new(dir.path(), ReleaseMode::Patch);
    args.no_push = true;

    let err = run_release_workflow_with(args, config(), Box::new(runner)).unwrap_err();

    assert!(err.to_string().contains("without pushing"));
    assert!(!calls.borrow().iter().any(|c| c.command.starts_with("make publish")));
}

#[test]
fn test_release_from_dot_version_is_refused() {
    let dir = work_area("1.2.3");
    let runner = MockRunner::new();
    let calls = runner.calls();
    let args = ReleaseWorkflowArgs::new(dir.path(), ReleaseMode::Patch);

    let err = run_release_workflow_with(args, config(), Box::new(runner)).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ReleaseError>(),
        Some(ReleaseError::User(_))
    ));
    assert!(calls.borrow().is_empty());
    assert_eq!(descriptor_version(dir.path()), "1.2.3");
}

#[test]
fn test_custom_release() {
    let dir = work_area("1.2.3-SNAPSHOT-15");
    let mut args = ReleaseWorkflowArgs::new(
        dir.path(),
        ReleaseMode::custom("1.3").unwrap(),
    );
    args.no_install = true;

    let result = run_release_workflow_with(args, config(), Box::new(MockRunner::new())).unwrap();
    assert_eq!(result.final_version.literal(), "1.3.1-SNAPSHOT-1");
}

#[test]
fn test_descriptor_comments_survive() {
    let dir = work_area("1.2.3-SNAPSHOT-4");
    let mut args = ReleaseWorkflowArgs::new(dir.path(), ReleaseMode::Patch);
    args.no_install = true;

    run_release_workflow_with(args, config(), Box::new(MockRunner::new())).unwrap();

    let text = fs::read_to_string(dir.path().join("project.toml")).unwrap();
    assert!(text.starts_with("# app descriptor\n"));
    assert!(text.contains("name = \"app-core\""));
}
