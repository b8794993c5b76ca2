use release_pipeline::ui;
use release_pipeline::warning::ReleaseWarning;

// ============================================================================
// ReleaseWarning Display Tests
// ============================================================================

#[test]
fn test_installed_version_check_missing_display() {
    let warning = ReleaseWarning::InstalledVersionCheckMissing {
        setting: "commands.get-installed-version".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("Cannot check the installed version"),
        "Message should explain the skipped check, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("commands.get-installed-version"),
        "Message should name the setting, got: {}",
        display_msg
    );
}

#[test]
fn test_installed_version_check_failed_display() {
    let warning = ReleaseWarning::InstalledVersionCheckFailed {
        command: "app --version".to_string(),
        exit_code: 127,
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("app --version"), "got: {}", display_msg);
    assert!(display_msg.contains("127"), "got: {}", display_msg);
}

#[test]
fn test_unparsable_installed_version_shows_first_line() {
    let warning = ReleaseWarning::UnparsableInstalledVersion {
        output: "app version two\nbuilt yesterday\n".to_string(),
        reason: "invalid component".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("app version two"), "got: {}", display_msg);
    assert!(!display_msg.contains("built yesterday"), "got: {}", display_msg);
    assert!(display_msg.contains("invalid component"), "got: {}", display_msg);
}

#[test]
fn test_commit_failed_display() {
    let with_stderr = ReleaseWarning::CommitFailed {
        command: "git commit -m 'Release 1.2.3'".to_string(),
        stderr: "nothing to commit, working tree clean\n".to_string(),
    };
    assert!(with_stderr
        .to_string()
        .ends_with(": nothing to commit, working tree clean"));

    let without_stderr = ReleaseWarning::CommitFailed {
        command: "git commit".to_string(),
        stderr: "  ".to_string(),
    };
    assert_eq!(without_stderr.to_string(), "Commit 'git commit' did not succeed");
}

#[test]
fn test_library_skipped_display() {
    let warning = ReleaseWarning::LibraryAlreadyPublished {
        artifact: "org.example:core".to_string(),
    };
    assert!(warning.to_string().contains("org.example:core"));
}

#[test]
fn test_warnings_can_be_displayed() {
    // Display goes to stderr; this only checks that formatting does not panic
    ui::display_release_warning(&ReleaseWarning::InstalledVersionCheckFailed {
        command: "app --version".to_string(),
        exit_code: 1,
    });
}
