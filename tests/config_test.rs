// tests/config_test.rs
use release_pipeline::config::{load_config, Config, Setting};
use release_pipeline::ReleaseError;
use serial_test::serial;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/release.toml")
}

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.get(Setting::ReleaseTag), Some("release-${current.version}"));
    assert_eq!(
        config.get(Setting::Unzip),
        Some(r#"unzip -o -q "${archive}" -d "${directory}""#)
    );
    assert_eq!(config.get(Setting::BuildWithTests), None);
    assert_eq!(config.get(Setting::PushSourceRepository), None);
}

#[test]
fn test_load_from_file() {
    let config = load_config(Some(fixture().to_str().unwrap())).unwrap();

    assert_eq!(config.get(Setting::BuildWithTests), Some("make all"));
    assert_eq!(config.get(Setting::BuildWithoutTests), Some("make dist"));
    assert_eq!(config.get(Setting::GetInstalledVersion), Some("app --version"));
    assert_eq!(config.get(Setting::ReleaseTag), Some("v${current.version}"));
    assert_eq!(config.get(Setting::InstallationDirectory), Some("/opt"));
    assert!(config.behavior.no_install);
    assert!(!config.behavior.no_push);
    // Keys the file leaves out keep their defaults
    assert!(config.get(Setting::Unzip).unwrap().starts_with("unzip"));
}

#[test]
fn test_repository_root_expands_home() {
    let config = load_config(Some(fixture().to_str().unwrap())).unwrap();
    let root = config.path(Setting::LocalArtifactRepositoryRoot).unwrap();

    assert!(root.ends_with(".m2/repository"));
    if let Some(home) = dirs::home_dir() {
        assert!(root.starts_with(home));
    }
}

#[test]
fn test_partial_config() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[source]\npush = \"git push\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.get(Setting::PushSourceRepository), Some("git push"));
    assert_eq!(config.commands, Config::default().commands);
    assert_eq!(config.release, Config::default().release);
}

#[test]
fn test_invalid_config_is_a_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[behavior]\nno-push = \"sometimes\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
}

#[test]
fn test_missing_explicit_config() {
    let err = load_config(Some("/nonexistent/release.toml")).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
    assert!(err.to_string().contains("/nonexistent/release.toml"));
}

#[test]
#[serial]
fn test_config_discovered_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("release.toml"),
        "[commands]\nexecute-all-tests = \"cargo test\"\n",
    )
    .unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let loaded = load_config(None);
    std::env::set_current_dir(previous).unwrap();

    assert_eq!(
        loaded.unwrap().get(Setting::ExecuteAllTests),
        Some("cargo test")
    );
}
