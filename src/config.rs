use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Represents the complete configuration for release-pipeline.
///
/// Contains the external commands each pipeline step runs, the source
/// repository commands, release naming, filesystem locations, and behavior flags.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub commands: CommandsConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Returns the default archive extraction command.
fn default_unzip_command() -> Option<String> {
    Some(r#"unzip -o -q "${archive}" -d "${directory}""#.to_string())
}

/// Tag name used when `release.tag` is not configured
pub const DEFAULT_TAG_TEMPLATE: &str = "release-${current.version}";

/// Returns the default release tag template.
fn default_tag_template() -> Option<String> {
    Some(DEFAULT_TAG_TEMPLATE.to_string())
}

/// Build, test, and publication commands.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct CommandsConfig {
    pub build_with_tests: Option<String>,
    pub build_without_tests: Option<String>,
    pub execute_all_tests: Option<String>,
    pub get_installed_version: Option<String>,
    pub publish_into_local_repository: Option<String>,
    #[serde(default = "default_unzip_command")]
    pub unzip: Option<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        CommandsConfig {
            build_with_tests: None,
            build_without_tests: None,
            execute_all_tests: None,
            get_installed_version: None,
            publish_into_local_repository: None,
            unzip: default_unzip_command(),
        }
    }
}

/// Source repository commands, each a `${name}` template.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SourceConfig {
    pub add: Option<String>,
    pub commit: Option<String>,
    pub tag: Option<String>,
    pub push: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseConfig {
    #[serde(default = "default_tag_template")]
    pub tag: Option<String>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            tag: default_tag_template(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PathsConfig {
    pub local_artifact_repository_root: Option<String>,
    pub installation_directory: Option<String>,
}

/// Configuration for behavior customization.
///
/// Command-line flags are OR-ed with these values.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct BehaviorConfig {
    #[serde(default)]
    pub no_tests: bool,
    #[serde(default)]
    pub no_push: bool,
    #[serde(default)]
    pub no_install: bool,
}

/// Every string-valued configuration key the pipeline consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    BuildWithTests,
    BuildWithoutTests,
    ExecuteAllTests,
    GetInstalledVersion,
    PublishIntoLocalRepository,
    Unzip,
    AddSourceRepository,
    CommitSourceRepository,
    TagSourceRepository,
    PushSourceRepository,
    ReleaseTag,
    LocalArtifactRepositoryRoot,
    InstallationDirectory,
}

impl Setting {
    /// The key as written in the configuration file
    pub fn label(&self) -> &'static str {
        match self {
            Setting::BuildWithTests => "commands.build-with-tests",
            Setting::BuildWithoutTests => "commands.build-without-tests",
            Setting::ExecuteAllTests => "commands.execute-all-tests",
            Setting::GetInstalledVersion => "commands.get-installed-version",
            Setting::PublishIntoLocalRepository => "commands.publish-into-local-repository",
            Setting::Unzip => "commands.unzip",
            Setting::AddSourceRepository => "source.add",
            Setting::CommitSourceRepository => "source.commit",
            Setting::TagSourceRepository => "source.tag",
            Setting::PushSourceRepository => "source.push",
            Setting::ReleaseTag => "release.tag",
            Setting::LocalArtifactRepositoryRoot => "paths.local-artifact-repository-root",
            Setting::InstallationDirectory => "paths.installation-directory",
        }
    }
}

impl Config {
    /// Look up a configured value; blank values count as unset
    pub fn get(&self, setting: Setting) -> Option<&str> {
        let value = match setting {
            Setting::BuildWithTests => &self.commands.build_with_tests,
            Setting::BuildWithoutTests => &self.commands.build_without_tests,
            Setting::ExecuteAllTests => &self.commands.execute_all_tests,
            Setting::GetInstalledVersion => &self.commands.get_installed_version,
            Setting::PublishIntoLocalRepository => &self.commands.publish_into_local_repository,
            Setting::Unzip => &self.commands.unzip,
            Setting::AddSourceRepository => &self.source.add,
            Setting::CommitSourceRepository => &self.source.commit,
            Setting::TagSourceRepository => &self.source.tag,
            Setting::PushSourceRepository => &self.source.push,
            Setting::ReleaseTag => &self.release.tag,
            Setting::LocalArtifactRepositoryRoot => &self.paths.local_artifact_repository_root,
            Setting::InstallationDirectory => &self.paths.installation_directory,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    /// Look up a configured path, expanding a leading `~/`
    pub fn path(&self, setting: Setting) -> Option<PathBuf> {
        self.get(setting).map(expand_home)
    }
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in current directory
/// 3. `.release.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        PathBuf::from(path)
    } else if Path::new("./release.toml").exists() {
        PathBuf::from("./release.toml")
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".release.toml");
        if config_path.exists() {
            config_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&config_str)
        .map_err(|e| ReleaseError::config(format!("{}: {}", path.display(), e)))
}

/// Parses configuration from TOML text
pub fn parse_config(text: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(text)
}
