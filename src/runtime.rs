//! Runtime services shared by every pipeline step

use crate::archive::{ArchiveInspector, ZipInspector};
use crate::config::{Config, Setting};
use crate::error::{ReleaseError, Result};
use crate::process::{CommandOutput, CommandRunner, SystemRunner};
use crate::template::{self, Bindings};
use crate::ui;
use crate::warning::ReleaseWarning;
use std::path::Path;

/// Variable holding the version the work area currently carries
pub const CURRENT_VERSION: &str = "current_version";

/// Severity of an operator notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// A message reported to the operator during a run
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

/// Configuration, named variables, command execution, and operator output.
///
/// The variable store backs `${name}` substitution in configured commands and
/// holds [CURRENT_VERSION] for the pipeline context.
pub struct Runtime {
    config: Config,
    variables: Bindings,
    runner: Box<dyn CommandRunner>,
    archive: Box<dyn ArchiveInspector>,
    notices: Vec<Notice>,
}

impl Runtime {
    pub fn new(config: Config, runner: Box<dyn CommandRunner>) -> Self {
        Runtime {
            config,
            variables: Bindings::new(),
            runner,
            archive: Box::new(ZipInspector),
            notices: Vec::new(),
        }
    }

    /// Runtime that executes commands through the platform shell
    pub fn system(config: Config) -> Self {
        Self::new(config, Box::new(SystemRunner::new()))
    }

    pub fn with_archive_inspector(mut self, archive: Box<dyn ArchiveInspector>) -> Self {
        self.archive = archive;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Optional configuration lookup
    pub fn get(&self, setting: Setting) -> Option<&str> {
        self.config.get(setting)
    }

    /// Required configuration lookup; an unset key is a user error naming it
    pub fn command(&self, setting: Setting) -> Result<String> {
        self.get(setting)
            .map(str::to_string)
            .ok_or_else(|| ReleaseError::missing_setting(setting.label()))
    }

    pub fn variable_value(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn set_variable_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Render a template against the variable store
    pub fn render(&self, template: &str) -> Result<String> {
        template::render(template, &self.variables)
    }

    /// Render a template against the variable store plus `extra` bindings
    pub fn render_with(&self, template: &str, extra: &[(&str, &str)]) -> Result<String> {
        let mut bindings = self.variables.clone();
        for (name, value) in extra {
            bindings.insert(name.to_string(), value.to_string());
        }
        template::render(template, &bindings)
    }

    /// Render a command template and run it
    pub fn run(&mut self, template: &str, working_dir: Option<&Path>) -> Result<CommandOutput> {
        let command = self.render(template)?;
        self.run_rendered(&command, working_dir)
    }

    /// Run a command line exactly as given
    pub fn run_rendered(&mut self, command: &str, working_dir: Option<&Path>) -> Result<CommandOutput> {
        self.info(&format!("Running: {}", command));
        self.runner.run(command, working_dir)
    }

    pub fn archive(&self) -> &dyn ArchiveInspector {
        self.archive.as_ref()
    }

    pub fn info(&mut self, message: &str) {
        ui::display_status(message);
        self.record(Level::Info, message);
    }

    pub fn warn(&mut self, message: &str) {
        ui::display_warning(message);
        self.record(Level::Warn, message);
    }

    pub fn error(&mut self, message: &str) {
        ui::display_error(message);
        self.record(Level::Error, message);
    }

    /// Report a non-fatal condition as a warning
    pub fn report(&mut self, warning: &ReleaseWarning) {
        ui::display_release_warning(warning);
        self.record(Level::Warn, &warning.to_string());
    }

    /// Everything reported so far, oldest first
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    fn record(&mut self, level: Level, message: &str) {
        log::trace!("{:?}: {}", level, message);
        self.notices.push(Notice {
            level,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::MockRunner;

    #[test]
    fn test_command_requires_configuration() {
        let runtime = Runtime::new(Config::default(), Box::new(MockRunner::new()));
        let err = runtime.command(Setting::ExecuteAllTests).unwrap_err();
        assert_eq!(err.to_string(), "Missing configuration 'commands.execute-all-tests'");
    }

    #[test]
    fn test_run_renders_variables() {
        let runner = MockRunner::new();
        let calls = runner.calls();
        let mut runtime = Runtime::new(Config::default(), Box::new(runner));
        runtime.set_variable_value(CURRENT_VERSION, "1.2.3");

        runtime.run("git commit -m 'Release ${current_version}'", None).unwrap();
        assert_eq!(calls.borrow()[0].command, "git commit -m 'Release 1.2.3'");
    }

    #[test]
    fn test_run_with_undefined_variable_does_not_execute() {
        let runner = MockRunner::new();
        let calls = runner.calls();
        let mut runtime = Runtime::new(Config::default(), Box::new(runner));

        assert!(runtime.run("deploy ${target}", None).is_err());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_render_with_extra_bindings() {
        let mut runtime = Runtime::new(Config::default(), Box::new(MockRunner::new()));
        runtime.set_variable_value(CURRENT_VERSION, "2.0");
        let rendered = runtime
            .render_with("${tag}@${current_version}", &[("tag", "release-2.0")])
            .unwrap();
        assert_eq!(rendered, "release-2.0@2.0");
        assert!(runtime.variable_value("tag").is_none());
    }

    #[test]
    fn test_notices_are_recorded() {
        let mut runtime = Runtime::new(Config::default(), Box::new(MockRunner::new()));
        runtime.info("starting");
        runtime.report(&ReleaseWarning::LibraryAlreadyPublished {
            artifact: "lib".to_string(),
        });

        let notices = runtime.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[1].level, Level::Warn);
        assert!(notices[1].message.contains("lib"));
    }
}
