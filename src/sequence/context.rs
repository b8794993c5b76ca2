use crate::domain::{ReleaseMode, Version};
use crate::error::{ReleaseError, Result};
use crate::project::Project;
use crate::runtime::{Runtime, CURRENT_VERSION};
use crate::sequence::ExecutionHistory;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// History shared between a controller and the contexts it creates
pub type SharedHistory = Rc<RefCell<ExecutionHistory>>;

/// State shared by the sequences of one pipeline run.
///
/// The current version lives in the runtime's variable store so that
/// configured commands can refer to `${current_version}`.
pub struct SequenceExecutionContext<'a> {
    runtime: &'a mut Runtime,
    project: &'a mut dyn Project,
    mode: ReleaseMode,
    no_push: bool,
    tests_executed: bool,
    attributes: HashMap<String, String>,
    history: SharedHistory,
}

impl<'a> SequenceExecutionContext<'a> {
    /// Create a context seeded with the project's version.
    ///
    /// Fails if the version held by the project does not parse.
    pub fn new(
        runtime: &'a mut Runtime,
        project: &'a mut dyn Project,
        mode: ReleaseMode,
        no_push: bool,
        history: SharedHistory,
    ) -> Result<Self> {
        let version = project.version()?;
        runtime.set_variable_value(CURRENT_VERSION, version.to_string());

        Ok(SequenceExecutionContext {
            runtime,
            project,
            mode,
            no_push,
            tests_executed: false,
            attributes: HashMap::new(),
            history,
        })
    }

    pub fn mode(&self) -> &ReleaseMode {
        &self.mode
    }

    /// True when nothing may be pushed to remote repositories
    pub fn no_push(&self) -> bool {
        self.no_push
    }

    pub fn tests_executed(&self) -> bool {
        self.tests_executed
    }

    pub fn set_tests_executed(&mut self, executed: bool) {
        self.tests_executed = executed;
    }

    pub fn current_version(&self) -> Result<Version> {
        let literal = self.runtime.variable_value(CURRENT_VERSION).ok_or_else(|| {
            ReleaseError::illegal_state(format!("Variable '{}' is not set", CURRENT_VERSION))
        })?;
        Ok(Version::parse(literal)?)
    }

    pub fn set_current_version(&mut self, version: &Version) {
        self.runtime
            .set_variable_value(CURRENT_VERSION, version.to_string());
    }

    /// Write `version` to the project, persist it, and make it current.
    ///
    /// Returns whether the descriptor on disk changed.
    pub fn write_version(&mut self, version: &Version) -> Result<bool> {
        self.project.set_version(version);
        let changed = self.project.save()?;
        self.set_current_version(version);
        Ok(changed)
    }

    pub fn runtime(&self) -> &Runtime {
        &*self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut *self.runtime
    }

    pub fn project(&self) -> &dyn Project {
        &*self.project
    }

    pub fn project_mut(&mut self) -> &mut (dyn Project + 'a) {
        &mut *self.project
    }

    /// Ad hoc value left by an earlier sequence
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn history(&self) -> SharedHistory {
        Rc::clone(&self.history)
    }
}
