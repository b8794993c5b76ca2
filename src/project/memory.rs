use crate::domain::Version;
use crate::error::Result;
use crate::project::{Artifact, Project};
use std::path::{Path, PathBuf};

/// In-memory project for testing without a descriptor on disk
///
/// "Saving" copies the pending version literal into the persisted one.
pub struct MemoryProject {
    pending: String,
    persisted: String,
    history: Vec<String>,
    artifacts: Vec<Artifact>,
    base_directory: PathBuf,
    file: PathBuf,
}

impl MemoryProject {
    /// Create a project holding `version`, which is not validated until read
    pub fn new(version: impl Into<String>) -> Self {
        let version = version.into();
        MemoryProject {
            pending: version.clone(),
            persisted: version,
            history: Vec::new(),
            artifacts: Vec::new(),
            base_directory: PathBuf::from("."),
            file: PathBuf::from("project.toml"),
        }
    }

    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    pub fn with_base_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_directory = dir.into();
        self
    }

    /// The version literal as last saved
    pub fn persisted_version(&self) -> &str {
        &self.persisted
    }

    /// Number of saves that changed the persisted version
    pub fn save_count(&self) -> usize {
        self.history.len()
    }
}

impl Project for MemoryProject {
    fn version(&self) -> Result<Version> {
        Ok(Version::parse(&self.pending)?)
    }

    fn set_version(&mut self, version: &Version) {
        self.pending = version.to_string();
    }

    fn save(&mut self) -> Result<bool> {
        if self.pending == self.persisted {
            return Ok(false);
        }
        let previous = std::mem::replace(&mut self.persisted, self.pending.clone());
        self.history.push(previous);
        Ok(true)
    }

    fn undo(&mut self) -> Result<bool> {
        match self.history.pop() {
            Some(previous) => {
                self.pending = previous.clone();
                self.persisted = previous;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    fn file(&self) -> &Path {
        &self.file
    }
}
