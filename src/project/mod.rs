//! Project descriptor abstraction layer
//!
//! The pipeline reads and rewrites the version of the work area through the
//! [Project] trait. Implementations:
//!
//! - [descriptor::DescriptorProject]: a `project.toml` descriptor edited in place
//! - [memory::MemoryProject]: an in-memory project for testing

pub mod descriptor;
pub mod memory;

pub use descriptor::DescriptorProject;
pub use memory::MemoryProject;

use crate::domain::Version;
use crate::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// What an artifact delivers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Consumed by other builds; publishing delivers it
    Library,
    /// An installable `.zip` distribution
    Distribution,
    /// Any kind the pipeline does not know how to handle
    Other(String),
}

impl ArtifactKind {
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "library" | "lib" => ArtifactKind::Library,
            "distribution" | "dist" => ArtifactKind::Distribution,
            other => ArtifactKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Library => write!(f, "library"),
            ArtifactKind::Distribution => write!(f, "distribution"),
            ArtifactKind::Other(label) => write!(f, "{}", label),
        }
    }
}

/// A deliverable produced by the project build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub group: String,
    pub name: String,
    pub kind: ArtifactKind,
}

impl Artifact {
    pub fn new(group: impl Into<String>, name: impl Into<String>, kind: ArtifactKind) -> Self {
        Artifact {
            group: group.into(),
            name: name.into(),
            kind,
        }
    }

    /// Archive file name for a version (e.g., "app-1.2.3.zip")
    pub fn file_name(&self, version: &Version) -> String {
        format!("{}-{}.zip", self.name, version)
    }

    /// Location relative to an artifact repository root:
    /// `<group as directories>/<name>/<version>/<file name>`
    pub fn repository_path(&self, version: &Version) -> PathBuf {
        let mut path: PathBuf = self
            .group
            .split('.')
            .filter(|part| !part.is_empty())
            .collect();
        path.push(&self.name);
        path.push(version.to_string());
        path.push(self.file_name(version));
        path
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.group, self.name)
        }
    }
}

/// The work area whose version the pipeline manages
pub trait Project {
    /// Version currently held by the project; a malformed version is an error
    fn version(&self) -> Result<Version>;

    /// Change the version in memory; [Project::save] persists it
    fn set_version(&mut self, version: &Version);

    /// Persist pending changes, returning whether anything on disk changed
    fn save(&mut self) -> Result<bool>;

    /// Restore the state before the last effective save, returning whether anything changed
    fn undo(&mut self) -> Result<bool>;

    fn artifacts(&self) -> &[Artifact];

    /// Directory the build commands run in
    fn base_directory(&self) -> &Path;

    /// The descriptor file backing this project
    fn file(&self) -> &Path;

    /// A distribution archive built locally for `artifact`, if one exists
    fn local_distribution_file(&self, artifact: &Artifact, version: &Version) -> Option<PathBuf> {
        let candidate = self
            .base_directory()
            .join("target")
            .join(artifact.file_name(version));
        candidate.is_file().then_some(candidate)
    }
}
