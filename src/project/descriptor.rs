use crate::domain::Version;
use crate::error::{ReleaseError, Result};
use crate::project::{Artifact, ArtifactKind, Project};
use std::fs;
use std::path::{Path, PathBuf};
use toml_edit::DocumentMut;

/// A project described by a `project.toml` file:
///
/// ```toml
/// [project]
/// name = "app"
/// group = "org.example"
/// version = "1.2.3-SNAPSHOT-4"
///
/// [[artifacts]]
/// name = "app"
/// kind = "distribution"
/// ```
///
/// The descriptor is edited in place with `toml_edit`, so comments and
/// formatting survive a version change. Each effective save keeps the
/// previous file contents so [Project::undo] can put them back.
#[derive(Debug)]
pub struct DescriptorProject {
    file: PathBuf,
    base_directory: PathBuf,
    document: DocumentMut,
    artifacts: Vec<Artifact>,
    backups: Vec<String>,
}

impl DescriptorProject {
    pub const FILE_NAME: &'static str = "project.toml";

    /// Open a descriptor file, or the `project.toml` inside a directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = if path.is_dir() {
            path.join(Self::FILE_NAME)
        } else {
            path.to_path_buf()
        };

        let text = fs::read_to_string(&file).map_err(|e| {
            ReleaseError::user(format!(
                "Cannot read project descriptor {}: {}",
                file.display(),
                e
            ))
        })?;
        let document = Self::parse_document(&file, &text)?;
        let artifacts = Self::read_artifacts(&file, &document)?;

        let base_directory = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(DescriptorProject {
            file,
            base_directory,
            document,
            artifacts,
            backups: Vec::new(),
        })
    }

    fn parse_document(file: &Path, text: &str) -> Result<DocumentMut> {
        let document = text.parse::<DocumentMut>().map_err(|e| {
            ReleaseError::config(format!(
                "Invalid project descriptor {}: {}",
                file.display(),
                e
            ))
        })?;

        let has_version = document
            .get("project")
            .and_then(|project| project.get("version"))
            .map(|version| version.is_str())
            .unwrap_or(false);
        if !has_version {
            return Err(ReleaseError::config(format!(
                "Project descriptor {} has no [project] version",
                file.display()
            )));
        }

        Ok(document)
    }

    fn read_artifacts(file: &Path, document: &DocumentMut) -> Result<Vec<Artifact>> {
        let default_group = document
            .get("project")
            .and_then(|project| project.get("group"))
            .and_then(|group| group.as_str())
            .unwrap_or("")
            .to_string();

        let Some(tables) = document
            .get("artifacts")
            .and_then(|item| item.as_array_of_tables())
        else {
            return Ok(Vec::new());
        };

        tables
            .iter()
            .map(|table| {
                let name = table.get("name").and_then(|v| v.as_str()).ok_or_else(|| {
                    ReleaseError::config(format!(
                        "Artifact without a name in {}",
                        file.display()
                    ))
                })?;
                let kind = table
                    .get("kind")
                    .and_then(|v| v.as_str())
                    .map(ArtifactKind::from_label)
                    .unwrap_or(ArtifactKind::Library);
                let group = table
                    .get("group")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| default_group.clone());
                Ok(Artifact::new(group, name, kind))
            })
            .collect()
    }

    fn version_literal(&self) -> Option<&str> {
        self.document
            .get("project")
            .and_then(|project| project.get("version"))
            .and_then(|version| version.as_str())
    }
}

impl Project for DescriptorProject {
    fn version(&self) -> Result<Version> {
        let literal = self.version_literal().ok_or_else(|| {
            ReleaseError::config(format!(
                "Project descriptor {} has no [project] version",
                self.file.display()
            ))
        })?;
        Ok(Version::parse(literal)?)
    }

    fn set_version(&mut self, version: &Version) {
        self.document["project"]["version"] = toml_edit::value(version.to_string());
    }

    fn save(&mut self) -> Result<bool> {
        let rendered = self.document.to_string();
        let on_disk = fs::read_to_string(&self.file)?;
        if rendered == on_disk {
            return Ok(false);
        }

        fs::write(&self.file, &rendered)?;
        self.backups.push(on_disk);
        log::debug!("saved {}", self.file.display());
        Ok(true)
    }

    fn undo(&mut self) -> Result<bool> {
        let Some(previous) = self.backups.pop() else {
            return Ok(false);
        };

        fs::write(&self.file, &previous)?;
        self.document = Self::parse_document(&self.file, &previous)?;
        self.artifacts = Self::read_artifacts(&self.file, &self.document)?;
        log::debug!("restored {}", self.file.display());
        Ok(true)
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
