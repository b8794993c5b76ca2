use crate::config::Setting;
use crate::domain::Version;
use crate::error::{ReleaseError, Result};
use crate::project::{Artifact, ArtifactKind};
use crate::sequence::{ensure_success, undo_unsupported, Sequence, SequenceExecutionContext};
use crate::warning::ReleaseWarning;
use std::fs;
use std::path::{Path, PathBuf};

/// Script every distribution carries under `<top-level>/bin/`
pub const INSTALL_SCRIPT: &str = ".install";

/// Installs the project's binary distribution on this machine
#[derive(Debug, Default)]
pub struct InstallSequence {
    state_changed: bool,
}

impl InstallSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// The one distribution to install, or `None` when only libraries remain
    fn distribution(ctx: &mut SequenceExecutionContext<'_>) -> Result<Option<Artifact>> {
        let artifacts = ctx.project().artifacts().to_vec();
        let mut remaining = Vec::new();
        for artifact in artifacts {
            if artifact.kind == ArtifactKind::Library {
                ctx.runtime_mut()
                    .report(&ReleaseWarning::LibraryAlreadyPublished {
                        artifact: artifact.to_string(),
                    });
            } else {
                remaining.push(artifact);
            }
        }

        if remaining.len() > 1 {
            return Err(ReleaseError::not_implemented(format!(
                "installing {} artifacts from one project",
                remaining.len()
            )));
        }
        match remaining.pop() {
            None => Ok(None),
            Some(artifact) if artifact.kind == ArtifactKind::Distribution => Ok(Some(artifact)),
            Some(artifact) => Err(ReleaseError::not_implemented(format!(
                "installing {} artifact {}",
                artifact.kind, artifact
            ))),
        }
    }

    fn directory(ctx: &SequenceExecutionContext<'_>, setting: Setting) -> Result<PathBuf> {
        let dir = ctx
            .runtime()
            .config()
            .path(setting)
            .ok_or_else(|| ReleaseError::missing_setting(setting.label()))?;
        if !dir.exists() {
            return Err(ReleaseError::user(format!(
                "{} '{}' does not exist",
                setting.label(),
                dir.display()
            )));
        }
        if !dir.is_dir() {
            return Err(ReleaseError::user(format!(
                "{} '{}' is not a directory",
                setting.label(),
                dir.display()
            )));
        }
        Ok(dir)
    }

    fn locate_archive(
        ctx: &SequenceExecutionContext<'_>,
        repository: &Path,
        artifact: &Artifact,
        version: &Version,
    ) -> Result<PathBuf> {
        let published = repository.join(artifact.repository_path(version));
        if published.is_file() {
            return Ok(published);
        }
        if let Some(local) = ctx.project().local_distribution_file(artifact, version) {
            log::debug!("using locally built {}", local.display());
            return Ok(local);
        }
        Err(ReleaseError::user(format!(
            "Cannot find distribution {} in {} or in the project build",
            artifact.file_name(version),
            repository.display()
        )))
    }
}

/// Whether the current user can create files in `dir`
fn is_writable(dir: &Path) -> bool {
    tempfile::Builder::new()
        .prefix(".release-write-check")
        .tempfile_in(dir)
        .is_ok()
}

#[cfg(unix)]
fn is_executable(file: &Path) -> Result<bool> {
    use std::os::unix::fs::PermissionsExt;
    let metadata = fs::metadata(file)?;
    Ok(metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(file: &Path) -> Result<bool> {
    Ok(file.is_file())
}

impl Sequence for InstallSequence {
    fn name(&self) -> &str {
        "install"
    }

    fn execute(&mut self, ctx: &mut SequenceExecutionContext<'_>) -> Result<bool> {
        self.state_changed = false;

        let Some(artifact) = Self::distribution(ctx)? else {
            ctx.runtime_mut().info("Nothing to install");
            return Ok(false);
        };
        let version = ctx.current_version()?;

        let repository = Self::directory(ctx, Setting::LocalArtifactRepositoryRoot)?;
        let archive = Self::locate_archive(ctx, &repository, &artifact, &version)?;

        let target = Self::directory(ctx, Setting::InstallationDirectory)?;
        if !is_writable(&target) {
            return Err(ReleaseError::user(format!(
                "{} '{}' is not writable",
                Setting::InstallationDirectory.label(),
                target.display()
            )));
        }

        let unzip = ctx.runtime().command(Setting::Unzip)?;
        let archive_arg = archive.display().to_string();
        let target_arg = target.display().to_string();
        let command = ctx.runtime().render_with(
            &unzip,
            &[("archive", archive_arg.as_str()), ("directory", target_arg.as_str())],
        )?;
        let output = ctx.runtime_mut().run_rendered(&command, None)?;
        ensure_success(&output, &format!("extracting {} failed", archive.display()))?;
        self.state_changed = true;

        let top_level = ctx.runtime().archive().top_level_directory_name(&archive)?;
        let bin = target.join(&top_level).join("bin");
        let script = bin.join(INSTALL_SCRIPT);
        if !script.is_file() {
            return Err(ReleaseError::user(format!(
                "Installation script {} is missing",
                script.display()
            )));
        }
        if !is_executable(&script)? {
            return Err(ReleaseError::user(format!(
                "Installation script {} is not executable",
                script.display()
            )));
        }

        let output = ctx
            .runtime_mut()
            .run_rendered(&format!("\"{}\"", script.display()), Some(&bin))?;
        ensure_success(&output, "installation failed")?;

        ctx.runtime_mut()
            .info(&format!("Installed {} {} into {}", artifact, version, target.display()));
        Ok(true)
    }

    fn undo(&mut self, _ctx: &mut SequenceExecutionContext<'_>) -> Result<bool> {
        undo_unsupported(self.name(), self.state_changed)
    }

    fn did_execute_change_state(&self) -> bool {
        self.state_changed
    }
}
