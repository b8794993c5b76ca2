use crate::config::{Setting, DEFAULT_TAG_TEMPLATE};
use crate::error::{ReleaseError, Result};
use crate::sequence::{ensure_success, undo_unsupported, Sequence, SequenceExecutionContext};
use crate::warning::ReleaseWarning;

/// Context attribute holding the tag created for a dot release
pub const TAG_ATTRIBUTE: &str = "tag";

/// Publishes the built artifacts, then commits, tags, and pushes the source changes
#[derive(Debug, Default)]
pub struct PublishSequence {
    state_changed: bool,
}

impl PublishSequence {
    pub fn new() -> Self {
        Self::default()
    }

    fn publish_artifacts(&mut self, ctx: &mut SequenceExecutionContext<'_>) -> Result<()> {
        let command = ctx.runtime().command(Setting::PublishIntoLocalRepository)?;
        let version = ctx.current_version()?;

        // A dot release has to reach the public repository along with the local one
        if version.is_dot() && ctx.no_push() {
            return Err(ReleaseError::user(format!(
                "Cannot release {} without pushing its artifacts; drop the no-push option or release a snapshot",
                version
            )));
        }

        let base = ctx.project().base_directory().to_path_buf();
        let output = ctx.runtime_mut().run(&command, Some(&base))?;
        ensure_success(&output, "publishing artifacts failed")?;
        self.state_changed = true;
        Ok(())
    }

    fn publish_source(&mut self, ctx: &mut SequenceExecutionContext<'_>) -> Result<()> {
        let base = ctx.project().base_directory().to_path_buf();

        let add = ctx.runtime().command(Setting::AddSourceRepository)?;
        let output = ctx.runtime_mut().run(&add, Some(&base))?;
        ensure_success(&output, "adding source changes failed")?;

        let commit = ctx.runtime().command(Setting::CommitSourceRepository)?;
        let rendered = ctx.runtime().render(&commit)?;
        let output = ctx.runtime_mut().run_rendered(&rendered, Some(&base))?;
        if !output.is_success() {
            ctx.runtime_mut().report(&ReleaseWarning::CommitFailed {
                command: rendered,
                stderr: output.stderr,
            });
        }

        let version = ctx.current_version()?;
        if !version.is_snapshot() {
            self.tag(ctx, &version.to_string())?;
        }

        if ctx.no_push() {
            ctx.runtime_mut()
                .info("Not pushing source changes to the remote repository");
        } else {
            let push = ctx.runtime().command(Setting::PushSourceRepository)?;
            let output = ctx.runtime_mut().run(&push, Some(&base))?;
            ensure_success(&output, "pushing source changes failed")?;
        }
        Ok(())
    }

    fn tag(&mut self, ctx: &mut SequenceExecutionContext<'_>, version: &str) -> Result<()> {
        let template = ctx
            .runtime()
            .get(Setting::ReleaseTag)
            .unwrap_or(DEFAULT_TAG_TEMPLATE)
            .to_string();
        let tag = ctx
            .runtime()
            .render_with(&template, &[("current.version", version)])?;

        let command = ctx.runtime().command(Setting::TagSourceRepository)?;
        let rendered = ctx
            .runtime()
            .render_with(&command, &[("current.version", version), ("tag", tag.as_str())])?;

        let base = ctx.project().base_directory().to_path_buf();
        let output = ctx.runtime_mut().run_rendered(&rendered, Some(&base))?;
        ensure_success(&output, &format!("tagging {} failed", tag))?;

        ctx.set_attribute(TAG_ATTRIBUTE, tag);
        Ok(())
    }
}

impl Sequence for PublishSequence {
    fn name(&self) -> &str {
        "publish"
    }

    fn execute(&mut self, ctx: &mut SequenceExecutionContext<'_>) -> Result<bool> {
        self.state_changed = false;
        self.publish_artifacts(ctx)?;
        self.publish_source(ctx)?;
        Ok(self.state_changed)
    }

    fn undo(&mut self, _ctx: &mut SequenceExecutionContext<'_>) -> Result<bool> {
        undo_unsupported(self.name(), self.state_changed)
    }

    fn did_execute_change_state(&self) -> bool {
        self.state_changed
    }
}
