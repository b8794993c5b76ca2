use crate::domain::ReleaseMode;
use crate::error::Result;
use crate::project::Project;
use crate::runtime::Runtime;
use crate::sequence::{
    BuildSequence, CompletionSequence, InstallSequence, Method, PublishSequence,
    QualificationSequence, Sequence, SequenceExecutionContext, SequenceOperation, SharedHistory,
};

/// Switches that shape one release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOptions {
    pub mode: ReleaseMode,
    /// Never push to remote repositories
    pub no_push: bool,
    /// Leave the install step out of the pipeline
    pub no_install: bool,
}

impl ReleaseOptions {
    pub fn new(mode: ReleaseMode) -> Self {
        ReleaseOptions {
            mode,
            no_push: false,
            no_install: false,
        }
    }
}

/// Where the controller is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Executing,
    Completed,
    Failed,
}

/// Runs the pipeline steps in order and reverts them on request.
///
/// Every execute and undo call is recorded in the shared history, including
/// the failing one.
pub struct SequenceController {
    options: ReleaseOptions,
    sequences: Vec<Box<dyn Sequence>>,
    history: SharedHistory,
    state: ControllerState,
}

impl SequenceController {
    /// The release pipeline: qualification, build, publish, install, completion
    pub fn standard(options: ReleaseOptions) -> Self {
        let mut sequences: Vec<Box<dyn Sequence>> = vec![
            Box::new(QualificationSequence::new()),
            Box::new(BuildSequence::new()),
            Box::new(PublishSequence::new()),
        ];
        if !options.no_install {
            sequences.push(Box::new(InstallSequence::new()));
        }
        sequences.push(Box::new(CompletionSequence::new()));

        Self::with_sequences(options, sequences)
    }

    pub fn with_sequences(options: ReleaseOptions, sequences: Vec<Box<dyn Sequence>>) -> Self {
        SequenceController {
            options,
            sequences,
            history: SharedHistory::default(),
            state: ControllerState::Idle,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn history(&self) -> SharedHistory {
        SharedHistory::clone(&self.history)
    }

    pub fn sequence_names(&self) -> Vec<String> {
        self.sequences.iter().map(|s| s.name().to_string()).collect()
    }

    /// Execute every step in order, stopping at the first failure.
    ///
    /// The failing step's error is returned unchanged; later steps are not run.
    pub fn execute(&mut self, runtime: &mut Runtime, project: &mut dyn Project) -> Result<()> {
        let mut ctx = self.context(runtime, project)?;
        self.state = ControllerState::Executing;

        for sequence in self.sequences.iter_mut() {
            let name = sequence.name().to_string();
            log::info!("Executing {}", name);

            match sequence.execute(&mut ctx) {
                Ok(changed) => {
                    self.history
                        .borrow_mut()
                        .record(SequenceOperation::new(Method::Execute, name, true, changed));
                }
                Err(e) => {
                    self.history
                        .borrow_mut()
                        .record(SequenceOperation::new(Method::Execute, name, false, false));
                    self.state = ControllerState::Failed;
                    return Err(e);
                }
            }
        }

        self.state = ControllerState::Completed;
        Ok(())
    }

    /// Undo every step in reverse order.
    ///
    /// An undo failure is reported and recorded, and the remaining steps are
    /// still undone. Each step decides for itself whether there is anything
    /// to revert.
    pub fn undo(&mut self, runtime: &mut Runtime, project: &mut dyn Project) -> Result<()> {
        let mut ctx = self.context(runtime, project)?;

        for sequence in self.sequences.iter_mut().rev() {
            let name = sequence.name().to_string();
            log::info!("Undoing {}", name);

            let operation = match sequence.undo(&mut ctx) {
                Ok(changed) => SequenceOperation::new(Method::Undo, name, true, changed),
                Err(e) => {
                    ctx.runtime_mut()
                        .error(&format!("Undo of {} failed: {}", name, e));
                    SequenceOperation::new(Method::Undo, name, false, false)
                }
            };
            self.history.borrow_mut().record(operation);
        }

        Ok(())
    }

    fn context<'a>(
        &self,
        runtime: &'a mut Runtime,
        project: &'a mut dyn Project,
    ) -> Result<SequenceExecutionContext<'a>> {
        SequenceExecutionContext::new(
            runtime,
            project,
            self.options.mode.clone(),
            self.options.no_push,
            SharedHistory::clone(&self.history),
        )
    }
}
