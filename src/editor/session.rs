use crate::editor::diff::{ChangeSummary, analyze};
use crate::editor::{GraphMutator, StepPatch};
use crate::error::{MutationError, SessionError};
use crate::flow::{FlowDocument, StepOption, validate_for_save};
use crate::runtime::ExecutionEngine;
use crate::store::FlowStore;
use tracing::{debug, warn};

/// One authoring session over a single flow document.
///
/// The session owns the draft exclusively: it loads a document (or seeds a
/// new one), funnels every edit through a [`GraphMutator`], can hand out a
/// live preview engine over the draft, summarizes pending changes against
/// the originally loaded snapshot, and commits the draft as a full
/// replacement. Dropping the session discards the draft.
#[derive(Debug)]
pub struct EditingSession<S: FlowStore> {
    store: S,
    original: Option<FlowDocument>,
    draft: FlowDocument,
    mutator: GraphMutator,
}

impl<S: FlowStore> EditingSession<S> {
    /// Opens an existing document for editing. The loaded value is kept as
    /// the comparison snapshot for [`pending_changes`](Self::pending_changes).
    pub fn open(store: S, flow_id: &str) -> Result<Self, SessionError> {
        let original = store.load(flow_id)?;
        Ok(Self {
            store,
            draft: original.clone(),
            original: Some(original),
            mutator: GraphMutator::new(),
        })
    }

    /// Starts a brand-new draft, seeded with the default start step. Nothing
    /// is persisted until [`commit`](Self::commit).
    pub fn create(store: S, flow_id: &str) -> Self {
        Self {
            store,
            original: None,
            draft: FlowDocument::new(flow_id),
            mutator: GraphMutator::new(),
        }
    }

    pub fn with_mutator(mut self, mutator: GraphMutator) -> Self {
        self.mutator = mutator;
        self
    }

    pub fn draft(&self) -> &FlowDocument {
        &self.draft
    }

    /// The snapshot loaded at session start; `None` for a new draft.
    pub fn original(&self) -> Option<&FlowDocument> {
        self.original.as_ref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    /// Appends a new step and returns its generated id.
    pub fn add_step(&mut self) -> String {
        self.draft = self.mutator.add_step(&self.draft);
        self.draft
            .steps
            .last()
            .map(|step| step.id.clone())
            .unwrap_or_default()
    }

    pub fn remove_step(&mut self, step_id: &str) -> Result<(), MutationError> {
        self.draft = self.mutator.remove_step(&self.draft, step_id)?;
        Ok(())
    }

    pub fn update_step(&mut self, step_id: &str, patch: &StepPatch) -> Result<(), MutationError> {
        self.draft = self.mutator.update_step(&self.draft, step_id, patch)?;
        Ok(())
    }

    pub fn add_option(&mut self, step_id: &str, option: StepOption) -> Result<(), MutationError> {
        self.draft = self.mutator.add_option(&self.draft, step_id, option)?;
        Ok(())
    }

    pub fn remove_option(&mut self, step_id: &str, index: usize) -> Result<(), MutationError> {
        self.draft = self.mutator.remove_option(&self.draft, step_id, index)?;
        Ok(())
    }

    pub fn add_checklist_item(
        &mut self,
        step_id: &str,
        text: impl Into<String>,
    ) -> Result<(), MutationError> {
        self.draft = self.mutator.add_checklist_item(&self.draft, step_id, text)?;
        Ok(())
    }

    pub fn remove_checklist_item(
        &mut self,
        step_id: &str,
        index: usize,
    ) -> Result<(), MutationError> {
        self.draft = self
            .mutator
            .remove_checklist_item(&self.draft, step_id, index)?;
        Ok(())
    }

    pub fn add_trigger_keyword(&mut self, text: impl Into<String>) {
        self.draft = self.mutator.add_trigger_keyword(&self.draft, text);
    }

    pub fn remove_trigger_keyword(&mut self, index: usize) {
        self.draft = self.mutator.remove_trigger_keyword(&self.draft, index);
    }

    /// Summarizes the draft against the loaded snapshot. A brand-new draft
    /// has no snapshot to compare with and reports no changes; new documents
    /// are saved without a confirmation prompt.
    pub fn pending_changes(&self) -> ChangeSummary {
        match &self.original {
            Some(original) => analyze(original, &self.draft),
            None => ChangeSummary::default(),
        }
    }

    /// A live preview engine over the current draft.
    pub fn preview(&self) -> ExecutionEngine<'_> {
        ExecutionEngine::new(&self.draft)
    }

    /// Validates and persists the draft as a full replacement, then
    /// re-fetches it to confirm durability. If the re-fetch fails, the
    /// just-saved in-memory value is used as the new baseline instead of
    /// treating the verification as fatal.
    ///
    /// Returns the effective document, which also becomes the snapshot for
    /// subsequent [`pending_changes`](Self::pending_changes) calls.
    pub fn commit(&mut self) -> Result<FlowDocument, SessionError> {
        validate_for_save(&self.draft)?;
        self.store.save(&self.draft.id, &self.draft)?;
        debug!(flow_id = %self.draft.id, steps = self.draft.steps.len(), "flow draft saved");

        let effective = match self.store.load(&self.draft.id) {
            Ok(persisted) => {
                if persisted != self.draft {
                    warn!(flow_id = %self.draft.id, "persisted document differs from draft after save");
                }
                persisted
            }
            Err(err) => {
                warn!(flow_id = %self.draft.id, error = %err, "read-after-write verification failed, keeping in-memory value");
                self.draft.clone()
            }
        };

        self.original = Some(effective.clone());
        self.draft = effective.clone();
        Ok(effective)
    }
}
