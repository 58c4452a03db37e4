use crate::error::MutationError;
use crate::flow::{FlowDocument, START_STEP_ID, Step, StepKind, StepOption};

pub mod diff;
pub mod ids;
pub mod session;

pub use diff::*;
pub use ids::*;
pub use session::*;

/// Structural edit operations over a [`FlowDocument`].
///
/// Every operation is a functional update: it takes the document by
/// reference and returns a fresh value, leaving the input untouched. That
/// keeps a pre-edit snapshot stable for [`diff::analyze`] and makes
/// undo/redo a matter of keeping old values around. The only internal state
/// is the id generator used by [`add_step`](GraphMutator::add_step).
pub struct GraphMutator {
    ids: Box<dyn StepIdGenerator>,
}

impl std::fmt::Debug for GraphMutator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphMutator").finish_non_exhaustive()
    }
}

impl GraphMutator {
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(SequentialIds::new()))
    }

    pub fn with_id_generator(ids: Box<dyn StepIdGenerator>) -> Self {
        Self { ids }
    }

    /// Appends a new empty linear step under a freshly generated unique id.
    /// Always succeeds; the new step is the last element of the result.
    pub fn add_step(&mut self, doc: &FlowDocument) -> FlowDocument {
        let mut id = self.ids.next_id();
        while doc.step(&id).is_some() {
            id = self.ids.next_id();
        }
        let mut out = doc.clone();
        out.steps.push(Step::new(id));
        out
    }

    /// Removes a step, then blanks every `next` pointer and option
    /// destination that referenced it, so no dangling references survive.
    ///
    /// The start step and the last remaining step are guarded.
    pub fn remove_step(
        &self,
        doc: &FlowDocument,
        step_id: &str,
    ) -> Result<FlowDocument, MutationError> {
        if step_id == START_STEP_ID {
            return Err(MutationError::GuardedStartDeletion);
        }
        if doc.steps.len() <= 1 {
            return Err(MutationError::GuardedLastStepDeletion);
        }
        if doc.step(step_id).is_none() {
            return Err(MutationError::StepNotFound(step_id.to_string()));
        }

        let mut out = doc.clone();
        out.steps.retain(|step| step.id != step_id);
        for step in &mut out.steps {
            if step.next == step_id {
                step.next.clear();
            }
            for option in &mut step.options {
                if option.next_step_id == step_id {
                    option.next_step_id.clear();
                }
            }
        }
        Ok(out)
    }

    /// Merges the set fields of `patch` into the identified step. An unknown
    /// step id is a caller error, surfaced rather than silently ignored.
    pub fn update_step(
        &self,
        doc: &FlowDocument,
        step_id: &str,
        patch: &StepPatch,
    ) -> Result<FlowDocument, MutationError> {
        self.with_step(doc, step_id, |step| patch.apply_to(step))
    }

    pub fn add_option(
        &self,
        doc: &FlowDocument,
        step_id: &str,
        option: StepOption,
    ) -> Result<FlowDocument, MutationError> {
        self.with_step(doc, step_id, |step| step.options.push(option))
    }

    /// Bounds-checked removal: an out-of-range index leaves the step as-is.
    pub fn remove_option(
        &self,
        doc: &FlowDocument,
        step_id: &str,
        index: usize,
    ) -> Result<FlowDocument, MutationError> {
        self.with_step(doc, step_id, |step| {
            if index < step.options.len() {
                step.options.remove(index);
            }
        })
    }

    pub fn add_checklist_item(
        &self,
        doc: &FlowDocument,
        step_id: &str,
        text: impl Into<String>,
    ) -> Result<FlowDocument, MutationError> {
        let text = text.into();
        self.with_step(doc, step_id, |step| step.checklist.push(text))
    }

    /// Bounds-checked removal: an out-of-range index leaves the step as-is.
    pub fn remove_checklist_item(
        &self,
        doc: &FlowDocument,
        step_id: &str,
        index: usize,
    ) -> Result<FlowDocument, MutationError> {
        self.with_step(doc, step_id, |step| {
            if index < step.checklist.len() {
                step.checklist.remove(index);
            }
        })
    }

    /// Appends a trigger keyword. Duplicates are permitted.
    pub fn add_trigger_keyword(&self, doc: &FlowDocument, text: impl Into<String>) -> FlowDocument {
        let mut out = doc.clone();
        out.trigger_keywords.push(text.into());
        out
    }

    /// Bounds-checked removal: an out-of-range index is a no-op.
    pub fn remove_trigger_keyword(&self, doc: &FlowDocument, index: usize) -> FlowDocument {
        let mut out = doc.clone();
        if index < out.trigger_keywords.len() {
            out.trigger_keywords.remove(index);
        }
        out
    }

    fn with_step<F>(
        &self,
        doc: &FlowDocument,
        step_id: &str,
        edit: F,
    ) -> Result<FlowDocument, MutationError>
    where
        F: FnOnce(&mut Step),
    {
        let mut out = doc.clone();
        let step = out
            .steps
            .iter_mut()
            .find(|step| step.id == step_id)
            .ok_or_else(|| MutationError::StepNotFound(step_id.to_string()))?;
        edit(step);
        Ok(out)
    }
}

impl Default for GraphMutator {
    fn default() -> Self {
        Self::new()
    }
}

/// A partial update for [`GraphMutator::update_step`]; only the set fields
/// are merged into the step.
#[derive(Debug, Clone, Default)]
pub struct StepPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub message: Option<String>,
    pub kind: Option<StepKind>,
    pub condition: Option<String>,
    pub image_url: Option<String>,
    pub next: Option<String>,
}

impl StepPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn kind(mut self, kind: StepKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    fn apply_to(&self, step: &mut Step) {
        if let Some(title) = &self.title {
            step.title = title.clone();
        }
        if let Some(description) = &self.description {
            step.description = description.clone();
        }
        if let Some(message) = &self.message {
            step.message = message.clone();
        }
        if let Some(kind) = self.kind {
            step.kind = kind;
        }
        if let Some(condition) = &self.condition {
            step.condition = condition.clone();
        }
        if let Some(image_url) = &self.image_url {
            step.image_url = image_url.clone();
        }
        if let Some(next) = &self.next {
            step.next = next.clone();
        }
    }
}
