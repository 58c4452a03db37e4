use crate::error::ValidationError;
use crate::flow::document::{FlowDocument, START_STEP_ID};
use ahash::AHashSet;
use itertools::Itertools;

/// Verifies the structural invariants of a flow document:
///
/// 1. a step with id `"start"` exists,
/// 2. step ids are unique,
/// 3. every `next` / `next_step_id` is empty or names a present step,
/// 4. at least one step exists.
///
/// Validation is advisory while editing (the UI may hold transient invalid
/// states); [`validate_for_save`] is the hard precondition before a commit.
pub fn validate(doc: &FlowDocument) -> Result<(), ValidationError> {
    if doc.steps.is_empty() {
        return Err(ValidationError::NoSteps);
    }

    if let Some(dup) = doc.step_ids().duplicates().next() {
        return Err(ValidationError::DuplicateStepId(dup.to_string()));
    }

    if doc.step(START_STEP_ID).is_none() {
        return Err(ValidationError::MissingStartStep);
    }

    let known: AHashSet<&str> = doc.step_ids().collect();
    for step in &doc.steps {
        if !step.next.is_empty() && !known.contains(step.next.as_str()) {
            return Err(ValidationError::DanglingReference {
                step_id: step.id.clone(),
                target: step.next.clone(),
            });
        }
        for option in &step.options {
            if !option.next_step_id.is_empty() && !known.contains(option.next_step_id.as_str()) {
                return Err(ValidationError::DanglingReference {
                    step_id: step.id.clone(),
                    target: option.next_step_id.clone(),
                });
            }
        }
    }

    Ok(())
}

/// The hard precondition before a save is committed: the structural
/// invariants plus non-blank identity fields, each rejection naming the
/// offending field.
pub fn validate_for_save(doc: &FlowDocument) -> Result<(), ValidationError> {
    if doc.id.trim().is_empty() {
        return Err(ValidationError::BlankField("id"));
    }
    if doc.title.trim().is_empty() {
        return Err(ValidationError::BlankField("title"));
    }
    validate(doc)
}
