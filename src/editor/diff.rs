use crate::flow::FlowDocument;
use ahash::AHashSet;
use std::cmp::Ordering;

/// Coarse audit summary of an edit, shown to the operator before a save is
/// committed so accidental large-scale deletions are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
}

impl ChangeSummary {
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.modified == 0 && self.deleted == 0
    }
}

/// Computes the added/modified/deleted summary between a pre-edit snapshot
/// and the edited document.
///
/// A replaced step registers both in the count delta and in the id-based
/// add/delete passes, so totals can over-count. That coarseness is kept on
/// purpose: the confirmation prompt should over-report changes, never
/// under-report them.
pub fn analyze(original: &FlowDocument, edited: &FlowDocument) -> ChangeSummary {
    let mut summary = ChangeSummary::default();

    if original.title != edited.title {
        summary.modified += 1;
    }
    if original.description != edited.description {
        summary.modified += 1;
    }

    // Keyword lists are compared by length first; only equal-length lists
    // with differing content count as a single modification. Per-keyword
    // diffing is deliberately not performed.
    match edited.trigger_keywords.len().cmp(&original.trigger_keywords.len()) {
        Ordering::Greater => {
            summary.added += edited.trigger_keywords.len() - original.trigger_keywords.len();
        }
        Ordering::Less => {
            summary.deleted += original.trigger_keywords.len() - edited.trigger_keywords.len();
        }
        Ordering::Equal => {
            if original.trigger_keywords != edited.trigger_keywords {
                summary.modified += 1;
            }
        }
    }

    match edited.steps.len().cmp(&original.steps.len()) {
        Ordering::Greater => summary.added += edited.steps.len() - original.steps.len(),
        Ordering::Less => summary.deleted += original.steps.len() - edited.steps.len(),
        Ordering::Equal => {}
    }

    let original_ids: AHashSet<&str> = original.step_ids().collect();
    let edited_ids: AHashSet<&str> = edited.step_ids().collect();

    summary.added += edited
        .step_ids()
        .filter(|id| !original_ids.contains(id))
        .count();
    summary.deleted += original
        .step_ids()
        .filter(|id| !edited_ids.contains(id))
        .count();

    // Steps present on both sides: each differing field group counts
    // independently, so one step can contribute several modifications.
    for step in &original.steps {
        let Some(other) = edited.step(&step.id) else {
            continue;
        };
        if step.message != other.message {
            summary.modified += 1;
        }
        if step.next != other.next {
            summary.modified += 1;
        }
        if step.checklist != other.checklist {
            summary.modified += 1;
        }
        if step.options != other.options {
            summary.modified += 1;
        }
    }

    summary
}
