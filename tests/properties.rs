//! Property-based tests: random edit sequences never break the structural
//! invariants of a flow document.
use proptest::prelude::*;
use tejun::prelude::*;

/// One randomly chosen edit. Step/option targets are drawn as raw indices
/// and resolved against the current document, so sequences stay meaningful
/// as the graph grows and shrinks.
#[derive(Debug, Clone)]
enum Edit {
    AddStep,
    RemoveStep(usize),
    SetNext { step: usize, target: usize },
    AddOption { step: usize, target: usize },
    RemoveOption { step: usize, index: usize },
    AddChecklistItem(usize),
    RemoveChecklistItem { step: usize, index: usize },
    AddKeyword(String),
    RemoveKeyword(usize),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        Just(Edit::AddStep),
        (0..8usize).prop_map(Edit::RemoveStep),
        (0..8usize, 0..9usize).prop_map(|(step, target)| Edit::SetNext { step, target }),
        (0..8usize, 0..9usize).prop_map(|(step, target)| Edit::AddOption { step, target }),
        (0..8usize, 0..4usize).prop_map(|(step, index)| Edit::RemoveOption { step, index }),
        (0..8usize).prop_map(Edit::AddChecklistItem),
        (0..8usize, 0..4usize).prop_map(|(step, index)| Edit::RemoveChecklistItem { step, index }),
        "[a-z]{1,8}".prop_map(Edit::AddKeyword),
        (0..8usize).prop_map(Edit::RemoveKeyword),
    ]
}

fn step_id(doc: &FlowDocument, index: usize) -> String {
    doc.steps[index % doc.steps.len()].id.clone()
}

/// Resolves a target index to an existing step id, or to the empty string
/// (a legal "no destination"), exercising invariant 3 from both sides.
fn target_id(doc: &FlowDocument, index: usize) -> String {
    if index % (doc.steps.len() + 1) == doc.steps.len() {
        String::new()
    } else {
        step_id(doc, index)
    }
}

fn apply(mutator: &mut GraphMutator, doc: &FlowDocument, edit: &Edit) -> FlowDocument {
    match edit {
        Edit::AddStep => mutator.add_step(doc),
        Edit::RemoveStep(index) => {
            let id = step_id(doc, *index);
            match mutator.remove_step(doc, &id) {
                Ok(out) => out,
                // Guarded deletions must leave the document unchanged.
                Err(_) => doc.clone(),
            }
        }
        Edit::SetNext { step, target } => {
            let id = step_id(doc, *step);
            let next = target_id(doc, *target);
            mutator
                .update_step(doc, &id, &StepPatch::new().next(next))
                .expect("step id was resolved against the document")
        }
        Edit::AddOption { step, target } => {
            let id = step_id(doc, *step);
            let option = StepOption::new("choice", target_id(doc, *target));
            mutator
                .add_option(doc, &id, option)
                .expect("step id was resolved against the document")
        }
        Edit::RemoveOption { step, index } => {
            let id = step_id(doc, *step);
            mutator
                .remove_option(doc, &id, *index)
                .expect("step id was resolved against the document")
        }
        Edit::AddChecklistItem(step) => {
            let id = step_id(doc, *step);
            mutator
                .add_checklist_item(doc, &id, "item")
                .expect("step id was resolved against the document")
        }
        Edit::RemoveChecklistItem { step, index } => {
            let id = step_id(doc, *step);
            mutator
                .remove_checklist_item(doc, &id, *index)
                .expect("step id was resolved against the document")
        }
        Edit::AddKeyword(text) => mutator.add_trigger_keyword(doc, text.clone()),
        Edit::RemoveKeyword(index) => mutator.remove_trigger_keyword(doc, *index),
    }
}

proptest! {
    #[test]
    fn random_edit_sequences_preserve_invariants(edits in prop::collection::vec(edit_strategy(), 1..40)) {
        let mut mutator = GraphMutator::new();
        let mut doc = FlowDocument::new("prop_flow");

        for edit in &edits {
            let next = apply(&mut mutator, &doc, edit);
            prop_assert!(
                validate(&next).is_ok(),
                "invariant broken by {:?}: {:?}",
                edit,
                validate(&next)
            );
            doc = next;
        }

        // The start step survives every sequence.
        prop_assert!(doc.step(START_STEP_ID).is_some());
        prop_assert!(!doc.steps.is_empty());
    }

    #[test]
    fn removal_cascade_leaves_no_dangling_references(target in 0..8usize, edits in prop::collection::vec(edit_strategy(), 1..20)) {
        let mut mutator = GraphMutator::new();
        let mut doc = FlowDocument::new("prop_flow");
        for edit in &edits {
            doc = apply(&mut mutator, &doc, edit);
        }

        let id = step_id(&doc, target);
        if let Ok(out) = mutator.remove_step(&doc, &id) {
            prop_assert!(out.step(&id).is_none());
            for step in &out.steps {
                prop_assert_ne!(&step.next, &id);
                for option in &step.options {
                    prop_assert_ne!(&option.next_step_id, &id);
                }
            }
            prop_assert!(validate(&out).is_ok());
        } else {
            // Guarded: document unchanged.
            prop_assert!(doc.step(&id).is_some());
        }
    }
}
