//! End-to-end tests for the authoring session lifecycle:
//! load -> mutate -> preview -> analyze -> commit.
mod common;
use common::*;
use tejun::prelude::*;

#[test]
fn create_edit_and_commit_a_new_flow() {
    let mut session = EditingSession::create(MemoryStore::new(), "brake_noise");
    session.set_title("Brake noise");
    session.set_description("Grinding noise when braking.");
    session.add_trigger_keyword("brake");

    let inspect = session.add_step();
    session
        .update_step(
            START_STEP_ID,
            &StepPatch::new()
                .message("Stop the vehicle safely.")
                .next(inspect.clone()),
        )
        .unwrap();
    session
        .update_step(
            &inspect,
            &StepPatch::new()
                .title("Inspect pads")
                .message("Check pad thickness.")
                .kind(StepKind::End),
        )
        .unwrap();

    // New drafts report no pending changes and save without confirmation.
    assert!(session.pending_changes().is_empty());

    let committed = session.commit().unwrap();
    assert_eq!(committed.steps.len(), 2);
    // After commit the persisted value is the new comparison baseline.
    assert!(session.pending_changes().is_empty());
}

#[test]
fn commit_rejects_blank_identity_fields() {
    let mut session = EditingSession::create(MemoryStore::new(), "untitled");
    assert_eq!(
        session.commit(),
        Err(SessionError::Validation(ValidationError::BlankField(
            "title"
        )))
    );

    let mut session = EditingSession::create(MemoryStore::new(), "  ");
    session.set_title("Named");
    assert_eq!(
        session.commit(),
        Err(SessionError::Validation(ValidationError::BlankField("id")))
    );
}

#[test]
fn open_edit_analyze_commit_cycle() {
    let mut store = MemoryStore::new();
    store.save("linear_flow", &linear_flow()).unwrap();

    let mut session = EditingSession::open(store, "linear_flow").unwrap();
    assert!(session.pending_changes().is_empty());

    let added = session.add_step();
    session
        .update_step(
            &added,
            &StepPatch::new().title("Extra check").kind(StepKind::End),
        )
        .unwrap();
    session
        .update_step("inspect", &StepPatch::new().message("Inspect thoroughly."))
        .unwrap();

    let summary = session.pending_changes();
    assert!(summary.added >= 1);
    assert!(summary.modified >= 1);

    let committed = session.commit().unwrap();
    assert_eq!(committed.steps.len(), 4);
    assert!(session.pending_changes().is_empty());
}

#[test]
fn opening_a_missing_flow_fails_with_not_found() {
    let err = EditingSession::open(MemoryStore::new(), "ghost").unwrap_err();
    assert_eq!(
        err,
        SessionError::Store(StoreError::NotFound("ghost".to_string()))
    );
}

#[test]
fn preview_runs_against_the_unsaved_draft() {
    let mut store = MemoryStore::new();
    store.save("branching_flow", &branching_flow()).unwrap();
    let mut session = EditingSession::open(store, "branching_flow").unwrap();

    // Edit the draft without committing; the preview must see the edit.
    session
        .update_step("restart", &StepPatch::new().message("Power-cycle the unit."))
        .unwrap();

    let engine = session.preview();
    let state = engine.start(START_STEP_ID);
    let state = engine.select_option(&state, "restart").unwrap();
    let step = engine.current_step(&state).unwrap();
    assert_eq!(step.message, "Power-cycle the unit.");
}

#[test]
fn failed_mutations_leave_the_draft_untouched() {
    let mut store = MemoryStore::new();
    store.save("linear_flow", &linear_flow()).unwrap();
    let mut session = EditingSession::open(store, "linear_flow").unwrap();

    assert_eq!(
        session.remove_step("start"),
        Err(MutationError::GuardedStartDeletion)
    );
    assert_eq!(session.draft(), &linear_flow());
    assert!(session.pending_changes().is_empty());
}

#[test]
fn committed_document_round_trips_through_the_wire_format() {
    let mut session = EditingSession::create(MemoryStore::new(), "wire_check");
    session.set_title("Wire check");
    let second = session.add_step();
    session
        .update_step(
            START_STEP_ID,
            &StepPatch::new().message("First."),
        )
        .unwrap();
    session
        .add_option(
            START_STEP_ID,
            StepOption::new("Continue", second.clone()).with_condition_type("yes"),
        )
        .unwrap();
    session.add_checklist_item(&second, "Confirmed").unwrap();
    session
        .update_step(&second, &StepPatch::new().kind(StepKind::End))
        .unwrap();

    let committed = session.commit().unwrap();

    // The committed value came back through save -> load, i.e. through the
    // wire encoding and its normalization.
    assert_eq!(committed.steps[0].options[0].condition_type, "yes");
    assert_eq!(committed.step(&second).unwrap().checklist, vec!["Confirmed"]);
    assert_eq!(committed.steps[0].description, committed.steps[0].message);
}
