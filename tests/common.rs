//! Common test utilities for building flow documents.
use tejun::prelude::*;

/// A linear flow: start -> inspect -> done(end).
///
/// The inspect step carries a two-item checklist.
#[allow(dead_code)]
pub fn linear_flow() -> FlowDocument {
    let mut doc = FlowDocument::new("linear_flow");
    doc.title = "Linear flow".to_string();
    doc.description = "Three steps in a row.".to_string();
    doc.trigger_keywords = vec!["engine".to_string(), "stall".to_string()];

    let start = &mut doc.steps[0];
    start.message = "Stop the machine.".to_string();
    start.description = start.message.clone();
    start.next = "inspect".to_string();

    let mut inspect = Step::new("inspect");
    inspect.title = "Inspect".to_string();
    inspect.message = "Inspect the fuel line.".to_string();
    inspect.description = inspect.message.clone();
    inspect.checklist = vec!["Valve closed".to_string(), "Area secured".to_string()];
    inspect.next = "done".to_string();
    doc.steps.push(inspect);

    let mut done = Step::new("done");
    done.kind = StepKind::End;
    done.message = "All clear.".to_string();
    done.description = done.message.clone();
    doc.steps.push(done);

    doc
}

/// A branching flow: start(decision) -> restart | escalate(end), where the
/// restart branch loops back to the start.
#[allow(dead_code)]
pub fn branching_flow() -> FlowDocument {
    let mut doc = FlowDocument::new("branching_flow");
    doc.title = "Branching flow".to_string();

    let start = &mut doc.steps[0];
    start.kind = StepKind::Decision;
    start.message = "Did the engine stop suddenly?".to_string();
    start.description = start.message.clone();
    start.options = vec![
        StepOption::new("Yes", "escalate").with_condition_type("yes"),
        StepOption::new("No", "restart").with_condition_type("no"),
    ];

    let mut restart = Step::new("restart");
    restart.message = "Restart the control unit, then re-check.".to_string();
    restart.description = restart.message.clone();
    restart.next = "start".to_string();
    doc.steps.push(restart);

    let mut escalate = Step::new("escalate");
    escalate.kind = StepKind::End;
    escalate.message = "Escalate to maintenance.".to_string();
    escalate.description = escalate.message.clone();
    doc.steps.push(escalate);

    doc
}

/// The cascade fixture from the mutation contract: A points at B via `next`,
/// C points at B via an option.
#[allow(dead_code)]
pub fn cascade_flow() -> FlowDocument {
    let mut doc = FlowDocument::new("cascade_flow");
    doc.title = "Cascade flow".to_string();

    doc.steps[0].next = "b".to_string();

    let b = Step::new("b");
    let mut c = Step::new("c");
    c.kind = StepKind::Decision;
    c.options = vec![StepOption::new("To B", "b")];
    doc.steps.push(b);
    doc.steps.push(c);

    doc
}
