//! # Tejun - Troubleshooting Flow Engine
//!
//! **Tejun** (手順, "procedure") is an engine for guided troubleshooting
//! flows: directed step graphs authored by operators, structurally mutated
//! with referential-integrity guarantees, diffed between saved versions for
//! audit purposes, and executed by a runtime that gates progression on
//! checklist completion, supports branching, and allows back-navigation and
//! reset.
//!
//! ## Core Workflow
//!
//! An authoring session moves through four stages, all synchronous and pure
//! with respect to shared state:
//!
//! 1.  **Load or create**: hydrate a [`FlowDocument`](flow::FlowDocument)
//!     through a [`FlowStore`](store::FlowStore), or seed a fresh one with
//!     its default start step.
//! 2.  **Mutate**: apply [`GraphMutator`](editor::GraphMutator) operations.
//!     Each edit returns a new document value; removing a step cascades into
//!     every reference to it, so the graph never holds dangling pointers.
//! 3.  **Preview**: walk the in-memory draft with an
//!     [`ExecutionEngine`](runtime::ExecutionEngine) exactly as an operator
//!     would at run time.
//! 4.  **Analyze and commit**: summarize the edit with
//!     [`editor::analyze`] (added/modified/deleted counts shown before the
//!     save), then persist the draft as a full replacement.
//!
//! [`EditingSession`](editor::EditingSession) ties the four stages together
//! for callers that want the whole lifecycle behind one type.
//!
//! ## Quick Start
//!
//! ```rust
//! use tejun::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut mutator = GraphMutator::new();
//!     let mut doc = FlowDocument::new("engine_stall");
//!     doc.title = "Engine stall".to_string();
//!
//!     // Grow the graph: start -> inspect -> done.
//!     doc = mutator.add_step(&doc); // step_1
//!     doc = mutator.add_step(&doc); // step_2
//!     doc = mutator.update_step(
//!         &doc,
//!         START_STEP_ID,
//!         &StepPatch::new()
//!             .message("Stop the machine and secure the area.")
//!             .next("step_1"),
//!     )?;
//!     doc = mutator.update_step(
//!         &doc,
//!         "step_1",
//!         &StepPatch::new()
//!             .title("Inspect the fuel line")
//!             .message("Check the fuel line for leaks before restarting.")
//!             .next("step_2"),
//!     )?;
//!     doc = mutator.add_checklist_item(&doc, "step_1", "Fuel valve closed")?;
//!     doc = mutator.update_step(&doc, "step_2", &StepPatch::new().kind(StepKind::End))?;
//!     validate(&doc)?;
//!
//!     // Walk the draft the way an operator would.
//!     let engine = ExecutionEngine::new(&doc);
//!     let state = engine.start(START_STEP_ID);
//!     let state = engine.advance(&state)?;
//!     assert_eq!(state.current_step_id, "step_1");
//!
//!     // The checklist gates progression until every item is ticked.
//!     assert!(engine.advance(&state).is_err());
//!     let state = engine.toggle_checklist_item(&state, 0);
//!     let state = engine.advance(&state)?;
//!     assert_eq!(state.current_step_id, "step_2");
//!
//!     Ok(())
//! }
//! ```

pub mod editor;
pub mod error;
pub mod flow;
pub mod prelude;
pub mod runtime;
pub mod store;
