//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the tejun crate. Import
//! this module to get access to the core functionality without having to
//! import each type individually.
//!
//! # Example
//!
//! ```rust
//! use tejun::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let mut mutator = GraphMutator::new();
//! let mut doc = FlowDocument::new("brake_failure");
//! doc.title = "Brake failure".to_string();
//!
//! doc = mutator.add_step(&doc);
//! validate(&doc)?;
//! # Ok(())
//! # }
//! ```

// Document model and validation
pub use crate::flow::{
    FlowDocument, START_STEP_ID, Step, StepKind, StepOption, validate, validate_for_save, wire,
};

// Editing: mutation, diffing and the authoring session
pub use crate::editor::{
    ChangeSummary, EditingSession, GraphMutator, SequentialIds, StepIdGenerator, StepPatch, analyze,
};

// Preview/run runtime
pub use crate::runtime::{DEFAULT_HISTORY_LIMIT, ExecutionEngine, ExecutionState};

// Persistence boundary
pub use crate::store::{DirectoryStore, FlowStore, MemoryStore};

// Error types
pub use crate::error::{
    ExecutionError, MutationError, SessionError, StoreError, ValidationError, WireError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
