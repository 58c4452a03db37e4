use thiserror::Error;

/// Errors raised when a flow document violates its structural invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required field '{0}' is blank")]
    BlankField(&'static str),

    #[error("a flow document must contain at least one step")]
    NoSteps,

    #[error("no step with id 'start' exists in the document")]
    MissingStartStep,

    #[error("step id '{0}' appears more than once")]
    DuplicateStepId(String),

    #[error("step '{step_id}' references '{target}', which is not a step in the document")]
    DanglingReference { step_id: String, target: String },

    #[error("step '{step_id}' carries an unrecognized kind tag: '{kind}'")]
    UnrecognizedKind { step_id: String, kind: String },
}

/// Errors raised by structural edit operations on a flow document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("the start step cannot be removed")]
    GuardedStartDeletion,

    #[error("the last remaining step cannot be removed")]
    GuardedLastStepDeletion,

    #[error("step '{0}' does not exist in this document")]
    StepNotFound(String),
}

/// Errors raised while traversing a flow document at preview/run time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("step '{step_id}' still has {unchecked} unchecked checklist item(s)")]
    BlockedByChecklist { step_id: String, unchecked: usize },

    #[error("transition target '{0}' is not a step in this document")]
    UndefinedStep(String),

    #[error("the traversal history limit of {0} entries was exceeded")]
    TraversalLimitExceeded(usize),
}

/// Errors raised when decoding a persisted document at the wire boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("failed to parse flow document JSON: {0}")]
    Json(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors raised by a [`FlowStore`](crate::store::FlowStore) implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no flow document exists for id '{0}'")]
    NotFound(String),

    #[error("could not access flow storage: {0}")]
    Io(String),

    #[error(transparent)]
    Wire(#[from] WireError),
}

/// Umbrella error for an editing session, covering every boundary a
/// load/mutate/commit cycle can fail at.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
