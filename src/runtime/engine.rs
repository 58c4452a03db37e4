use crate::error::ExecutionError;
use crate::flow::{FlowDocument, Step};
use crate::runtime::ExecutionState;

/// Default bound on the visited-step stack. Loops in a flow are a legitimate
/// authoring pattern ("retry this check"), so traversal is bounded instead
/// of cycle-checked; a runaway session fails with
/// [`ExecutionError::TraversalLimitExceeded`] once the bound is hit.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// State machine over a fixed flow document.
///
/// States are step ids; transitions are `next` pointers and option
/// destinations. Every operation takes an [`ExecutionState`] by reference
/// and returns a new one — failed operations leave their input untouched.
pub struct ExecutionEngine<'a> {
    doc: &'a FlowDocument,
    history_limit: usize,
}

impl<'a> ExecutionEngine<'a> {
    pub fn new(doc: &'a FlowDocument) -> Self {
        Self {
            doc,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Begins a session at the given step, conventionally
    /// [`START_STEP_ID`](crate::flow::START_STEP_ID).
    pub fn start(&self, initial_step_id: &str) -> ExecutionState {
        ExecutionState::at(initial_step_id)
    }

    /// Discards all progress and begins again at the given step.
    pub fn reset(&self, initial_step_id: &str) -> ExecutionState {
        self.start(initial_step_id)
    }

    /// The step the session currently sits on, if it exists in the document.
    pub fn current_step(&self, state: &ExecutionState) -> Option<&'a Step> {
        self.doc.step(&state.current_step_id)
    }

    /// Flips one checklist item of the current step.
    pub fn toggle_checklist_item(&self, state: &ExecutionState, index: usize) -> ExecutionState {
        let key = (state.current_step_id.clone(), index);
        let mut next = state.clone();
        if !next.checked.remove(&key) {
            next.checked.insert(key);
        }
        next
    }

    /// Whether the current step's checklist is complete (trivially true for
    /// steps without one). An undefined current step never allows advancing.
    pub fn is_advance_allowed(&self, state: &ExecutionState) -> bool {
        match self.current_step(state) {
            Some(step) => self.unchecked_count(step, state) == 0,
            None => false,
        }
    }

    /// Follows the current step's `next` pointer. Gated on checklist
    /// completion; advancing a terminal step (empty `next`) is a no-op —
    /// callers are expected not to invoke it past a terminal step.
    pub fn advance(&self, state: &ExecutionState) -> Result<ExecutionState, ExecutionError> {
        let step = self
            .current_step(state)
            .ok_or_else(|| ExecutionError::UndefinedStep(state.current_step_id.clone()))?;

        let unchecked = self.unchecked_count(step, state);
        if unchecked > 0 {
            return Err(ExecutionError::BlockedByChecklist {
                step_id: step.id.clone(),
                unchecked,
            });
        }

        if step.next.is_empty() {
            return Ok(state.clone());
        }
        self.push(state, &step.next)
    }

    /// Follows an explicit option choice. Options represent a deliberate
    /// operator decision, so there is no checklist gate. A blank or unknown
    /// destination (possible after a deletion cascade blanked the option)
    /// fails with [`ExecutionError::UndefinedStep`] rather than transitioning
    /// into an undefined step.
    pub fn select_option(
        &self,
        state: &ExecutionState,
        next_step_id: &str,
    ) -> Result<ExecutionState, ExecutionError> {
        if next_step_id.is_empty() || self.doc.step(next_step_id).is_none() {
            return Err(ExecutionError::UndefinedStep(next_step_id.to_string()));
        }
        self.push(state, next_step_id)
    }

    /// Pops back to the previously visited step; a no-op at the first entry.
    pub fn back(&self, state: &ExecutionState) -> ExecutionState {
        if state.history.len() <= 1 {
            return state.clone();
        }
        let mut next = state.clone();
        next.history.pop();
        if let Some(top) = next.history.last() {
            next.current_step_id = top.clone();
        }
        next
    }

    /// Terminal = flagged end step, or a dead end with neither successor nor
    /// options.
    pub fn is_terminal(&self, step: &Step) -> bool {
        step.is_terminal()
    }

    fn push(
        &self,
        state: &ExecutionState,
        next_step_id: &str,
    ) -> Result<ExecutionState, ExecutionError> {
        if state.history.len() >= self.history_limit {
            return Err(ExecutionError::TraversalLimitExceeded(self.history_limit));
        }
        let mut next = state.clone();
        next.current_step_id = next_step_id.to_string();
        next.history.push(next_step_id.to_string());
        Ok(next)
    }

    fn unchecked_count(&self, step: &Step, state: &ExecutionState) -> usize {
        step.checklist
            .iter()
            .enumerate()
            .filter(|(index, _)| !state.is_checked(&step.id, *index))
            .count()
    }
}
