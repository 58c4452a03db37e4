/// Source of ids for newly created steps.
///
/// Deriving step ids from wall-clock timestamps makes edit histories
/// impossible to reproduce in tests, so the generator is injectable;
/// [`SequentialIds`] is the default.
pub trait StepIdGenerator {
    /// Produces the next candidate id. The mutator re-draws on collision
    /// with an existing step id, so candidates need not be globally unique.
    fn next_id(&mut self) -> String;
}

/// Monotonic `step_1`, `step_2`, ... ids.
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts counting above an existing document's `step_N` ids so freshly
    /// generated ids do not collide with loaded ones on the first draw.
    pub fn starting_after(doc: &crate::flow::FlowDocument) -> Self {
        let counter = doc
            .step_ids()
            .filter_map(|id| id.strip_prefix("step_"))
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self { counter }
    }
}

impl StepIdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("step_{}", self.counter)
    }
}
