use serde::{Deserialize, Serialize};

/// The id every flow graph is entered through. The step carrying it is
/// seeded on creation and can never be removed.
pub const START_STEP_ID: &str = "start";

/// The persisted step graph for one troubleshooting scenario.
///
/// A document is created empty (one default start step) or hydrated from the
/// wire format, and is mutated exclusively through
/// [`GraphMutator`](crate::editor::GraphMutator) — every edit produces a new
/// document value, so a pre-edit snapshot stays untouched for later
/// comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowDocument {
    pub id: String,
    pub title: String,
    pub description: String,
    pub trigger_keywords: Vec<String>,
    pub steps: Vec<Step>,
}

impl FlowDocument {
    /// Creates a new, empty document seeded with the default start step.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            trigger_keywords: Vec::new(),
            steps: vec![Step::new(START_STEP_ID)],
        }
    }

    /// Looks up a step by id.
    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == step_id)
    }

    pub fn step_ids(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.id.as_str())
    }
}

/// One node in the graph — a screen/instruction shown to an operator.
///
/// `next`, `condition` and `image_url` use the empty string as the
/// "not set" sentinel; the deletion cascade writes `""` into dangling
/// references rather than dropping the field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub options: Vec<StepOption>,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checklist: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub next: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub condition: String,
}

impl Step {
    /// Creates an empty linear step with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            image_url: String::new(),
            kind: StepKind::Step,
            options: Vec::new(),
            message: String::new(),
            checklist: Vec::new(),
            next: String::new(),
            condition: String::new(),
        }
    }

    /// A step is terminal when it is flagged as an end step, or when it has
    /// neither a successor nor any options (a dead end).
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, StepKind::End) || (self.next.is_empty() && self.options.is_empty())
    }

    pub fn has_checklist(&self) -> bool {
        !self.checklist.is_empty()
    }
}

/// The closed set of step kinds.
///
/// Persisted documents carry this as a plain string tag; unrecognized tags
/// are rejected at the ingestion boundary instead of being treated as
/// linear steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// A linear instruction with a single `next` successor.
    Step,
    /// An operator decision; successors are explicit options.
    Decision,
    /// A conditional branch described by the step's `condition` text.
    Condition,
    /// A terminal step, regardless of any leftover `next` or options.
    End,
}

impl StepKind {
    /// Parses a wire-format kind tag.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "step" => Some(StepKind::Step),
            "decision" => Some(StepKind::Decision),
            "condition" => Some(StepKind::Condition),
            "end" => Some(StepKind::End),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Step => "step",
            StepKind::Decision => "decision",
            StepKind::Condition => "condition",
            StepKind::End => "end",
        }
    }
}

/// A labeled edge from its owning step to the step named by `next_step_id`
/// (or to no destination at all, once a deletion cascade blanked it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOption {
    pub text: String,
    pub next_step_id: String,
    pub is_terminal: bool,
    /// Free-form branch tag; `"yes"` / `"no"` / `"other"` by convention.
    pub condition_type: String,
}

impl StepOption {
    pub fn new(text: impl Into<String>, next_step_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_step_id: next_step_id.into(),
            is_terminal: false,
            condition_type: "other".to_string(),
        }
    }

    pub fn with_condition_type(mut self, condition_type: impl Into<String>) -> Self {
        self.condition_type = condition_type.into();
        self
    }
}
