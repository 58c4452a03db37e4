//! The JSON wire boundary for persisted flow documents.
//!
//! Field names are part of the persistence contract (`triggerKeywords`,
//! `nextStepId`, `isTerminal`, `conditionType`, `imageUrl`) and are written
//! exactly as-is. Ingestion is more forgiving than output: older documents
//! spell some fields differently (`trigger`, `image`, option `label`/`next`)
//! and may carry only one of the `message`/`description` synonyms, so raw
//! documents are normalized — missing synonyms are backfilled from their
//! counterpart — before they reach the typed model.

use crate::error::{ValidationError, WireError};
use crate::flow::document::{FlowDocument, Step, StepKind, StepOption};
use serde::Deserialize;

/// Raw document shape as found on disk, before normalization.
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default, alias = "triggerKeywords")]
    trigger_keywords: Option<Vec<String>>,
    /// Legacy spelling; both may be present in old documents.
    #[serde(default)]
    trigger: Option<Vec<String>>,
    #[serde(default)]
    steps: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, alias = "imageUrl")]
    image_url: Option<String>,
    /// Legacy spelling of `imageUrl`.
    #[serde(default)]
    image: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    options: Vec<RawOption>,
    #[serde(default)]
    checklist: Vec<String>,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    condition: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    #[serde(default)]
    text: Option<String>,
    /// Legacy spelling of `text`.
    #[serde(default)]
    label: Option<String>,
    #[serde(default, alias = "nextStepId")]
    next_step_id: Option<String>,
    /// Legacy spelling of `nextStepId`.
    #[serde(default)]
    next: Option<String>,
    #[serde(default, alias = "isTerminal")]
    is_terminal: bool,
    #[serde(default, alias = "conditionType")]
    condition_type: Option<String>,
}

/// Decodes a persisted JSON document into the typed model.
///
/// Unrecognized step-kind tags are rejected here rather than silently
/// downgraded to linear steps.
pub fn decode(json: &str) -> Result<FlowDocument, WireError> {
    let raw: RawDocument =
        serde_json::from_str(json).map_err(|e| WireError::Json(e.to_string()))?;
    normalize(raw)
}

/// Encodes a document in the canonical wire shape.
pub fn encode(doc: &FlowDocument) -> Result<String, WireError> {
    serde_json::to_string(doc).map_err(|e| WireError::Json(e.to_string()))
}

/// Encodes a document pretty-printed, the way flow files are stored on disk.
pub fn encode_pretty(doc: &FlowDocument) -> Result<String, WireError> {
    serde_json::to_string_pretty(doc).map_err(|e| WireError::Json(e.to_string()))
}

fn normalize(raw: RawDocument) -> Result<FlowDocument, WireError> {
    let trigger_keywords = raw
        .trigger_keywords
        .or(raw.trigger)
        .unwrap_or_default();

    let steps = raw
        .steps
        .into_iter()
        .enumerate()
        .map(|(index, step)| normalize_step(step, index))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FlowDocument {
        id: raw.id,
        title: raw.title,
        description: raw.description,
        trigger_keywords,
        steps,
    })
}

fn normalize_step(raw: RawStep, index: usize) -> Result<Step, WireError> {
    // Old exports occasionally miss step ids; number them by position.
    let id = if raw.id.is_empty() {
        format!("step_{}", index + 1)
    } else {
        raw.id
    };

    let tag = non_blank(raw.kind).unwrap_or_else(|| "step".to_string());
    let kind = StepKind::parse(&tag).ok_or_else(|| ValidationError::UnrecognizedKind {
        step_id: id.clone(),
        kind: tag,
    })?;

    // `message` and `description` are synonyms at this boundary; a document
    // lacking one (absent or blank) is backfilled from the other.
    let message_raw = non_blank(raw.message);
    let description_raw = non_blank(raw.description);
    let message = message_raw
        .clone()
        .or_else(|| description_raw.clone())
        .unwrap_or_default();
    let description = description_raw.or(message_raw).unwrap_or_default();

    Ok(Step {
        id,
        title: raw.title,
        description,
        image_url: non_blank(raw.image_url)
            .or(non_blank(raw.image))
            .unwrap_or_default(),
        kind,
        options: raw.options.into_iter().map(normalize_option).collect(),
        message,
        checklist: raw.checklist,
        next: raw.next.unwrap_or_default(),
        condition: raw.condition.unwrap_or_default(),
    })
}

fn normalize_option(raw: RawOption) -> StepOption {
    StepOption {
        text: non_blank(raw.text).or(non_blank(raw.label)).unwrap_or_default(),
        next_step_id: non_blank(raw.next_step_id)
            .or(non_blank(raw.next))
            .unwrap_or_default(),
        is_terminal: raw.is_terminal,
        condition_type: non_blank(raw.condition_type).unwrap_or_else(|| "other".to_string()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
