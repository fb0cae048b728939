use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{FactorInputs, ModelParams, Prediction};

/// Identifier wrapper for logged prediction events. Opaque: assigned by the
/// store at creation and never reused or mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ground truth attached to an event once the real outcome is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    /// Presence of the sub-record is the verification signal; always true.
    pub verified: bool,
    pub action_taken: bool,
    /// Seconds between prediction and observation; sign unconstrained.
    pub time_delta: f64,
}

/// The persisted unit of record: one prediction, its inputs, and (later) its
/// verified outcome.
///
/// Everything except `outcome` is write-once at creation. `outcome` is
/// write-at-most-once; nothing clears or overwrites it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionEvent {
    pub id: EventId,
    /// Pseudonymous owner. Not validated for format, not unique across
    /// events.
    pub user_hash: String,
    /// Assigned by the event log at creation, never by the caller.
    pub timestamp: DateTime<Utc>,
    pub inputs: FactorInputs,
    pub model_params: ModelParams,
    pub prediction: Prediction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}
