use chrono::{DateTime, Utc};

use crate::scoring::{FactorInputs, ModelParams, Prediction};

use super::domain::{EventId, Outcome, PredictionEvent};

/// Storage abstraction so the service module can be exercised in isolation
/// and backed by any durable substrate.
///
/// Listing order is part of the contract: most-recently-created first, with
/// timestamp ties broken by insertion sequence (also descending) so repeated
/// reads of an unchanged store return identical sequences.
pub trait PredictionEventStore: Send + Sync {
    /// Persist a new event, assigning a previously-unused identifier.
    fn insert(
        &self,
        user_hash: String,
        timestamp: DateTime<Utc>,
        inputs: FactorInputs,
        model_params: ModelParams,
        prediction: Prediction,
    ) -> Result<PredictionEvent, StoreError>;

    /// Attach an outcome to an existing event. The check-then-set must be
    /// atomic per record: a second attachment on the same id fails with
    /// `OutcomeAlreadyRecorded` and leaves the first outcome intact.
    fn attach_outcome(&self, id: &EventId, outcome: Outcome) -> Result<(), StoreError>;

    /// Every event owned by `user_hash`, newest first.
    fn events_for_user(&self, user_hash: &str) -> Result<Vec<PredictionEvent>, StoreError>;

    /// Every event in the log, newest first.
    fn all_events(&self) -> Result<Vec<PredictionEvent>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("event not found")]
    NotFound,
    #[error("outcome already recorded for this event")]
    OutcomeAlreadyRecorded,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
