use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::scoring::{FactorInputs, ModelParams, Prediction};

use super::domain::{EventId, Outcome, PredictionEvent};
use super::repository::{PredictionEventStore, StoreError};

/// The event log: append-only creation of prediction records, one optional
/// later outcome attachment per record, and owner-scoped or global reads.
pub struct PredictionLogService<S> {
    store: Arc<S>,
}

impl<S> PredictionLogService<S>
where
    S: PredictionEventStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Log a prediction with its inputs, returning the store-assigned id.
    ///
    /// The creation timestamp is stamped here, never supplied by the caller.
    /// Structural validation is carried by the types; no range checks are
    /// applied, and non-finite values are stored as given.
    pub fn submit(
        &self,
        user_hash: String,
        inputs: FactorInputs,
        model_params: ModelParams,
        prediction: Prediction,
    ) -> Result<EventId, PredictionLogError> {
        let event = self
            .store
            .insert(user_hash, Utc::now(), inputs, model_params, prediction)?;
        debug!(event_id = %event.id, "prediction logged");
        Ok(event.id)
    }

    /// Attach the observed outcome to a logged prediction.
    ///
    /// At most one outcome per event: a second call for the same id fails
    /// with `Conflict` and the first-attached outcome survives.
    pub fn record_outcome(
        &self,
        id: &EventId,
        action_taken: bool,
        time_delta: f64,
    ) -> Result<(), PredictionLogError> {
        let outcome = Outcome {
            verified: true,
            action_taken,
            time_delta,
        };

        match self.store.attach_outcome(id, outcome) {
            Ok(()) => {
                debug!(event_id = %id, action_taken, "outcome recorded");
                Ok(())
            }
            Err(StoreError::NotFound) => Err(PredictionLogError::NotFound),
            Err(StoreError::OutcomeAlreadyRecorded) => Err(PredictionLogError::Conflict),
            Err(other) => Err(PredictionLogError::Store(other)),
        }
    }

    /// Every event owned by `user_hash`, newest first. A user with no events
    /// yields an empty sequence, not an error.
    pub fn predictions_for_user(
        &self,
        user_hash: &str,
    ) -> Result<Vec<PredictionEvent>, PredictionLogError> {
        Ok(self.store.events_for_user(user_hash)?)
    }

    /// Every event in the log, newest first. Intended for aggregate
    /// analysis; access restriction is the caller's concern.
    pub fn all_predictions(&self) -> Result<Vec<PredictionEvent>, PredictionLogError> {
        Ok(self.store.all_events()?)
    }
}

/// Error raised by the event log.
#[derive(Debug, thiserror::Error)]
pub enum PredictionLogError {
    #[error("invalid prediction payload: {0}")]
    Validation(String),
    #[error("no prediction event with that identifier")]
    NotFound,
    #[error("outcome already recorded for this event")]
    Conflict,
    #[error(transparent)]
    Store(#[from] StoreError),
}
