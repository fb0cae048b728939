use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use questcast::events::{EventId, Outcome, PredictionEvent, PredictionEventStore, StoreError};
use questcast::scoring::{FactorInputs, ModelParams, Prediction};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-process event store. Keeps insertion sequence alongside each record so
/// identifier assignment and listing tie-breaks stay deterministic.
#[derive(Default)]
pub(crate) struct InMemoryEventStore {
    events: Mutex<Vec<(u64, PredictionEvent)>>,
    sequence: AtomicU64,
}

impl InMemoryEventStore {
    fn listing<F>(&self, keep: F) -> Vec<PredictionEvent>
    where
        F: Fn(&PredictionEvent) -> bool,
    {
        let guard = self.events.lock().expect("event store mutex poisoned");
        let mut matched: Vec<(u64, PredictionEvent)> = guard
            .iter()
            .filter(|(_, event)| keep(event))
            .cloned()
            .collect();
        matched.sort_by(|(seq_a, a), (seq_b, b)| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| seq_b.cmp(seq_a))
        });
        matched.into_iter().map(|(_, event)| event).collect()
    }
}

impl PredictionEventStore for InMemoryEventStore {
    fn insert(
        &self,
        user_hash: String,
        timestamp: DateTime<Utc>,
        inputs: FactorInputs,
        model_params: ModelParams,
        prediction: Prediction,
    ) -> Result<PredictionEvent, StoreError> {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let event = PredictionEvent {
            id: EventId(format!("evt-{sequence:06}")),
            user_hash,
            timestamp,
            inputs,
            model_params,
            prediction,
            outcome: None,
        };
        self.events
            .lock()
            .expect("event store mutex poisoned")
            .push((sequence, event.clone()));
        Ok(event)
    }

    fn attach_outcome(&self, id: &EventId, outcome: Outcome) -> Result<(), StoreError> {
        // Check-then-set under the store lock: at most one attach wins.
        let mut guard = self.events.lock().expect("event store mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|(_, event)| &event.id == id)
            .map(|(_, event)| event)
            .ok_or(StoreError::NotFound)?;
        if slot.outcome.is_some() {
            return Err(StoreError::OutcomeAlreadyRecorded);
        }
        slot.outcome = Some(outcome);
        Ok(())
    }

    fn events_for_user(&self, user_hash: &str) -> Result<Vec<PredictionEvent>, StoreError> {
        Ok(self.listing(|event| event.user_hash == user_hash))
    }

    fn all_events(&self) -> Result<Vec<PredictionEvent>, StoreError> {
        Ok(self.listing(|_| true))
    }
}
