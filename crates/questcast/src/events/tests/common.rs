use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::events::domain::{EventId, Outcome, PredictionEvent};
use crate::events::repository::{PredictionEventStore, StoreError};
use crate::events::router::prediction_router;
use crate::events::service::PredictionLogService;
use crate::scoring::{self, FactorInputs, ModelParams, Mood, Prediction};

pub(super) fn inputs() -> FactorInputs {
    FactorInputs {
        urgency: 5.0,
        loot: 8.0,
        comfort: 3.0,
        why: 1.5,
        fog: 2.0,
        difficulty: 3.0,
        fear: 2.0,
        friction: 2.0,
        habit: 2.0,
        mood: Mood::Neutral,
    }
}

pub(super) fn params() -> ModelParams {
    ModelParams::for_mood(Mood::Neutral)
}

pub(super) fn prediction() -> Prediction {
    scoring::score(&inputs(), &params())
}

pub(super) fn build_service() -> (
    Arc<PredictionLogService<MemoryStore>>,
    Arc<MemoryStore>,
) {
    let store = Arc::new(MemoryStore::default());
    let service = Arc::new(PredictionLogService::new(store.clone()));
    (service, store)
}

pub(super) fn build_router() -> (Router, Arc<MemoryStore>) {
    let (service, store) = build_service();
    (prediction_router(service), store)
}

/// Mutex-guarded store double with a monotonic sequence for id assignment
/// and deterministic tie-breaking.
#[derive(Default)]
pub(super) struct MemoryStore {
    events: Mutex<Vec<(u64, PredictionEvent)>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    pub(super) fn len(&self) -> usize {
        self.events.lock().expect("store mutex poisoned").len()
    }

    pub(super) fn get(&self, id: &EventId) -> Option<PredictionEvent> {
        self.events
            .lock()
            .expect("store mutex poisoned")
            .iter()
            .find(|(_, event)| &event.id == id)
            .map(|(_, event)| event.clone())
    }

    fn listing<F>(&self, keep: F) -> Vec<PredictionEvent>
    where
        F: Fn(&PredictionEvent) -> bool,
    {
        let guard = self.events.lock().expect("store mutex poisoned");
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

impl PredictionEventStore for MemoryStore {
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
            .expect("store mutex poisoned")
            .push((sequence, event.clone()));
        Ok(event)
    }

    fn attach_outcome(&self, id: &EventId, outcome: Outcome) -> Result<(), StoreError> {
        let mut guard = self.events.lock().expect("store mutex poisoned");
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

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Store double whose every operation reports the substrate as down.
pub(super) struct UnavailableStore;

impl PredictionEventStore for UnavailableStore {
    fn insert(
        &self,
        _user_hash: String,
        _timestamp: DateTime<Utc>,
        _inputs: FactorInputs,
        _model_params: ModelParams,
        _prediction: Prediction,
    ) -> Result<PredictionEvent, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn attach_outcome(&self, _id: &EventId, _outcome: Outcome) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn events_for_user(&self, _user_hash: &str) -> Result<Vec<PredictionEvent>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn all_events(&self) -> Result<Vec<PredictionEvent>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}
