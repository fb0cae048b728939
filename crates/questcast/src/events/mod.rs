//! Durable, queryable log of predictions and their eventual verified
//! outcomes: append-only creation, one optional outcome attachment per
//! record, owner-scoped and global listings.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{EventId, Outcome, PredictionEvent};
pub use repository::{PredictionEventStore, StoreError};
pub use router::prediction_router;
pub use service::{PredictionLogError, PredictionLogService};
