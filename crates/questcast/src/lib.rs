//! Behavioral action-probability scoring and prediction event logging.
//!
//! Two components: a pure scoring engine (`scoring`) mapping nine
//! self-reported factors plus a mood category to an action probability, and
//! an event log (`events`) persisting each prediction so the observed
//! outcome can later be attached and the estimate scored for accuracy.

pub mod config;
pub mod error;
pub mod events;
pub mod scoring;
pub mod telemetry;
