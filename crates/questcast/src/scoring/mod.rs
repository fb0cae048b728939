//! Stateless scoring engine turning self-reported behavioral factors into an
//! action probability.
//!
//! The engine is a pure function of its arguments: no clock, no storage, no
//! identity. It is total over the finite reals; non-finite inputs propagate
//! through the arithmetic unchanged, and rejecting them is the caller's job.

use serde::{Deserialize, Serialize};

/// Default drive-to-logit scaling factor applied when callers do not override
/// `ModelParams::beta`.
pub const DEFAULT_BETA: f64 = 0.05;

/// Self-reported mood category shifting the logit by a fixed bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mood {
    Positive,
    Neutral,
    Depressed,
}

impl Mood {
    /// Fixed additive logit bias for the category. Part of the caller-visible
    /// contract: callers populate `ModelParams::mood_bias` from this table.
    pub fn bias(self) -> f64 {
        match self {
            Mood::Positive => 2.5,
            Mood::Neutral => 0.0,
            Mood::Depressed => -2.0,
        }
    }
}

/// The nine numeric factors plus mood captured from the user.
///
/// The UI conventionally bounds most factors to [0, 10] and `why` to [0, 5],
/// but the engine itself places no bound on any of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorInputs {
    pub urgency: f64,
    pub loot: f64,
    pub comfort: f64,
    pub why: f64,
    pub fog: f64,
    pub difficulty: f64,
    pub fear: f64,
    pub friction: f64,
    pub habit: f64,
    pub mood: Mood,
}

/// Tunable constants supplied by the caller at prediction time.
///
/// The engine applies whatever values it is given; it does not validate
/// `beta` nor cross-check `mood_bias` against `FactorInputs::mood`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelParams {
    pub beta: f64,
    #[serde(rename = "moodBiasVal")]
    pub mood_bias: f64,
}

impl ModelParams {
    /// Default parameters for a mood: `DEFAULT_BETA` plus the table bias.
    pub fn for_mood(mood: Mood) -> Self {
        Self {
            beta: DEFAULT_BETA,
            mood_bias: mood.bias(),
        }
    }
}

/// Engine output: the logit and its logistic transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub z_score: f64,
    pub probability: f64,
}

/// Intermediate drive terms, exposed so presentation layers can show how a
/// probability came about. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveBreakdown {
    pub value_gap: f64,
    pub positive_drive: f64,
    pub total_blockers: f64,
    pub net_drive: f64,
    pub prediction: Prediction,
}

/// The standard logistic function: monotonic, maps the reals into (0, 1),
/// exactly 0.5 at zero.
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Score a set of factor inputs under the given parameters.
pub fn score(inputs: &FactorInputs, params: &ModelParams) -> Prediction {
    score_detailed(inputs, params).prediction
}

/// Score with the intermediate drive terms retained.
pub fn score_detailed(inputs: &FactorInputs, params: &ModelParams) -> DriveBreakdown {
    let value_gap = inputs.loot - inputs.comfort;
    let positive_drive = inputs.urgency * value_gap * inputs.why;
    let total_blockers =
        inputs.fog + inputs.difficulty + inputs.fear + inputs.friction + inputs.habit;
    let net_drive = positive_drive - total_blockers;
    let z_score = net_drive * params.beta + params.mood_bias;

    DriveBreakdown {
        value_gap,
        positive_drive,
        total_blockers,
        net_drive,
        prediction: Prediction {
            z_score,
            probability: sigmoid(z_score),
        },
    }
}

/// User-facing classification of a probability. The cut points are part of
/// the presentation contract and must not drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuccessBand {
    Impossible,
    Risky,
    Likely,
    Guaranteed,
}

impl SuccessBand {
    /// Band for a probability. Lower bounds are inclusive: 0.3 is `Risky`,
    /// 0.6 is `Likely`, 0.85 is `Guaranteed`.
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.3 {
            SuccessBand::Impossible
        } else if probability < 0.6 {
            SuccessBand::Risky
        } else if probability < 0.85 {
            SuccessBand::Likely
        } else {
            SuccessBand::Guaranteed
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SuccessBand::Impossible => "IMPOSSIBLE",
            SuccessBand::Risky => "RISKY",
            SuccessBand::Likely => "LIKELY",
            SuccessBand::Guaranteed => "GUARANTEED",
        }
    }
}
