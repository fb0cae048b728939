use crate::infra::InMemoryEventStore;
use clap::{Args, ValueEnum};
use questcast::error::AppError;
use questcast::events::PredictionLogService;
use questcast::scoring::{self, FactorInputs, ModelParams, Mood, SuccessBand, DEFAULT_BETA};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum MoodArg {
    Positive,
    Neutral,
    Depressed,
}

impl From<MoodArg> for Mood {
    fn from(value: MoodArg) -> Self {
        match value {
            MoodArg::Positive => Mood::Positive,
            MoodArg::Neutral => Mood::Neutral,
            MoodArg::Depressed => Mood::Depressed,
        }
    }
}

/// One-shot scoring from the command line. Defaults match the original
/// slider positions.
#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    #[arg(long, default_value_t = 5.0)]
    pub(crate) urgency: f64,
    #[arg(long, default_value_t = 8.0)]
    pub(crate) loot: f64,
    #[arg(long, default_value_t = 3.0)]
    pub(crate) comfort: f64,
    #[arg(long, default_value_t = 1.5)]
    pub(crate) why: f64,
    #[arg(long, default_value_t = 2.0)]
    pub(crate) fog: f64,
    #[arg(long, default_value_t = 3.0)]
    pub(crate) difficulty: f64,
    #[arg(long, default_value_t = 2.0)]
    pub(crate) fear: f64,
    #[arg(long, default_value_t = 2.0)]
    pub(crate) friction: f64,
    #[arg(long, default_value_t = 2.0)]
    pub(crate) habit: f64,
    #[arg(long, value_enum, default_value = "neutral")]
    pub(crate) mood: MoodArg,
    /// Drive-to-logit scaling override
    #[arg(long, default_value_t = DEFAULT_BETA)]
    pub(crate) beta: f64,
    /// Mood bias override; defaults to the fixed table value for --mood
    #[arg(long)]
    pub(crate) mood_bias: Option<f64>,
}

impl ScoreArgs {
    fn factors(&self) -> FactorInputs {
        FactorInputs {
            urgency: self.urgency,
            loot: self.loot,
            comfort: self.comfort,
            why: self.why,
            fog: self.fog,
            difficulty: self.difficulty,
            fear: self.fear,
            friction: self.friction,
            habit: self.habit,
            mood: self.mood.into(),
        }
    }

    fn params(&self) -> ModelParams {
        ModelParams {
            beta: self.beta,
            mood_bias: self.mood_bias.unwrap_or_else(|| Mood::from(self.mood).bias()),
        }
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let breakdown = scoring::score_detailed(&args.factors(), &args.params());
    let band = SuccessBand::from_probability(breakdown.prediction.probability);

    let report = json!({
        "band": band.label(),
        "valueGap": breakdown.value_gap,
        "positiveDrive": breakdown.positive_drive,
        "totalBlockers": breakdown.total_blockers,
        "netDrive": breakdown.net_drive,
        "prediction": breakdown.prediction,
    });
    println!("{}", serde_json::to_string_pretty(&report).expect("report serializes"));
    Ok(())
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Pseudonymous owner for the demo events
    #[arg(long, default_value = "demo-user")]
    pub(crate) user_hash: String,
}

/// End-to-end walkthrough against the in-memory store: score a baseline and
/// a depressed variant, log both, attach one outcome, then list the history.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemoryEventStore::default());
    let log = PredictionLogService::new(store);

    let mut inputs = ScoreArgs {
        urgency: 5.0,
        loot: 8.0,
        comfort: 3.0,
        why: 1.5,
        fog: 2.0,
        difficulty: 3.0,
        fear: 2.0,
        friction: 2.0,
        habit: 2.0,
        mood: MoodArg::Neutral,
        beta: DEFAULT_BETA,
        mood_bias: None,
    }
    .factors();

    let neutral_params = ModelParams::for_mood(Mood::Neutral);
    let neutral = scoring::score(&inputs, &neutral_params);
    let first = log.submit(args.user_hash.clone(), inputs, neutral_params, neutral)?;
    println!(
        "logged {} (band {}, p = {:.4})",
        first,
        SuccessBand::from_probability(neutral.probability).label(),
        neutral.probability
    );

    inputs.mood = Mood::Depressed;
    let depressed_params = ModelParams::for_mood(Mood::Depressed);
    let depressed = scoring::score(&inputs, &depressed_params);
    let second = log.submit(args.user_hash.clone(), inputs, depressed_params, depressed)?;
    println!(
        "logged {} (band {}, p = {:.4})",
        second,
        SuccessBand::from_probability(depressed.probability).label(),
        depressed.probability
    );

    log.record_outcome(&first, true, 5400.0)?;
    println!("outcome recorded on {first}: action taken after 5400s");

    let history = log.predictions_for_user(&args.user_hash)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&history).expect("history serializes")
    );
    Ok(())
}
