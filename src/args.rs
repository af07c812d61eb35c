use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Parser;

use crate::{
    error::AppError,
    model::{
        constants::{
            DEFAULT_ALWAYS_MID, DEFAULT_ALWAYS_RIGHT, DEFAULT_ALWAYS_WRONG, DEFAULT_PLAYER_RATING,
            DEFAULT_QUESTION_COUNT, DEFAULT_QUESTION_RATING, DEFAULT_USUALLY_RIGHT, DEFAULT_USUALLY_WRONG,
            FINAL_PLAYER_K, FINAL_QUESTION_K, INITIAL_PLAYER_K, INITIAL_QUESTION_K
        },
        rated_entity::KDecay,
        structures::simulation_config::{ArchetypeCounts, QuestionBound, SamplingCadence, SimulationConfig}
    }
};

#[derive(Parser, Clone, Debug)]
#[command(
    display_name = "Quiz ELO Simulator",
    long_about = "Simulates ELO-style rating exchanges between quiz players and the questions they answer"
)]
pub struct Args {
    /// JSON file holding a full simulation configuration.
    /// When given, the simulation flags below are ignored.
    #[arg(short, long, env = "SIM_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env, default_value_t = DEFAULT_QUESTION_RATING, help = "Initial rating of every question")]
    pub initial_question_rating: f64,

    #[arg(long, env, default_value_t = DEFAULT_PLAYER_RATING, help = "Initial rating of every player")]
    pub initial_player_rating: f64,

    #[arg(short, long, env, default_value_t = DEFAULT_QUESTION_COUNT, help = "Number of questions")]
    pub questions: usize,

    #[arg(long, env, default_value_t = DEFAULT_ALWAYS_RIGHT)]
    pub always_right: usize,

    #[arg(long, env, default_value_t = DEFAULT_ALWAYS_MID)]
    pub always_mid: usize,

    #[arg(long, env, default_value_t = DEFAULT_ALWAYS_WRONG)]
    pub always_wrong: usize,

    #[arg(long, env, default_value_t = DEFAULT_USUALLY_RIGHT)]
    pub usually_right: usize,

    #[arg(long, env, default_value_t = DEFAULT_USUALLY_WRONG)]
    pub usually_wrong: usize,

    /// Lower bound on the questions each player answers.
    /// Without either bound every player answers every question.
    #[arg(long, env)]
    pub min_questions_per_player: Option<usize>,

    /// Upper bound on the questions each player answers
    #[arg(long, env)]
    pub max_questions_per_player: Option<usize>,

    #[arg(long, env, default_value_t = INITIAL_QUESTION_K)]
    pub question_k_initial: f64,

    #[arg(long, env, default_value_t = FINAL_QUESTION_K)]
    pub question_k_floor: f64,

    #[arg(long, env, default_value_t = INITIAL_PLAYER_K)]
    pub player_k_initial: f64,

    #[arg(long, env, default_value_t = FINAL_PLAYER_K)]
    pub player_k_floor: f64,

    #[arg(long, env, value_enum, default_value_t = SamplingCadence::PerPlayerCount)]
    pub sampling: SamplingCadence,

    /// Seed for the random source. A random seed is drawn and logged when absent.
    #[arg(short, long, env = "SIM_SEED")]
    pub seed: Option<u64>,

    /// Snapshot output file (JSON lines). Defaults to stdout.
    #[arg(short, long, env = "SIM_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Writes the end-of-run summary as JSON to this file
    #[arg(long, env = "SIM_SUMMARY")]
    pub summary: Option<PathBuf>,

    /// Hides the progress bar
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}

impl Args {
    /// Resolves the simulation configuration, from `--config` when given,
    /// otherwise from the individual flags.
    pub fn simulation_config(&self) -> Result<SimulationConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
            None => self.flag_config()
        };

        // An explicit seed always wins
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().map_err(|e| AppError::Simulation(e.into()))?;

        Ok(config)
    }

    fn flag_config(&self) -> SimulationConfig {
        let questions_per_player = match (self.min_questions_per_player, self.max_questions_per_player) {
            (None, None) => None,
            (min, max) => Some(QuestionBound {
                min: min.unwrap_or(0),
                max: max.unwrap_or(self.questions)
            })
        };

        SimulationConfig {
            initial_question_rating: self.initial_question_rating,
            initial_player_rating: self.initial_player_rating,
            question_count: self.questions,
            players: ArchetypeCounts {
                always_right: self.always_right,
                always_mid: self.always_mid,
                always_wrong: self.always_wrong,
                usually_right: self.usually_right,
                usually_wrong: self.usually_wrong
            },
            questions_per_player,
            question_k: KDecay::new(self.question_k_initial, self.question_k_floor),
            player_k: KDecay::new(self.player_k_initial, self.player_k_floor),
            sampling: self.sampling,
            seed: self.seed
        }
    }
}
