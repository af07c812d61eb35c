use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
    error::ConfigError,
    model::{
        constants::{
            DEFAULT_ALWAYS_MID, DEFAULT_ALWAYS_RIGHT, DEFAULT_ALWAYS_WRONG, DEFAULT_PLAYER_RATING,
            DEFAULT_QUESTION_COUNT, DEFAULT_QUESTION_RATING, DEFAULT_USUALLY_RIGHT, DEFAULT_USUALLY_WRONG
        },
        player::PLAYER_K_DECAY,
        question::QUESTION_K_DECAY,
        rated_entity::KDecay,
        structures::archetype::Archetype
    }
};

/// Number of players to create for each archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeCounts {
    pub always_right: usize,
    pub always_mid: usize,
    pub always_wrong: usize,
    pub usually_right: usize,
    pub usually_wrong: usize
}

impl ArchetypeCounts {
    pub fn none() -> ArchetypeCounts {
        ArchetypeCounts {
            always_right: 0,
            always_mid: 0,
            always_wrong: 0,
            usually_right: 0,
            usually_wrong: 0
        }
    }

    pub fn count(&self, archetype: Archetype) -> usize {
        match archetype {
            Archetype::AlwaysRight => self.always_right,
            Archetype::AlwaysMid => self.always_mid,
            Archetype::AlwaysWrong => self.always_wrong,
            Archetype::UsuallyRight => self.usually_right,
            Archetype::UsuallyWrong => self.usually_wrong
        }
    }

    pub fn set(&mut self, archetype: Archetype, count: usize) {
        match archetype {
            Archetype::AlwaysRight => self.always_right = count,
            Archetype::AlwaysMid => self.always_mid = count,
            Archetype::AlwaysWrong => self.always_wrong = count,
            Archetype::UsuallyRight => self.usually_right = count,
            Archetype::UsuallyWrong => self.usually_wrong = count
        }
    }

    pub fn total(&self) -> usize {
        Archetype::iter().map(|a| self.count(a)).sum()
    }
}

impl Default for ArchetypeCounts {
    fn default() -> Self {
        ArchetypeCounts {
            always_right: DEFAULT_ALWAYS_RIGHT,
            always_mid: DEFAULT_ALWAYS_MID,
            always_wrong: DEFAULT_ALWAYS_WRONG,
            usually_right: DEFAULT_USUALLY_RIGHT,
            usually_wrong: DEFAULT_USUALLY_WRONG
        }
    }
}

/// Inclusive bound on how many questions each player answers.
/// `max` is clamped to the size of the question pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBound {
    pub min: usize,
    pub max: usize
}

/// How often the simulation samples a [`RatingSnapshot`]
///
/// [`RatingSnapshot`]: super::rating_snapshot::RatingSnapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SamplingCadence {
    /// Once every `total player count` answers
    #[default]
    PerPlayerCount,
    /// Once every `total answers / question count` answers
    PerAverageQueue
}

impl SamplingCadence {
    /// The number of answers between two snapshots. Zero disables sampling.
    pub fn period(&self, player_count: usize, total_answers: usize, question_count: usize) -> usize {
        match self {
            SamplingCadence::PerPlayerCount => player_count,
            SamplingCadence::PerAverageQueue => total_answers.checked_div(question_count).unwrap_or(0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub initial_question_rating: f64,
    pub initial_player_rating: f64,
    pub question_count: usize,
    pub players: ArchetypeCounts,
    pub questions_per_player: Option<QuestionBound>,
    pub question_k: KDecay,
    pub player_k: KDecay,
    pub sampling: SamplingCadence,
    /// Drawn from the OS when absent
    pub seed: Option<u64>
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            initial_question_rating: DEFAULT_QUESTION_RATING,
            initial_player_rating: DEFAULT_PLAYER_RATING,
            question_count: DEFAULT_QUESTION_COUNT,
            players: ArchetypeCounts::default(),
            questions_per_player: None,
            question_k: QUESTION_K_DECAY,
            player_k: PLAYER_K_DECAY,
            sampling: SamplingCadence::default(),
            seed: None
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_question_rating.is_finite() {
            return Err(ConfigError::NonFiniteRating {
                entity: "question",
                value: self.initial_question_rating
            });
        }

        if !self.initial_player_rating.is_finite() {
            return Err(ConfigError::NonFiniteRating {
                entity: "player",
                value: self.initial_player_rating
            });
        }

        self.question_k.validate("question")?;
        self.player_k.validate("player")?;

        if let Some(bound) = self.questions_per_player {
            if bound.min > bound.max {
                return Err(ConfigError::InvalidQuestionBound {
                    min: bound.min,
                    max: bound.max
                });
            }
        }

        Ok(())
    }
}
