use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::model::constants::{USUALLY_RIGHT_MIN_SCORE, USUALLY_WRONG_MAX_SCORE};

/// Produces the actual score of an answer, in `[0, 1]`.
pub trait ScoreGenerator {
    fn generate_score<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;
}

/// The player behaviors available to a simulation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Archetype {
    AlwaysRight,
    AlwaysMid,
    AlwaysWrong,
    UsuallyRight,
    UsuallyWrong
}

impl ScoreGenerator for Archetype {
    fn generate_score<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Archetype::AlwaysRight => 1.0,
            Archetype::AlwaysMid => 0.5,
            Archetype::AlwaysWrong => 0.0,
            Archetype::UsuallyRight => rng.random_range(USUALLY_RIGHT_MIN_SCORE..=1.0),
            Archetype::UsuallyWrong => rng.random_range(0.0..=USUALLY_WRONG_MAX_SCORE)
        }
    }
}
