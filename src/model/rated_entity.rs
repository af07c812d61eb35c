use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, model::constants::SCALE_FACTOR};

/// An entity that carries an ELO-like numerical rating.
///
/// `k` is the largest rating swing a single interaction can cause.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatedEntity {
    pub rating: f64,
    pub k: f64
}

impl RatedEntity {
    pub fn new(rating: f64, k: f64) -> RatedEntity {
        RatedEntity { rating, k }
    }

    /// The expected score when facing `other`
    pub fn expected_score(&self, other: &RatedEntity) -> f64 {
        1.0 / (1.0 + 10f64.powf((other.rating - self.rating) / SCALE_FACTOR))
    }

    /// How much the rating would change for the given scores.
    pub fn score_delta(&self, expected: f64, actual: f64) -> f64 {
        self.k * (actual - expected)
    }

    pub fn update_score(&mut self, expected: f64, actual: f64) {
        self.rating += self.score_delta(expected, actual);
    }
}

/// Shared access to the [`RatedEntity`] of questions and players, so
/// either kind can be scored against the other.
pub trait Rated {
    fn entity(&self) -> &RatedEntity;

    fn rating(&self) -> f64 {
        self.entity().rating
    }

    fn k(&self) -> f64 {
        self.entity().k
    }

    fn expected_score<O: Rated + ?Sized>(&self, other: &O) -> f64 {
        self.entity().expected_score(other.entity())
    }
}

impl Rated for RatedEntity {
    fn entity(&self) -> &RatedEntity {
        self
    }
}

/// Linear K-factor decay: one step down per update, clamped at `floor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KDecay {
    pub initial: f64,
    pub floor: f64
}

impl KDecay {
    pub const fn new(initial: f64, floor: f64) -> KDecay {
        KDecay { initial, floor }
    }

    pub fn next(&self, k: f64) -> f64 {
        (k - 1.0).max(self.floor)
    }

    pub fn validate(&self, entity: &'static str) -> Result<(), ConfigError> {
        let valid = self.initial.is_finite() && self.floor.is_finite() && self.floor > 0.0 && self.floor <= self.initial;

        if !valid {
            return Err(ConfigError::InvalidKDecay {
                entity,
                initial: self.initial,
                floor: self.floor
            });
        }

        Ok(())
    }
}
