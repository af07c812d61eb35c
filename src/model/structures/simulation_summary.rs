use serde::{Deserialize, Serialize};

use super::archetype::Archetype;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeRating {
    pub archetype: Archetype,
    pub players: usize,
    /// `None` when the archetype had no players
    pub mean_rating: Option<f64>
}

/// Final state of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub seed: u64,
    pub answers: usize,
    pub snapshots: usize,
    pub question_rating_range: Option<(f64, f64)>,
    pub player_rating_range: Option<(f64, f64)>,
    pub archetypes: Vec<ArchetypeRating>
}
