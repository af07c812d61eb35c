use crate::model::{
    question::Question,
    structures::simulation_config::{ArchetypeCounts, SimulationConfig}
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded RNG for reproducible results
pub fn seeded_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

pub fn generate_questions(n: usize, rating: f64) -> Vec<Question> {
    (0..n).map(|_| Question::new(rating)).collect()
}

/// 5 questions and 2 players of every archetype, seeded with 42
pub fn small_config() -> SimulationConfig {
    SimulationConfig {
        question_count: 5,
        players: ArchetypeCounts {
            always_right: 2,
            always_mid: 2,
            always_wrong: 2,
            usually_right: 2,
            usually_wrong: 2
        },
        seed: Some(42),
        ..Default::default()
    }
}
