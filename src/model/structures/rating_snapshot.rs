use serde::{Deserialize, Serialize};

/// Aggregate ratings at one sampling point.
///
/// Player bounds cover every player, including those who have already
/// answered all of their questions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSnapshot {
    /// Answers given so far
    pub answers: usize,
    pub min_question_rating: f64,
    pub max_question_rating: f64,
    pub min_player_rating: f64,
    pub max_player_rating: f64
}
