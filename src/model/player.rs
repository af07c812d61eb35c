use std::collections::VecDeque;

use rand::Rng;

use crate::{
    error::SimulationError,
    model::{
        constants::{FINAL_PLAYER_K, INITIAL_PLAYER_K},
        question::Question,
        rated_entity::{KDecay, Rated, RatedEntity},
        structures::{
            answer_outcome::AnswerOutcome,
            archetype::{Archetype, ScoreGenerator}
        }
    }
};

pub const PLAYER_K_DECAY: KDecay = KDecay::new(INITIAL_PLAYER_K, FINAL_PLAYER_K);

/// A simulated quiz player.
///
/// The queue holds indices into the question pool owned by the simulation.
/// It is consumed front to back and never refilled.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: usize,
    pub archetype: Archetype,
    entity: RatedEntity,
    decay: KDecay,
    question_queue: VecDeque<usize>
}

impl Player {
    pub fn new(id: usize, archetype: Archetype, rating: f64, question_queue: Vec<usize>) -> Player {
        Player::with_decay(id, archetype, rating, PLAYER_K_DECAY, question_queue)
    }

    pub fn with_decay(
        id: usize,
        archetype: Archetype,
        rating: f64,
        decay: KDecay,
        question_queue: Vec<usize>
    ) -> Player {
        Player {
            id,
            archetype,
            entity: RatedEntity::new(rating, decay.initial),
            decay,
            question_queue: question_queue.into()
        }
    }

    pub fn question_queue(&self) -> &VecDeque<usize> {
        &self.question_queue
    }

    pub fn has_questions(&self) -> bool {
        !self.question_queue.is_empty()
    }

    pub fn generate_score<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.archetype.generate_score(rng)
    }

    pub fn update_k(&mut self) {
        self.entity.k = self.decay.next(self.entity.k);
    }

    pub fn update_score(&mut self, expected: f64, actual: f64) {
        self.entity.update_score(expected, actual);
    }

    /// Answers `question` and updates both ratings.
    ///
    /// The question is scored with the complementary pair
    /// `(1 - expected, 1 - actual)`, so with equal K-factors whatever the
    /// player gains the question loses. The player's K decays last.
    pub fn answer_and_update<R: Rng + ?Sized>(&mut self, question: &mut Question, rng: &mut R) -> AnswerOutcome {
        let expected = self.expected_score(question);
        let actual = self.generate_score(rng);

        let player_before = self.rating();
        let question_before = question.rating();

        self.update_score(expected, actual);
        question.update_score(1.0 - expected, 1.0 - actual);
        self.update_k();

        AnswerOutcome {
            expected,
            actual,
            player_delta: self.rating() - player_before,
            question_delta: question.rating() - question_before
        }
    }

    /// Pops the next queued question and answers it.
    ///
    /// Returns the index of the answered question along with the outcome.
    pub fn answer_next<R: Rng + ?Sized>(
        &mut self,
        questions: &mut [Question],
        rng: &mut R
    ) -> Result<(usize, AnswerOutcome), SimulationError> {
        let index = *self
            .question_queue
            .front()
            .ok_or(SimulationError::QueueExhausted { player: self.id })?;
        let question = questions
            .get_mut(index)
            .ok_or(SimulationError::UnknownQuestion { index })?;

        self.question_queue.pop_front();

        Ok((index, self.answer_and_update(question, rng)))
    }
}

impl Rated for Player {
    fn entity(&self) -> &RatedEntity {
        &self.entity
    }
}
