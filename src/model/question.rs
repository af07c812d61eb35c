use crate::model::{
    constants::{FINAL_QUESTION_K, INITIAL_QUESTION_K},
    rated_entity::{KDecay, Rated, RatedEntity}
};

pub const QUESTION_K_DECAY: KDecay = KDecay::new(INITIAL_QUESTION_K, FINAL_QUESTION_K);

/// A question is an opaque rated token. Its K-factor shrinks with every
/// answer so that its rating settles over time.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    entity: RatedEntity,
    decay: KDecay
}

impl Question {
    pub fn new(rating: f64) -> Question {
        Question::with_decay(rating, QUESTION_K_DECAY)
    }

    pub fn with_decay(rating: f64, decay: KDecay) -> Question {
        Question {
            entity: RatedEntity::new(rating, decay.initial),
            decay
        }
    }

    pub fn decay(&self) -> KDecay {
        self.decay
    }

    pub fn update_k(&mut self) {
        self.entity.k = self.decay.next(self.entity.k);
    }

    pub fn update_score(&mut self, expected: f64, actual: f64) {
        self.entity.update_score(expected, actual);
        self.update_k();
    }
}

impl Rated for Question {
    fn entity(&self) -> &RatedEntity {
        &self.entity
    }
}
