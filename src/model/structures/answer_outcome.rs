/// The rating exchange produced by one player answering one question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerOutcome {
    pub expected: f64,
    pub actual: f64,
    pub player_delta: f64,
    pub question_delta: f64
}
