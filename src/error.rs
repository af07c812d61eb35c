use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Player {player} has no questions left to answer")]
    QueueExhausted { player: usize },

    #[error("Question {index} is not part of the question pool")]
    UnknownQuestion { index: usize },

    #[error("Invalid simulation configuration: {0}")]
    InvalidConfig(#[from] ConfigError)
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Initial {entity} rating must be finite, got {value}")]
    NonFiniteRating { entity: &'static str, value: f64 },

    #[error("{entity} K-factor must decay from a positive start to a positive floor, got {initial} -> {floor}")]
    InvalidKDecay {
        entity: &'static str,
        initial: f64,
        floor: f64
    },

    #[error("Questions per player bound is empty: min {min} > max {max}")]
    InvalidQuestionBound { min: usize, max: usize }
}

/// Errors surfaced by the command line front end
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("Failed to write simulation output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize simulation data: {0}")]
    Serialization(#[from] serde_json::Error)
}
