pub mod answer_outcome;
pub mod archetype;
pub mod rating_snapshot;
pub mod simulation_config;
pub mod simulation_summary;
