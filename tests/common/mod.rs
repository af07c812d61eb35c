use std::sync::Once;

use quiz_elo_sim::model::structures::simulation_config::{ArchetypeCounts, SimulationConfig};

static INIT: Once = Once::new();

/// Initialize test logging at WARN unless RUST_LOG says otherwise
pub fn init_test_env() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

pub fn config(questions: usize, players: ArchetypeCounts, seed: u64) -> SimulationConfig {
    SimulationConfig {
        question_count: questions,
        players,
        seed: Some(seed),
        ..Default::default()
    }
}
