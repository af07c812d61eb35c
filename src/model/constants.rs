// Model constants
pub const SCALE_FACTOR: f64 = 400.0;
pub const INITIAL_QUESTION_K: f64 = 32.0;
pub const FINAL_QUESTION_K: f64 = 8.0;
pub const INITIAL_PLAYER_K: f64 = 32.0;
pub const FINAL_PLAYER_K: f64 = 16.0;
// Default population settings
pub const DEFAULT_QUESTION_RATING: f64 = 1000.0;
pub const DEFAULT_PLAYER_RATING: f64 = 1000.0;
pub const DEFAULT_QUESTION_COUNT: usize = 20;
pub const DEFAULT_ALWAYS_RIGHT: usize = 100;
pub const DEFAULT_ALWAYS_MID: usize = 100;
pub const DEFAULT_ALWAYS_WRONG: usize = 100;
pub const DEFAULT_USUALLY_RIGHT: usize = 1000;
pub const DEFAULT_USUALLY_WRONG: usize = 1000;
// Archetype score ranges
pub const USUALLY_RIGHT_MIN_SCORE: f64 = 0.3;
pub const USUALLY_WRONG_MAX_SCORE: f64 = 0.7;
