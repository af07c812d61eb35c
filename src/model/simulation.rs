use itertools::Itertools;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use crate::{
    error::SimulationError,
    model::{
        player::Player,
        question::Question,
        rated_entity::Rated,
        sink::SnapshotSink,
        structures::{
            answer_outcome::AnswerOutcome,
            archetype::Archetype,
            rating_snapshot::RatingSnapshot,
            simulation_config::{QuestionBound, SimulationConfig},
            simulation_summary::{ArchetypeRating, SimulationSummary}
        }
    }
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// Populations have not been built yet
    Configuring,
    Running,
    /// Every player has answered its whole queue
    Finished
}

/// One answer event of the simulation loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub player: usize,
    pub question: usize,
    pub outcome: AnswerOutcome,
    /// Present when this answer completed a sampling period
    pub snapshot: Option<RatingSnapshot>
}

/// # Quiz rating simulation
///
/// Owns the question pool, every player and the random source.
///
/// Steps:
/// 1. Build `question_count` questions and, for each archetype, its players.
///     Each player receives its own shuffled queue of question indices.
/// 2. Pick a live player uniformly at random and have it answer its next question.
///     Players with an empty queue leave the live set.
/// 3. Every `sampling_period` answers, sample the rating bounds of all questions
///     and all players.
/// 4. Stop once the live set is empty.
pub struct Simulation {
    config: SimulationConfig,
    seed: u64,
    rng: ChaCha8Rng,
    state: SimulationState,
    questions: Vec<Question>,
    players: Vec<Player>,
    // Indices into `players` that still have questions queued
    live: Vec<usize>,
    total_answers: usize,
    answers: usize,
    sampling_period: usize,
    counter: usize,
    snapshots: usize
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Simulation, SimulationError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());

        Ok(Simulation {
            config,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: SimulationState::Configuring,
            questions: Vec::new(),
            players: Vec::new(),
            live: Vec::new(),
            total_answers: 0,
            answers: 0,
            sampling_period: 0,
            counter: 0,
            snapshots: 0
        })
    }

    /// Builds the question pool and the players. Does nothing once the
    /// simulation has left the configuring state.
    pub fn populate(&mut self) {
        if self.state != SimulationState::Configuring {
            return;
        }

        let config = &self.config;
        self.questions = (0..config.question_count)
            .map(|_| Question::with_decay(config.initial_question_rating, config.question_k))
            .collect();

        let pool: Vec<usize> = (0..config.question_count).collect();
        for archetype in Archetype::iter() {
            for _ in 0..config.players.count(archetype) {
                let queue = draw_queue(&pool, config.questions_per_player, &mut self.rng);
                let id = self.players.len();

                self.players.push(Player::with_decay(
                    id,
                    archetype,
                    config.initial_player_rating,
                    config.player_k,
                    queue
                ));
            }
        }

        self.live = self.players.iter().filter(|p| p.has_questions()).map(|p| p.id).collect();
        self.total_answers = self.players.iter().map(|p| p.question_queue().len()).sum();
        self.sampling_period = config
            .sampling
            .period(self.players.len(), self.total_answers, self.questions.len());

        info!(
            "Simulating {} players answering {} questions ({} answers, seed {})",
            self.players.len(),
            self.questions.len(),
            self.total_answers,
            self.seed
        );

        if self.sampling_period == 0 {
            warn!("Sampling period is zero, no rating snapshots will be produced");
        }

        if self.live.is_empty() {
            warn!("No player has any question to answer, simulation is finished");
            self.state = SimulationState::Finished;
        } else {
            self.state = SimulationState::Running;
        }
    }

    /// Plays a single answer event.
    ///
    /// Returns `Ok(None)` once the simulation is finished.
    pub fn step(&mut self) -> Result<Option<StepOutcome>, SimulationError> {
        self.populate();

        if self.live.is_empty() {
            self.state = SimulationState::Finished;
            return Ok(None);
        }

        let slot = self.rng.random_range(0..self.live.len());
        let player_index = self.live[slot];
        let player = &mut self.players[player_index];

        let (question, outcome) = player.answer_next(&mut self.questions, &mut self.rng)?;

        if !player.has_questions() {
            debug!("Player {} finished with rating {:.2}", player.id, player.rating());
            self.live.swap_remove(slot);
        }

        self.answers += 1;
        let snapshot = self.tick();

        if self.live.is_empty() {
            info!("Simulation finished after {} answers", self.answers);
            self.state = SimulationState::Finished;
        }

        Ok(Some(StepOutcome {
            player: player_index,
            question,
            outcome,
            snapshot
        }))
    }

    /// Runs the simulation to completion, handing every snapshot to `sink`.
    pub fn run<S: SnapshotSink + ?Sized>(&mut self, sink: &mut S) -> Result<SimulationSummary, SimulationError> {
        while let Some(step) = self.step()? {
            if let Some(snapshot) = step.snapshot {
                sink.record(&snapshot);
            }
        }

        Ok(self.summary())
    }

    fn tick(&mut self) -> Option<RatingSnapshot> {
        if self.sampling_period == 0 {
            return None;
        }

        self.counter = (self.counter + 1) % self.sampling_period;
        if self.counter != 0 {
            return None;
        }

        let snapshot = self.snapshot();
        if snapshot.is_some() {
            self.snapshots += 1;
        }

        snapshot
    }

    /// Current rating bounds. `None` while either population is empty.
    pub fn snapshot(&self) -> Option<RatingSnapshot> {
        let (min_question_rating, max_question_rating) = rating_range(&self.questions)?;
        let (min_player_rating, max_player_rating) = rating_range(&self.players)?;

        Some(RatingSnapshot {
            answers: self.answers,
            min_question_rating,
            max_question_rating,
            min_player_rating,
            max_player_rating
        })
    }

    pub fn summary(&self) -> SimulationSummary {
        let archetypes = Archetype::iter()
            .map(|archetype| {
                let ratings: Vec<f64> = self
                    .players
                    .iter()
                    .filter(|p| p.archetype == archetype)
                    .map(|p| p.rating())
                    .collect();

                let mean_rating = match ratings.len() {
                    0 => None,
                    n => Some(ratings.iter().sum::<f64>() / n as f64)
                };

                ArchetypeRating {
                    archetype,
                    players: ratings.len(),
                    mean_rating
                }
            })
            .collect();

        SimulationSummary {
            seed: self.seed,
            answers: self.answers,
            snapshots: self.snapshots,
            question_rating_range: rating_range(&self.questions),
            player_rating_range: rating_range(&self.players),
            archetypes
        }
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn live_players(&self) -> usize {
        self.live.len()
    }

    /// Answers the populated players will give in total
    pub fn total_answers(&self) -> usize {
        self.total_answers
    }

    pub fn answers(&self) -> usize {
        self.answers
    }

    pub fn sampling_period(&self) -> usize {
        self.sampling_period
    }
}

/// A shuffled copy of `pool`, cut down to a random length within `bound`
/// when one is given.
fn draw_queue<R: Rng + ?Sized>(pool: &[usize], bound: Option<QuestionBound>, rng: &mut R) -> Vec<usize> {
    let mut queue = pool.to_vec();
    queue.shuffle(rng);

    if let Some(bound) = bound {
        let max = bound.max.min(queue.len());
        let min = bound.min.min(max);

        queue.truncate(rng.random_range(min..=max));
    }

    queue
}

fn rating_range<T: Rated>(entities: &[T]) -> Option<(f64, f64)> {
    entities
        .iter()
        .map(|e| e.rating())
        .minmax_by(|a, b| a.total_cmp(b))
        .into_option()
}

#[cfg(test)]
mod tests {
    use super::{draw_queue, rating_range, Simulation, SimulationState};
    use crate::{
        model::{
            question::Question,
            rated_entity::Rated,
            structures::{
                archetype::Archetype,
                rating_snapshot::RatingSnapshot,
                simulation_config::{ArchetypeCounts, QuestionBound, SamplingCadence, SimulationConfig}
            }
        },
        utils::test_utils::{seeded_rng, small_config}
    };
    use itertools::Itertools;

    #[test]
    fn test_new_starts_configuring() {
        let simulation = Simulation::new(small_config()).unwrap();

        assert_eq!(simulation.state(), SimulationState::Configuring);
        assert!(simulation.players().is_empty());
        assert_eq!(simulation.seed(), 42);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimulationConfig {
            questions_per_player: Some(QuestionBound { min: 3, max: 1 }),
            ..small_config()
        };

        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_populate_builds_full_queues() {
        let mut simulation = Simulation::new(small_config()).unwrap();
        simulation.populate();

        assert_eq!(simulation.state(), SimulationState::Running);
        assert_eq!(simulation.questions().len(), 5);
        assert_eq!(simulation.players().len(), 10);
        assert_eq!(simulation.total_answers(), 50);
        assert_eq!(simulation.live_players(), 10);

        for player in simulation.players() {
            let queue = player.question_queue().iter().copied().sorted().collect::<Vec<_>>();
            assert_eq!(queue, vec![0, 1, 2, 3, 4]);
            assert_eq!(player.rating(), 1000.0);
        }
    }

    #[test]
    fn test_populate_orders_players_by_archetype() {
        let mut simulation = Simulation::new(small_config()).unwrap();
        simulation.populate();

        let archetypes = simulation.players().iter().map(|p| p.archetype).dedup().collect::<Vec<_>>();

        assert_eq!(
            archetypes,
            vec![
                Archetype::AlwaysRight,
                Archetype::AlwaysMid,
                Archetype::AlwaysWrong,
                Archetype::UsuallyRight,
                Archetype::UsuallyWrong
            ]
        );
    }

    #[test]
    fn test_run_terminates_after_every_queued_answer() {
        let mut simulation = Simulation::new(small_config()).unwrap();
        let mut steps = 0;

        while simulation.step().unwrap().is_some() {
            steps += 1;
        }

        assert_eq!(steps, 50);
        assert_eq!(simulation.answers(), 50);
        assert_eq!(simulation.live_players(), 0);
        assert_eq!(simulation.state(), SimulationState::Finished);
        assert!(simulation.players().iter().all(|p| !p.has_questions()));
        assert!(simulation.step().unwrap().is_none());
    }

    #[test]
    fn test_snapshot_count_matches_period() {
        let mut simulation = Simulation::new(small_config()).unwrap();
        let mut snapshots: Vec<RatingSnapshot> = Vec::new();

        let summary = simulation.run(&mut |s: &RatingSnapshot| snapshots.push(*s)).unwrap();

        // 50 answers sampled once every 10 players
        assert_eq!(simulation.sampling_period(), 10);
        assert_eq!(snapshots.len(), 5);
        assert_eq!(summary.snapshots, 5);
        assert_eq!(
            snapshots.iter().map(|s| s.answers).collect::<Vec<_>>(),
            vec![10, 20, 30, 40, 50]
        );

        for s in &snapshots {
            assert!(s.min_question_rating <= s.max_question_rating);
            assert!(s.min_player_rating <= s.max_player_rating);
        }
    }

    #[test]
    fn test_average_queue_cadence() {
        let config = SimulationConfig {
            sampling: SamplingCadence::PerAverageQueue,
            ..small_config()
        };
        let mut simulation = Simulation::new(config).unwrap();
        let mut count = 0;

        simulation.run(&mut |_: &RatingSnapshot| count += 1).unwrap();

        // 50 answers / 5 questions
        assert_eq!(simulation.sampling_period(), 10);
        assert_eq!(count, 5);
    }

    #[test]
    fn test_zero_period_skips_sampling() {
        let mut players = ArchetypeCounts::none();
        players.always_mid = 3;
        let config = SimulationConfig {
            question_count: 10,
            players,
            questions_per_player: Some(QuestionBound { min: 1, max: 1 }),
            sampling: SamplingCadence::PerAverageQueue,
            ..small_config()
        };
        let mut simulation = Simulation::new(config).unwrap();
        let mut count = 0;

        let summary = simulation.run(&mut |_: &RatingSnapshot| count += 1).unwrap();

        // 3 answers / 10 questions rounds down to zero
        assert_eq!(simulation.sampling_period(), 0);
        assert_eq!(count, 0);
        assert_eq!(summary.answers, 3);
        assert_eq!(summary.snapshots, 0);
    }

    #[test]
    fn test_empty_populations_finish_immediately() {
        let no_players = SimulationConfig {
            players: ArchetypeCounts::none(),
            ..small_config()
        };
        let no_questions = SimulationConfig {
            question_count: 0,
            ..small_config()
        };

        for config in [no_players, no_questions] {
            let mut simulation = Simulation::new(config).unwrap();
            let mut count = 0;

            let summary = simulation.run(&mut |_: &RatingSnapshot| count += 1).unwrap();

            assert_eq!(simulation.state(), SimulationState::Finished);
            assert_eq!(summary.answers, 0);
            assert_eq!(count, 0);
        }
    }

    #[test]
    fn test_question_bound_limits_queues() {
        let config = SimulationConfig {
            question_count: 8,
            questions_per_player: Some(QuestionBound { min: 2, max: 5 }),
            ..small_config()
        };
        let mut simulation = Simulation::new(config).unwrap();
        simulation.populate();

        for player in simulation.players() {
            let len = player.question_queue().len();
            assert!((2..=5).contains(&len));
            assert!(player.question_queue().iter().all_unique());
        }

        let expected_total: usize = simulation.players().iter().map(|p| p.question_queue().len()).sum();
        assert_eq!(simulation.total_answers(), expected_total);

        simulation.run(&mut |_: &RatingSnapshot| {}).unwrap();
        assert_eq!(simulation.answers(), expected_total);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut first = Vec::new();
        let mut second = Vec::new();

        Simulation::new(small_config())
            .unwrap()
            .run(&mut |s: &RatingSnapshot| first.push(*s))
            .unwrap();
        Simulation::new(small_config())
            .unwrap()
            .run(&mut |s: &RatingSnapshot| second.push(*s))
            .unwrap();

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_means_follow_archetypes() {
        let mut simulation = Simulation::new(small_config()).unwrap();
        let summary = simulation.run(&mut |_: &RatingSnapshot| {}).unwrap();

        let mean = |archetype: Archetype| {
            summary
                .archetypes
                .iter()
                .find(|a| a.archetype == archetype)
                .and_then(|a| a.mean_rating)
                .unwrap()
        };

        assert!(mean(Archetype::AlwaysRight) > 1000.0);
        assert!(mean(Archetype::AlwaysWrong) < 1000.0);
        assert!(mean(Archetype::AlwaysRight) > mean(Archetype::AlwaysMid));
        assert!(mean(Archetype::AlwaysMid) > mean(Archetype::AlwaysWrong));
        assert_eq!(summary.seed, 42);
    }

    #[test]
    fn test_draw_queue_without_bound_is_permutation() {
        let mut rng = seeded_rng();
        let pool: Vec<usize> = (0..20).collect();

        let queue = draw_queue(&pool, None, &mut rng);

        assert_eq!(queue.iter().copied().sorted().collect::<Vec<_>>(), pool);
    }

    #[test]
    fn test_draw_queue_clamps_bound_to_pool() {
        let mut rng = seeded_rng();
        let pool: Vec<usize> = (0..4).collect();

        let queue = draw_queue(&pool, Some(QuestionBound { min: 10, max: 50 }), &mut rng);

        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn test_rating_range() {
        let questions = vec![Question::new(1200.0), Question::new(800.0), Question::new(1000.0)];
        let empty: Vec<Question> = Vec::new();

        assert_eq!(rating_range(&questions), Some((800.0, 1200.0)));
        assert_eq!(rating_range(&questions[..1]), Some((1200.0, 1200.0)));
        assert_eq!(rating_range(&empty), None);
    }
}
