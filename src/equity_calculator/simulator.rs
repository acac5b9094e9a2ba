use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::results::{EquityResult, SimulationResults};
use crate::card::CardError;
use crate::config::{ConfigError, SimulatorConfig};
use crate::constants::BOARD_CARDS;
use crate::deck::Deck;
use crate::hand_evaluator::{compare, evaluate_hand, Hand};
use crate::hand_range::{Combo, HandRange, RangeError};

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("{stage} needs {expected} board cards, got {found}")]
    InvalidBoardSize {
        stage: Stage,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to seed worker rng: {0}")]
    Rng(#[from] rand::Error),
    #[error("simulation worker panicked")]
    WorkerPanicked,
}

/// Point of the hand the calculation starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Preflop,
    Flop,
    Turn,
}

impl Stage {
    /// Board cards already dealt at this stage
    pub const fn board_cards(self) -> usize {
        match self {
            Stage::Preflop => 0,
            Stage::Flop => 3,
            Stage::Turn => 4,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Preflop => "preflop",
            Stage::Flop => "flop",
            Stage::Turn => "turn",
        };
        write!(f, "{}", name)
    }
}

/// Runs a monte carlo simulation to calculate preflop range vs range equity
///
/// # Example
/// ```
/// use range_equity::config::SimulatorConfig;
/// use range_equity::equity_calculator::preflop_equity;
/// let config = SimulatorConfig::default().with_sim_count(1000);
/// let equity = preflop_equity("AA, KK, QQ", "AKs, AKo, AQs, AQo", &config).unwrap();
/// assert!(equity.range1_equity() > 50.0);
/// ```
pub fn preflop_equity(
    range1: &str,
    range2: &str,
    config: &SimulatorConfig,
) -> Result<EquityResult, SimulatorError> {
    calc_equity(Stage::Preflop, range1, range2, "", config)
}

/// Range vs range equity with a three card flop, e.g. "AhKhQd"
pub fn flop_equity(
    range1: &str,
    range2: &str,
    board: &str,
    config: &SimulatorConfig,
) -> Result<EquityResult, SimulatorError> {
    calc_equity(Stage::Flop, range1, range2, board, config)
}

/// Range vs range equity with a four card board, e.g. "AsKd7c5h"
pub fn turn_equity(
    range1: &str,
    range2: &str,
    board: &str,
    config: &SimulatorConfig,
) -> Result<EquityResult, SimulatorError> {
    calc_equity(Stage::Turn, range1, range2, board, config)
}

/// Parses the board and both ranges, then simulates
///
/// The board is parsed and checked before the ranges, and nothing is
/// simulated unless every input is valid.
///
/// # Arguments
///
/// * `stage` Street the board belongs to
/// * `range1` `range2` Range strings, e.g. "JJ+, AKs"
/// * `board` Concatenated card tokens, empty preflop
/// * `config` Game count, threads and seed
pub fn calc_equity(
    stage: Stage,
    range1: &str,
    range2: &str,
    board: &str,
    config: &SimulatorConfig,
) -> Result<EquityResult, SimulatorError> {
    config.validate()?;
    let board: Hand = board.parse()?;
    check_board(stage, &board)?;
    let range1 = HandRange::from_string(range1)?;
    let range2 = HandRange::from_string(range2)?;

    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let results = approx_equity(stage, &range1, &range2, &board, config, &mut rng)?;
    Ok(results.equity_result())
}

/// Simulates `config.sim_count` games between two parsed ranges
///
/// Returns the raw counts. Games whose cards collide are discarded and
/// counted as such, never redrawn.
///
/// # Arguments
///
/// * `stage` Street the board belongs to
/// * `range1` `range2` Hand ranges, an empty range discards every game
/// * `board` Public cards, exactly as many as the stage needs
/// * `config` Game count and threads, the seed is ignored in favour of `rng`
/// * `rng` Source of randomness, worker generators are seeded from it
pub fn approx_equity<R: Rng>(
    stage: Stage,
    range1: &HandRange,
    range2: &HandRange,
    board: &Hand,
    config: &SimulatorConfig,
    rng: &mut R,
) -> Result<SimulationResults, SimulatorError> {
    config.validate()?;
    let sim = Simulator::new(stage, range1, range2, board.clone())?;
    log::info!(
        "{:<32}{:<8}{} games on {} threads",
        "simulating",
        stage.to_string(),
        config.sim_count,
        config.n_threads
    );
    let results = sim.run_parallel(config.sim_count, config.n_threads, rng)?;
    log::info!(
        "{:<32}{} valid, {} discarded",
        "finished simulation",
        results.valid_trials(),
        results.discarded_trials()
    );
    if results.valid_trials() == 0 {
        log::warn!("every game was discarded, equity is undefined");
    }
    Ok(results)
}

fn check_board(stage: Stage, board: &Hand) -> Result<(), SimulatorError> {
    if board.len() != stage.board_cards() {
        return Err(SimulatorError::InvalidBoardSize {
            stage,
            expected: stage.board_cards(),
            found: board.len(),
        });
    }
    let mut used_cards_mask = 0u64;
    for &card in board.cards() {
        if (used_cards_mask & card.mask()) != 0 {
            return Err(CardError::DuplicateCard(card).into());
        }
        used_cards_mask |= card.mask();
    }
    Ok(())
}

/// equity calculator main structure
///
/// Immutable for the whole run, so workers share it by reference.
#[derive(Debug)]
pub struct Simulator<'a> {
    hand_ranges: [&'a HandRange; 2],
    /// initial board
    fixed_board: Hand,
    /// initial board as 64bit mask
    board_mask: u64,
    /// every card not on the initial board
    base_deck: Deck,
}

impl<'a> Simulator<'a> {
    pub fn new(
        stage: Stage,
        range1: &'a HandRange,
        range2: &'a HandRange,
        board: Hand,
    ) -> Result<Simulator<'a>, SimulatorError> {
        check_board(stage, &board)?;
        log::debug!(
            "{:<32}{:<8}{} vs {} combos",
            "simulator board",
            board.to_string(),
            range1.len(),
            range2.len()
        );
        Ok(Simulator {
            hand_ranges: [range1, range2],
            board_mask: board.mask(),
            base_deck: Deck::without(&board),
            fixed_board: board,
        })
    }

    /// Simulates `sim_count` games one after another
    pub fn run<R: Rng>(&self, sim_count: u64, rng: &mut R) -> SimulationResults {
        let mut results = SimulationResults::default();
        for _ in 0..sim_count {
            self.run_trial(rng, &mut results);
        }
        results
    }

    /// Splits `sim_count` games over `n_threads` workers
    ///
    /// Each worker gets its own generator seeded from `rng` and its own
    /// results batch, batches are summed once every worker is done.
    pub fn run_parallel<R: Rng>(
        &self,
        sim_count: u64,
        n_threads: usize,
        rng: &mut R,
    ) -> Result<SimulationResults, SimulatorError> {
        if n_threads <= 1 {
            return Ok(self.run(sim_count, rng));
        }

        let mut workers = Vec::with_capacity(n_threads);
        for (i, games) in split_games(sim_count, n_threads).into_iter().enumerate() {
            let worker_rng = SmallRng::from_rng(&mut *rng)?;
            log::debug!("{:<32}{:<8}{} games", "spawning worker", i, games);
            workers.push((worker_rng, games));
        }

        let batches = crossbeam::scope(|scope| {
            let handles: Vec<_> = workers
                .into_iter()
                .map(|(mut worker_rng, games)| {
                    scope.spawn(move |_| self.run(games, &mut worker_rng))
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join())
                .collect::<Result<Vec<SimulationResults>, _>>()
        })
        .map_err(|_| SimulatorError::WorkerPanicked)?
        .map_err(|_| SimulatorError::WorkerPanicked)?;

        Ok(batches
            .into_iter()
            .fold(SimulationResults::default(), |total, batch| total + batch))
    }

    /// Plays out a single game
    ///
    /// Shuffles the deck, draws one combo from each range and throws the
    /// game away if the combos collide with each other or the board.
    /// Otherwise completes the board from the top of the deck and records
    /// the showdown.
    pub fn run_trial<R: Rng>(&self, rng: &mut R, results: &mut SimulationResults) {
        let mut deck = self.base_deck.clone();
        deck.shuffle(rng);

        let combo1 = random_combo(self.hand_ranges[0], rng);
        let combo2 = random_combo(self.hand_ranges[1], rng);
        let (combo1, combo2) = match (combo1, combo2) {
            (Some(c1), Some(c2)) => (c1, c2),
            _ => {
                results.discard();
                return;
            }
        };
        if (combo1.mask() & combo2.mask()) != 0
            || ((combo1.mask() | combo2.mask()) & self.board_mask) != 0
        {
            results.discard();
            return;
        }

        let used_cards_mask = combo1.mask() | combo2.mask();
        let cards_remaining = BOARD_CARDS - self.fixed_board.len();
        let board = &self.fixed_board + &deck.deal(cards_remaining, used_cards_mask);

        let eval1 = evaluate_hand(&(&combo1.to_hand() + &board));
        let eval2 = evaluate_hand(&(&combo2.to_hand() + &board));
        results.record(compare(&eval1, &eval2));
    }
}

/// Uniform pick from a range, `None` when it is empty
fn random_combo<R: Rng>(range: &HandRange, rng: &mut R) -> Option<Combo> {
    if range.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0, range.len());
    Some(range.combos()[idx])
}

/// Game count per worker, the remainder goes to the first workers
fn split_games(sim_count: u64, n_threads: usize) -> Vec<u64> {
    let n = n_threads as u64;
    (0..n)
        .map(|i| sim_count / n + if i < sim_count % n { 1 } else { 0 })
        .collect()
}
