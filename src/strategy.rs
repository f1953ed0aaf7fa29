//! The three selectable computer opponents

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use std::time::{Duration, Instant};

use crate::board::{Board, Cell};
use crate::scanner;

/// Wall-clock budget for a minimax move when none is configured
pub const DEFAULT_SEARCH_BUDGET: Duration = Duration::from_millis(1500);

// score returned by `minimax` when the wall-clock budget ran out; orders
// above every finite score, so it survives max-aggregation like an infinity
const SCORE_EXCEEDED: i32 = i32::MAX;

/// The strength tiers of the computer opponent
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Difficulty {
    Random,
    Heuristic,
    Minimax,
}

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Random => "random",
            Difficulty::Heuristic => "heuristic",
            Difficulty::Minimax => "minimax",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(Difficulty::Random),
            "heuristic" => Ok(Difficulty::Heuristic),
            "minimax" => Ok(Difficulty::Minimax),
            _ => Err(anyhow::anyhow!(
                "unknown difficulty '{}', expected random, heuristic or minimax",
                s
            )),
        }
    }
}

/// A computer opponent: one of the three tiers plus the random source and
/// search budget it draws on
///
/// # Notes
/// The random tier picks uniformly among the empty cells. The heuristic tier
/// scans for a cell that completes a run for either mark and otherwise plays
/// randomly. The minimax tier searches the remaining game tree exhaustively,
/// depth-first and without pruning, bounded only by a wall clock; when the
/// budget runs out mid-search the whole move choice is handed to the
/// heuristic tier rather than trusting a truncated tree.
pub struct Strategy {
    difficulty: Difficulty,
    rng: SmallRng,
    search_budget: Duration,
}

impl Strategy {
    /// Creates a new `Strategy` with an entropy-seeded random source
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rng: SmallRng::from_entropy(),
            search_budget: DEFAULT_SEARCH_BUDGET,
        }
    }

    /// Creates a new `Strategy` with a fixed seed, for reproducible games
    pub fn from_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: SmallRng::seed_from_u64(seed),
            search_budget: DEFAULT_SEARCH_BUDGET,
        }
    }

    /// Replaces the minimax wall-clock budget of an existing `Strategy`
    pub fn with_search_budget(mut self, search_budget: Duration) -> Self {
        self.search_budget = search_budget;
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Picks a cell for `bot` to play on a board needing runs of `win` to
    /// win, or `None` if no empty cell is left
    ///
    /// Speculative placements made while deciding are always reverted: the
    /// board is returned in exactly the state it was passed in.
    pub fn choose_move(
        &mut self,
        board: &mut Board,
        win: usize,
        bot: Cell,
    ) -> Option<(usize, usize)> {
        match self.difficulty {
            Difficulty::Random => self.random_move(board),
            Difficulty::Heuristic => self.block_or_attack(board, win, bot),
            Difficulty::Minimax => self.minimax_move(board, win, bot),
        }
    }

    fn random_move(&mut self, board: &Board) -> Option<(usize, usize)> {
        let empty_cells = board.empty_cells();
        if empty_cells.is_empty() {
            return None;
        }
        Some(empty_cells[self.rng.gen_range(0..empty_cells.len())])
    }

    // decisive-cell scan: first any cell that completes a run for the bot's
    // opponent, then any cell that completes a run for the bot itself, then
    // a random cell. The scan order decides the winner when both kinds of
    // cell exist at once, so the two passes must not be merged or swapped.
    fn block_or_attack(
        &mut self,
        board: &mut Board,
        win: usize,
        bot: Cell,
    ) -> Option<(usize, usize)> {
        let player = bot.opponent();

        for (row, column) in board.empty_cells() {
            board.set(row, column, player);
            let decisive = scanner::has_winning_line(board, win);
            board.set(row, column, Cell::Empty);
            if decisive {
                return Some((row, column));
            }
        }

        for (row, column) in board.empty_cells() {
            board.set(row, column, bot);
            let decisive = scanner::has_winning_line(board, win);
            board.set(row, column, Cell::Empty);
            if decisive {
                return Some((row, column));
            }
        }

        self.random_move(board)
    }

    fn minimax_move(&mut self, board: &mut Board, win: usize, bot: Cell) -> Option<(usize, usize)> {
        let start = Instant::now();
        let mut best_score = i32::MIN;
        let mut best_move = None;

        for (row, column) in board.empty_cells() {
            board.set(row, column, bot);
            let score = minimax(board, win, bot, false, start, self.search_budget);
            board.set(row, column, Cell::Empty);

            if score == SCORE_EXCEEDED {
                debug!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "search budget exhausted, delegating to block-or-attack"
                );
                return self.block_or_attack(board, win, bot);
            }
            // ties keep the earlier candidate
            if score > best_score {
                best_score = score;
                best_move = Some((row, column));
            }
        }

        debug!(?best_move, best_score, "full search finished");
        best_move
    }
}

/// Scores a position by exhaustive depth-first search of the remaining game
/// tree. `maximizing` is true when the bot is about to move; a completed run
/// always counts for whoever is *not* about to move, so it scores -1 seen
/// from the maximizing side and +1 otherwise. A draw scores 0.
///
/// The elapsed-time check runs before every child expansion and collapses the
/// rest of the subtree to the exceeded sentinel; there is no other way to
/// stop the recursion early.
fn minimax(
    board: &mut Board,
    win: usize,
    bot: Cell,
    maximizing: bool,
    start: Instant,
    budget: Duration,
) -> i32 {
    if scanner::has_winning_line(board, win) {
        return if maximizing { -1 } else { 1 };
    }
    if board.is_full() {
        return 0;
    }

    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for (row, column) in board.empty_cells() {
        if start.elapsed() >= budget {
            return SCORE_EXCEEDED;
        }

        let mark = if maximizing { bot } else { bot.opponent() };
        board.set(row, column, mark);
        let score = minimax(board, win, bot, !maximizing, start, budget);
        board.set(row, column, Cell::Empty);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}
