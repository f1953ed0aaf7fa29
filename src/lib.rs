//! A generalized connect-N board game against a computer opponent
//!
//! The board shape and the run length needed to win are configurable per
//! session, and the computer opponent comes in three strengths: uniformly
//! random, a block-or-attack scan, and a time-bounded exhaustive minimax
//! search.
//!
//! # Basic Usage
//!
//! ```
//! use connectn_game::session::GameSession;
//! use connectn_game::strategy::{Difficulty, Strategy};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut session = GameSession::new(3, 3, 3)?
//!     .with_strategy(Strategy::from_seed(Difficulty::Heuristic, 1));
//! session.apply_move(1, 1);
//!
//! // the human's move and the bot's answer are both on the board
//! assert_eq!(session.board().empty_cells().len(), 7);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod scanner;

pub mod session;

pub mod strategy;


/// The smallest allowed board dimension in tiles
pub const MIN_DIMENSION: usize = 3;

/// The largest allowed board dimension in tiles
pub const MAX_DIMENSION: usize = 30;

/// The smallest allowed winning run length
pub const MIN_WIN_LENGTH: usize = 3;

// ensure that every legal board shape admits at least one full-length run
const_assert!(MIN_WIN_LENGTH <= MIN_DIMENSION);
const_assert!(MIN_DIMENSION <= MAX_DIMENSION);
