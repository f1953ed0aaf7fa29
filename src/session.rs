//! Game orchestration: turn order, bot identity and terminal handling.

use anyhow::{anyhow, Result};

use crate::board::{Board, Cell};
use crate::scanner;
use crate::strategy::{Difficulty, Strategy};
use crate::{MAX_DIMENSION, MIN_DIMENSION, MIN_WIN_LENGTH};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

impl GameState {
    fn win_for(mark: Cell) -> GameState {
        match mark {
            Cell::PlayerOne => GameState::PlayerOneWin,
            Cell::PlayerTwo => GameState::PlayerTwoWin,
            Cell::Empty => GameState::Playing,
        }
    }
}

/// A running game between a human and the computer
///
/// The session owns the board, the turn marker, the bot's mark and the active
/// [`Strategy`]. Committed moves go through [`apply_move`]; the bot's reply
/// is applied internally on the same path.
///
/// [`apply_move`]: GameSession::apply_move
pub struct GameSession {
    board: Board,
    win_length: usize,
    current: Cell,
    bot: Cell,
    strategy: Strategy,
    state: GameState,
}

impl GameSession {
    /// Creates a session on a freshly validated empty board. The human plays
    /// first as `X`; the default opponent is an entropy-seeded minimax.
    pub fn new(rows: usize, columns: usize, win_length: usize) -> Result<Self> {
        let board = validated_board(rows, columns, win_length)?;
        Ok(Self {
            board,
            win_length,
            current: Cell::PlayerOne,
            bot: Cell::PlayerTwo,
            strategy: Strategy::new(Difficulty::Minimax),
            state: GameState::Playing,
        })
    }

    /// Replaces the default opponent, e.g. to fix a difficulty, seed or
    /// search budget up front
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validates the new shape and starts a fresh round on an empty board.
    /// On a validation failure nothing changes, the running round included.
    /// Turn and bot identities carry over from the previous round.
    pub fn configure(&mut self, rows: usize, columns: usize, win_length: usize) -> Result<()> {
        let board = validated_board(rows, columns, win_length)?;
        self.board = board;
        self.win_length = win_length;
        self.state = GameState::Playing;
        Ok(())
    }

    /// Swaps the active tier for subsequent bot moves without touching the
    /// board
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.strategy.set_difficulty(difficulty);
    }

    /// Plays the current player's mark at (row, column), then lets the bot
    /// answer if the game goes on
    ///
    /// Out-of-bounds targets, occupied cells and finished games are ignored
    /// without any state change; a stale click from the UI is harmless.
    pub fn apply_move(&mut self, row: usize, column: usize) -> GameState {
        if self.state != GameState::Playing {
            return self.state;
        }
        if row >= self.board.rows() || column >= self.board.columns() {
            return self.state;
        }
        if !self.board.get(row, column).is_empty() {
            return self.state;
        }

        self.commit(row, column);

        if self.state == GameState::Playing && self.current == self.bot {
            if let Some((bot_row, bot_column)) =
                self.strategy
                    .choose_move(&mut self.board, self.win_length, self.bot)
            {
                self.apply_move(bot_row, bot_column);
            }
        }
        self.state
    }

    fn commit(&mut self, row: usize, column: usize) {
        self.board.set(row, column, self.current);
        if scanner::has_winning_line(&self.board, self.win_length) {
            self.state = GameState::win_for(self.current);
            self.end_round();
        } else if self.board.is_full() {
            self.state = GameState::Draw;
            self.end_round();
        } else {
            self.current = self.current.opponent();
        }
    }

    // the side that moved last takes over the bot's seat for the next round,
    // so marks rotate between human and computer across rounds
    fn end_round(&mut self) {
        self.bot = self.current;
        self.current = self.current.opponent();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn current_player(&self) -> Cell {
        self.current
    }

    pub fn bot_mark(&self) -> Cell {
        self.bot
    }

    pub fn difficulty(&self) -> Difficulty {
        self.strategy.difficulty()
    }

    /// The winning mark, if the last round ended in a win
    pub fn winner(&self) -> Option<Cell> {
        match self.state {
            GameState::PlayerOneWin => Some(Cell::PlayerOne),
            GameState::PlayerTwoWin => Some(Cell::PlayerTwo),
            _ => None,
        }
    }
}

fn validated_board(rows: usize, columns: usize, win_length: usize) -> Result<Board> {
    if rows < MIN_DIMENSION || rows > MAX_DIMENSION {
        return Err(anyhow!(
            "Invalid dimensions, {} rows out of range. Rows must be between {} and {}",
            rows,
            MIN_DIMENSION,
            MAX_DIMENSION
        ));
    }
    if columns < MIN_DIMENSION || columns > MAX_DIMENSION {
        return Err(anyhow!(
            "Invalid dimensions, {} columns out of range. Columns must be between {} and {}",
            columns,
            MIN_DIMENSION,
            MAX_DIMENSION
        ));
    }
    let max_win = rows.min(columns);
    if win_length < MIN_WIN_LENGTH || win_length > max_win {
        return Err(anyhow!(
            "Invalid win length {}, must be between {} and {} for a {}x{} board",
            win_length,
            MIN_WIN_LENGTH,
            max_win,
            rows,
            columns
        ));
    }
    Ok(Board::new(rows, columns))
}
