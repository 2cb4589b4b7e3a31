//! Turn state for a single game: board, ko snapshot, player to move and pass history.

use std::fmt;

use crate::board::{Board, Color, Move, MoveError, Point};

/// True when the last two recorded turns were both passes.
pub fn check_end_game(pass_history: &[bool]) -> bool {
    matches!(pass_history, [.., true, true])
}

/// Result of a finished game, decided by score alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    BlackWins,
    WhiteWins,
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::BlackWins => write!(f, "Black wins"),
            Outcome::WhiteWins => write!(f, "White wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    /// Board before the last move, for the ko test
    previous: Option<Board>,
    to_move: Color,
    pass_history: Vec<bool>,
    komi: f64,
}

impl GameState {
    /// Empty board with Black to move.
    pub fn new(size: usize, komi: f64) -> Self {
        Self {
            board: Board::new(size),
            previous: None,
            to_move: Color::Black,
            pass_history: Vec::new(),
            komi,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board before the last move; a move may not recreate it.
    pub fn previous(&self) -> Option<&Board> {
        self.previous.as_ref()
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Hand the turn to `color` (GTP allows either side to play next).
    pub fn set_to_move(&mut self, color: Color) {
        self.to_move = color;
    }

    pub fn pass_history(&self) -> &[bool] {
        &self.pass_history
    }

    pub fn komi(&self) -> f64 {
        self.komi
    }

    pub fn set_komi(&mut self, komi: f64) {
        self.komi = komi;
    }

    /// Play `mv` for the player to move and hand the turn over.
    ///
    /// Returns the captured stones. A rejected move leaves the whole state unchanged.
    pub fn play(&mut self, mv: Move) -> Result<Vec<Point>, MoveError> {
        let Move::Play((x, y)) = mv else {
            self.pass();
            return Ok(Vec::new());
        };
        let snapshot = self.board.clone();
        let captured = self
            .board
            .place_with_ko(x, y, self.to_move, self.previous.as_ref())?;
        self.end_turn(snapshot, false);
        Ok(captured)
    }

    /// Pass for the player to move. Passing is always legal.
    pub fn pass(&mut self) {
        let snapshot = self.board.clone();
        self.end_turn(snapshot, true);
    }

    fn end_turn(&mut self, snapshot: Board, passed: bool) {
        self.previous = Some(snapshot);
        self.pass_history.push(passed);
        self.to_move = self.to_move.opponent();
    }

    pub fn is_over(&self) -> bool {
        check_end_game(&self.pass_history)
    }

    /// `(black, white)` score of the current board with this game's komi.
    pub fn score(&self) -> (f64, f64) {
        self.board.score(self.komi)
    }

    pub fn outcome(&self) -> Outcome {
        let (black, white) = self.score();
        if black > white {
            Outcome::BlackWins
        } else if white > black {
            Outcome::WhiteWins
        } else {
            Outcome::Draw
        }
    }
}
