//! Reversi (Othello) rules engine.
//!
//! The board is an 8x8 row-major grid of [`Cell`]s. This crate covers move
//! legality, move application (disc flipping) and terminal-state scoring,
//! and nothing else: there is no turn tracking, no search, no session
//! state. Callers pass the moving player explicitly and drive turn order
//! themselves.
//!
//! # Coordinates
//!
//! Rows and columns are 0-indexed, 0..=7. The opening position is:
//!
//! ```text
//!   (3,3) = Player 2   (3,4) = Player 1
//!   (4,3) = Player 1   (4,4) = Player 2
//! ```
//!
//! # Validation
//!
//! The checked entry points (`is_valid_move`, `valid_moves`, `apply_move`)
//! take raw integers and validate them in a fixed order: player first,
//! then coordinates. A well-formed move that merely captures nothing is
//! not an error; `is_valid_move` reports it as `Ok(false)`.

#[cfg(feature = "wasm")]
pub mod wasm;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board side length.
pub const BOARD_SIZE: usize = 8;

/// Malformed-argument errors. Each variant is a distinct kind so callers
/// can tell a bad player from a bad coordinate from a bad grid.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Player argument is not exactly 1 or 2.
    #[error("player must be 1 or 2, got {0}")]
    InvalidPlayer(i64),
    /// Coordinate arrived as a non-integral value (floats and strings at
    /// the script boundary).
    #[error("coordinate is not an integer")]
    NonIntegerCoordinate,
    /// Coordinate is an integer outside 0..=7.
    #[error("coordinate {0} out of range 0..=7")]
    CoordinateOutOfRange(i64),
    /// `Board::of` input is not 8 rows of 8 cells valued 0, 1 or 2.
    #[error("grid must be 8 rows of 8 cells valued 0, 1 or 2")]
    InvalidGrid,
    /// `apply_move` on a well-formed but illegal placement.
    #[error("move is not legal for this player")]
    IllegalMove,
}

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The cell state a disc of this player occupies.
    #[inline]
    pub fn to_cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }

    /// Convert from u8 (1 or 2) to Player.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Player> {
        match bits {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

impl TryFrom<i64> for Player {
    type Error = BoardError;

    fn try_from(value: i64) -> Result<Player, BoardError> {
        match value {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(BoardError::InvalidPlayer(other)),
        }
    }
}

/// State of a single board cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    Empty = 0,
    PlayerOne = 1,
    PlayerTwo = 2,
}

impl Cell {
    /// Convert from u8 (0, 1 or 2) to Cell.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Cell> {
        match bits {
            0 => Some(Cell::Empty),
            1 => Some(Cell::PlayerOne),
            2 => Some(Cell::PlayerTwo),
            _ => None,
        }
    }
}

/// A validated board coordinate (row and column both 0..=7).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Create a square from integer coordinates, rejecting anything
    /// outside 0..=7.
    pub fn new(row: i64, col: i64) -> Result<Square, BoardError> {
        for value in [row, col] {
            if !(0..BOARD_SIZE as i64).contains(&value) {
                return Err(BoardError::CoordinateOutOfRange(value));
            }
        }
        Ok(Square {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Create a square from float coordinates as they arrive from a JS or
    /// JSON boundary, where every number is a float. Non-integral values
    /// are a type violation, checked for both coordinates before either
    /// range check.
    pub fn from_f64(row: f64, col: f64) -> Result<Square, BoardError> {
        for value in [row, col] {
            if !value.is_finite() || value.fract() != 0.0 {
                return Err(BoardError::NonIntegerCoordinate);
            }
        }
        Square::new(row as i64, col as i64)
    }

    /// Get the row (0-7).
    #[inline]
    pub fn row(self) -> u8 {
        self.row
    }

    /// Get the column (0-7).
    #[inline]
    pub fn col(self) -> u8 {
        self.col
    }

    /// Iterate over all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8).flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Square { row, col }))
    }
}

/// Computed outcome of a board position. Pure function of the grid; not
/// stored state.
///
/// `winner` is 0 while the game is unfinished or tied, otherwise 1 or 2.
/// Serializes with the camelCase field names of the original wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub finished: bool,
    pub player_one: u8,
    pub player_two: u8,
    pub tied: bool,
    pub winner: u8,
}

/// The 8 principal compass directions as (row, col) deltas.
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// An 8x8 Reversi board.
///
/// Owns its grid exclusively. The only mutating operation is
/// [`Board::apply_move`]; legality checks and scoring never mutate.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create a board in the standard opening position: empty except for
    /// the 4 alternating center discs.
    pub fn new() -> Board {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        cells[3][3] = Cell::PlayerTwo;
        cells[3][4] = Cell::PlayerOne;
        cells[4][3] = Cell::PlayerOne;
        cells[4][4] = Cell::PlayerTwo;
        Board { cells }
    }

    /// Build a board from caller-supplied rows of raw cell values
    /// (0 = empty, 1 = player 1, 2 = player 2).
    ///
    /// The layout itself is not checked for reachability; this exists to
    /// set up arbitrary positions directly. Anything other than exactly
    /// 8 rows of 8 valid cell values is rejected.
    pub fn of<R: AsRef<[u8]>>(rows: &[R]) -> Result<Board, BoardError> {
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::InvalidGrid);
        }
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != BOARD_SIZE {
                return Err(BoardError::InvalidGrid);
            }
            for (c, &bits) in row.iter().enumerate() {
                cells[r][c] = Cell::from_bits(bits).ok_or(BoardError::InvalidGrid)?;
            }
        }
        Ok(Board { cells })
    }

    /// Build a board from an already-typed grid.
    #[inline]
    pub fn from_cells(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Board {
        Board { cells }
    }

    /// Get the cell at a square.
    #[inline]
    pub fn cell(&self, sq: Square) -> Cell {
        self.cells[sq.row as usize][sq.col as usize]
    }

    // ========== Move Legality ==========

    /// Check whether `player` may legally place a disc at (row, col).
    ///
    /// Arguments are validated in order: player, then coordinates. After
    /// validation this never errors: an occupied target or a placement
    /// that captures nothing is `Ok(false)`.
    pub fn is_valid_move(&self, player: i64, row: i64, col: i64) -> Result<bool, BoardError> {
        let player = Player::try_from(player)?;
        let sq = Square::new(row, col)?;
        Ok(self.is_legal(player, sq))
    }

    /// Typed legality check: the target must be empty and at least one
    /// direction must capture.
    pub fn is_legal(&self, player: Player, sq: Square) -> bool {
        if self.cell(sq) != Cell::Empty {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&dir| self.captures_in_direction(player, sq, dir))
    }

    /// Walk outward from `sq` along `dir` and report whether the ray
    /// holds one-or-more contiguous opponent discs terminated by one of
    /// `player`'s discs. Empty cells and the board edge end the ray with
    /// no capture.
    fn captures_in_direction(&self, player: Player, sq: Square, (dr, dc): (i8, i8)) -> bool {
        let own = player.to_cell();
        let opponent = player.opponent().to_cell();
        let mut r = sq.row as i8 + dr;
        let mut c = sq.col as i8 + dc;
        let mut seen_opponent = false;

        while (0..BOARD_SIZE as i8).contains(&r) && (0..BOARD_SIZE as i8).contains(&c) {
            let cell = self.cells[r as usize][c as usize];
            if cell == opponent {
                seen_opponent = true;
                r += dr;
                c += dc;
            } else if cell == own {
                return seen_opponent;
            } else {
                return false;
            }
        }
        false
    }

    /// Enumerate every square where `is_valid_move` would return true for
    /// `player`. Applies the same player validation; the result is eagerly
    /// materialized in row-major order.
    pub fn valid_moves(&self, player: i64) -> Result<Vec<Square>, BoardError> {
        let player = Player::try_from(player)?;
        Ok(self.legal_moves(player))
    }

    /// Typed counterpart of [`Board::valid_moves`].
    pub fn legal_moves(&self, player: Player) -> Vec<Square> {
        Square::all().filter(|&sq| self.is_legal(player, sq)).collect()
    }

    // ========== Move Application ==========

    /// Place a disc for `player` at (row, col) and flip every captured
    /// run in all 8 directions. Returns the number of flipped discs.
    ///
    /// Malformed arguments yield the same error kinds as
    /// [`Board::is_valid_move`]; a well-formed illegal placement yields
    /// [`BoardError::IllegalMove`] and leaves the board untouched.
    pub fn apply_move(&mut self, player: i64, row: i64, col: i64) -> Result<u8, BoardError> {
        let player = Player::try_from(player)?;
        let sq = Square::new(row, col)?;
        if !self.is_legal(player, sq) {
            return Err(BoardError::IllegalMove);
        }

        self.cells[sq.row as usize][sq.col as usize] = player.to_cell();
        let mut flipped = 0;
        for &dir in &DIRECTIONS {
            flipped += self.flip_in_direction(player, sq, dir);
        }
        Ok(flipped)
    }

    /// Flip the captured run along one direction, if any. Returns the
    /// number of discs flipped.
    fn flip_in_direction(&mut self, player: Player, sq: Square, (dr, dc): (i8, i8)) -> u8 {
        if !self.captures_in_direction(player, sq, (dr, dc)) {
            return 0;
        }
        let own = player.to_cell();
        let mut r = sq.row as i8 + dr;
        let mut c = sq.col as i8 + dc;
        let mut flipped = 0;
        while self.cells[r as usize][c as usize] != own {
            self.cells[r as usize][c as usize] = own;
            flipped += 1;
            r += dr;
            c += dc;
        }
        flipped
    }

    // ========== Scoring ==========

    /// Compute the current score and terminal status.
    ///
    /// `finished` is true iff no empty cell remains (full-board rule;
    /// a position where neither player can move but empty cells remain
    /// is deliberately not treated as terminal).
    pub fn result(&self) -> GameResult {
        let mut player_one = 0u8;
        let mut player_two = 0u8;
        let mut empty = 0u8;
        for row in &self.cells {
            for cell in row {
                match cell {
                    Cell::Empty => empty += 1,
                    Cell::PlayerOne => player_one += 1,
                    Cell::PlayerTwo => player_two += 1,
                }
            }
        }

        let finished = empty == 0;
        let tied = finished && player_one == player_two;
        let winner = if !finished || tied {
            0
        } else if player_one > player_two {
            1
        } else {
            2
        };
        GameResult {
            finished,
            player_one,
            player_two,
            tied,
            winner,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// ASCII rendering: `.` empty, `X` player 1, `O` player 2.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::PlayerOne => 'X',
                    Cell::PlayerTwo => 'O',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
