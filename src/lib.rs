//! Rule engine for a two-player stacking-and-bouncing board game on a 6x6 grid.
//!
//! Pieces are shared: a cell only records a size (1, 2 or 3), never an owner.
//! A player lifts a piece from their frontier row and walks it exactly as many
//! steps as its size. Ending a walk on another piece either bounces (the
//! budget is recharged to the size of the piece underneath) or swaps the two
//! pieces. Walking off the far edge into the goal wins the game.
//!
//! # Grid Encoding (128-bit)
//!
//! ```text
//! Bits 0-71:   36 cells × 2 bits per cell
//! Bits 72-127: Unused (always zero)
//!
//! Each cell (2 bits): 0 = empty, 1..=3 = piece size
//!
//! Cell indices (row-major order, row 0 is South's home row):
//!   row 5:  30 31 32 33 34 35   <- North's home row, South's goal side
//!   row 4:  24 25 26 27 28 29
//!   row 3:  18 19 20 21 22 23
//!   row 2:  12 13 14 15 16 17
//!   row 1:   6  7  8  9 10 11
//!   row 0:   0  1  2  3  4  5   <- South's home row, North's goal side
//! ```
//!
//! # Turn segment
//!
//! ```text
//! pick ──> step* ──┬──> land on empty cell (budget exhausted)
//!                  ├──> hover over a piece ──┬──> recharge ──> step* ...
//!                  │                         └──> swap
//!                  ├──> goal (winner fixed)
//!                  └──> cancel_movement (piece back at origin)
//! ```

pub mod board;
pub mod error;
pub mod grid;
pub mod history;
pub mod rules;

#[cfg(feature = "wasm")]
pub mod wasm;

use serde::{Deserialize, Serialize};

pub use board::{Board, MoveOutcome, PickedPiece};
pub use error::{EngineError, EngineResult, ReturnCode};
pub use grid::Grid;
pub use history::{Step, StepHistory};
pub use rules::{BounceMode, FrontierRule, Rules};

/// Side length of the square board.
pub const DIMENSION: usize = 6;

/// Number of pieces of each size a player places during setup.
pub const INITIAL_PIECES: u8 = 2;

/// Upper bound on recorded steps within one turn segment.
pub const MAX_HISTORY: usize = 50;

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Player {
    South = 1,
    North = 2,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::South => Player::North,
            Player::North => Player::South,
        }
    }

    /// Convert from u8 (1 or 2) to Player.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Player> {
        match bits {
            1 => Some(Player::South),
            2 => Some(Player::North),
            _ => None,
        }
    }

    /// Row on which this player places pieces during setup.
    #[inline]
    pub fn home_row(self) -> usize {
        match self {
            Player::South => 0,
            Player::North => DIMENSION - 1,
        }
    }

    /// Row a picked piece must stand on before it may enter this player's goal.
    #[inline]
    pub fn goal_row(self) -> usize {
        self.opponent().home_row()
    }

    /// Index into per-player tables.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize - 1
    }

    pub fn all() -> impl Iterator<Item = Player> {
        [Player::South, Player::North].into_iter()
    }
}

/// Piece size. The size is also the number of steps the piece travels.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Size {
    One = 1,
    Two = 2,
    Three = 3,
}

impl Size {
    /// Step budget granted by a piece of this size.
    #[inline]
    pub fn steps(self) -> u8 {
        match self {
            Size::One => 1,
            Size::Two => 2,
            Size::Three => 3,
        }
    }

    /// Convert from a step count (1, 2 or 3) to Size.
    #[inline]
    pub fn from_steps(steps: u8) -> Option<Size> {
        match steps {
            1 => Some(Size::One),
            2 => Some(Size::Two),
            3 => Some(Size::Three),
            _ => None,
        }
    }

    /// Index into per-size tables (0, 1, 2).
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.steps() as usize - 1
    }

    /// Get all sizes as an iterator.
    pub fn all() -> impl Iterator<Item = Size> {
        [Size::One, Size::Two, Size::Three].into_iter()
    }
}

/// Direction of a single step, or the terminal move into the goal.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards the last row.
    North,
    /// Towards row 0.
    South,
    East,
    West,
    Goal,
}

impl Direction {
    /// Row and column offsets of a cardinal step. `None` for `Goal`.
    #[inline]
    pub fn delta(self) -> Option<(isize, isize)> {
        match self {
            Direction::North => Some((1, 0)),
            Direction::South => Some((-1, 0)),
            Direction::East => Some((0, 1)),
            Direction::West => Some((0, -1)),
            Direction::Goal => None,
        }
    }

    #[inline]
    pub fn is_cardinal(self) -> bool {
        self != Direction::Goal
    }

    /// Convert from the numeric code used by bindings (0..=4).
    pub fn from_index(idx: u8) -> Option<Direction> {
        match idx {
            0 => Some(Direction::North),
            1 => Some(Direction::South),
            2 => Some(Direction::East),
            3 => Some(Direction::West),
            4 => Some(Direction::Goal),
            _ => None,
        }
    }

    /// The four cardinal directions.
    pub fn cardinals() -> impl Iterator<Item = Direction> {
        [Direction::North, Direction::South, Direction::East, Direction::West].into_iter()
    }

    /// Cardinal directions followed by `Goal`.
    pub fn all() -> impl Iterator<Item = Direction> {
        Self::cardinals().chain(std::iter::once(Direction::Goal))
    }
}

/// Position on the 6x6 board (0-35), row-major with row 0 at the South edge.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Pos(pub u8);

impl Pos {
    /// Number of cells on the board.
    pub const COUNT: u8 = (DIMENSION * DIMENSION) as u8;

    /// Create a position from row and column (0-5 each).
    #[inline]
    pub fn from_row_col(row: usize, col: usize) -> Pos {
        debug_assert!(row < DIMENSION && col < DIMENSION);
        Pos((row * DIMENSION + col) as u8)
    }

    /// Create a position, returning `None` when either coordinate is off the board.
    #[inline]
    pub fn new(row: usize, col: usize) -> Option<Pos> {
        if row < DIMENSION && col < DIMENSION {
            Some(Pos::from_row_col(row, col))
        } else {
            None
        }
    }

    /// Get the row (0-5).
    #[inline]
    pub fn row(self) -> usize {
        self.0 as usize / DIMENSION
    }

    /// Get the column (0-5).
    #[inline]
    pub fn col(self) -> usize {
        self.0 as usize % DIMENSION
    }

    /// Check if this is a valid position (0-35).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 < Self::COUNT
    }

    /// Neighbouring position one step away, or `None` when that leaves the board.
    pub fn step(self, dir: Direction) -> Option<Pos> {
        let (dr, dc) = dir.delta()?;
        let row = self.row().checked_add_signed(dr)?;
        let col = self.col().checked_add_signed(dc)?;
        Pos::new(row, col)
    }

    /// Iterate over all 36 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..Self::COUNT).map(Pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::South.opponent(), Player::North);
        assert_eq!(Player::North.opponent(), Player::South);
    }

    #[test]
    fn test_player_rows() {
        assert_eq!(Player::South.home_row(), 0);
        assert_eq!(Player::North.home_row(), DIMENSION - 1);
        assert_eq!(Player::South.goal_row(), DIMENSION - 1);
        assert_eq!(Player::North.goal_row(), 0);
    }

    #[test]
    fn test_player_from_bits() {
        assert_eq!(Player::from_bits(1), Some(Player::South));
        assert_eq!(Player::from_bits(2), Some(Player::North));
        assert_eq!(Player::from_bits(0), None);
        assert_eq!(Player::from_bits(3), None);
    }

    #[test]
    fn test_size_steps_mapping() {
        assert_eq!(Size::One.steps(), 1);
        assert_eq!(Size::Two.steps(), 2);
        assert_eq!(Size::Three.steps(), 3);
        for size in Size::all() {
            assert_eq!(Size::from_steps(size.steps()), Some(size));
        }
        assert_eq!(Size::from_steps(0), None);
        assert_eq!(Size::from_steps(4), None);
    }

    #[test]
    fn test_pos_from_row_col() {
        assert_eq!(Pos::from_row_col(0, 0), Pos(0));
        assert_eq!(Pos::from_row_col(0, 5), Pos(5));
        assert_eq!(Pos::from_row_col(1, 0), Pos(6));
        assert_eq!(Pos::from_row_col(5, 5), Pos(35));
    }

    #[test]
    fn test_pos_row_col() {
        for pos in Pos::all() {
            assert!(pos.is_valid());
            assert_eq!(Pos::from_row_col(pos.row(), pos.col()), pos);
        }
        assert_eq!(Pos::all().count(), 36);
    }

    #[test]
    fn test_pos_new_bounds() {
        assert_eq!(Pos::new(5, 5), Some(Pos(35)));
        assert_eq!(Pos::new(6, 0), None);
        assert_eq!(Pos::new(0, 6), None);
    }

    #[test]
    fn test_pos_step() {
        let center = Pos::from_row_col(2, 3);
        assert_eq!(center.step(Direction::North), Some(Pos::from_row_col(3, 3)));
        assert_eq!(center.step(Direction::South), Some(Pos::from_row_col(1, 3)));
        assert_eq!(center.step(Direction::East), Some(Pos::from_row_col(2, 4)));
        assert_eq!(center.step(Direction::West), Some(Pos::from_row_col(2, 2)));
        assert_eq!(center.step(Direction::Goal), None);
    }

    #[test]
    fn test_pos_step_off_board() {
        assert_eq!(Pos::from_row_col(0, 0).step(Direction::South), None);
        assert_eq!(Pos::from_row_col(0, 0).step(Direction::West), None);
        assert_eq!(Pos::from_row_col(5, 5).step(Direction::North), None);
        assert_eq!(Pos::from_row_col(5, 5).step(Direction::East), None);
    }

    #[test]
    fn test_direction_codes() {
        let all: Vec<Direction> = Direction::all().collect();
        assert_eq!(all.len(), 5);
        for (i, dir) in all.iter().enumerate() {
            assert_eq!(Direction::from_index(i as u8), Some(*dir));
        }
        assert_eq!(Direction::from_index(5), None);
        assert!(!Direction::Goal.is_cardinal());
    }
}
