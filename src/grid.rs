//! Compact 6x6 grid of piece sizes.

use crate::{Pos, Size, DIMENSION};

/// Grid contents packed into a single u128.
///
/// See crate documentation for the encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Grid(u128);

impl Grid {
    /// Bits per cell (empty or one of three sizes).
    const CELL_BITS: u32 = 2;
    /// Mask for a single cell (0b11).
    const CELL_MASK: u128 = 0b11;
    /// Bits actually used by the 36 cells.
    const USED_BITS: u32 = Pos::COUNT as u32 * Self::CELL_BITS;

    /// Create an empty grid.
    #[inline]
    pub const fn new() -> Grid {
        Grid(0)
    }

    /// Create a grid from a raw encoding. Returns `None` if any unused bit is set.
    pub fn from_u128(bits: u128) -> Option<Grid> {
        if bits >> Self::USED_BITS != 0 {
            return None;
        }
        Some(Grid(bits))
    }

    /// Get the raw u128 encoding.
    #[inline]
    pub const fn to_u128(self) -> u128 {
        self.0
    }

    /// Size of the piece at a position, if any.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Size> {
        let bits = (self.0 >> (pos.0 as u32 * Self::CELL_BITS)) & Self::CELL_MASK;
        Size::from_steps(bits as u8)
    }

    /// Write a cell. `None` empties it.
    #[inline]
    pub fn set(&mut self, pos: Pos, piece: Option<Size>) {
        let shift = pos.0 as u32 * Self::CELL_BITS;
        let value = piece.map_or(0, |size| size.steps() as u128);
        self.0 = (self.0 & !(Self::CELL_MASK << shift)) | (value << shift);
    }

    /// Empty the cell and return what it held.
    #[inline]
    pub fn take(&mut self, pos: Pos) -> Option<Size> {
        let piece = self.get(pos);
        self.set(pos, None);
        piece
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos).is_none()
    }

    /// Check if a whole row holds no piece.
    #[inline]
    pub fn is_row_empty(&self, row: usize) -> bool {
        debug_assert!(row < DIMENSION);
        let row_bits = DIMENSION as u32 * Self::CELL_BITS;
        let row_mask = (1u128 << row_bits) - 1;
        (self.0 >> (row as u32 * row_bits)) & row_mask == 0
    }

    /// Rows holding at least one piece, from row 0 upwards.
    pub fn occupied_rows(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        (0..DIMENSION).filter(move |&row| !self.is_row_empty(row))
    }

    /// Positions of every piece on the grid.
    pub fn occupied(&self) -> impl Iterator<Item = (Pos, Size)> + '_ {
        Pos::all().filter_map(move |pos| self.get(pos).map(|size| (pos, size)))
    }

    /// Total number of pieces on the grid.
    pub fn count(&self) -> usize {
        self.occupied().count()
    }

    /// Number of pieces of the given size on the grid.
    pub fn count_size(&self, size: Size) -> usize {
        self.occupied().filter(|&(_, s)| s == size).count()
    }
}
