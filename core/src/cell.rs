use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Revealed,
    Flagged,
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}

/// A single square of the board.
///
/// Once revealed a cell stays revealed until the whole board is reset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    row: Coord,
    col: Coord,
    is_mine: bool,
    visibility: Visibility,
    adjacent_mines: u8,
}

impl Cell {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self {
            row,
            col,
            is_mine: false,
            visibility: Visibility::Hidden,
            adjacent_mines: 0,
        }
    }

    pub const fn row(&self) -> Coord {
        self.row
    }

    pub const fn col(&self) -> Coord {
        self.col
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Number of mines among the neighbours. Only meaningful for non-mine cells.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.visibility, Visibility::Hidden)
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.visibility, Visibility::Revealed)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.visibility, Visibility::Flagged)
    }

    pub fn set_mine(&mut self) {
        self.is_mine = true;
    }

    pub fn set_adjacent_mines(&mut self, count: u8) {
        debug_assert!(!self.is_mine, "adjacent count set on a mine");
        self.adjacent_mines = count;
    }

    /// Hidden -> Revealed. Returns `false` without touching the cell when it is already revealed
    /// or carries a flag.
    pub fn reveal(&mut self) -> bool {
        if !self.is_hidden() {
            return false;
        }
        self.visibility = Visibility::Revealed;
        true
    }

    pub fn toggle_flag(&mut self) -> bool {
        use Visibility::*;

        match self.visibility {
            Revealed => false,
            Flagged => {
                self.visibility = Hidden;
                true
            }
            Hidden => {
                self.visibility = Flagged;
                true
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.row, self.col);
    }
}
