use serde::{Deserialize, Serialize};

use crate::*;

/// Dimensions and mine count of a board.
///
/// Only constructed through [`GameConfig::new`], deserialization included, so a config always
/// has positive dimensions and leaves at least one cell free of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawGameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.rows, raw.cols, raw.mines)
    }
}

impl GameConfig {
    /// Presets only; callers outside the crate go through [`GameConfig::new`].
    pub(crate) const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Validated constructor. At least one cell must stay free of mines so the first click is
    /// always safe.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(rows, cols, mines).validate()
    }

    pub(crate) fn validate(self) -> Result<Self> {
        let Self { rows, cols, mines } = self;
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if mines >= mult(rows, cols) {
            return Err(GameError::TooManyMines { rows, cols, mines });
        }
        Ok(self)
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Normal, Self::Hard];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked(10, 10, 10),
            Self::Normal => GameConfig::new_unchecked(14, 16, 30),
            Self::Hard => GameConfig::new_unchecked(18, 22, 70),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}
