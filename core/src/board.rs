use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

use crate::*;

/// The minefield: a rows x cols grid of cells plus the coordinates of every mine.
///
/// Mines are placed lazily, once per round, after the first clicked cell is known.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    mine_coords: BTreeSet<Coord2>,
    mines_placed: bool,
}

impl Board {
    /// Fails fast on a config with no cells or no room for a safe first click.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate().map(Self::from_valid_config)
    }

    /// Board for a preset. Presets always satisfy the config invariants.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self::from_valid_config(difficulty.config())
    }

    fn from_valid_config(config: GameConfig) -> Self {
        Self {
            config,
            cells: Self::allocate_cells(config.size()),
            mine_coords: BTreeSet::new(),
            mines_placed: false,
        }
    }

    fn allocate_cells((rows, cols): Coord2) -> Array2<Cell> {
        Array2::from_shape_fn((usize::from(rows), usize::from(cols)), |(row, col)| {
            Cell::new(row as Coord, col as Coord)
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn rows(&self) -> Coord {
        self.config.rows()
    }

    pub fn cols(&self) -> Coord {
        self.config.cols()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines()
    }

    pub fn total_cells(&self) -> CellCount {
        self.config.total_cells()
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_coords.iter().copied()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Out-of-bounds coordinates yield `None`; this is a normal branch, not an error.
    pub fn get_cell(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Places `mine_count` mines uniformly at random over every cell except `exclude`.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, exclude: Coord2, rng: &mut R) -> Result<()> {
        let exclude = self.validate_coords(exclude)?;
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }

        let cols = usize::from(self.cols());
        let total = usize::from(self.total_cells());
        let safe_index = usize::from(exclude.0) * cols + usize::from(exclude.1);

        // sample among the other cells, then shift indices past the safe one
        let coords: Vec<Coord2> =
            rand::seq::index::sample(rng, total - 1, self.mine_count().into())
                .into_iter()
                .map(|index| {
                    if index >= safe_index {
                        index + 1
                    } else {
                        index
                    }
                })
                .map(|index| ((index / cols) as Coord, (index % cols) as Coord))
                .collect();

        log::debug!("Placing {} mines, keeping {:?} safe", coords.len(), exclude);
        self.install_mines(coords.into_iter().collect());
        Ok(())
    }

    /// Installs an explicit layout. The coordinates must be in bounds, distinct and exactly
    /// `mine_count` of them.
    pub fn place_mines_at(&mut self, coords: &[Coord2]) -> Result<()> {
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }

        let mut layout = BTreeSet::new();
        for &pos in coords {
            layout.insert(self.validate_coords(pos)?);
        }

        let actual = layout.len() as CellCount;
        if actual != self.mine_count() {
            return Err(GameError::MineCountMismatch {
                expected: self.mine_count(),
                actual,
            });
        }

        self.install_mines(layout);
        Ok(())
    }

    fn install_mines(&mut self, layout: BTreeSet<Coord2>) {
        for &pos in &layout {
            self.cells[pos.to_nd_index()].set_mine();
        }
        self.mine_coords = layout;
        self.mines_placed = true;

        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let pos = (row, col);
                if !self.cells[pos.to_nd_index()].is_mine() {
                    let count = self.adjacent_mine_count(pos);
                    self.cells[pos.to_nd_index()].set_adjacent_mines(count);
                }
            }
        }
    }

    fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_mine())
            .count() as u8
    }

    /// In-bounds cells around `(row, col)` in row-major order, excluding the cell itself.
    fn neighbors(&self, (row, col): Coord2) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (row.saturating_sub(1)..=row.saturating_add(1))
            .flat_map(move |r| (col.saturating_sub(1)..=col.saturating_add(1)).map(move |c| (r, c)))
            .filter(move |&(r, c)| (r, c) != (row, col) && r < rows && c < cols)
    }

    /// Reveals `coords` and, for zero-count safe cells, expands through all neighbours.
    ///
    /// Does nothing for out-of-bounds, revealed or flagged targets. A mine is revealed but not
    /// expanded. Returns every cell that went from hidden to revealed during this call.
    pub fn reveal_region(&mut self, coords: Coord2) -> Vec<Cell> {
        let mut revealed = Vec::new();
        let mut to_visit = VecDeque::from([coords]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let Some(cell) = self.cells.get_mut(visit_coords.to_nd_index()) else {
                continue;
            };
            // revealed and flagged cells refuse, so each cell is visited at most once
            if !cell.reveal() {
                continue;
            }
            let cell = *cell;
            revealed.push(cell);
            log::trace!(
                "Revealed {:?}, adjacent mines: {}",
                visit_coords,
                cell.adjacent_mines()
            );

            if !cell.is_mine() && cell.adjacent_mines() == 0 {
                to_visit.extend(
                    self.neighbors(visit_coords)
                        .filter(|&pos| self.cells[pos.to_nd_index()].is_hidden()),
                );
            }
        }

        revealed
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> bool {
        self.cells
            .get_mut(coords.to_nd_index())
            .is_some_and(Cell::toggle_flag)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_revealed()).count() as CellCount
    }

    /// Mines minus flags. Goes negative when the player over-flags.
    pub fn remaining_flags(&self) -> isize {
        (self.mine_count() as isize) - (self.flagged_count() as isize)
    }

    /// Won when every mine is flagged, or when every safe cell is revealed.
    pub fn check_victory(&self) -> bool {
        if !self.mines_placed {
            return false;
        }

        let all_mines_flagged = self
            .mine_coords
            .iter()
            .all(|pos| self.cells[pos.to_nd_index()].is_flagged());
        let all_safe_revealed = self
            .cells
            .iter()
            .filter(|cell| !cell.is_mine())
            .all(Cell::is_revealed);

        all_mines_flagged || all_safe_revealed
    }

    /// Reveals every mine that is not flagged, so flags stay visible after a loss.
    pub fn reveal_all_mines(&mut self) -> Vec<Cell> {
        let mut revealed = Vec::new();
        for pos in &self.mine_coords {
            let cell = &mut self.cells[pos.to_nd_index()];
            if cell.reveal() {
                revealed.push(*cell);
            }
        }
        revealed
    }

    /// Restores every cell to its freshly created state; dimensions are kept.
    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
        self.mine_coords.clear();
        self.mines_placed = false;
    }
}
