/// Single grid axis, used for row/column indices and board dimensions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Grid coordinates `(row, col)`, both 0-based.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells on a `rows` x `cols` grid.
pub const fn mult(rows: Coord, cols: Coord) -> CellCount {
    (rows as CellCount).saturating_mul(cols as CellCount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nd_index_is_row_then_col() {
        assert_eq!((2, 7).to_nd_index(), [2, 7]);
    }

    #[test]
    fn largest_grid_fits_cell_count() {
        assert_eq!(mult(3, 4), 12);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 65025);
    }
}
