use ndarray::Array2;

/// Single coordinate axis used for row/column counts and positions.
pub type Coord = usize;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = usize;

/// Two-dimensional in-bounds position `(row, column)`.
pub type Coord2 = (Coord, Coord);

/// Position as entered by a player, possibly outside of the grid.
pub type SignedCoord2 = (isize, isize);

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    a.saturating_mul(b)
}

/// Converts a player position into grid coordinates, `None` when it falls outside `bounds`.
pub fn checked_coords((row, column): SignedCoord2, (rows, columns): Coord2) -> Option<Coord2> {
    let row = Coord::try_from(row).ok()?;
    let column = Coord::try_from(column).ok()?;
    (row < rows && column < columns).then_some((row, column))
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, self.dim())
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, column) = coords;
    let (d_row, d_column) = delta;
    let (rows, columns) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= rows {
        return None;
    }

    let next_column = column.checked_add_signed(d_column)?;
    if next_column >= columns {
        return None;
    }

    Some((next_row, next_column))
}

/// Iterates the up-to-8 in-bounds neighbours of a cell, row by row.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
