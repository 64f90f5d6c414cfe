use alloc::string::{String, ToString};
use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The game board: owns every cell in one row-major array.
///
/// A grid starts without mines. [`Grid::place_mines`] arms it exactly once, after which reveals, flags and
/// neighbour scans give meaningful results. The grid does not validate its [`GameConfig`]; use
/// [`GameConfig::new`] for that.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    config: GameConfig,
    cells: Array2<Cell>,
    mines_placed: bool,
}

impl Grid {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            cells: Array2::default(config.size()),
            mines_placed: false,
        }
    }

    /// Builds an already armed grid with mines exactly at `mine_coords`, duplicates are counted once.
    pub fn from_mine_coords(rows: Coord, columns: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        GameConfig::new(rows, columns, 0)?;

        let mut cells: Array2<Cell> = Array2::default((rows, columns));
        for &(row, column) in mine_coords {
            if row >= rows || column >= columns {
                return Err(out_of_range(row, column));
            }
            cells[(row, column)].arm();
        }

        let mines = cells.iter().filter(|cell| cell.is_mine()).count();
        Ok(Self {
            config: GameConfig::new_unchecked(rows, columns, mines),
            cells,
            mines_placed: true,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn rows(&self) -> Coord {
        self.config.rows
    }

    pub fn columns(&self) -> Coord {
        self.config.columns
    }

    pub fn size(&self) -> Coord2 {
        self.cells.dim()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_revealed()).count()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.has_flag()).count()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn validate_coords(&self, coords: SignedCoord2) -> Result<Coord2> {
        checked_coords(coords, self.size()).ok_or(GameError::OutOfRange {
            row: coords.0,
            column: coords.1,
        })
    }

    /// Arms the grid with the mines chosen by `generator`.
    pub fn place_mines(&mut self, generator: impl MinefieldGenerator) -> Result<()> {
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }

        let mask = generator.generate(self.config);
        debug_assert_eq!(mask.dim(), self.size());
        for (cell, &is_mine) in self.cells.iter_mut().zip(mask.iter()) {
            if is_mine {
                cell.arm();
            }
        }
        self.mines_placed = true;

        log::debug!(
            "placed {} mines on a {}x{} grid",
            self.config.mines,
            self.config.rows,
            self.config.columns
        );
        Ok(())
    }

    pub fn reveal(&mut self, coords: SignedCoord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords];

        Ok(match (cell.reveal(), cell.is_mine()) {
            (false, _) => RevealOutcome::NoChange,
            (true, true) => {
                log::debug!("mine hit at {:?}", coords);
                RevealOutcome::HitMine
            }
            (true, false) => RevealOutcome::Revealed,
        })
    }

    /// Flips the flag on a cell, revealed cells included.
    pub fn toggle_flag(&mut self, coords: SignedCoord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;

        Ok(if self.cells[coords].toggle_flag() {
            FlagOutcome::Placed
        } else {
            FlagOutcome::Removed
        })
    }

    /// Counts the mines around a cell and stores the result on it. Does not touch any other cell.
    pub fn count_adjacent_mines(&mut self, coords: SignedCoord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        let count: u8 = self
            .iter_neighbors(coords)
            .filter(|&pos| self.cells[pos].is_mine())
            .count()
            .try_into()
            .unwrap_or(u8::MAX);

        self.cells[coords].set_adjacent_mines(count);
        Ok(count)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for (column, cell) in row.iter().enumerate() {
                if column > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{cell}")?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

fn out_of_range(row: Coord, column: Coord) -> GameError {
    GameError::OutOfRange {
        row: row.try_into().unwrap_or(isize::MAX),
        column: column.try_into().unwrap_or(isize::MAX),
    }
}
