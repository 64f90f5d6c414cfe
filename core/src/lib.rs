#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod grid;
mod types;

/// Largest cell total a grid can hold in one allocation.
pub const MAX_CELLS: CellCount = isize::MAX as CellCount / core::mem::size_of::<Cell>();

/// Board shape and mine total for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub columns: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, columns: Coord, mines: CellCount) -> Self {
        Self {
            rows,
            columns,
            mines,
        }
    }

    pub fn new(rows: Coord, columns: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(GameError::InvalidDimensions);
        }
        let total_cells = rows
            .checked_mul(columns)
            .filter(|&total| total <= MAX_CELLS)
            .ok_or(GameError::InvalidDimensions)?;
        if mines > total_cells {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(rows, columns, mines))
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.columns)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.columns)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Placed,
    Removed,
}
