use core::fmt;
use serde::{Deserialize, Serialize};

pub const MINE_GLYPH: char = 'M';
pub const FLAG_GLYPH: char = 'F';
pub const HIDDEN_GLYPH: char = 'X';

/// One square of the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_mine: bool,
    is_revealed: bool,
    has_flag: bool,
    /// Only meaningful once the neighbours were scanned, 0 before that.
    adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn has_flag(&self) -> bool {
        self.has_flag
    }

    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// What the player sees for this cell.
    pub const fn glyph(&self) -> Glyph {
        match (self.is_revealed, self.is_mine, self.has_flag) {
            (true, true, _) => Glyph::Mine,
            (true, false, _) => Glyph::Count(self.adjacent_mines),
            (false, _, true) => Glyph::Flag,
            (false, _, false) => Glyph::Hidden,
        }
    }

    pub(crate) fn arm(&mut self) {
        self.is_mine = true;
    }

    /// Returns whether the cell was hidden before.
    pub(crate) fn reveal(&mut self) -> bool {
        !core::mem::replace(&mut self.is_revealed, true)
    }

    /// Returns the new flag state.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        self.has_flag = !self.has_flag;
        self.has_flag
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mines = count;
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.glyph(), f)
    }
}

/// Player-visible state of a cell, see [`Cell::glyph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    Mine,
    Count(u8),
    Flag,
    Hidden,
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        match self {
            Self::Mine => f.write_char(MINE_GLYPH),
            Self::Count(count) => write!(f, "{count}"),
            Self::Flag => f.write_char(FLAG_GLYPH),
            Self::Hidden => f.write_char(HIDDEN_GLYPH),
        }
    }
}
