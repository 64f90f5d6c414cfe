use crate::*;
use ndarray::Array2;
pub use random::*;

mod random;

/// Chooses which cells of a fresh grid hold mines.
pub trait MinefieldGenerator {
    /// Returns a `(rows, columns)` mask with `true` on every mine.
    fn generate(self, config: GameConfig) -> Array2<bool>;
}
