use super::*;

/// Purely random generation: draws uniform `(row, column)` pairs and skips the ones that already hold a mine until
/// the requested count is reached.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Array2<bool> {
        use rand::prelude::*;

        let total_cells = config.total_cells();

        // optimize for full boards
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "Minefield already full, generated anyway, requested {} but only fits {}",
                    config.mines,
                    total_cells
                );
            }
            return Array2::from_elem(config.size(), true);
        }

        let mut mines: Array2<bool> = Array2::default(config.size());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed = 0;
        let mut draws: u64 = 0;

        while mines_placed < config.mines {
            let coords = (
                rng.random_range(0..config.rows),
                rng.random_range(0..config.columns),
            );
            draws += 1;

            let cell = &mut mines[coords];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }

        log::trace!("placed {} mines in {} draws", mines_placed, draws);

        // double check mine count
        let count = mines.iter().filter(|&&cell| cell).count();
        if count != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                count,
                config.mines
            );
        }
        mines
    }
}
