//! Seeding and transition policies of the cave generators

use rand::{Rng, RngCore};

use crate::cell::{FLOOR, ROCK};
use crate::grid::{Grid, Initializer, Rule};

/// Every cell becomes rock with probability `fill_percent` / 100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomFill {
    pub fill_percent: u32,
}

impl Initializer for RandomFill {
    fn init(&self, _grid: &Grid, _x: u32, _y: u32, rng: &mut dyn RngCore) -> u32 {
        if rng.gen_range(1..=100u32) <= self.fill_percent {
            ROCK
        } else {
            FLOOR
        }
    }
}

/// Keep the existing cell, flipping floor and rock with probability
/// `flip_percent` / 100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipNoise {
    pub flip_percent: u32,
}

impl Initializer for FlipNoise {
    fn init(&self, grid: &Grid, x: u32, y: u32, rng: &mut dyn RngCore) -> u32 {
        let cell_type = grid.cell(x, y).cell_type;
        if rng.gen_range(1..=100u32) <= self.flip_percent {
            if cell_type == ROCK {
                FLOOR
            } else {
                ROCK
            }
        } else {
            cell_type
        }
    }
}

/// Rock survives or appears where the Moore neighbourhood holds enough rock
///
/// The centre cell counts towards `threshold`, and neighbourhoods clipped at
/// the grid edge count only the cells inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MooreThreshold {
    pub threshold: u32,
    pub radius: u32,
}

impl Rule for MooreThreshold {
    fn apply(&self, grid: &Grid, x: u32, y: u32) -> u32 {
        if grid.moore(x, y, self.radius, &[ROCK]).len() as u32 >= self.threshold {
            ROCK
        } else {
            FLOOR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_fill_extremes() {
        let grid = Grid::new(1, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let full = RandomFill { fill_percent: 100 };
        let empty = RandomFill { fill_percent: 0 };
        for _ in 0..50 {
            assert_eq!(full.init(&grid, 0, 0, &mut rng), ROCK);
            assert_eq!(empty.init(&grid, 0, 0, &mut rng), FLOOR);
        }
    }

    #[test]
    fn test_flip_noise() {
        let mut grid = Grid::new(2, 1);
        grid.set_cell(ROCK, 1, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let always = FlipNoise { flip_percent: 100 };
        assert_eq!(always.init(&grid, 0, 0, &mut rng), ROCK);
        assert_eq!(always.init(&grid, 1, 0, &mut rng), FLOOR);

        let never = FlipNoise { flip_percent: 0 };
        assert_eq!(never.init(&grid, 0, 0, &mut rng), FLOOR);
        assert_eq!(never.init(&grid, 1, 0, &mut rng), ROCK);
    }

    #[test]
    fn test_moore_threshold() {
        let mut grid = Grid::new(3, 3);
        for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1)] {
            grid.set_cell(ROCK, x, y);
        }
        let rule = MooreThreshold {
            threshold: 4,
            radius: 1,
        };
        // Centre sees all four rock cells
        assert_eq!(rule.apply(&grid, 1, 1), ROCK);
        // Top-right corner sees none
        assert_eq!(rule.apply(&grid, 2, 2), FLOOR);
        // (0,0) clipped to 2x2: three rock cells
        assert_eq!(rule.apply(&grid, 0, 0), FLOOR);
    }
}
