use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::{cave_palette, CellColor, Generator, MooreThreshold, RandomFill};
use crate::config::CaveOptions;
use crate::error::Result;
use crate::grid::Grid;

/// Single-pass cave automaton
///
/// Each generation clears the grid, fills it with random rock and runs the
/// Moore-threshold rule for `steps` generations.
///
/// # Example
///
/// ```rust
/// use cave_automata::*;
///
/// let mut caves = CaveGenerator::new(40, 30, 42);
/// caves.generate().unwrap();
///
/// let analysis = caves.analyze();
/// let cells: u32 = analysis.group_analyses.iter().map(|g| g.count).sum();
/// assert_eq!(cells, 40 * 30);
/// ```
#[derive(Debug)]
pub struct CaveGenerator {
    grid: Grid,
    options: CaveOptions,
    rng: ChaCha8Rng,
}

impl CaveGenerator {
    /// Create a generator with default options
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            grid: Grid::new(width, height),
            options: CaveOptions::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a generator with custom options
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the options fail validation
    pub fn with_options(width: u32, height: u32, options: CaveOptions, seed: u64) -> Result<Self> {
        let mut generator = Self::new(width, height, seed);
        generator.set_options(options)?;
        Ok(generator)
    }

    #[inline]
    pub fn options(&self) -> &CaveOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: CaveOptions) -> Result<()> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    /// Restart the random stream
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}

impl Generator for CaveGenerator {
    fn generate(&mut self) -> Result<()> {
        let options = self.options;
        self.grid.clear();
        self.grid.set_initializer(RandomFill {
            fill_percent: options.fill_percent,
        });
        self.grid.set_rule(MooreThreshold {
            threshold: options.threshold,
            radius: options.radius,
        });

        self.grid.initialize(&mut self.rng)?;
        self.grid.generate(options.steps)?;

        debug!(
            width = self.grid.width(),
            height = self.grid.height(),
            ?options,
            "generated cave"
        );
        Ok(())
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    fn cell_colors(&self) -> Vec<CellColor> {
        cave_palette()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{FLOOR, ROCK};

    fn types(generator: &CaveGenerator) -> Vec<u32> {
        generator.result().iter().map(|c| c.cell_type).collect()
    }

    #[test]
    fn test_same_seed_same_cave() {
        let mut a = CaveGenerator::new(32, 24, 7);
        let mut b = CaveGenerator::new(32, 24, 7);
        a.generate().unwrap();
        b.generate().unwrap();
        assert_eq!(types(&a), types(&b));

        let mut c = CaveGenerator::new(32, 24, 8);
        c.generate().unwrap();
        assert_ne!(types(&a), types(&c));
    }

    #[test]
    fn test_reseed_repeats_output() {
        let mut caves = CaveGenerator::new(20, 20, 11);
        caves.generate().unwrap();
        let first = types(&caves);

        caves.generate().unwrap();
        caves.reseed(11);
        caves.generate().unwrap();
        assert_eq!(types(&caves), first);
    }

    #[test]
    fn test_full_and_empty_fill() {
        let full = CaveOptions {
            fill_percent: 100,
            ..CaveOptions::default()
        };
        let mut caves = CaveGenerator::with_options(10, 10, full, 1).unwrap();
        caves.generate().unwrap();
        // Corners see only 4 rock cells, below the threshold of 5
        assert_eq!(caves.grid().cell(0, 0).cell_type, FLOOR);
        assert_eq!(caves.grid().cell(5, 5).cell_type, ROCK);

        let empty = CaveOptions {
            fill_percent: 0,
            ..CaveOptions::default()
        };
        caves.set_options(empty).unwrap();
        caves.generate().unwrap();
        assert!(caves.result().iter().all(|c| c.cell_type == FLOOR));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let bad = CaveOptions {
            fill_percent: 150,
            ..CaveOptions::default()
        };
        assert!(CaveGenerator::with_options(4, 4, bad, 0).is_err());

        let mut caves = CaveGenerator::new(4, 4, 0);
        assert!(caves.set_options(bad).is_err());
        assert_eq!(*caves.options(), CaveOptions::default());
    }

    #[test]
    fn test_palette() {
        let caves = CaveGenerator::new(4, 4, 0);
        let colors = caves.cell_colors();
        assert_eq!(colors.len(), 2);
        assert!((colors[FLOOR as usize][0] - 65.0 / 255.0).abs() < 1e-6);
        assert_eq!(colors[ROCK as usize], [1.0; 3]);
    }
}
