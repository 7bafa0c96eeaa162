use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::{cave_palette, CellColor, FlipNoise, Generator, MooreThreshold, RandomFill};
use crate::config::{CaveOptions, LayerSeeding, LodLayer};
use crate::error::{CaveError, Result};
use crate::grid::Grid;

/// Level-of-detail cave automaton
///
/// Runs a schedule of [`LodLayer`]s on one grid. Each layer seeds the grid,
/// steps its own automaton and, unless it is the last layer, upsamples the
/// result so the next layer refines a coarse pattern at higher resolution.
/// The construction size is the size of the first layer; the output is that
/// size times every multiplier except the last layer's.
#[derive(Debug)]
pub struct CaveLodGenerator {
    grid: Grid,
    layers: Vec<LodLayer>,
    rng: ChaCha8Rng,
}

impl CaveLodGenerator {
    /// Create a generator with the default two-layer schedule
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            grid: Grid::new(width, height),
            layers: LodLayer::default_layers(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a generator with a custom schedule
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `layers` is empty or a layer fails
    /// validation
    pub fn with_layers(width: u32, height: u32, layers: Vec<LodLayer>, seed: u64) -> Result<Self> {
        if layers.is_empty() {
            return Err(CaveError::InvalidConfig(
                "a level-of-detail generator needs at least one layer".into(),
            ));
        }
        for layer in &layers {
            LodLayer::new(layer.options, layer.multiplier, layer.seeding)?;
        }
        Ok(Self {
            grid: Grid::new(width, height),
            layers,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    #[inline]
    pub fn layers(&self) -> &[LodLayer] {
        &self.layers
    }

    /// Replace the automaton options of one layer, keeping its seeding and
    /// multiplier
    ///
    /// # Errors
    ///
    /// Returns `LayerOutOfRange` for a bad index and `InvalidConfig` for
    /// invalid options
    pub fn set_layer_options(&mut self, index: usize, options: CaveOptions) -> Result<()> {
        let layers = self.layers.len();
        let layer = self
            .layers
            .get_mut(index)
            .ok_or(CaveError::LayerOutOfRange { index, layers })?;
        options.validate()?;
        layer.options = options;
        Ok(())
    }

    /// Restart the random stream
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Width and height of the grid after a full generation
    pub fn output_size(&self) -> (u32, u32) {
        let scale: u32 = self
            .layers
            .iter()
            .take(self.layers.len().saturating_sub(1))
            .map(|layer| layer.multiplier)
            .product();
        (self.grid.init_width() * scale, self.grid.init_height() * scale)
    }
}

impl Generator for CaveLodGenerator {
    fn generate(&mut self) -> Result<()> {
        self.grid.clear();

        let last = self.layers.len().saturating_sub(1);
        for (i, layer) in self.layers.iter().enumerate() {
            let options = layer.options;
            match layer.seeding {
                LayerSeeding::RandomFill => self.grid.set_initializer(RandomFill {
                    fill_percent: options.fill_percent,
                }),
                LayerSeeding::FlipNoise => self.grid.set_initializer(FlipNoise {
                    flip_percent: options.fill_percent,
                }),
            }
            self.grid.set_rule(MooreThreshold {
                threshold: options.threshold,
                radius: options.radius,
            });

            self.grid.initialize(&mut self.rng)?;
            self.grid.generate(options.steps)?;
            if i < last {
                self.grid.scale(layer.multiplier);
            }

            debug!(
                layer = i,
                width = self.grid.width(),
                height = self.grid.height(),
                "generated level-of-detail layer"
            );
        }

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
    use crate::cell::ROCK;

    #[test]
    fn test_output_is_scaled() {
        let mut caves = CaveLodGenerator::new(10, 8, 5);
        assert_eq!(caves.output_size(), (30, 24));

        caves.generate().unwrap();
        assert_eq!(caves.width(), 30);
        assert_eq!(caves.height(), 24);
        assert_eq!(caves.init_width(), 10);
        assert_eq!(caves.result().len(), 30 * 24);

        // Clearing at the start of every generation keeps the size stable
        caves.generate().unwrap();
        assert_eq!(caves.width(), 30);
    }

    #[test]
    fn test_deterministic_per_seed() {
        let mut a = CaveLodGenerator::new(12, 12, 99);
        let mut b = CaveLodGenerator::new(12, 12, 99);
        a.generate().unwrap();
        b.generate().unwrap();
        assert_eq!(a.result(), b.result());
    }

    #[test]
    fn test_idle_refinement_keeps_blocks() {
        // With no refinement steps and no flips, the second layer keeps the
        // scaled-up first layer untouched
        let coarse = LodLayer::new(CaveOptions::default(), 2, LayerSeeding::RandomFill).unwrap();
        let keep = LodLayer::new(
            CaveOptions {
                fill_percent: 0,
                steps: 0,
                ..CaveOptions::default()
            },
            1,
            LayerSeeding::FlipNoise,
        )
        .unwrap();

        let mut caves = CaveLodGenerator::with_layers(6, 6, vec![coarse, keep], 3).unwrap();
        caves.generate().unwrap();
        let grid = caves.grid();
        for y in 0..12 {
            for x in 0..12 {
                let block = grid.cell(x - x % 2, y - y % 2).cell_type;
                assert_eq!(grid.cell(x, y).cell_type, block);
            }
        }
    }

    #[test]
    fn test_set_layer_options() {
        let mut caves = CaveLodGenerator::new(4, 4, 0);
        let options = CaveOptions {
            fill_percent: 85,
            steps: 2,
            threshold: 3,
            radius: 1,
        };
        caves.set_layer_options(1, options).unwrap();
        assert_eq!(caves.layers()[1].options, options);
        assert_eq!(caves.layers()[1].seeding, LayerSeeding::FlipNoise);

        assert_eq!(
            caves.set_layer_options(2, options),
            Err(CaveError::LayerOutOfRange { index: 2, layers: 2 })
        );
        assert!(caves
            .set_layer_options(0, CaveOptions { threshold: 99, ..options })
            .is_err());
    }

    #[test]
    fn test_empty_schedule_rejected() {
        assert!(CaveLodGenerator::with_layers(4, 4, Vec::new(), 0).is_err());
    }

    #[test]
    fn test_full_flip_inverts() {
        let solid = LodLayer::new(
            CaveOptions {
                fill_percent: 100,
                steps: 0,
                ..CaveOptions::default()
            },
            1,
            LayerSeeding::RandomFill,
        )
        .unwrap();
        let flip = LodLayer::new(
            CaveOptions {
                fill_percent: 100,
                steps: 0,
                ..CaveOptions::default()
            },
            1,
            LayerSeeding::FlipNoise,
        )
        .unwrap();

        let mut caves = CaveLodGenerator::with_layers(5, 5, vec![solid], 0).unwrap();
        caves.generate().unwrap();
        assert!(caves.result().iter().all(|c| c.cell_type == ROCK));

        let mut caves = CaveLodGenerator::with_layers(5, 5, vec![solid, flip], 0).unwrap();
        caves.generate().unwrap();
        assert!(caves.result().iter().all(|c| c.cell_type != ROCK));
    }
}
