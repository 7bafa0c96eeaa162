//! Cave automaton options, level-of-detail layers and the preset tables
//!
//! Options are plain data. [`CaveOptionsBuilder`] and [`LodLayer::new`]
//! validate them; generators re-check options handed to them directly.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CaveError, Result};

/// Parameters of the random-fill / Moore-threshold cave automaton
///
/// # Example
///
/// ```rust
/// use cave_automata::*;
///
/// let options = CaveOptionsBuilder::new()
///     .fill_percent(45)
///     .unwrap()
///     .steps(5)
///     .threshold(13)
///     .radius(2)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(options.threshold, 13);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaveOptions {
    /// Chance in percent that a cell starts as rock (`r`)
    pub fill_percent: u32,
    /// Number of automaton generations (`n`)
    pub steps: u32,
    /// Rock cells needed in the neighbourhood, centre included, to stay rock (`t`)
    pub threshold: u32,
    /// Chebyshev radius of the neighbourhood (`m`)
    pub radius: u32,
}

impl CaveOptions {
    /// Number of cells in an unclipped neighbourhood
    #[inline]
    pub fn neighbourhood_size(&self) -> u32 {
        let side = 2 * self.radius + 1;
        side * side
    }

    /// Check that the options describe a usable automaton
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the fill percentage exceeds 100, the
    /// radius is 0, or the threshold is larger than the neighbourhood.
    pub fn validate(&self) -> Result<()> {
        if self.fill_percent > 100 {
            return Err(CaveError::InvalidConfig(format!(
                "fill percent must be <= 100 (got {})",
                self.fill_percent
            )));
        }
        if self.radius == 0 {
            return Err(CaveError::InvalidConfig(
                "neighbourhood radius must be positive".into(),
            ));
        }
        if self.threshold > self.neighbourhood_size() {
            return Err(CaveError::InvalidConfig(format!(
                "threshold {} exceeds the {} cells of a radius {} neighbourhood",
                self.threshold,
                self.neighbourhood_size(),
                self.radius
            )));
        }
        Ok(())
    }

    /// The 13 option sets swept for single-pass generators
    pub fn sweep_presets() -> Vec<CaveOptions> {
        let base = CaveOptions::default();
        let wide = CaveOptions {
            threshold: 13,
            radius: 2,
            ..base
        };
        vec![
            base,
            CaveOptions { fill_percent: 35, ..base },
            CaveOptions { fill_percent: 60, ..base },
            CaveOptions { steps: 2, ..base },
            wide,
            CaveOptions { steps: 2, ..wide },
            CaveOptions { steps: 5, ..wide },
            CaveOptions { steps: 1, ..wide },
            CaveOptions { fill_percent: 60, steps: 5, ..wide },
            CaveOptions { fill_percent: 60, steps: 2, ..wide },
            CaveOptions { steps: 1, threshold: 15, ..wide },
            CaveOptions { steps: 4, threshold: 24, radius: 3, ..base },
            CaveOptions { steps: 1, threshold: 24, radius: 3, ..base },
        ]
    }

    /// The sweep presets plus five sets tuned for refining a scaled-up layer
    pub fn detail_presets() -> Vec<CaveOptions> {
        let mut presets = Self::sweep_presets();
        presets.extend([
            CaveOptions { fill_percent: 85, steps: 2, threshold: 3, radius: 1 },
            CaveOptions { fill_percent: 40, steps: 1, threshold: 25, radius: 3 },
            CaveOptions { fill_percent: 85, steps: 2, threshold: 13, radius: 2 },
            CaveOptions { fill_percent: 75, steps: 2, threshold: 4, radius: 1 },
            CaveOptions { fill_percent: 75, steps: 2, threshold: 6, radius: 1 },
        ]);
        presets
    }
}

impl Default for CaveOptions {
    fn default() -> Self {
        Self {
            fill_percent: 50,
            steps: 4,
            threshold: 5,
            radius: 1,
        }
    }
}

/// Builder for [`CaveOptions`] with validation
#[derive(Debug, Clone)]
pub struct CaveOptionsBuilder {
    options: CaveOptions,
}

impl CaveOptionsBuilder {
    /// Start from the defaults `{ r: 50, n: 4, t: 5, m: 1 }`
    pub fn new() -> Self {
        Self {
            options: CaveOptions::default(),
        }
    }

    /// Set the initial rock percentage
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `percent > 100`
    pub fn fill_percent(mut self, percent: u32) -> Result<Self> {
        if percent > 100 {
            return Err(CaveError::InvalidConfig(format!(
                "fill percent must be <= 100 (got {})",
                percent
            )));
        }
        self.options.fill_percent = percent;
        Ok(self)
    }

    pub fn steps(mut self, steps: u32) -> Self {
        self.options.steps = steps;
        self
    }

    /// Set the survival threshold
    ///
    /// Checked against the radius in [`CaveOptionsBuilder::build`], since the
    /// two may be set in either order.
    pub fn threshold(mut self, threshold: u32) -> Self {
        self.options.threshold = threshold;
        self
    }

    /// Set the neighbourhood radius
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `radius` is 0
    pub fn radius(mut self, radius: u32) -> Result<Self> {
        if radius == 0 {
            return Err(CaveError::InvalidConfig(
                "neighbourhood radius must be positive".into(),
            ));
        }
        self.options.radius = radius;
        Ok(self)
    }

    pub fn build(self) -> Result<CaveOptions> {
        self.options.validate()?;
        Ok(self.options)
    }
}

impl Default for CaveOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// How a level-of-detail layer seeds its cells before stepping
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerSeeding {
    /// Fresh random fill at the layer's `fill_percent`
    RandomFill,
    /// Keep the previous layer's cells, flipping each one between floor and
    /// rock with probability `fill_percent`
    FlipNoise,
}

/// One pass of a level-of-detail generator
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LodLayer {
    pub options: CaveOptions,
    /// Upscale factor applied after this layer (ignored for the last layer)
    pub multiplier: u32,
    pub seeding: LayerSeeding,
}

impl LodLayer {
    /// Create a validated layer
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `multiplier` is 0 or the options are invalid
    pub fn new(options: CaveOptions, multiplier: u32, seeding: LayerSeeding) -> Result<Self> {
        if multiplier == 0 {
            return Err(CaveError::InvalidConfig(
                "layer multiplier must be at least 1".into(),
            ));
        }
        options.validate()?;
        Ok(Self {
            options,
            multiplier,
            seeding,
        })
    }

    /// Default two-layer schedule: a coarse random fill scaled by 3, then a
    /// noisy refinement pass
    pub fn default_layers() -> Vec<LodLayer> {
        vec![
            LodLayer {
                options: CaveOptions::default(),
                multiplier: 3,
                seeding: LayerSeeding::RandomFill,
            },
            LodLayer {
                options: CaveOptions {
                    fill_percent: 75,
                    steps: 2,
                    threshold: 6,
                    radius: 1,
                },
                multiplier: 1,
                seeding: LayerSeeding::FlipNoise,
            },
        ]
    }
}
