//! Scalar layout metrics
//!
//! A [`Metric`] reduces one generation (the generator plus its [`Analysis`])
//! to a single `f64`. Every metric whose definition divides by a count of
//! groups, paths or peaks returns `0.0` when that count is zero.

mod distribution;
mod presets;

pub use distribution::{group_size_distribution, line_length_distribution};
pub use presets::{GameplayType, NamedMetric};

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::analysis::{line_fit, straight_lines, Analysis};
use crate::generator::Generator;

/// A scalar measurement of a generated layout
///
/// # Example
///
/// ```rust
/// use cave_automata::*;
///
/// let mut caves = CaveGenerator::new(30, 30, 1);
/// caves.generate().unwrap();
/// let analysis = caves.analyze();
///
/// let floor = Metric::PercentageOfType { cell_type: FLOOR }.evaluate(&caves, &analysis);
/// let rock = Metric::PercentageOfType { cell_type: ROCK }.evaluate(&caves, &analysis);
/// assert!((floor + rock - 100.0).abs() < 1e-9);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
    /// Share of all cells that have the given type, in percent
    PercentageOfType { cell_type: u32 },
    /// Mean share, in percent, that each group of the type holds of all cells
    /// of that type
    PercentageReachable { cell_type: u32 },
    /// Number of distinct group sizes within `min..=max`
    DistinctGroupSizes { min: u32, max: u32 },
    /// Number of distinct straight-segment lengths along all contours within
    /// `min..=max`
    DistinctLineLengths { min: u32, max: u32 },
    /// Number of groups of the type with a size within `min..=max`
    GroupCount { cell_type: u32, min: u32, max: u32 },
    /// Number of straight contour segments with a length within `min..=max`
    StraightLines { min: u32, max: u32 },
    /// Mean path length as a percentage of the grid's cell count
    OptimalPathPercentageAverage,
    /// Mean line-fit score of the paths
    OptimalPathLineFit,
    /// Mean peak of the distance field from the type's merged contours
    AverageBorderDistancePeaks { cell_type: u32 },
    /// Number of distinct peaks of the distance field from the type's merged
    /// contours
    DistinctBorderDistancePeaks { cell_type: u32 },
    /// Mean spread between the highest and lowest platform of each group
    AverageHeightDifference { platform_type: u32 },
    /// Total gap count over all groups
    GapCount { min_gap_depth: u32, platform_type: u32 },
    /// Mean share of each non-platform group's cells that are walkable, in
    /// percent
    AverageWalkablePercentage { platform_type: u32 },
    /// Mean share of path cells without support below, in percent
    InAirPercentage { air_type: u32 },
    /// Mean share of path cells resting on a surface, in percent
    OnSurfacePercentage { air_type: u32 },
    /// Sum of the listed metrics
    Sum(Vec<Metric>),
}

fn in_range(value: u32, min: u32, max: u32) -> bool {
    (min..=max).contains(&value)
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl Metric {
    /// Distinct group sizes over all sizes
    pub fn distinct_group_sizes() -> Self {
        Metric::DistinctGroupSizes { min: 0, max: u32::MAX }
    }

    /// Distinct straight-segment lengths over all lengths
    pub fn distinct_line_lengths() -> Self {
        Metric::DistinctLineLengths { min: 0, max: u32::MAX }
    }

    /// Straight contour segments of any length
    pub fn straight_lines() -> Self {
        Metric::StraightLines { min: 0, max: u32::MAX }
    }

    /// Evaluate the metric for one generation
    pub fn evaluate(&self, generator: &dyn Generator, analysis: &Analysis) -> f64 {
        let groups = &analysis.group_analyses;
        let borders = &analysis.border_analyses;
        let paths = &analysis.path_analyses;

        match self {
            Metric::PercentageOfType { cell_type } => {
                let total: u64 = groups.iter().map(|g| g.count as u64).sum();
                let matching: u64 = groups
                    .iter()
                    .filter(|g| g.cell_type == *cell_type)
                    .map(|g| g.count as u64)
                    .sum();
                if total == 0 {
                    0.0
                } else {
                    matching as f64 / total as f64 * 100.0
                }
            }

            Metric::PercentageReachable { cell_type } => {
                let reachable: Vec<u32> = groups
                    .iter()
                    .filter(|g| g.cell_type == *cell_type)
                    .map(|g| g.count)
                    .collect();
                let total: u64 = reachable.iter().map(|&c| c as u64).sum();
                if total == 0 {
                    return 0.0;
                }
                let sum: f64 = reachable
                    .iter()
                    .map(|&c| c as f64 / total as f64 * 100.0)
                    .sum();
                mean(sum, reachable.len())
            }

            Metric::DistinctGroupSizes { min, max } => {
                let sizes: HashSet<u32> = groups
                    .iter()
                    .map(|g| g.count)
                    .filter(|&c| in_range(c, *min, *max))
                    .collect();
                sizes.len() as f64
            }

            Metric::DistinctLineLengths { min, max } => {
                let lengths: HashSet<u32> = borders
                    .iter()
                    .flat_map(|b| straight_lines(&b.positions))
                    .filter(|&l| in_range(l, *min, *max))
                    .collect();
                lengths.len() as f64
            }

            Metric::GroupCount { cell_type, min, max } => groups
                .iter()
                .filter(|g| g.cell_type == *cell_type && in_range(g.count, *min, *max))
                .count() as f64,

            Metric::StraightLines { min, max } => borders
                .iter()
                .flat_map(|b| straight_lines(&b.positions))
                .filter(|&l| in_range(l, *min, *max))
                .count() as f64,

            Metric::OptimalPathPercentageAverage => {
                let cells = generator.width() as f64 * generator.height() as f64;
                if cells == 0.0 {
                    return 0.0;
                }
                let sum: f64 = paths
                    .iter()
                    .map(|p| p.path.len() as f64 / cells * 100.0)
                    .sum();
                mean(sum, paths.len())
            }

            Metric::OptimalPathLineFit => {
                let fits: Vec<f64> = paths.iter().filter_map(|p| line_fit(&p.path)).collect();
                mean(fits.iter().sum(), fits.len())
            }

            Metric::AverageBorderDistancePeaks { cell_type } => {
                let peaks = generator.border_distance_peaks_by_type(borders, *cell_type);
                let sum: f64 = peaks.iter().map(|&p| p as f64).sum();
                mean(sum, peaks.len())
            }

            Metric::DistinctBorderDistancePeaks { cell_type } => {
                let peaks: HashSet<u32> = generator
                    .border_distance_peaks_by_type(borders, *cell_type)
                    .into_iter()
                    .collect();
                peaks.len() as f64
            }

            Metric::AverageHeightDifference { platform_type } => {
                let sum: f64 = groups
                    .iter()
                    .map(|group| {
                        let platforms = generator.platforms(group, *platform_type);
                        let lowest = platforms.iter().map(|p| p.height).min();
                        let highest = platforms.iter().map(|p| p.height).max();
                        match (lowest, highest) {
                            (Some(lo), Some(hi)) => (hi - lo) as f64,
                            _ => 0.0,
                        }
                    })
                    .sum();
                mean(sum, groups.len())
            }

            Metric::GapCount {
                min_gap_depth,
                platform_type,
            } => groups
                .iter()
                .map(|g| generator.gap_count(g, *min_gap_depth, *platform_type) as f64)
                .sum(),

            Metric::AverageWalkablePercentage { platform_type } => {
                let walkable: Vec<f64> = groups
                    .iter()
                    .filter(|g| g.cell_type != *platform_type && g.count > 0)
                    .map(|group| {
                        let span: u32 = generator
                            .platforms(group, *platform_type)
                            .iter()
                            .map(|p| p.width())
                            .sum();
                        span as f64 / group.count as f64 * 100.0
                    })
                    .collect();
                mean(walkable.iter().sum(), walkable.len())
            }

            Metric::InAirPercentage { air_type } => {
                let shares: Vec<f64> = paths
                    .iter()
                    .filter(|p| !p.path.is_empty())
                    .map(|p| generator.in_air(p, *air_type) as f64 / p.path.len() as f64 * 100.0)
                    .collect();
                mean(shares.iter().sum(), shares.len())
            }

            Metric::OnSurfacePercentage { air_type } => {
                let shares: Vec<f64> = paths
                    .iter()
                    .filter(|p| !p.path.is_empty())
                    .map(|p| {
                        generator.on_surface(p, *air_type) as f64 / p.path.len() as f64 * 100.0
                    })
                    .collect();
                mean(shares.iter().sum(), shares.len())
            }

            Metric::Sum(metrics) => metrics
                .iter()
                .map(|m| m.evaluate(generator, analysis))
                .sum(),
        }
    }
}
