use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Metric;
use crate::cell::{FLOOR, ROCK};
use crate::grid::{PathCost, SideScrollerCost, TypeCost};

/// A metric with a display label
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMetric {
    pub name: String,
    pub metric: Metric,
}

impl NamedMetric {
    pub fn new(name: impl Into<String>, metric: Metric) -> Self {
        Self {
            name: name.into(),
            metric,
        }
    }
}

impl fmt::Display for NamedMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// How a level is played, which decides what a good cave looks like
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplayType {
    /// Seen from above: floor is walkable, rock is a wall
    TopDown,
    /// Seen from the side: floor is air, rock is ground to stand on
    SideScroller,
}

impl GameplayType {
    /// Mix of distinct group sizes, straight-line lengths and open-space peaks
    fn variety() -> Metric {
        Metric::Sum(vec![
            Metric::distinct_group_sizes(),
            Metric::distinct_line_lengths(),
            Metric::DistinctBorderDistancePeaks { cell_type: FLOOR },
        ])
    }

    /// The eight metrics used to compare generators for this gameplay
    pub fn metrics(self) -> Vec<NamedMetric> {
        match self {
            GameplayType::TopDown => vec![
                NamedMetric::new("Floor", Metric::PercentageOfType { cell_type: FLOOR }),
                NamedMetric::new(
                    "Reachable",
                    Metric::PercentageReachable { cell_type: FLOOR },
                ),
                NamedMetric::new("Variety", Self::variety()),
                NamedMetric::new("Path length", Metric::OptimalPathPercentageAverage),
                NamedMetric::new(
                    "Leniency",
                    Metric::Sum(vec![
                        Metric::GroupCount {
                            cell_type: ROCK,
                            min: 1,
                            max: 10,
                        },
                        Metric::AverageBorderDistancePeaks { cell_type: FLOOR },
                    ]),
                ),
                NamedMetric::new("Straight lines", Metric::straight_lines()),
                NamedMetric::new("Path line fit", Metric::OptimalPathLineFit),
                NamedMetric::new(
                    "Wall thickness",
                    Metric::AverageBorderDistancePeaks { cell_type: ROCK },
                ),
            ],
            GameplayType::SideScroller => vec![
                NamedMetric::new("Air", Metric::PercentageOfType { cell_type: FLOOR }),
                NamedMetric::new(
                    "Walkable",
                    Metric::AverageWalkablePercentage { platform_type: ROCK },
                ),
                NamedMetric::new("Variety", Self::variety()),
                NamedMetric::new("Path length", Metric::OptimalPathPercentageAverage),
                NamedMetric::new(
                    "Leniency",
                    Metric::Sum(vec![
                        Metric::GroupCount {
                            cell_type: ROCK,
                            min: 1,
                            max: 10,
                        },
                        Metric::GapCount {
                            min_gap_depth: 5,
                            platform_type: ROCK,
                        },
                    ]),
                ),
                NamedMetric::new(
                    "Height difference",
                    Metric::AverageHeightDifference { platform_type: ROCK },
                ),
                NamedMetric::new("Path line fit", Metric::OptimalPathLineFit),
                NamedMetric::new(
                    "On surface",
                    Metric::OnSurfacePercentage { air_type: FLOOR },
                ),
            ],
        }
    }

    /// Step cost policy matching how a player moves
    pub fn cost_function(self) -> Box<dyn PathCost> {
        match self {
            GameplayType::TopDown => Box::new(TypeCost::top_down()),
            GameplayType::SideScroller => Box::new(SideScrollerCost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{CaveGenerator, Generator};

    #[test]
    fn test_eight_metrics_each() {
        for gameplay in [GameplayType::TopDown, GameplayType::SideScroller] {
            let metrics = gameplay.metrics();
            assert_eq!(metrics.len(), 8);
            assert!(metrics.iter().any(|m| m.name == "Variety"));
            assert!(metrics.iter().any(|m| m.name == "Leniency"));
        }
    }

    #[test]
    fn test_presets_evaluate_on_a_cave() {
        for gameplay in [GameplayType::TopDown, GameplayType::SideScroller] {
            let mut caves = CaveGenerator::new(24, 24, 3);
            caves.set_cost_function(gameplay.cost_function());
            caves.generate().unwrap();
            let analysis = caves.analyze();

            for named in gameplay.metrics() {
                let value = named.metric.evaluate(&caves, &analysis);
                assert!(value.is_finite(), "{named} = {value}");
                assert!(value >= 0.0, "{named} = {value}");
            }
        }
    }

    #[test]
    fn test_side_scroller_cost_reaches_everything() {
        // Digging and building keep every cell passable
        let mut caves = CaveGenerator::new(16, 16, 9);
        caves.set_cost_function(GameplayType::SideScroller.cost_function());
        caves.generate().unwrap();
        assert!(caves.analyze_paths().iter().all(|p| p.is_reachable()));
    }
}
