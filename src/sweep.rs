//! Scatter sweeps over generator configurations
//!
//! A sweep regenerates a grid many times across a range of configurations,
//! evaluates two metrics per generation and collects the pairs as scatter
//! points. [`clustering`] and [`space_coverage`] reduce a scatter set to one
//! number each, and [`compare`] runs the same metric pairs over two
//! generators so their expressive ranges can be set side by side.

use std::collections::HashSet;
use std::fmt;

use glam::DVec2;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::generator::Generator;
use crate::metrics::{Metric, NamedMetric};

/// Scatter points of one sweep with their running bounds
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisData {
    pub data_points: Vec<DVec2>,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for AnalysisData {
    fn default() -> Self {
        Self {
            data_points: Vec::new(),
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }
}

impl AnalysisData {
    /// Append a point and widen the bounds to cover it
    pub fn push(&mut self, point: DVec2) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
        self.data_points.push(point);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data_points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data_points.is_empty()
    }
}

/// Collect `(metric_x, metric_y)` scatter points across a configuration sweep
///
/// For every configuration index in `0..config_count` the option setter
/// configures the generator, which is then regenerated and analyzed
/// `iterations` times.
///
/// # Errors
///
/// Propagates failures from the option setter and from generation.
pub fn data_points<G, F>(
    generator: &mut G,
    config_count: usize,
    metric_x: &Metric,
    metric_y: &Metric,
    iterations: usize,
    mut option_setter: F,
) -> Result<AnalysisData>
where
    G: Generator,
    F: FnMut(&mut G, usize) -> Result<()>,
{
    let mut data = AnalysisData::default();

    for config in 0..config_count {
        option_setter(generator, config)?;

        for iteration in 0..iterations {
            generator.generate()?;
            let view: &G = generator;
            let analysis = view.analyze();
            let point = DVec2::new(
                metric_x.evaluate(view, &analysis),
                metric_y.evaluate(view, &analysis),
            );
            debug!(config, iteration, x = point.x, y = point.y, "collected data point");
            data.push(point);
        }
    }

    Ok(data)
}

/// Mean pairwise Euclidean distance between scatter points
///
/// Quadratic in the number of points; 0 for fewer than two points.
pub fn clustering(data: &AnalysisData) -> f64 {
    let points = &data.data_points;
    let mut sum = 0.0;
    let mut pairs = 0usize;

    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            sum += a.distance(*b);
            pairs += 1;
        }
    }

    if pairs == 0 {
        0.0
    } else {
        sum / pairs as f64
    }
}

/// Percentage of unit cells in the given bounds touched by a scatter point
///
/// Points are binned by truncating their offset from `(min_x, min_y)`; the
/// bounds are rounded to whole cells and counted inclusively.
pub fn space_coverage(data: &AnalysisData, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let covered: HashSet<(u32, u32)> = data
        .data_points
        .iter()
        .map(|p| ((p.x - min_x) as u32, (p.y - min_y) as u32))
        .collect();

    let x_range = ((max_x + 0.5) as u32).saturating_sub((min_x + 0.5) as u32) + 1;
    let y_range = ((max_y + 0.5) as u32).saturating_sub((min_y + 0.5) as u32) + 1;
    let space = x_range as f64 * y_range as f64;

    covered.len() as f64 / space * 100.0
}

/// A generator together with the configurations it is swept over
pub struct Sweep<G: Generator> {
    pub name: String,
    pub generator: G,
    pub config_count: usize,
    pub iterations: usize,
    option_setter: Box<dyn FnMut(&mut G, usize) -> Result<()>>,
}

impl<G: Generator> Sweep<G> {
    pub fn new<F>(
        name: impl Into<String>,
        generator: G,
        config_count: usize,
        iterations: usize,
        option_setter: F,
    ) -> Self
    where
        F: FnMut(&mut G, usize) -> Result<()> + 'static,
    {
        Self {
            name: name.into(),
            generator,
            config_count,
            iterations,
            option_setter: Box::new(option_setter),
        }
    }

    /// Run the sweep for one metric pair, see [`data_points`]
    pub fn data_points(&mut self, metric_x: &Metric, metric_y: &Metric) -> Result<AnalysisData> {
        data_points(
            &mut self.generator,
            self.config_count,
            metric_x,
            metric_y,
            self.iterations,
            &mut self.option_setter,
        )
    }
}

impl<G: Generator> fmt::Debug for Sweep<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sweep")
            .field("name", &self.name)
            .field("config_count", &self.config_count)
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

/// Scatter statistics of one sweep against shared bounds
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub name: String,
    pub points: usize,
    pub clustering: f64,
    pub coverage: f64,
}

/// Two sweeps compared on one metric pair
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MetricComparison {
    pub metric_x: String,
    pub metric_y: String,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub first: DatasetSummary,
    pub second: DatasetSummary,
}

impl fmt::Display for MetricComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis {}, {}", self.metric_x, self.metric_y)?;
        writeln!(f, "minX: {}", self.min_x)?;
        writeln!(f, "maxX: {}", self.max_x)?;
        writeln!(f, "minY: {}", self.min_y)?;
        writeln!(f, "maxY: {}", self.max_y)?;
        for dataset in [&self.first, &self.second] {
            writeln!(f, "Clustering {}: {}", dataset.name, dataset.clustering)?;
        }
        for dataset in [&self.first, &self.second] {
            writeln!(f, "Space coverage {}: {}", dataset.name, dataset.coverage)?;
        }
        Ok(())
    }
}

/// Sweep both generators over every unordered pair of `metrics`
///
/// Each pair is measured on both sweeps; coverage is computed against the
/// union of the two datasets' bounds so the percentages are comparable.
///
/// # Errors
///
/// Propagates the first failure of either sweep.
pub fn compare<A, B>(
    first: &mut Sweep<A>,
    second: &mut Sweep<B>,
    metrics: &[NamedMetric],
) -> Result<Vec<MetricComparison>>
where
    A: Generator,
    B: Generator,
{
    let mut comparisons = Vec::new();

    for (i, x) in metrics.iter().enumerate() {
        for y in &metrics[i + 1..] {
            let data_first = first.data_points(&x.metric, &y.metric)?;
            let data_second = second.data_points(&x.metric, &y.metric)?;

            let min_x = data_first.min_x.min(data_second.min_x);
            let min_y = data_first.min_y.min(data_second.min_y);
            let max_x = data_first.max_x.max(data_second.max_x);
            let max_y = data_first.max_y.max(data_second.max_y);

            let summarize = |name: &str, data: &AnalysisData| DatasetSummary {
                name: name.to_string(),
                points: data.len(),
                clustering: clustering(data),
                coverage: space_coverage(data, min_x, min_y, max_x, max_y),
            };

            let comparison = MetricComparison {
                metric_x: x.name.clone(),
                metric_y: y.name.clone(),
                min_x,
                min_y,
                max_x,
                max_y,
                first: summarize(&first.name, &data_first),
                second: summarize(&second.name, &data_second),
            };

            info!(
                x = %comparison.metric_x,
                y = %comparison.metric_y,
                first_clustering = comparison.first.clustering,
                second_clustering = comparison.second.clustering,
                first_coverage = comparison.first.coverage,
                second_coverage = comparison.second.coverage,
                "compared metric pair"
            );
            comparisons.push(comparison);
        }
    }

    Ok(comparisons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaveOptions;
    use crate::error::CaveError;
    use crate::generator::CaveGenerator;

    fn scatter(points: &[(f64, f64)]) -> AnalysisData {
        let mut data = AnalysisData::default();
        for &(x, y) in points {
            data.push(DVec2::new(x, y));
        }
        data
    }

    #[test]
    fn test_clustering() {
        assert_eq!(clustering(&AnalysisData::default()), 0.0);
        assert_eq!(clustering(&scatter(&[(2.0, 2.0)])), 0.0);
        assert_eq!(clustering(&scatter(&[(0.0, 0.0), (3.0, 4.0)])), 5.0);

        // Pairs: 1, 1, 2
        let line = scatter(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert!((clustering(&line) - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_space_coverage() {
        let single = scatter(&[(3.0, 7.0)]);
        assert_eq!(space_coverage(&single, 3.0, 7.0, 4.0, 8.0), 25.0);
        assert_eq!(space_coverage(&AnalysisData::default(), 0.0, 0.0, 1.0, 1.0), 0.0);

        // Two points in the same unit cell count once
        let shared = scatter(&[(0.2, 0.2), (0.7, 0.9), (1.5, 1.5)]);
        assert_eq!(space_coverage(&shared, 0.0, 0.0, 1.0, 1.0), 50.0);
    }

    #[test]
    fn test_bounds_track_points() {
        let empty = AnalysisData::default();
        assert_eq!(empty.min_x, f64::INFINITY);
        assert_eq!(empty.max_y, f64::NEG_INFINITY);

        let data = scatter(&[(1.0, -2.0), (-3.0, 5.0)]);
        assert_eq!((data.min_x, data.max_x), (-3.0, 1.0));
        assert_eq!((data.min_y, data.max_y), (-2.0, 5.0));
    }

    #[test]
    fn test_data_points_visits_every_config() {
        let mut caves = CaveGenerator::new(12, 12, 4);
        let mut seen = Vec::new();
        let floor = Metric::PercentageOfType { cell_type: 0 };
        let rock = Metric::PercentageOfType { cell_type: 1 };

        let data = data_points(&mut caves, 3, &floor, &rock, 2, |generator, index| {
            seen.push(index);
            generator.set_options(CaveOptions::sweep_presets()[index])
        })
        .unwrap();

        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(data.len(), 6);
        for point in &data.data_points {
            assert!((point.x + point.y - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_setter_error_propagates() {
        let mut caves = CaveGenerator::new(4, 4, 0);
        let metric = Metric::OptimalPathPercentageAverage;
        let result = data_points(&mut caves, 2, &metric, &metric, 1, |_, _| {
            Err(CaveError::InvalidConfig("rejected".into()))
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_compare_covers_each_pair_once() {
        let presets = CaveOptions::sweep_presets();
        let mut first = Sweep::new("0", CaveGenerator::new(10, 10, 1), 2, 2, move |g: &mut CaveGenerator, i| {
            g.set_options(presets[i])
        });
        let mut second = Sweep::new("1", CaveGenerator::new(10, 10, 2), 1, 3, |_: &mut CaveGenerator, _| Ok(()));

        let metrics = vec![
            NamedMetric::new("Floor", Metric::PercentageOfType { cell_type: 0 }),
            NamedMetric::new("Path length", Metric::OptimalPathPercentageAverage),
            NamedMetric::new("Groups", Metric::distinct_group_sizes()),
        ];
        let comparisons = compare(&mut first, &mut second, &metrics).unwrap();

        let pairs: Vec<(&str, &str)> = comparisons
            .iter()
            .map(|c| (c.metric_x.as_str(), c.metric_y.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("Floor", "Path length"), ("Floor", "Groups"), ("Path length", "Groups")]
        );
        for comparison in &comparisons {
            assert_eq!(comparison.first.points, 4);
            assert_eq!(comparison.second.points, 3);
            assert!(comparison.first.coverage > 0.0 && comparison.first.coverage <= 100.0);
            assert!(comparison.to_string().starts_with("Analysis "));
        }
    }
}
