//! End-to-end checks: generation, analysis, metrics and sweeps

use std::collections::HashSet;

use cave_automata::analysis::{border_distance_field, combine_borders, path_endpoints};
use cave_automata::metrics::{group_size_distribution, line_length_distribution};
use cave_automata::*;

fn generated(seed: u64) -> CaveGenerator {
    let mut caves = CaveGenerator::new(40, 30, seed);
    caves.generate().unwrap();
    caves
}

#[test]
fn test_groups_partition_the_grid() {
    let caves = generated(17);
    let analysis = caves.analyze();

    let total: u32 = analysis.group_analyses.iter().map(|g| g.count).sum();
    assert_eq!(total, 40 * 30);

    let mut seen = HashSet::new();
    for group in &analysis.group_analyses {
        assert_eq!(group.positions.len() as u32, group.count);
        for &p in &group.positions {
            assert!(seen.insert(p), "{p} in two groups");
            assert_eq!(caves.grid().cell(p.x, p.y).cell_type, group.cell_type);
            assert!(group.bounds.contains(p));
        }
    }

    let histogram = group_size_distribution(&analysis);
    let counted: u32 = histogram.values().sum();
    assert_eq!(counted as usize, analysis.group_analyses.len());
}

#[test]
fn test_borders_cover_every_group() {
    let caves = generated(23);
    let analysis = caves.analyze();

    for border in &analysis.border_analyses {
        assert!(!border.positions.is_empty());
        assert_eq!(border.positions.len(), border.directions.len());
        for &p in &border.positions {
            assert_eq!(caves.grid().cell(p.x, p.y).cell_type, border.cell_type);
            assert!(border.bounds.contains(p));
        }
    }

    // Every group has at least one traced contour touching it
    let traced: HashSet<UVec2> = analysis
        .border_analyses
        .iter()
        .flat_map(|b| b.positions.iter().copied())
        .collect();
    for group in &analysis.group_analyses {
        assert!(group.positions.iter().any(|p| traced.contains(p)));
    }

    let runs = line_length_distribution(&analysis, 0, u32::MAX);
    assert!(!runs.is_empty());
}

#[test]
fn test_distance_field_is_consistent() {
    let caves = generated(5);
    let analysis = caves.analyze();
    let floor = combine_borders(&analysis.border_analyses, FLOOR);

    let field = border_distance_field(caves.grid(), &floor);
    for &p in &floor.positions {
        assert_eq!(field.get(p), Some(0));
    }

    let peaks = caves.border_distance_peaks_by_type(&analysis.border_analyses, FLOOR);
    if let Some(&highest) = peaks.iter().max() {
        assert_eq!(highest, field.max_distance());
    }
    let distances = caves.border_distances_by_type(&analysis.border_analyses, FLOOR);
    assert!(distances.iter().all(|&d| d > 0 && d <= field.max_distance()));
}

#[test]
fn test_paths_match_queries() {
    let mut caves = generated(31);
    caves.set_cost_function(Box::new(TypeCost::new(vec![1, u32::MAX])));
    let analysis = caves.analyze();
    let endpoints = path_endpoints(caves.width(), caves.height());
    assert_eq!(analysis.path_analyses.len(), endpoints.len());

    for (path, (from, to)) in analysis.path_analyses.iter().zip(endpoints) {
        if !path.is_reachable() {
            assert_eq!(path.cost, u32::MAX);
            continue;
        }
        assert_eq!(path.path.first(), Some(&to));
        assert_eq!(path.path.last(), Some(&from));
        assert_eq!(path.directions.len() + 1, path.path.len());
        assert!(path.cost >= manhattan(from, to));
        // Rock is impassable, so every cell entered along the way is floor
        let entered = &path.path[..path.path.len() - 1];
        assert!(entered
            .iter()
            .all(|p| caves.grid().cell(p.x, p.y).cell_type == FLOOR));
    }
}

#[test]
fn test_lod_generator_through_metrics() {
    let mut lod = CaveLodGenerator::new(12, 10, 8);
    lod.set_cost_function(GameplayType::SideScroller.cost_function());
    lod.generate().unwrap();
    assert_eq!((lod.width(), lod.height()), lod.output_size());

    let analysis = lod.analyze();
    for named in GameplayType::SideScroller.metrics() {
        let value = named.metric.evaluate(&lod, &analysis);
        assert!(value.is_finite() && value >= 0.0, "{} = {value}", named.name);
    }
}

#[test]
fn test_sweep_and_compare() {
    let presets = CaveOptions::sweep_presets();
    let mut first = Sweep::new(
        "cave",
        CaveGenerator::new(20, 20, 3),
        presets.len(),
        1,
        move |g: &mut CaveGenerator, i| g.set_options(presets[i]),
    );

    let detail = CaveOptions::detail_presets();
    let mut second = Sweep::new(
        "lod",
        CaveLodGenerator::new(8, 8, 4),
        3,
        2,
        move |g: &mut CaveLodGenerator, i| g.set_layer_options(1, detail[i]),
    );

    let metrics: Vec<NamedMetric> = GameplayType::TopDown.metrics().into_iter().take(3).collect();
    let comparisons = compare(&mut first, &mut second, &metrics).unwrap();
    assert_eq!(comparisons.len(), 3);

    for comparison in &comparisons {
        assert_eq!(comparison.first.points, CaveOptions::sweep_presets().len());
        assert_eq!(comparison.second.points, 6);
        assert!(comparison.min_x <= comparison.max_x);
        assert!(comparison.first.clustering >= 0.0);
        assert!(comparison.second.coverage > 0.0);

        let report = comparison.to_string();
        assert!(report.contains("Clustering cave"));
        assert!(report.contains("Space coverage lod"));
    }
}

#[test]
fn test_same_seed_same_analysis() {
    let a = generated(99).analyze();
    let b = generated(99).analyze();
    assert_eq!(a, b);
}

#[cfg(feature = "serde")]
#[test]
fn test_analysis_serializes() {
    let analysis = generated(2).analyze();
    let json = serde_json::to_string(&analysis).unwrap();
    let back: Analysis = serde_json::from_str(&json).unwrap();
    assert_eq!(analysis, back);
}
