//! Histograms over an analysis

use std::collections::BTreeMap;

use crate::analysis::{direction_runs, Analysis};

/// Histogram of straight-run lengths along every contour
///
/// Each maximal run of identical consecutive steps in a contour's direction
/// list contributes one entry. Runs outside `min..=max` are dropped.
pub fn line_length_distribution(analysis: &Analysis, min: u32, max: u32) -> BTreeMap<u32, u32> {
    let mut histogram = BTreeMap::new();
    for border in &analysis.border_analyses {
        for run in direction_runs(&border.directions) {
            if (min..=max).contains(&run) {
                *histogram.entry(run).or_insert(0) += 1;
            }
        }
    }
    histogram
}

/// Histogram of group sizes
pub fn group_size_distribution(analysis: &Analysis) -> BTreeMap<u32, u32> {
    let mut histogram = BTreeMap::new();
    for group in &analysis.group_analyses {
        *histogram.entry(group.count).or_insert(0) += 1;
    }
    histogram
}
