//! Straightness of point sequences

use glam::{DVec2, UVec2};

use crate::cell::{manhattan, Direction};

/// Fit scores below this count as a straight line
pub const STRAIGHT_TOLERANCE: f64 = 0.01;

/// Distance from `point` to the infinite line through `start` along `direction`
fn distance_to_line(direction: DVec2, start: DVec2, point: DVec2) -> f64 {
    if direction.x == 0.0 {
        return (start.x - point.x).abs();
    }
    let a = direction.y / direction.x;
    let b = start.y - a * start.x;
    (a * point.x + b - point.y).abs() / (a * a + 1.0).sqrt()
}

/// Deviation of a walk from the straight chord between its endpoints
///
/// The score is the number of steps taken beyond the Manhattan distance
/// between the first and last point, plus the mean distance of all points
/// from the line through them. A perfectly straight walk scores 0.
///
/// Returns `None` for fewer than two points. When both endpoints coincide
/// the distance term falls back to the distance from that point.
pub fn line_fit(points: &[UVec2]) -> Option<f64> {
    let (&first, &last) = (points.first()?, points.last()?);
    if points.len() < 2 {
        return None;
    }

    let start = first.as_dvec2();
    let chord = last.as_dvec2() - start;
    let length = chord.length();

    let distance_sum: f64 = if length == 0.0 {
        points.iter().map(|p| p.as_dvec2().distance(start)).sum()
    } else {
        let direction = chord / length;
        points
            .iter()
            .map(|p| distance_to_line(direction, start, p.as_dvec2()))
            .sum()
    };

    let steps = (points.len() - 1) as f64;
    let excess = steps - manhattan(first, last) as f64;
    Some(excess + distance_sum / points.len() as f64)
}

/// Whether the walk scores below [`STRAIGHT_TOLERANCE`]
pub fn is_straight_line(points: &[UVec2]) -> bool {
    line_fit(points).is_some_and(|fit| fit < STRAIGHT_TOLERANCE)
}

/// Chord lengths of every straight tail of a walk
///
/// For each suffix of `positions` with at least two points, the Manhattan
/// length of the suffix is reported when the suffix is straight.
pub fn straight_lines(positions: &[UVec2]) -> Vec<u32> {
    let Some(&last) = positions.last() else {
        return Vec::new();
    };
    (0..positions.len().saturating_sub(1))
        .filter(|&i| is_straight_line(&positions[i..]))
        .map(|i| manhattan(positions[i], last))
        .collect()
}

/// Lengths of the maximal runs of identical consecutive steps
pub fn direction_runs(directions: &[Direction]) -> Vec<u32> {
    let mut runs = Vec::new();
    let mut iter = directions.iter();
    let Some(mut current) = iter.next() else {
        return runs;
    };

    let mut length = 1;
    for direction in iter {
        if direction == current {
            length += 1;
        } else {
            runs.push(length);
            current = direction;
            length = 1;
        }
    }
    runs.push(length);
    runs
}
