//! A* search over the grid
//!
//! Movement is 4-directional. Step costs come from the grid's installed
//! [`PathCost`](crate::grid::PathCost) policy; a policy returning `u32::MAX`
//! makes the destination impassable.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use glam::{IVec2, UVec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::PathAnalysis;
use crate::cell::{manhattan, Direction};
use crate::grid::Grid;

/// A cell reached by the search
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathNode {
    pub position: UVec2,
    /// Node this one was reached from (`None` for the start)
    pub previous: Option<UVec2>,
    /// Accumulated cost from the start
    pub cost: u32,
    /// `cost` plus the Manhattan estimate to the goal
    pub priority: u32,
}

impl PathNode {
    #[inline]
    pub fn new(position: UVec2, previous: Option<UVec2>, cost: u32, priority: u32) -> Self {
        Self {
            position,
            previous,
            cost,
            priority,
        }
    }
}

/// Heap entry: lowest priority first, ties broken by insertion order
#[derive(Debug, PartialEq, Eq)]
struct Frontier {
    priority: u32,
    sequence: u64,
    index: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Left, right, top, bottom
const EXPANSION: [IVec2; 4] = [IVec2::NEG_X, IVec2::X, IVec2::Y, IVec2::NEG_Y];

/// Find a path from `from` to `to` using the grid's cost policy
///
/// Every cell keeps the node it was first reached with: once enqueued it is
/// never reopened, even if a cheaper route turns up later. Under uniform
/// costs this is still optimal; under uneven costs the result is a good
/// path rather than a guaranteed cheapest one.
///
/// Returns the sentinel [`PathAnalysis::unreachable`] when the goal cannot be
/// reached or either endpoint lies outside the grid.
pub fn analyze_path(grid: &Grid, from: UVec2, to: UVec2) -> PathAnalysis {
    if !grid.contains(from.as_ivec2()) || !grid.contains(to.as_ivec2()) {
        return PathAnalysis::unreachable();
    }

    let cost_function = grid.cost_function();
    let mut explored: Vec<Option<PathNode>> = vec![None; grid.cells().len()];
    let mut frontier = BinaryHeap::new();
    let mut sequence = 0u64;

    let start_index = grid.index(from.x, from.y);
    explored[start_index] = Some(PathNode::new(from, None, 0, manhattan(from, to)));
    frontier.push(Frontier {
        priority: manhattan(from, to),
        sequence,
        index: start_index,
    });

    while let Some(entry) = frontier.pop() {
        let Some(current) = explored[entry.index] else {
            continue;
        };
        if current.position == to {
            return build_path(grid, &explored, to);
        }

        for offset in EXPANSION {
            let next = current.position.as_ivec2() + offset;
            if !grid.contains(next) {
                continue;
            }
            let next = next.as_uvec2();
            let index = grid.index(next.x, next.y);
            if explored[index].is_some() {
                continue;
            }

            let cost = cost_function.cost(grid, &current, next);
            if cost == u32::MAX {
                continue;
            }
            let priority = cost.saturating_add(manhattan(next, to));
            explored[index] = Some(PathNode::new(next, Some(current.position), cost, priority));

            sequence += 1;
            frontier.push(Frontier {
                priority,
                sequence,
                index,
            });
        }
    }

    PathAnalysis::unreachable()
}

/// Follow `previous` links back from the goal
fn build_path(grid: &Grid, explored: &[Option<PathNode>], goal: UVec2) -> PathAnalysis {
    let mut analysis = PathAnalysis {
        path: Vec::new(),
        directions: Vec::new(),
        cost: 0,
    };

    let mut cursor = explored[grid.index(goal.x, goal.y)];
    if let Some(node) = cursor {
        analysis.cost = node.cost;
    }
    while let Some(node) = cursor {
        analysis.path.push(node.position);
        cursor = match node.previous {
            Some(previous) => {
                analysis
                    .directions
                    .push(Direction::between(previous, node.position));
                explored[grid.index(previous.x, previous.y)]
            }
            None => None,
        };
    }

    analysis
}

/// The six standard queries: three rows left to right, then three columns
/// from the bottom row to the top row
pub fn path_endpoints(width: u32, height: u32) -> [(UVec2, UVec2); 6] {
    let (right, top) = (width.saturating_sub(1), height.saturating_sub(1));
    let (mid_x, mid_y) = (width / 2, height / 2);
    [
        (UVec2::new(0, 0), UVec2::new(right, 0)),
        (UVec2::new(0, mid_y), UVec2::new(right, mid_y)),
        (UVec2::new(0, top), UVec2::new(right, top)),
        (UVec2::new(0, 0), UVec2::new(0, top)),
        (UVec2::new(mid_x, 0), UVec2::new(mid_x, top)),
        (UVec2::new(right, 0), UVec2::new(right, top)),
    ]
}

/// Run the six standard queries across the grid
pub fn analyze_paths(grid: &Grid) -> Vec<PathAnalysis> {
    path_endpoints(grid.width(), grid.height())
        .into_iter()
        .map(|(from, to)| analyze_path(grid, from, to))
        .collect()
}

/// Number of path cells with nothing underneath to stand on
///
/// A cell counts when it sits on the bottom row or the cell below it is of
/// `air_type`.
pub fn in_air(grid: &Grid, path: &PathAnalysis, air_type: u32) -> u32 {
    path.path
        .iter()
        .filter(|p| p.y == 0 || grid.cell(p.x, p.y - 1).cell_type == air_type)
        .count() as u32
}

/// Number of path cells that are air resting on something solid
pub fn on_surface(grid: &Grid, path: &PathAnalysis, air_type: u32) -> u32 {
    path.path
        .iter()
        .filter(|p| {
            p.y != 0
                && grid.cell(p.x, p.y).cell_type == air_type
                && grid.cell(p.x, p.y - 1).cell_type != air_type
        })
        .count() as u32
}
