//! Structural analysis of a generated grid
//!
//! Every pass here reads a stable grid snapshot and returns plain value
//! records. Nothing is cached on the grid; an [`Analysis`] is rebuilt for
//! every generation.
//!
//! - [`analyze_groups`]: 4-connected same-type regions
//! - [`analyze_borders`]: contour walks around those regions
//! - [`analyze_path`] / [`analyze_paths`]: A* queries over the injected cost
//! - [`border_distance_field`] and [`border_distance_peaks`]: distance
//!   transform from a contour and its maximal plateaus
//! - [`platforms`] and [`gap_count`]: walkable spans for side-view levels
//! - [`line_fit`] and friends: straightness of point sequences

mod borders;
mod distance;
mod groups;
mod lines;
mod path;
mod platform;

pub use borders::analyze_borders;
pub use distance::{
    border_distance_field, border_distance_peaks, border_distances, combine_borders,
    DistanceField,
};
pub use groups::analyze_groups;
pub use lines::{direction_runs, is_straight_line, line_fit, straight_lines, STRAIGHT_TOLERANCE};
pub use path::{analyze_path, analyze_paths, in_air, on_surface, path_endpoints, PathNode};
pub use platform::{gap_count, platforms, Platform};

use glam::UVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cell::{Bounds, Direction};

/// One maximal 4-connected region of a single cell type
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAnalysis {
    pub count: u32,
    pub cell_type: u32,
    pub bounds: Bounds,
    /// Member positions in visiting order
    pub positions: Vec<UVec2>,
}

/// One traced contour
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BorderAnalysis {
    pub cell_type: u32,
    /// Number of turns taken (reversals count twice)
    pub jaggedness: u32,
    pub length: u32,
    /// Walk direction after each step, parallel to `positions`
    pub directions: Vec<Direction>,
    pub positions: Vec<UVec2>,
    pub bounds: Bounds,
}

impl BorderAnalysis {
    /// An empty contour of the given type
    pub fn empty(cell_type: u32) -> Self {
        Self {
            cell_type,
            jaggedness: 0,
            length: 0,
            directions: Vec::new(),
            positions: Vec::new(),
            bounds: Bounds::EMPTY,
        }
    }
}

/// Result of one A* query
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathAnalysis {
    /// Positions from goal back to start, both included
    pub path: Vec<UVec2>,
    /// Step taken to arrive at `path[i]`, one entry per step
    pub directions: Vec<Direction>,
    /// Total cost, or `u32::MAX` when the goal was unreachable
    pub cost: u32,
}

impl PathAnalysis {
    /// Sentinel result for an unreachable goal
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            directions: Vec::new(),
            cost: u32::MAX,
        }
    }

    #[inline]
    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Everything the metric suite consumes for one generation
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub group_analyses: Vec<GroupAnalysis>,
    pub border_analyses: Vec<BorderAnalysis>,
    pub path_analyses: Vec<PathAnalysis>,
}
