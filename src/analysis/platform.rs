//! Walkable spans and fall gaps for side-view levels
//!
//! Row 0 is the bottom of the level: "below" always means `y - 1`.

use std::collections::HashSet;

use glam::UVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::GroupAnalysis;
use crate::grid::Grid;

/// A horizontal run of cells standing on solid ground
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Row of the span relative to the bottom of its group
    pub height: u32,
    /// First cell of the span
    pub left: UVec2,
    /// One past the last cell of the span
    pub right: UVec2,
}

impl Platform {
    /// Number of cells in the span
    #[inline]
    pub fn width(&self) -> u32 {
        self.right.x - self.left.x
    }
}

/// Walkable spans inside a group
///
/// A group cell is walkable when it is not `platform_type` itself and the
/// cell directly below it is. Each maximal left-to-right run of walkable
/// group cells on a row becomes one [`Platform`]. The bottom row is skipped
/// since nothing lies below it.
pub fn platforms(grid: &Grid, group: &GroupAnalysis, platform_type: u32) -> Vec<Platform> {
    let members: HashSet<UVec2> = group.positions.iter().copied().collect();
    let mut platforms = Vec::new();
    if group.bounds.is_empty() {
        return platforms;
    }

    for y in group.bounds.min_y.max(1)..=group.bounds.max_y {
        let height = y - group.bounds.min_y;
        let mut start: Option<u32> = None;

        for x in group.bounds.min_x..=group.bounds.max_x {
            let walkable = members.contains(&UVec2::new(x, y))
                && grid.cell(x, y).cell_type != platform_type
                && grid.cell(x, y - 1).cell_type == platform_type;

            match (walkable, start) {
                (true, None) => start = Some(x),
                (false, Some(left)) => {
                    platforms.push(Platform {
                        height,
                        left: UVec2::new(left, y),
                        right: UVec2::new(x, y),
                    });
                    start = None;
                }
                _ => {}
            }
        }

        if let Some(left) = start {
            platforms.push(Platform {
                height,
                left: UVec2::new(left, y),
                right: UVec2::new(group.bounds.max_x + 1, y),
            });
        }
    }

    platforms
}

/// Whether a walker stepping onto `position` would fall at least `depth` cells
///
/// Probes `position` and the `depth - 1` cells beneath it. Any
/// `platform_type` cell among them catches the fall; running off the bottom
/// of the grid counts as a fall.
fn is_gap(grid: &Grid, position: UVec2, depth: u32, platform_type: u32) -> bool {
    for fallen in 0..depth {
        let Some(y) = position.y.checked_sub(fallen) else {
            return true;
        };
        if grid.cell(position.x, y).cell_type == platform_type {
            return false;
        }
    }
    true
}

/// Count distinct gap positions at the ends of the group's platforms
///
/// For every platform the column left of its first cell and the column of
/// its exclusive right end are probed for a fall of at least `min_gap_depth`
/// cells. Positions shared by adjacent platforms are counted once.
pub fn gap_count(grid: &Grid, group: &GroupAnalysis, min_gap_depth: u32, platform_type: u32) -> u32 {
    let mut gaps = HashSet::new();

    for platform in platforms(grid, group, platform_type) {
        let mut edges = Vec::with_capacity(2);
        if platform.left.x >= 1 {
            edges.push(UVec2::new(platform.left.x - 1, platform.left.y));
        }
        if platform.right.x < grid.width() {
            edges.push(platform.right);
        }

        for edge in edges {
            if is_gap(grid, edge, min_gap_depth, platform_type) {
                gaps.insert(edge);
            }
        }
    }

    gaps.len() as u32
}
