//! Distance transform from a traced contour and plateau peaks
//!
//! The field lives in a local buffer covering only the contour's bounding
//! box. Cells the search never reaches keep distance 0, the same value the
//! contour cells themselves carry.

use std::collections::VecDeque;

use glam::{IVec2, UVec2};

use super::BorderAnalysis;
use crate::cell::Bounds;
use crate::grid::Grid;

/// Hop distances from a contour over its bounding box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceField {
    /// Grid position of local cell `(0, 0)`
    pub origin: UVec2,
    pub width: u32,
    pub height: u32,
    /// Row-major local distances
    pub distances: Vec<u32>,
}

impl DistanceField {
    fn empty() -> Self {
        Self {
            origin: UVec2::ZERO,
            width: 0,
            height: 0,
            distances: Vec::new(),
        }
    }

    fn covering(bounds: &Bounds) -> Self {
        if bounds.is_empty() {
            return Self::empty();
        }
        let (width, height) = (bounds.width(), bounds.height());
        Self {
            origin: bounds.origin(),
            width,
            height,
            distances: vec![0; width as usize * height as usize],
        }
    }

    /// Local buffer index of a grid position, if the field covers it
    fn local_index(&self, position: UVec2) -> Option<usize> {
        let local = position.as_ivec2() - self.origin.as_ivec2();
        self.index_of(local)
    }

    fn index_of(&self, local: IVec2) -> Option<usize> {
        if local.x < 0 || local.y < 0 || local.x as u32 >= self.width || local.y as u32 >= self.height {
            return None;
        }
        Some(local.x as usize + local.y as usize * self.width as usize)
    }

    /// Distance at a grid position, or `None` outside the field
    pub fn get(&self, position: UVec2) -> Option<u32> {
        self.local_index(position).map(|i| self.distances[i])
    }

    /// Largest distance in the field (0 when empty)
    pub fn max_distance(&self) -> u32 {
        self.distances.iter().copied().max().unwrap_or(0)
    }
}

/// Multi-source breadth-first distance transform from a contour
///
/// Every contour position is a source at distance 0. The search spreads
/// through 4-connected cells of the contour's type and never leaves the
/// contour's bounding box.
pub fn border_distance_field(grid: &Grid, border: &BorderAnalysis) -> DistanceField {
    let mut field = DistanceField::covering(&border.bounds);
    let mut reached = vec![false; field.distances.len()];
    let mut frontier = VecDeque::new();

    for &position in &border.positions {
        if let Some(i) = field.local_index(position) {
            if !reached[i] {
                reached[i] = true;
                frontier.push_back((position, 0u32));
            }
        }
    }

    while let Some((position, distance)) = frontier.pop_front() {
        if let Some(i) = field.local_index(position) {
            field.distances[i] = distance;
        }

        for neighbour in grid.von_neumann(position.x, position.y, 1, &[border.cell_type]) {
            let Some(i) = field.local_index(neighbour.position()) else {
                continue;
            };
            if !reached[i] {
                reached[i] = true;
                frontier.push_back((neighbour.position(), distance + 1));
            }
        }
    }

    field
}

/// Nonzero distances of the field, in local row-major order
pub fn border_distances(grid: &Grid, border: &BorderAnalysis) -> Vec<u32> {
    border_distance_field(grid, border)
        .distances
        .into_iter()
        .filter(|&d| d != 0)
        .collect()
}

/// One value per maximal equal-distance plateau with no higher neighbour
///
/// Plateaus are 4-connected within the local field. A plateau qualifies as a
/// peak when none of its cells touches a cell with a strictly greater
/// distance. Plateaus are reported in row-major order of their first cell.
pub fn border_distance_peaks(grid: &Grid, border: &BorderAnalysis) -> Vec<u32> {
    let field = border_distance_field(grid, border);
    let mut explored = vec![false; field.distances.len()];
    let mut peaks = Vec::new();
    let mut stack = Vec::new();

    const NEIGHBOURS: [IVec2; 4] = [IVec2::NEG_X, IVec2::X, IVec2::NEG_Y, IVec2::Y];

    for y in 0..field.height as i32 {
        for x in 0..field.width as i32 {
            let seed = IVec2::new(x, y);
            let Some(seed_index) = field.index_of(seed) else {
                continue;
            };
            if explored[seed_index] {
                continue;
            }

            let plateau = field.distances[seed_index];
            let mut is_peak = true;
            explored[seed_index] = true;
            stack.push(seed);

            while let Some(position) = stack.pop() {
                for offset in NEIGHBOURS {
                    let next = position + offset;
                    let Some(i) = field.index_of(next) else {
                        continue;
                    };
                    let distance = field.distances[i];
                    if distance == plateau {
                        if !explored[i] {
                            explored[i] = true;
                            stack.push(next);
                        }
                    } else if distance > plateau {
                        is_peak = false;
                    }
                }
            }

            if is_peak {
                peaks.push(plateau);
            }
        }
    }

    peaks
}

/// Merge every contour of `cell_type` into one synthetic contour
///
/// Bounds are unioned, jaggedness and length summed, and positions and
/// directions concatenated in input order. Contours of other types are
/// ignored; with no matching contour the result is empty.
pub fn combine_borders(borders: &[BorderAnalysis], cell_type: u32) -> BorderAnalysis {
    let mut combined = BorderAnalysis::empty(cell_type);
    for border in borders.iter().filter(|b| b.cell_type == cell_type) {
        combined.bounds = combined.bounds.merge(&border.bounds);
        combined.jaggedness += border.jaggedness;
        combined.length += border.length;
        combined.positions.extend_from_slice(&border.positions);
        combined.directions.extend_from_slice(&border.directions);
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_borders;

    /// A rock frame around a floor interior of `w` x `h`
    fn room(w: u32, h: u32) -> Grid {
        let mut grid = Grid::new(w + 2, h + 2);
        for y in 0..h + 2 {
            for x in 0..w + 2 {
                let edge = x == 0 || y == 0 || x == w + 1 || y == h + 1;
                grid.set_cell(edge as u32, x, y);
            }
        }
        grid
    }

    fn synthetic_border(cell_type: u32, positions: &[UVec2]) -> BorderAnalysis {
        let mut border = BorderAnalysis::empty(cell_type);
        for &p in positions {
            border.positions.push(p);
            border.bounds.include(p);
        }
        border
    }

    #[test]
    fn test_field_is_bfs_hop_count() {
        // Sources on the left and right columns of a 5x1 floor strip
        let grid = Grid::new(5, 1);
        let border = synthetic_border(0, &[UVec2::new(0, 0), UVec2::new(4, 0)]);

        let field = border_distance_field(&grid, &border);
        assert_eq!(field.width, 5);
        assert_eq!(field.height, 1);
        assert_eq!(field.distances, vec![0, 1, 2, 1, 0]);
        assert_eq!(field.max_distance(), 2);
        assert_eq!(border_distances(&grid, &border), vec![1, 2, 1]);
        assert_eq!(border_distance_peaks(&grid, &border), vec![2]);
    }

    #[test]
    fn test_search_stays_on_contour_type() {
        let mut grid = Grid::new(5, 1);
        grid.set_cell(1, 2, 0);
        let border = synthetic_border(0, &[UVec2::new(0, 0), UVec2::new(4, 0)]);

        let field = border_distance_field(&grid, &border);
        // The rock cell at x = 2 is never reached and keeps 0
        assert_eq!(field.distances, vec![0, 1, 0, 1, 0]);
        assert_eq!(border_distance_peaks(&grid, &border), vec![1, 1]);
    }

    #[test]
    fn test_traced_room() {
        let grid = room(5, 5);
        let borders = analyze_borders(&grid);
        let floor = combine_borders(&borders, 0);
        assert!(!floor.positions.is_empty());

        let field = border_distance_field(&grid, &floor);
        for p in &floor.positions {
            assert_eq!(field.get(*p), Some(0));
        }
        // Neighbouring reached cells never differ by more than one hop
        for y in 0..field.height {
            for x in 0..field.width {
                let p = field.origin + UVec2::new(x, y);
                let d = field.get(p).unwrap_or(0);
                if x + 1 < field.width {
                    let e = field.get(p + UVec2::X).unwrap_or(0);
                    assert!(d.abs_diff(e) <= 1);
                }
            }
        }
    }

    #[test]
    fn test_plateau_counts_once() {
        // Interior 3x1 plateau of distance 1 inside a 5x3 floor
        let grid = Grid::new(5, 3);
        let mut ring = Vec::new();
        for x in 0..5 {
            ring.push(UVec2::new(x, 0));
            ring.push(UVec2::new(x, 2));
        }
        ring.push(UVec2::new(0, 1));
        ring.push(UVec2::new(4, 1));
        let border = synthetic_border(0, &ring);

        let field = border_distance_field(&grid, &border);
        assert_eq!(field.get(UVec2::new(2, 1)), Some(1));
        assert_eq!(border_distance_peaks(&grid, &border), vec![1]);
        assert_eq!(border_distances(&grid, &border), vec![1, 1, 1]);
    }

    #[test]
    fn test_combine_borders() {
        let a = synthetic_border(0, &[UVec2::new(1, 1)]);
        let b = synthetic_border(1, &[UVec2::new(5, 5)]);
        let c = synthetic_border(0, &[UVec2::new(3, 0)]);
        let combined = combine_borders(&[a, b, c], 0);

        assert_eq!(combined.positions, vec![UVec2::new(1, 1), UVec2::new(3, 0)]);
        assert_eq!(combined.bounds.min_x, 1);
        assert_eq!(combined.bounds.max_x, 3);
        assert_eq!(combined.bounds.min_y, 0);

        let none = combine_borders(&[], 0);
        assert!(none.bounds.is_empty());
        let grid = Grid::new(2, 2);
        assert!(border_distance_field(&grid, &none).distances.is_empty());
        assert!(border_distance_peaks(&grid, &none).is_empty());
    }
}
