//! Connected-region extraction

use super::GroupAnalysis;
use crate::cell::Bounds;
use crate::grid::Grid;

/// Split the grid into maximal 4-connected regions of equal cell type
///
/// Regions are discovered in row-major order of their first cell. The flood
/// fill uses an explicit stack and a single visited buffer shared by the
/// whole scan, so every cell ends up in exactly one group.
pub fn analyze_groups(grid: &Grid) -> Vec<GroupAnalysis> {
    let mut visited = vec![false; grid.cells().len()];
    let mut groups = Vec::new();
    let mut stack = Vec::new();

    for seed in grid.cells() {
        let seed_index = grid.index(seed.x, seed.y);
        if visited[seed_index] {
            continue;
        }

        let cell_type = seed.cell_type;
        let mut group = GroupAnalysis {
            count: 0,
            cell_type,
            bounds: Bounds::EMPTY,
            positions: Vec::new(),
        };

        visited[seed_index] = true;
        stack.push(*seed);
        while let Some(cell) = stack.pop() {
            let position = cell.position();
            group.count += 1;
            group.bounds.include(position);
            group.positions.push(position);

            for neighbour in grid.von_neumann(cell.x, cell.y, 1, &[cell_type]) {
                let i = grid.index(neighbour.x, neighbour.y);
                if !visited[i] {
                    visited[i] = true;
                    stack.push(neighbour);
                }
            }
        }

        groups.push(group);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::UVec2;

    #[test]
    fn test_ring_and_centre() {
        let mut grid = Grid::new(3, 3);
        grid.set_cell(1, 1, 1);

        let groups = analyze_groups(&grid);
        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].cell_type, 0);
        assert_eq!(groups[0].count, 8);
        assert_eq!(groups[0].bounds.width(), 3);
        assert_eq!(groups[0].bounds.height(), 3);

        assert_eq!(groups[1].cell_type, 1);
        assert_eq!(groups[1].count, 1);
        assert_eq!(groups[1].positions, vec![UVec2::new(1, 1)]);
    }

    #[test]
    fn test_diagonal_cells_are_separate_groups() {
        let mut grid = Grid::new(2, 2);
        grid.set_cell(1, 0, 0);
        grid.set_cell(1, 1, 1);

        let groups = analyze_groups(&grid);
        assert_eq!(groups.len(), 4);
        assert!(groups.iter().all(|g| g.count == 1));
    }

    #[test]
    fn test_every_cell_in_exactly_one_group() {
        let mut grid = Grid::new(9, 7);
        for y in 0..7 {
            for x in 0..9 {
                grid.set_cell(((x * 7 + y * 3) % 5 < 2) as u32, x, y);
            }
        }

        let groups = analyze_groups(&grid);
        let total: u32 = groups.iter().map(|g| g.count).sum();
        assert_eq!(total, 9 * 7);

        let mut seen = vec![0u32; 9 * 7];
        for group in &groups {
            assert_eq!(group.positions.len() as u32, group.count);
            for p in &group.positions {
                assert_eq!(grid.cell(p.x, p.y).cell_type, group.cell_type);
                assert!(group.bounds.contains(*p));
                seen[grid.index(p.x, p.y)] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1));
    }
}
