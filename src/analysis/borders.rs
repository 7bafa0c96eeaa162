//! Contour tracing
//!
//! The tracer is a left-hand wall follower over `(position, direction)`
//! states. Each step tries, in order:
//!
//! 1. turn left and move (jaggedness + 1)
//! 2. move straight ahead (length + 1)
//! 3. turn right in place (jaggedness + 1, length + 1)
//! 4. reverse in place (jaggedness + 2, length + 2)
//!
//! A walk ends when it comes back to its starting state. Right turns do not
//! move: the next step re-examines the same cell with the new heading, which
//! is what lets the walk close its loop at the start state.

use std::collections::HashSet;

use glam::{IVec2, UVec2};

use super::BorderAnalysis;
use crate::cell::Direction;
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Left,
    Straight,
    Right,
    Reverse,
}

/// Position and heading of the walker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TraceState {
    position: UVec2,
    direction: Direction,
}

fn matches(grid: &Grid, position: IVec2, cell_type: u32) -> bool {
    grid.contains(position) && grid.cell(position.x as u32, position.y as u32).cell_type == cell_type
}

/// Pick the transition for the current state
fn next_turn(grid: &Grid, state: &TraceState, cell_type: u32) -> Turn {
    let here = state.position.as_ivec2();
    let d = state.direction;

    if matches(grid, here + d.rotate_left().as_ivec2(), cell_type) {
        Turn::Left
    } else if matches(grid, here + d.as_ivec2(), cell_type) {
        Turn::Straight
    } else if matches(grid, here + d.rotate_right().as_ivec2(), cell_type) {
        Turn::Right
    } else {
        Turn::Reverse
    }
}

/// Heading for a trace starting at `(x, y)`
///
/// Follows a same-type cell above if there is one, otherwise heads down when
/// the right neighbour differs, otherwise heads right.
fn initial_direction(grid: &Grid, x: u32, y: u32, cell_type: u32) -> Direction {
    if y + 1 < grid.height() && grid.cell(x, y + 1).cell_type == cell_type {
        Direction::UP
    } else if x + 1 < grid.width() && grid.cell(x + 1, y).cell_type != cell_type {
        Direction::DOWN
    } else {
        Direction::RIGHT
    }
}

/// Walk one contour, marking every visited position in `explored`
fn trace(grid: &Grid, start: TraceState, cell_type: u32, explored: &mut [bool]) -> BorderAnalysis {
    let mut analysis = BorderAnalysis::empty(cell_type);
    let mut seen_states = HashSet::new();
    let mut state = start;
    let mut first = true;

    loop {
        if !grid.contains(state.position.as_ivec2()) {
            break;
        }
        if state == start && !first {
            break;
        }
        first = false;

        // Walks that never return to the start state settle into a cycle
        // elsewhere; stop as soon as any state repeats.
        if !seen_states.insert(state) {
            break;
        }

        explored[grid.index(state.position.x, state.position.y)] = true;
        analysis.positions.push(state.position);
        analysis.bounds.include(state.position);

        let d = state.direction;
        match next_turn(grid, &state, cell_type) {
            Turn::Left => {
                analysis.jaggedness += 1;
                let turned = d.rotate_left();
                state.position = (state.position.as_ivec2() + turned.as_ivec2()).as_uvec2();
                state.direction = turned;
            }
            Turn::Straight => {
                analysis.length += 1;
                state.position = (state.position.as_ivec2() + d.as_ivec2()).as_uvec2();
            }
            Turn::Right => {
                analysis.jaggedness += 1;
                analysis.length += 1;
                state.direction = d.rotate_right();
            }
            Turn::Reverse => {
                analysis.jaggedness += 2;
                analysis.length += 2;
                state.direction = d.reversed();
            }
        }
        analysis.directions.push(state.direction);
    }

    analysis
}

/// Trace the contours of every region in the grid
///
/// The scan is row-major. A trace starts at a cell whose type differs from
/// the cell scanned just before it (the first cell of each row always
/// qualifies) unless an earlier trace already walked over it.
pub fn analyze_borders(grid: &Grid) -> Vec<BorderAnalysis> {
    let mut explored = vec![false; grid.cells().len()];
    let mut borders = Vec::new();

    for y in 0..grid.height() {
        let mut previous_type = None;
        for x in 0..grid.width() {
            let cell_type = grid.cell(x, y).cell_type;
            if previous_type == Some(cell_type) {
                continue;
            }
            previous_type = Some(cell_type);
            if explored[grid.index(x, y)] {
                continue;
            }

            let start = TraceState {
                position: UVec2::new(x, y),
                direction: initial_direction(grid, x, y, cell_type),
            };
            borders.push(trace(grid, start, cell_type, &mut explored));
        }
    }

    borders
}
