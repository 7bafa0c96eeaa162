//! Policies injected into a [`Grid`]
//!
//! A grid is parameterized by three behaviours: how cells are seeded, how a
//! generation advances, and what a path step costs. Each one is a trait with a
//! blanket implementation for plain closures, so small policies can be written
//! inline while reusable ones get their own type.

use glam::UVec2;
use rand::RngCore;

use super::Grid;
use crate::analysis::PathNode;
use crate::cell::ROCK;

/// Decides the initial type of each cell
pub trait Initializer {
    /// Return the type for the cell at `(x, y)`
    ///
    /// `grid` is the state before initialization started, which lets
    /// layered generators build on what a coarser pass left behind.
    fn init(&self, grid: &Grid, x: u32, y: u32, rng: &mut dyn RngCore) -> u32;
}

impl<F> Initializer for F
where
    F: Fn(&Grid, u32, u32, &mut dyn RngCore) -> u32,
{
    fn init(&self, grid: &Grid, x: u32, y: u32, rng: &mut dyn RngCore) -> u32 {
        self(grid, x, y, rng)
    }
}

/// The transition rule of the automaton
pub trait Rule {
    /// Return the next type for the cell at `(x, y)` given the previous generation
    fn apply(&self, grid: &Grid, x: u32, y: u32) -> u32;
}

impl<F> Rule for F
where
    F: Fn(&Grid, u32, u32) -> u32,
{
    fn apply(&self, grid: &Grid, x: u32, y: u32) -> u32 {
        self(grid, x, y)
    }
}

/// Accumulated cost of extending a path by one step
pub trait PathCost {
    /// Total cost of reaching `to` through `from`
    ///
    /// The value returned is the full path cost, not the step increment, so
    /// implementations normally start from `from.cost`.
    fn cost(&self, grid: &Grid, from: &PathNode, to: UVec2) -> u32;
}

impl<F> PathCost for F
where
    F: Fn(&Grid, &PathNode, UVec2) -> u32,
{
    fn cost(&self, grid: &Grid, from: &PathNode, to: UVec2) -> u32 {
        self(grid, from, to)
    }
}

/// Every step costs 1
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCost;

impl PathCost for UniformCost {
    fn cost(&self, _grid: &Grid, from: &PathNode, _to: UVec2) -> u32 {
        from.cost.saturating_add(1)
    }
}

/// Step cost looked up by the type of the destination cell
///
/// Types without an entry cost the last listed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCost {
    costs: Vec<u32>,
}

impl TypeCost {
    pub fn new(costs: Vec<u32>) -> Self {
        Self { costs }
    }

    /// Floor costs 1, rock costs 2
    pub fn top_down() -> Self {
        Self::new(vec![1, 2])
    }

    fn step(&self, cell_type: u32) -> u32 {
        self.costs
            .get(cell_type as usize)
            .or_else(|| self.costs.last())
            .copied()
            .unwrap_or(1)
    }
}

impl PathCost for TypeCost {
    fn cost(&self, grid: &Grid, from: &PathNode, to: UVec2) -> u32 {
        let cell_type = grid.cell_at(to).cell_type;
        from.cost.saturating_add(self.step(cell_type))
    }
}

/// Gravity-aware cost for side-view levels
///
/// Walking on top of rock is cheapest, digging through rock is dearer, and
/// moving through open air (nothing to stand on) is the most expensive.
#[derive(Debug, Clone, Copy, Default)]
pub struct SideScrollerCost;

impl SideScrollerCost {
    const DIG: u32 = 2;
    const WALK: u32 = 1;
    const AIR: u32 = 3;
}

impl PathCost for SideScrollerCost {
    fn cost(&self, grid: &Grid, from: &PathNode, to: UVec2) -> u32 {
        let step = if grid.cell_at(to).cell_type == ROCK {
            Self::DIG
        } else if to.y > 0 && grid.cell(to.x, to.y - 1).cell_type == ROCK {
            Self::WALK
        } else {
            Self::AIR
        };
        from.cost.saturating_add(step)
    }
}
