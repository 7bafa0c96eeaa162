//! The cellular automaton grid
//!
//! [`Grid`] owns the cell buffer and the injected policies. Stepping is
//! synchronous: every new cell is computed from the previous generation only,
//! and the buffer is swapped once the whole generation is done.

mod policy;

pub use policy::{Initializer, PathCost, Rule, SideScrollerCost, TypeCost, UniformCost};

use std::fmt;

use glam::{IVec2, UVec2};
use rand::RngCore;

use crate::cell::Cell;
use crate::error::{CaveError, Result};

/// A rectangular cellular automaton
///
/// The grid starts at its construction size. [`Grid::scale`] grows it for
/// level-of-detail passes and [`Grid::clear`] shrinks it back.
///
/// # Example
///
/// ```
/// use cave_automata::{Grid, ROCK, FLOOR};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut grid = Grid::new(16, 16);
/// grid.set_initializer(|_: &Grid, x: u32, _y: u32, _rng: &mut dyn rand::RngCore| {
///     if x % 2 == 0 { ROCK } else { FLOOR }
/// });
/// grid.set_rule(|grid: &Grid, x: u32, y: u32| {
///     if grid.moore(x, y, 1, &[ROCK]).len() >= 5 { ROCK } else { FLOOR }
/// });
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// grid.initialize(&mut rng).unwrap();
/// grid.generate(3).unwrap();
/// assert_eq!(grid.cells().len(), 16 * 16);
/// ```
pub struct Grid {
    cells: Vec<Cell>,
    width: u32,
    height: u32,
    init_width: u32,
    init_height: u32,
    initializer: Option<Box<dyn Initializer>>,
    rule: Option<Box<dyn Rule>>,
    cost_function: Box<dyn PathCost>,
}

impl Grid {
    /// Create a grid with every cell set to type 0
    ///
    /// The path cost policy defaults to [`UniformCost`]; the initializer and
    /// rule must be installed before [`Grid::initialize`] and [`Grid::step`].
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: blank_cells(width, height),
            width,
            height,
            init_width: width,
            init_height: height,
            initializer: None,
            rule: None,
            cost_function: Box::new(UniformCost),
        }
    }

    pub fn set_initializer(&mut self, initializer: impl Initializer + 'static) {
        self.initializer = Some(Box::new(initializer));
    }

    pub fn set_rule(&mut self, rule: impl Rule + 'static) {
        self.rule = Some(Box::new(rule));
    }

    pub fn set_cost_function(&mut self, cost_function: impl PathCost + 'static) {
        self.cost_function = Box::new(cost_function);
    }

    /// Replace the cost policy with an already boxed one
    pub fn set_boxed_cost_function(&mut self, cost_function: Box<dyn PathCost>) {
        self.cost_function = cost_function;
    }

    #[inline]
    pub(crate) fn cost_function(&self) -> &dyn PathCost {
        self.cost_function.as_ref()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width the grid was constructed with (and returns to on clear)
    #[inline]
    pub fn init_width(&self) -> u32 {
        self.init_width
    }

    /// Height the grid was constructed with (and returns to on clear)
    #[inline]
    pub fn init_height(&self) -> u32 {
        self.init_height
    }

    /// Row-major buffer index of `(x, y)`
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        x as usize + y as usize * self.width as usize
    }

    /// Check whether a signed position lies inside the grid
    #[inline]
    pub fn contains(&self, position: IVec2) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    /// Get the cell at `(x, y)`
    ///
    /// Panics if the coordinates are outside the grid; use [`Grid::get`] for a
    /// checked lookup.
    #[inline]
    pub fn cell(&self, x: u32, y: u32) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    /// Checked cell lookup
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn cell_at(&self, position: UVec2) -> &Cell {
        self.cell(position.x, position.y)
    }

    pub fn set_cell(&mut self, cell_type: u32, x: u32, y: u32) {
        let i = self.index(x, y);
        self.cells[i] = Cell::new(cell_type, x, y);
    }

    /// All cells in row-major order
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells within Chebyshev distance `m` of `(x, y)` whose type is listed
    ///
    /// The square includes the centre cell and is clipped at the grid edges.
    pub fn moore(&self, x: u32, y: u32, m: u32, cell_types: &[u32]) -> Vec<Cell> {
        let (cx, cy, m) = (x as i64, y as i64, m as i64);
        let mut neighbourhood = Vec::new();
        for y0 in (cy - m).max(0)..=(cy + m).min(self.height as i64 - 1) {
            for x0 in (cx - m).max(0)..=(cx + m).min(self.width as i64 - 1) {
                let cell = self.cell(x0 as u32, y0 as u32);
                if cell_types.contains(&cell.cell_type) {
                    neighbourhood.push(*cell);
                }
            }
        }
        neighbourhood
    }

    /// Cells within Manhattan distance `r` of `(x, y)` whose type is listed
    ///
    /// The diamond includes the centre cell and is clipped at the grid edges.
    pub fn von_neumann(&self, x: u32, y: u32, r: u32, cell_types: &[u32]) -> Vec<Cell> {
        let (cx, cy, r) = (x as i64, y as i64, r as i64);
        let mut neighbourhood = Vec::new();
        for dy in -r..=r {
            let y0 = cy + dy;
            if y0 < 0 || y0 >= self.height as i64 {
                continue;
            }
            let reach = r - dy.abs();
            for x0 in (cx - reach).max(0)..=(cx + reach).min(self.width as i64 - 1) {
                let cell = self.cell(x0 as u32, y0 as u32);
                if cell_types.contains(&cell.cell_type) {
                    neighbourhood.push(*cell);
                }
            }
        }
        neighbourhood
    }

    /// Assign every cell from the installed initializer
    ///
    /// The initializer sees the grid as it was before this call; the new
    /// buffer replaces it only after every cell has been computed.
    ///
    /// # Errors
    ///
    /// Returns `MissingPolicy` if no initializer was installed.
    pub fn initialize(&mut self, rng: &mut dyn RngCore) -> Result<()> {
        let initializer = self
            .initializer
            .take()
            .ok_or(CaveError::MissingPolicy("initializer"))?;

        let mut cells = Vec::with_capacity(self.cells.len());
        for y in 0..self.height {
            for x in 0..self.width {
                cells.push(Cell::new(initializer.init(self, x, y, rng), x, y));
            }
        }

        self.cells = cells;
        self.initializer = Some(initializer);
        Ok(())
    }

    /// Advance the automaton by one synchronous generation
    ///
    /// # Errors
    ///
    /// Returns `MissingPolicy` if no rule was installed.
    pub fn step(&mut self) -> Result<()> {
        let rule = self.rule.as_deref().ok_or(CaveError::MissingPolicy("rule"))?;

        let mut cells = Vec::with_capacity(self.cells.len());
        for y in 0..self.height {
            for x in 0..self.width {
                cells.push(Cell::new(rule.apply(self, x, y), x, y));
            }
        }

        self.cells = cells;
        Ok(())
    }

    /// Run `n` generations
    pub fn generate(&mut self, n: u32) -> Result<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Nearest-neighbour upsample by an integer factor
    ///
    /// Every source cell becomes a `multiplier` x `multiplier` block of the
    /// same type.
    pub fn scale(&mut self, multiplier: u32) {
        debug_assert!(multiplier > 0, "scale multiplier must be positive");
        let width = self.width * multiplier;
        let height = self.height * multiplier;

        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let source = self.cell(x / multiplier, y / multiplier);
                cells.push(Cell::new(source.cell_type, x, y));
            }
        }

        self.cells = cells;
        self.width = width;
        self.height = height;
    }

    /// Restore the construction size and set every cell to type 0
    pub fn clear(&mut self) {
        self.width = self.init_width;
        self.height = self.init_height;
        self.cells = blank_cells(self.width, self.height);
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("init_width", &self.init_width)
            .field("init_height", &self.init_height)
            .field("has_initializer", &self.initializer.is_some())
            .field("has_rule", &self.rule.is_some())
            .finish_non_exhaustive()
    }
}

fn blank_cells(width: u32, height: u32) -> Vec<Cell> {
    (0..height)
        .flat_map(|y| (0..width).map(move |x| Cell::new(0, x, y)))
        .collect()
}
