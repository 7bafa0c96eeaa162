//! Cave generators and the analysis surface they expose
//!
//! A [`Generator`] owns a [`Grid`] and knows how to fill it. Everything else
//! (groups, borders, paths, distances, platforms) is provided on top of the
//! grid accessor, so a new generator only implements four methods.

mod cave;
mod lod;
mod policies;

pub use cave::CaveGenerator;
pub use lod::CaveLodGenerator;
pub use policies::{FlipNoise, MooreThreshold, RandomFill};

use glam::UVec2;

use crate::analysis::{self, Analysis, BorderAnalysis, GroupAnalysis, PathAnalysis, Platform};
use crate::cell::Cell;
use crate::error::Result;
use crate::grid::{Grid, PathCost};

/// Linear RGB colour of a cell type, each channel in `0.0..=1.0`
pub type CellColor = [f32; 3];

/// Palette shared by the floor/rock generators: dark grey floor, white rock
pub(crate) fn cave_palette() -> Vec<CellColor> {
    let floor = 65.0 / 255.0;
    vec![[floor; 3], [1.0; 3]]
}

/// A cell-grid generator
pub trait Generator {
    /// Regenerate the grid from scratch
    fn generate(&mut self) -> Result<()>;

    fn grid(&self) -> &Grid;

    fn grid_mut(&mut self) -> &mut Grid;

    /// Display colour per cell type, indexed by type
    fn cell_colors(&self) -> Vec<CellColor>;

    /// Cells of the last generation in row-major order
    fn result(&self) -> &[Cell] {
        self.grid().cells()
    }

    fn width(&self) -> u32 {
        self.grid().width()
    }

    fn height(&self) -> u32 {
        self.grid().height()
    }

    fn init_width(&self) -> u32 {
        self.grid().init_width()
    }

    fn init_height(&self) -> u32 {
        self.grid().init_height()
    }

    /// Replace the path cost policy used by [`Generator::analyze_paths`]
    fn set_cost_function(&mut self, cost_function: Box<dyn PathCost>) {
        self.grid_mut().set_boxed_cost_function(cost_function);
    }

    fn analyze_groups(&self) -> Vec<GroupAnalysis> {
        analysis::analyze_groups(self.grid())
    }

    fn analyze_borders(&self) -> Vec<BorderAnalysis> {
        analysis::analyze_borders(self.grid())
    }

    fn analyze_path(&self, from: UVec2, to: UVec2) -> PathAnalysis {
        analysis::analyze_path(self.grid(), from, to)
    }

    /// The six edge-to-edge queries, see [`analysis::path_endpoints`]
    fn analyze_paths(&self) -> Vec<PathAnalysis> {
        analysis::analyze_paths(self.grid())
    }

    /// Groups, borders and paths of the current grid
    fn analyze(&self) -> Analysis {
        Analysis {
            group_analyses: self.analyze_groups(),
            border_analyses: self.analyze_borders(),
            path_analyses: self.analyze_paths(),
        }
    }

    fn border_distances(&self, border: &BorderAnalysis) -> Vec<u32> {
        analysis::border_distances(self.grid(), border)
    }

    fn border_distance_peaks(&self, border: &BorderAnalysis) -> Vec<u32> {
        analysis::border_distance_peaks(self.grid(), border)
    }

    /// Distances from all contours of one type, merged
    fn border_distances_by_type(&self, borders: &[BorderAnalysis], cell_type: u32) -> Vec<u32> {
        self.border_distances(&analysis::combine_borders(borders, cell_type))
    }

    /// Peaks of the distance field from all contours of one type, merged
    fn border_distance_peaks_by_type(&self, borders: &[BorderAnalysis], cell_type: u32) -> Vec<u32> {
        self.border_distance_peaks(&analysis::combine_borders(borders, cell_type))
    }

    fn in_air(&self, path: &PathAnalysis, air_type: u32) -> u32 {
        analysis::in_air(self.grid(), path, air_type)
    }

    fn on_surface(&self, path: &PathAnalysis, air_type: u32) -> u32 {
        analysis::on_surface(self.grid(), path, air_type)
    }

    fn platforms(&self, group: &GroupAnalysis, platform_type: u32) -> Vec<Platform> {
        analysis::platforms(self.grid(), group, platform_type)
    }

    fn gap_count(&self, group: &GroupAnalysis, min_gap_depth: u32, platform_type: u32) -> u32 {
        analysis::gap_count(self.grid(), group, min_gap_depth, platform_type)
    }
}
