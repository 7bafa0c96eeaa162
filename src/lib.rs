//! Cellular-automata cave generation with structural analysis
//!
//! A grid automaton produces floor/rock caves; an analysis engine breaks the
//! result down into connected groups, traced contours, A* paths, distance
//! fields and side-view platforms; a metric suite reduces that to scalars,
//! and a sweep harness collects metric scatter data across configurations.
//!
//! # Quick Start
//!
//! ```rust
//! use cave_automata::*;
//!
//! // Generate a cave
//! let options = CaveOptionsBuilder::new()
//!     .fill_percent(48).unwrap()
//!     .steps(5)
//!     .build().unwrap();
//! let mut caves = CaveGenerator::with_options(48, 32, options, 42).unwrap();
//! caves.set_cost_function(GameplayType::TopDown.cost_function());
//! caves.generate().unwrap();
//!
//! // Analyze it and score it
//! let analysis = caves.analyze();
//! for named in GameplayType::TopDown.metrics() {
//!     println!("{}: {:.2}", named.name, named.metric.evaluate(&caves, &analysis));
//! }
//! ```
//!
//! # Features
//!
//! - `serde`: Enables serialization support for options, cells, analysis
//!   records, metrics and scatter data

// Modules
pub mod error;
pub mod config;
pub mod cell;
pub mod grid;
pub mod analysis;
pub mod generator;
pub mod metrics;
pub mod sweep;

// Re-export core types for convenience
pub use error::{CaveError, Result};
pub use config::{CaveOptions, CaveOptionsBuilder, LayerSeeding, LodLayer};
pub use cell::{manhattan, Bounds, Cell, Direction, FLOOR, ROCK};
pub use grid::{Grid, Initializer, PathCost, Rule, SideScrollerCost, TypeCost, UniformCost};
pub use analysis::{
    Analysis, BorderAnalysis, DistanceField, GroupAnalysis, PathAnalysis, PathNode, Platform,
};
pub use generator::{CaveGenerator, CaveLodGenerator, CellColor, Generator};
pub use metrics::{GameplayType, Metric, NamedMetric};
pub use sweep::{clustering, compare, data_points, space_coverage, AnalysisData, MetricComparison, Sweep};

// Re-export glam vectors used throughout the API
pub use glam::{DVec2, IVec2, UVec2};
