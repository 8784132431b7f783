//! Grid maze solving with six interchangeable search strategies.
//!
//! ```no_run
//! use grid_search::algorithms::Method;
//! use grid_search::grid::Grid;
//! use grid_search::maze_file::MazeConfig;
//!
//! let config = MazeConfig::parse("[5,5]\n[0,0]\n[4,4]").unwrap();
//! let grid = Grid::new(&config).unwrap();
//! let result = Method::AStar.build(2).unwrap().search(&grid);
//! assert_eq!(result.path.len(), 9);
//! ```

pub mod algorithms;
pub mod benchmark;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod logging;
pub mod maze_file;
pub mod runner;
pub mod statistics;

pub use error::{Result, SearchError};
