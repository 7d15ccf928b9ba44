//! # grid_astar
//!
//! Shortest paths on a uniform-cost grid with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm). Movement is restricted to the four
//! cardinal directions, every step costs the same and the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) serves as heuristic, so
//! every path returned is a shortest one. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! ```
//! use grid_astar::{find_path, PathingGrid, Point};
//!
//! let mut grid = PathingGrid::new(3, 3).unwrap();
//! grid.set_walkable(1, 1, false).unwrap();
//! let path = find_path(&grid, Point::new(0, 0), Point::new(2, 2));
//! assert_eq!(path.len(), 5);
//! ```
pub mod astar_search;
pub mod error;
pub mod pathing_grid;
pub mod solver;

pub use error::{GridError, Result};
pub use grid_util::point::Point;
pub use pathing_grid::{Cell, PathingGrid};
pub use solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver, PathOutcome};

use itertools::Itertools;

/// Cost of a single step between 4-adjacent cells.
pub const C: i32 = 1;
/// Inline capacity of successor lists, one slot per cardinal direction.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Checks that every consecutive pair of points differs by one unit along exactly one axis.
pub fn is_contiguous(path: &[Point]) -> bool {
    path.iter()
        .tuple_windows()
        .all(|(a, b)| a.manhattan_distance(b) == 1)
}

/// Total cost of following `path`, i.e. its number of steps times [C].
pub fn path_cost(path: &[Point]) -> i32 {
    path.len().saturating_sub(1) as i32 * C
}

/// Computes a shortest path from `start` to `end` with a default [AstarSolver]. See
/// [GridSolver::find_path] for when the result is empty.
pub fn find_path(grid: &PathingGrid, start: Point, end: Point) -> Vec<Point> {
    AstarSolver::new().find_path(grid, start, end)
}
