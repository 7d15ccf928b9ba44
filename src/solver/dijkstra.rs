use grid_util::point::Point;
use smallvec::SmallVec;

use crate::{pathing_grid::PathingGrid, solver::GridSolver, N_SMALLVEC_SIZE};

/// Uniform-cost search: A* with a zero heuristic. Slower than [AstarSolver](super::astar::AstarSolver)
/// but useful as a reference, since it finds shortest paths without relying on the heuristic.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Successors = SmallVec<[(Point, i32); N_SMALLVEC_SIZE]>;

    fn successors(&self, grid: &PathingGrid, node: &Point) -> Self::Successors {
        grid.neighborhood_points_and_cost(node)
    }

    fn heuristic(&self, _: &Point, _: &Point) -> i32 {
        0
    }
}
