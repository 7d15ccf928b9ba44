use grid_util::point::Point;
use smallvec::SmallVec;

use crate::{pathing_grid::PathingGrid, solver::GridSolver, C, N_SMALLVEC_SIZE};

/// A* on the 4-connected grid with the Manhattan distance as heuristic, which is admissible and
/// consistent for unit-cost 4-directional moves so returned paths are shortest paths.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub max_expansions: Option<usize>,
    pub use_components: bool,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            max_expansions: None,
            use_components: true,
        }
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> AstarSolver {
        self.max_expansions = Some(max_expansions);
        self
    }
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl GridSolver for AstarSolver {
    type Successors = SmallVec<[(Point, i32); N_SMALLVEC_SIZE]>;

    fn successors(&self, grid: &PathingGrid, node: &Point) -> Self::Successors {
        grid.neighborhood_points_and_cost(node)
    }

    fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        p1.manhattan_distance(p2) * C
    }

    fn max_expansions(&self) -> Option<usize> {
        self.max_expansions
    }

    fn use_components(&self) -> bool {
        self.use_components
    }
}
