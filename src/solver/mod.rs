use crate::astar_search::{astar, SearchResult};
use crate::pathing_grid::PathingGrid;
use grid_util::point::Point;
use log::{debug, info, warn};

pub mod astar;
pub mod dijkstra;

/// Why a search produced the path it did. Every variant other than [Found](PathOutcome::Found)
/// corresponds to an empty path from [GridSolver::find_path].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathOutcome {
    /// Start to goal inclusive. A single point when start and goal coincide.
    Found(Vec<Point>),
    /// The given endpoint lies outside the grid.
    OutOfBounds(Point),
    /// The given endpoint is not walkable.
    Blocked(Point),
    /// No walkable 4-connected route joins the endpoints.
    Unreachable,
    /// The solver's expansion budget ran out first.
    BudgetExceeded { expanded: usize },
}

impl PathOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, PathOutcome::Found(_))
    }

    /// The found path, or an empty slice for every other outcome.
    pub fn path(&self) -> &[Point] {
        match self {
            PathOutcome::Found(path) => path,
            _ => &[],
        }
    }

    /// Consumes the outcome, yielding the found path or an empty one.
    pub fn into_path(self) -> Vec<Point> {
        match self {
            PathOutcome::Found(path) => path,
            _ => Vec::new(),
        }
    }
}

pub trait GridSolver {
    type Successors: IntoIterator<Item = (Point, i32)>;

    /// Estimated cost from `p1` to `p2`. Must not overestimate for paths to be shortest.
    fn heuristic(&self, p1: &Point, p2: &Point) -> i32;

    fn successors(&self, grid: &PathingGrid, node: &Point) -> Self::Successors;

    /// Upper bound on the number of nodes a single search may expand, [None] for no bound.
    fn max_expansions(&self) -> Option<usize> {
        None
    }

    /// Whether to consult the grid's connected components before searching.
    fn use_components(&self) -> bool {
        true
    }

    /// Computes a path from start to goal, both inclusive. The path is empty if the goal cannot
    /// be reached, either endpoint is off the grid or blocked, or the budget runs out.
    fn find_path(&self, grid: &PathingGrid, start: Point, goal: Point) -> Vec<Point> {
        self.find_path_outcome(grid, start, goal).into_path()
    }

    /// Like [find_path](Self::find_path) but reports why no path was returned.
    fn find_path_outcome(&self, grid: &PathingGrid, start: Point, goal: Point) -> PathOutcome {
        for endpoint in [start, goal] {
            match grid.get_point(&endpoint) {
                None => return PathOutcome::OutOfBounds(endpoint),
                Some(cell) if !cell.walkable() => return PathOutcome::Blocked(endpoint),
                Some(_) => {}
            }
        }
        // Dirty components may claim two cells are connected when a wall has since split them,
        // so they are only trusted while clean.
        let components_valid = self.use_components() && !grid.components_dirty();
        if components_valid && grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return PathOutcome::Unreachable;
        }
        match astar(
            &start,
            |node| self.successors(grid, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
            self.max_expansions(),
        ) {
            SearchResult::Found { path, cost } => {
                debug!("Found path from {} to {} with cost {}", start, goal, cost);
                PathOutcome::Found(path)
            }
            SearchResult::Exhausted => {
                if components_valid {
                    warn!("Reachable goal could not be pathed to, is reachable graph correct?");
                }
                PathOutcome::Unreachable
            }
            SearchResult::BudgetExceeded { expanded } => {
                warn!(
                    "Gave up on path from {} to {} after expanding {} nodes",
                    start, goal, expanded
                );
                PathOutcome::BudgetExceeded { expanded }
            }
        }
    }
}
