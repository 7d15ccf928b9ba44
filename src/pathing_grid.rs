use crate::error::{GridError, Result};
use crate::{C, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::str::FromStr;

/// Offsets of the 4-neighbourhood in the order [PathingGrid::neighbors] reports them:
/// up, down, left, right. Search tie-breaks depend on this order.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// A single grid cell. Its coordinates are fixed at construction; only the walkable flag can be
/// changed, and only through [PathingGrid::set_walkable].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    point: Point,
    walkable: bool,
}

impl Cell {
    /// The cell's coordinates.
    pub fn point(&self) -> Point {
        self.point
    }
    pub fn x(&self) -> i32 {
        self.point.x
    }
    pub fn y(&self) -> i32 {
        self.point.y
    }
    pub fn walkable(&self) -> bool {
        self.walkable
    }
}

/// [PathingGrid] stores one [Cell] per coordinate in row-major order and maintains information
/// about 4-connected components using a [UnionFind] structure, which lets searches between
/// disconnected cells return immediately instead of flood-filling the grid.
///
/// The grid holds no search state, so any number of searches may borrow it at once. Mutation
/// requires `&mut self` and therefore cannot overlap with an in-flight search.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl PathingGrid {
    /// Creates a `width` x `height` grid with every cell walkable. Fails if either dimension is
    /// zero or too large to address with `i32` coordinates.
    pub fn new(width: usize, height: usize) -> Result<PathingGrid> {
        let fits = |d: usize| d > 0 && i32::try_from(d).is_ok();
        let n_cells = width.checked_mul(height);
        if !fits(width) || !fits(height) || n_cells.is_none() {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let cells = (0..height as i32)
            .flat_map(|y| {
                (0..width as i32).map(move |x| Cell {
                    point: Point::new(x, y),
                    walkable: true,
                })
            })
            .collect::<Vec<Cell>>();
        let mut grid = PathingGrid {
            width,
            height,
            components: UnionFind::new(cells.len()),
            cells,
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Number of columns, fixed at construction.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows, fixed at construction.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` lies in `[0, width) x [0, height)`. Walkability is not considered.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn get_ix(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    fn get_ix_point(&self, point: &Point) -> Option<usize> {
        self.get_ix(point.x, point.y)
    }

    /// Returns the cell at `(x, y)`, or [None] when the coordinate lies outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.get_ix(x, y).map(|ix| &self.cells[ix])
    }

    /// [get](Self::get) taking a [Point].
    pub fn get_point(&self, point: &Point) -> Option<&Cell> {
        self.get(point.x, point.y)
    }

    /// Whether `point` is inside the grid and walkable.
    pub fn is_walkable(&self, point: &Point) -> bool {
        self.get_point(point).is_some_and(Cell::walkable)
    }

    /// Updates the walkable flag at `(x, y)`. Joins newly connected components when a cell opens
    /// up and flags the components as dirty when one closes, since that may split a component.
    pub fn set_walkable(&mut self, x: i32, y: i32, walkable: bool) -> Result<()> {
        let ix = self.get_ix(x, y).ok_or(GridError::OutOfBounds { x, y })?;
        self.set_ix(ix, walkable);
        Ok(())
    }

    fn set_ix(&mut self, ix: usize, walkable: bool) {
        let cell = self.cells[ix];
        if cell.walkable && !walkable {
            self.components_dirty = true;
        } else if walkable {
            let joined = self
                .neighbors(cell.x(), cell.y())
                .iter()
                .filter_map(|n| self.get_ix_point(&n.point))
                .collect::<SmallVec<[usize; 4]>>();
            for n_ix in joined {
                self.components.union(ix, n_ix);
            }
        }
        self.cells[ix].walkable = walkable;
    }

    /// Sets the walkable flag of every cell in the `w` x `h` rectangle whose top-left corner is
    /// `(x, y)`. The rectangle is clipped to the grid.
    pub fn set_rect(&mut self, x: i32, y: i32, w: i32, h: i32, walkable: bool) {
        let x_range = x.max(0)..x.saturating_add(w).min(self.width as i32);
        let y_range = y.max(0)..y.saturating_add(h).min(self.height as i32);
        for cy in y_range {
            for cx in x_range.clone() {
                if let Some(ix) = self.get_ix(cx, cy) {
                    self.set_ix(ix, walkable);
                }
            }
        }
    }

    /// The walkable cells 4-adjacent to `(x, y)`, in [NEIGHBOUR_OFFSETS] order. Off-grid and
    /// blocked neighbours are left out.
    pub fn neighbors(&self, x: i32, y: i32) -> SmallVec<[&Cell; 4]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .filter_map(|(dx, dy)| self.get(x.checked_add(*dx)?, y.checked_add(*dy)?))
            .filter(|cell| cell.walkable)
            .collect()
    }

    /// Successors of `pos` for the search, each paired with the cost of the step.
    pub fn neighborhood_points_and_cost(
        &self,
        pos: &Point,
    ) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
        self.neighbors(pos.x, pos.y)
            .into_iter()
            .map(|cell| (cell.point, C))
            .collect()
    }

    /// Whether cells were blocked since the components were last generated. While dirty, the
    /// components may still join cells that a new wall has separated.
    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.get_ix_point(point).map(|ix| self.components.find(ix))
    }

    /// Checks if start and goal are walkable and on the same connected component. Only
    /// meaningful while the components are not dirty, see [update](Self::update).
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if !self.is_walkable(start) || !self.is_walkable(goal) {
            return true;
        }
        match (self.get_ix_point(start), self.get_ix_point(goal)) {
            (Some(start_ix), Some(goal_ix)) => !self.components.equiv(start_ix, goal_ix),
            _ => true,
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up walkable 4-neighbours.
    pub fn generate_components(&mut self) {
        let mut components = UnionFind::new(self.cells.len());
        for (ix, cell) in self.cells.iter().enumerate() {
            if !cell.walkable {
                continue;
            }
            // Right and down suffice, the other two directions are covered from the other side.
            for (dx, dy) in [(1, 0), (0, 1)] {
                if let Some(n_ix) = self.get_ix(cell.x() + dx, cell.y() + dy) {
                    if self.cells[n_ix].walkable {
                        components.union(ix, n_ix);
                    }
                }
            }
        }
        self.components = components;
        self.components_dirty = false;
    }
}

/// Renders the grid with `#` for blocked and `.` for walkable cells, one row per line.
impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line = row
                .iter()
                .map(|cell| if cell.walkable { '.' } else { '#' })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses the format produced by [Display](fmt::Display). Surrounding whitespace and blank lines
/// are ignored.
impl FromStr for PathingGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<PathingGrid> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<&str>>();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut grid = PathingGrid::new(width, rows.len())?;
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    line: y + 1,
                    expected: width,
                    found,
                });
            }
            for (x, c) in row.chars().enumerate() {
                let walkable = match c {
                    '.' => true,
                    '#' => false,
                    found => {
                        return Err(GridError::Parse {
                            line: y + 1,
                            column: x + 1,
                            found,
                        })
                    }
                };
                grid.cells[y * width + x].walkable = walkable;
            }
        }
        grid.generate_components();
        Ok(grid)
    }
}
