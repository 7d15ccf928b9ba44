//! Fuzzes the pathfinding system with many random grids. A* results are checked against a
//! brute-force breadth-first search for length, and for being walkable 4-connected paths between
//! the requested endpoints.
use grid_astar::{
    is_contiguous, AstarSolver, DijkstraSolver, GridSolver, PathOutcome, PathingGrid, Point,
};
use rand::prelude::*;
use std::collections::VecDeque;

fn random_grid(w: usize, h: usize, rng: &mut StdRng) -> PathingGrid {
    let mut pathing_grid = PathingGrid::new(w, h).unwrap();
    for x in 0..w as i32 {
        for y in 0..h as i32 {
            pathing_grid.set_walkable(x, y, !rng.gen_bool(0.4)).unwrap();
        }
    }
    pathing_grid.update();
    pathing_grid
}

fn random_grid_point(grid: &PathingGrid, rng: &mut StdRng) -> Point {
    Point::new(
        rng.gen_range(0..grid.width()) as i32,
        rng.gen_range(0..grid.height()) as i32,
    )
}

/// Number of steps on a shortest 4-connected walkable path, found by flood fill.
fn bfs_distance(grid: &PathingGrid, start: Point, end: Point) -> Option<usize> {
    if !grid.is_walkable(&start) || !grid.is_walkable(&end) {
        return None;
    }
    let mut dist = vec![usize::MAX; grid.width() * grid.height()];
    let ix = |p: Point| p.y as usize * grid.width() + p.x as usize;
    let mut queue = VecDeque::from([start]);
    dist[ix(start)] = 0;
    while let Some(p) = queue.pop_front() {
        if p == end {
            return Some(dist[ix(p)]);
        }
        for cell in grid.neighbors(p.x, p.y) {
            let n = cell.point();
            if dist[ix(n)] == usize::MAX {
                dist[ix(n)] = dist[ix(p)] + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

fn visualize_grid(grid: &PathingGrid, start: &Point, end: &Point) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.is_walkable(&p) {
                print!(".");
            } else {
                print!("#");
            }
        }
        println!();
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 8;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let solver = AstarSolver::new();
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng);
        let start = random_grid_point(&grid, &mut rng);
        let end = random_grid_point(&grid, &mut rng);
        grid.set_walkable(start.x, start.y, true).unwrap();
        grid.set_walkable(end.x, end.y, true).unwrap();

        let expected = bfs_distance(&grid, start, end);
        let path = solver.find_path(&grid, start, end);
        if expected.map(|d| d + 1) != Some(path.len()).filter(|&l| l > 0) {
            visualize_grid(&grid, &start, &end);
            println!("expected {expected:?} steps, got path {path:?}");
        }
        match expected {
            Some(steps) => {
                assert_eq!(path.len(), steps + 1);
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&end));
                assert!(is_contiguous(&path));
                assert!(path.iter().all(|p| grid.is_walkable(p)));
            }
            None => assert!(path.is_empty()),
        }
        // Components agree with the search whenever they are up to date.
        grid.update();
        assert_eq!(grid.reachable(&start, &end), expected.is_some());
    }
}

#[test]
fn fuzz_rectangular_grids() {
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(7);
    let astar = AstarSolver::new();
    for _ in 0..N_GRIDS {
        let w = rng.gen_range(1..12);
        let h = rng.gen_range(1..12);
        let grid = random_grid(w, h, &mut rng);
        let start = random_grid_point(&grid, &mut rng);
        let end = random_grid_point(&grid, &mut rng);
        let astar_path = astar.find_path(&grid, start, end);
        let dijkstra_path = DijkstraSolver.find_path(&grid, start, end);
        assert_eq!(astar_path.len(), dijkstra_path.len());
        if !astar_path.is_empty() {
            assert!(astar_path.len() as i32 > start.manhattan_distance(&end));
        }
    }
}

#[test]
fn repeated_searches_are_identical() {
    let mut rng = StdRng::seed_from_u64(42);
    let solver = AstarSolver::new();
    for _ in 0..200 {
        let grid = random_grid(10, 10, &mut rng);
        let pairs = (0..5)
            .map(|_| (random_grid_point(&grid, &mut rng), random_grid_point(&grid, &mut rng)))
            .collect::<Vec<_>>();
        let first = pairs
            .iter()
            .map(|&(s, e)| solver.find_path_outcome(&grid, s, e))
            .collect::<Vec<PathOutcome>>();
        let second = pairs
            .iter()
            .rev()
            .map(|&(s, e)| solver.find_path_outcome(&grid, s, e))
            .collect::<Vec<PathOutcome>>();
        assert!(first.iter().eq(second.iter().rev()));
    }
}

#[test]
fn concurrent_searches_share_a_grid() {
    let mut rng = StdRng::seed_from_u64(3);
    let grid = random_grid(16, 16, &mut rng);
    let solver = AstarSolver::new();
    let pairs = (0..32)
        .map(|_| (random_grid_point(&grid, &mut rng), random_grid_point(&grid, &mut rng)))
        .collect::<Vec<_>>();
    let sequential = pairs
        .iter()
        .map(|&(s, e)| solver.find_path(&grid, s, e))
        .collect::<Vec<_>>();
    let parallel = std::thread::scope(|scope| {
        let handles = pairs
            .iter()
            .map(|&(s, e)| {
                let (grid, solver) = (&grid, &solver);
                scope.spawn(move || solver.find_path(grid, s, e))
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });
    assert_eq!(sequential, parallel);
}
