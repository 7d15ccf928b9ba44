use grid_astar::{find_path, PathingGrid, Point};

// In this example a path is found on a 10x10 grid with a wall that has a single gap:
// - # marks an obstacle
// - S marks the start, E the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut pathing_grid = PathingGrid::new(10, 10).unwrap();
    pathing_grid.set_rect(4, 0, 1, 9, false);
    pathing_grid.update();
    println!("{}", pathing_grid);
    let start = Point::new(0, 0);
    let end = Point::new(9, 0);
    let path = find_path(&pathing_grid, start, end);
    if path.is_empty() {
        println!("No path from {} to {}", start, end);
        return;
    }
    println!("Path of {} steps:", path.len() - 1);
    for y in 0..pathing_grid.height() as i32 {
        let row = (0..pathing_grid.width() as i32)
            .map(|x| {
                let p = Point::new(x, y);
                if p == start {
                    'S'
                } else if p == end {
                    'E'
                } else if path.contains(&p) {
                    'o'
                } else if pathing_grid.is_walkable(&p) {
                    '.'
                } else {
                    '#'
                }
            })
            .collect::<String>();
        println!("{}", row);
    }
}
