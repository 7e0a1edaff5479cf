//! Small grids checked against hand-computed generations.
//!
//! Grid size 4, two workers (rows 0-1 and 2-3). Every case runs through both
//! engines so a buffer-role mix-up in either one shows up as a wrong grid A.

use lga_core::{Cell, Direction, Grid, ParallelEngine, SerialEngine, Simulator};

fn particle(dirs: &[Direction]) -> Cell {
    dirs.iter().fold(Cell::EMPTY, |cell, &d| cell.with(d))
}

/// Runs `iterations` half-steps on both engines and returns the final grid A
/// of each.
fn run_both(initial: &Grid, iterations: usize) -> (Grid, Grid) {
    let mut serial_a = initial.clone();
    let mut serial_b = Grid::new(initial.size()).unwrap();
    SerialEngine::new()
        .run(&mut serial_a, &mut serial_b, iterations)
        .unwrap();

    let mut parallel_a = initial.clone();
    let mut parallel_b = Grid::new(initial.size()).unwrap();
    ParallelEngine::new(2)
        .unwrap()
        .run(&mut parallel_a, &mut parallel_b, iterations)
        .unwrap();

    (serial_a, parallel_a)
}

fn expected(cells: &[(usize, usize, Cell)]) -> Grid {
    let mut grid = Grid::new(4).unwrap();
    for &(row, col, cell) in cells {
        grid.set(row, col, cell);
    }
    grid
}

/// E mover at (1,0), wall at (1,3), NE mover at (3,0).
fn streaming_layout() -> Grid {
    expected(&[
        (1, 0, particle(&[Direction::E])),
        (1, 3, Cell::WALL),
        (3, 0, particle(&[Direction::NE])),
    ])
}

#[test]
fn test_streaming_two_half_steps() {
    // E: (1,0) -> (1,1) -> (1,2)
    // NE: (3,0) odd row -> (2,1) even row -> (1,1)
    let want = expected(&[
        (1, 1, particle(&[Direction::NE])),
        (1, 2, particle(&[Direction::E])),
        (1, 3, Cell::WALL),
    ]);
    let (serial, parallel) = run_both(&streaming_layout(), 2);
    assert_eq!(serial, want, "serial:\n{serial}");
    assert_eq!(parallel, want, "parallel:\n{parallel}");
}

#[test]
fn test_streaming_four_half_steps() {
    // E bounces off the wall at (1,3) and heads back west to (1,1).
    // NE crosses rows 1 and 0 and leaves through the top edge.
    let want = expected(&[(1, 1, particle(&[Direction::W])), (1, 3, Cell::WALL)]);
    let (serial, parallel) = run_both(&streaming_layout(), 4);
    assert_eq!(serial, want, "serial:\n{serial}");
    assert_eq!(parallel, want, "parallel:\n{parallel}");
}

#[test]
fn test_head_on_collision_crosses_partition_boundary() {
    // E at (1,0) and W at (1,2) meet in (1,1), rotate to NE + SW, then split
    // across the row 1 / row 2 boundary between the two workers.
    let initial = expected(&[
        (1, 0, particle(&[Direction::E])),
        (1, 2, particle(&[Direction::W])),
    ]);
    let want = expected(&[
        (0, 2, particle(&[Direction::NE])),
        (2, 1, particle(&[Direction::SW])),
    ]);
    let (serial, parallel) = run_both(&initial, 2);
    assert_eq!(serial, want, "serial:\n{serial}");
    assert_eq!(parallel, want, "parallel:\n{parallel}");
    assert_eq!(parallel.particle_count(), 2);
}

#[test]
fn test_intermediate_generation_lands_in_b() {
    let initial = expected(&[
        (1, 0, particle(&[Direction::E])),
        (1, 2, particle(&[Direction::W])),
    ]);
    let mut a = initial.clone();
    let mut b = Grid::new(4).unwrap();
    ParallelEngine::new(2).unwrap().run(&mut a, &mut b, 2).unwrap();

    let collided = expected(&[(1, 1, particle(&[Direction::NE, Direction::SW]))]);
    assert_eq!(b, collided);
}
