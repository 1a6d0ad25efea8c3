use glam::Vec2;
use gol_cells::{
    config::LifeConfig,
    grid::{Cell, Grid, Seed},
    input::{InputEvent, InputQueue, RUN_TOGGLE_KEY},
    layout::GridLayout,
    simulation::Simulation,
};
use winit::event::{ElementState, MouseButton};

fn glider(grid: &mut Grid, x: usize, y: usize) {
    for (dx, dy) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
        grid.set(Cell::new(x + dx, y + dy), true);
    }
}

#[test]
fn border_ring_sees_only_in_bounds_neighbors() {
    // Everything alive except the outer ring, then count on the inner ring
    let mut grid = Grid::new(6, 6);
    for y in 1..5 {
        for x in 1..5 {
            grid.set(Cell::new(x, y), true);
        }
    }
    let mut full = Grid::new(4, 4);
    for y in 0..4 {
        for x in 0..4 {
            full.set(Cell::new(x, y), true);
        }
    }

    assert_eq!(full.live_neighbors(Cell::new(0, 0)), 3);
    assert_eq!(full.live_neighbors(Cell::new(2, 0)), 5);
    assert_eq!(grid.live_neighbors(Cell::new(1, 1)), 3);
    assert_eq!(grid.live_neighbors(Cell::new(2, 1)), 5);
    assert_eq!(grid.live_neighbors(Cell::new(0, 0)), 1);
}

#[test]
fn glider_translates_after_four_generations() {
    let mut grid = Grid::new(12, 12);
    glider(&mut grid, 1, 1);
    for _ in 0..4 {
        grid.update_cells();
    }

    let mut expected = Grid::new(12, 12);
    glider(&mut expected, 2, 2);
    assert_eq!(grid, expected);
}

#[test]
fn glider_settles_into_a_block_at_the_edge() {
    let mut grid = Grid::new(6, 6);
    glider(&mut grid, 3, 3);
    for _ in 0..20 {
        grid.update_cells();
    }

    // Without wraparound the glider jams into the corner
    let mut block = Grid::new(6, 6);
    for (x, y) in [(4, 4), (5, 4), (4, 5), (5, 5)] {
        block.set(Cell::new(x, y), true);
    }
    assert_eq!(grid, block);
}

#[test]
fn checkerboard_collapses_at_the_edges() {
    let mut grid = Grid::seeded(8, 8, Seed::Checkerboard);
    grid.update_cells();
    // Interior cells have 4 live neighbors, corners at most 1
    assert!(!grid.is_alive(Cell::new(3, 4)));
    assert!(!grid.is_alive(Cell::new(0, 0)));
}

#[test]
fn default_window_maps_every_cell_center_back() {
    let config = LifeConfig::default();
    let layout = GridLayout::from_config(config.window.width, config.window.height, &config.grid);
    for y in 0..layout.squares_per_column() {
        for x in 0..layout.squares_per_line() {
            let cell = Cell::new(x, y);
            assert_eq!(layout.find_corresponding_cell(layout.cell_center(cell)), Some(cell));
        }
    }
}

#[test]
fn edit_while_paused_then_run() {
    let mut simulation = Simulation::from_config(&LifeConfig::default());
    let mut queue = InputQueue::new();

    // Draw a horizontal blinker by clicking three cells
    for x in 10..13 {
        let center = simulation.layout().cell_center(Cell::new(x, 20));
        queue.cursor_moved(center.x, center.y);
        queue.mouse_input(MouseButton::Left, ElementState::Pressed);
        queue.mouse_input(MouseButton::Left, ElementState::Released);
    }
    for event in queue.drain() {
        simulation.apply(event);
    }
    assert_eq!(simulation.grid().population(), 3);

    queue.keyboard_input(RUN_TOGGLE_KEY, ElementState::Pressed);
    for event in queue.drain() {
        simulation.apply(event);
    }
    assert!(simulation.is_running());

    assert!(simulation.advance(1.0));
    assert!(simulation.grid().is_alive(Cell::new(11, 19)));
    assert!(simulation.grid().is_alive(Cell::new(11, 21)));
    assert!(!simulation.grid().is_alive(Cell::new(10, 20)));
    assert_eq!(simulation.generation(), 1);
}

#[test]
fn cursor_in_margin_never_toggles() {
    let mut simulation = Simulation::from_config(&LifeConfig::default());
    for position in [Vec2::new(0.0, 0.0), Vec2::new(1601.0, 901.0), Vec2::new(-3.0, 400.0)] {
        simulation.apply(InputEvent::CursorMoved(position));
        simulation.apply(InputEvent::CellPressed);
    }
    assert_eq!(simulation.grid().population(), 0);
}
