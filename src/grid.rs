/// Index of a single cell. `x` runs along a line (left to right), `y` along a
/// column (top to bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Initial population written into the grid at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Seed {
    #[default]
    Empty,
    /// Every other cell alive, `(x + y) % 2 == 1`.
    Checkerboard,
}

/// Fixed size board of alive/dead cells.
///
/// The dimensions are chosen once and never change. Every accessor checks
/// bounds, so an index coming from the cursor can never reach outside the
/// board.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    // Next generation is written here, then swapped in
    scratch: Vec<bool>,
}

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Grid {}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        Self {
            width,
            height,
            cells: vec![false; len],
            scratch: vec![false; len],
        }
    }

    pub fn seeded(width: usize, height: usize, seed: Seed) -> Self {
        let mut grid = Self::new(width, height);
        grid.seed(seed);
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell).then(|| cell.y * self.width + cell.x)
    }

    pub fn get(&self, cell: Cell) -> Option<bool> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// Out of bounds cells read as dead.
    pub fn is_alive(&self, cell: Cell) -> bool {
        self.get(cell).unwrap_or(false)
    }

    /// Returns `false` and leaves the grid untouched when `cell` is out of bounds.
    pub fn set(&mut self, cell: Cell, alive: bool) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.cells[i] = alive;
                true
            }
            None => false,
        }
    }

    /// Flips the cell and returns its new state.
    pub fn toggle(&mut self, cell: Cell) -> Option<bool> {
        let i = self.index(cell)?;
        self.cells[i] = !self.cells[i];
        Some(self.cells[i])
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn seed(&mut self, seed: Seed) {
        match seed {
            Seed::Empty => self.clear(),
            Seed::Checkerboard => {
                for y in 0..self.height {
                    for x in 0..self.width {
                        self.cells[y * self.width + x] = (x + y) % 2 == 1;
                    }
                }
            }
        }
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|alive| **alive).count()
    }

    /// All cells in row-major order with their state.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, bool)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, alive)| (Cell::new(i % width, i / width), *alive))
    }

    /// Number of live cells among the in-bounds neighbors of `cell`. Positions
    /// past an edge do not exist, there is no wraparound.
    pub fn live_neighbors(&self, cell: Cell) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| {
                let x = cell.x.checked_add_signed(dx)?;
                let y = cell.y.checked_add_signed(dy)?;
                self.get(Cell::new(x, y))
            })
            .filter(|alive| *alive)
            .count() as u8
    }

    /// Advances the board by one generation.
    ///
    /// A live cell survives with 2 or 3 live neighbors, a dead cell is born
    /// with exactly 3, everything else ends up dead.
    pub fn update_cells(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let i = y * self.width + x;
                let next = matches!(
                    (self.cells[i], self.live_neighbors(Cell::new(x, y))),
                    (true, 2) | (_, 3)
                );
                self.scratch[i] = next;
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(rows: &[&str]) -> Grid {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut grid = Grid::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                grid.set(Cell::new(x, y), c == '#');
            }
        }
        grid
    }

    #[test]
    fn accessors_reject_out_of_bounds() {
        let mut grid = Grid::new(3, 2);
        assert_eq!(grid.get(Cell::new(3, 0)), None);
        assert_eq!(grid.get(Cell::new(0, 2)), None);
        assert!(!grid.set(Cell::new(5, 5), true));
        assert_eq!(grid.toggle(Cell::new(3, 1)), None);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn toggle_flips_and_reports_new_state() {
        let mut grid = Grid::new(4, 4);
        let cell = Cell::new(1, 2);
        assert_eq!(grid.toggle(cell), Some(true));
        assert!(grid.is_alive(cell));
        assert_eq!(grid.toggle(cell), Some(false));
        assert_eq!(grid, Grid::new(4, 4));
    }

    #[test]
    fn checkerboard_seed_alternates() {
        let grid = Grid::seeded(4, 3, Seed::Checkerboard);
        assert!(!grid.is_alive(Cell::new(0, 0)));
        assert!(grid.is_alive(Cell::new(1, 0)));
        assert!(grid.is_alive(Cell::new(0, 1)));
        assert_eq!(grid.population(), 6);
    }

    #[test]
    fn iter_walks_row_major() {
        let grid = grid_from(&["#..", "..#"]);
        let alive: Vec<Cell> = grid
            .iter()
            .filter_map(|(cell, alive)| alive.then_some(cell))
            .collect();
        assert_eq!(alive, vec![Cell::new(0, 0), Cell::new(2, 1)]);
    }

    #[test]
    fn block_is_still_life() {
        let mut grid = grid_from(&["....", ".##.", ".##.", "...."]);
        let before = grid.clone();
        grid.update_cells();
        assert_eq!(grid, before);
    }

    #[test]
    fn blinker_oscillates() {
        let horizontal = grid_from(&[".....", ".....", ".###.", ".....", "....."]);
        let vertical = grid_from(&[".....", "..#..", "..#..", "..#..", "....."]);

        let mut grid = horizontal.clone();
        grid.update_cells();
        assert_eq!(grid, vertical);
        grid.update_cells();
        assert_eq!(grid, horizontal);
    }

    #[test]
    fn neighbor_count_stops_at_edges() {
        let mut grid = Grid::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                grid.set(Cell::new(x, y), true);
            }
        }
        assert_eq!(grid.live_neighbors(Cell::new(0, 0)), 3);
        assert_eq!(grid.live_neighbors(Cell::new(3, 3)), 3);
        assert_eq!(grid.live_neighbors(Cell::new(0, 3)), 3);
        assert_eq!(grid.live_neighbors(Cell::new(3, 0)), 3);
        assert_eq!(grid.live_neighbors(Cell::new(1, 0)), 5);
        assert_eq!(grid.live_neighbors(Cell::new(0, 2)), 5);
        assert_eq!(grid.live_neighbors(Cell::new(1, 1)), 8);
    }

    #[test]
    fn birth_needs_exactly_three() {
        let mut grid = grid_from(&["#.#", "...", "#.."]);
        grid.update_cells();
        assert!(grid.is_alive(Cell::new(1, 1)));

        let mut grid = grid_from(&["#.#", "...", "#.#"]);
        grid.update_cells();
        assert!(!grid.is_alive(Cell::new(1, 1)));
    }

    #[test]
    fn overcrowded_and_lonely_cells_die() {
        let mut crowded = grid_from(&["###", "###", "..."]);
        crowded.update_cells();
        assert!(!crowded.is_alive(Cell::new(1, 1)));

        let mut lonely = grid_from(&["...", ".##", "..."]);
        lonely.update_cells();
        assert_eq!(lonely.population(), 0);
    }

    #[test]
    fn degenerate_grids_update() {
        let mut empty = Grid::new(0, 0);
        empty.update_cells();
        assert_eq!(empty.iter().count(), 0);

        let mut single = Grid::new(1, 1);
        single.set(Cell::new(0, 0), true);
        single.update_cells();
        assert!(!single.is_alive(Cell::new(0, 0)));
    }
}
