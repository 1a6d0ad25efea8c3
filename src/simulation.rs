use glam::Vec2;

use crate::{
    config::LifeConfig,
    grid::{Cell, Grid, Seed},
    input::InputEvent,
    layout::GridLayout,
};

/// How a cell is drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellVisual {
    Hovered,
    Alive,
    Dead,
}

/// One draw request for the render loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSprite {
    pub cell: Cell,
    /// Center of the square in window pixels.
    pub center: Vec2,
    pub visual: CellVisual,
}

/// Everything the main loop mutates between frames: the board, where the
/// cursor is, and whether generations are advancing.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    layout: GridLayout,
    cursor: Option<Vec2>,
    running: bool,
    tick_seconds: f32,
    accumulator: f32,
    generation: u64,
}

impl Simulation {
    pub fn new(layout: GridLayout, seed: Seed, tick_seconds: f32) -> Self {
        let grid = Grid::seeded(layout.squares_per_line(), layout.squares_per_column(), seed);
        log::info!(
            "Grid of {}x{} cells, {} alive",
            grid.width(),
            grid.height(),
            grid.population()
        );

        Self {
            grid,
            layout,
            cursor: None,
            running: false,
            tick_seconds,
            accumulator: 0.0,
            generation: 0,
        }
    }

    pub fn from_config(config: &LifeConfig) -> Self {
        let layout =
            GridLayout::from_config(config.window.width, config.window.height, &config.grid);
        Self::new(layout, config.grid.seed, config.tick_seconds())
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved(position) => self.cursor = Some(position),
            InputEvent::CursorLeft => self.cursor = None,
            InputEvent::CellPressed => {
                self.toggle_hovered_cell();
            }
            InputEvent::ToggleRunning => self.toggle_running(),
        }
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        self.accumulator = 0.0;
        log::info!(
            "Simulation {} at generation {}",
            if self.running { "running" } else { "paused" },
            self.generation
        );
    }

    /// Cell currently under the cursor, if the cursor is over the board.
    pub fn hovered_cell(&self) -> Option<Cell> {
        self.cursor
            .and_then(|cursor| self.layout.find_corresponding_cell(cursor))
    }

    /// Flips the cell under the cursor. Returns the toggled cell and its new
    /// state, or `None` when the cursor is not over the board.
    pub fn toggle_hovered_cell(&mut self) -> Option<(Cell, bool)> {
        let Some(cell) = self.hovered_cell() else {
            log::debug!("Press at {:?} is outside the grid", self.cursor);
            return None;
        };
        let alive = self.grid.toggle(cell)?;
        log::debug!("Toggled {:?} -> {}", cell, if alive { "alive" } else { "dead" });
        Some((cell, alive))
    }

    /// Produces the next generation right away.
    pub fn step(&mut self) {
        self.grid.update_cells();
        self.generation += 1;
    }

    /// Feeds elapsed frame time. While running, a generation is produced
    /// once the time accumulated since the previous one reaches the tick
    /// budget, so two generations are never less than a tick apart.
    /// Returns `true` when a generation was produced.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.running {
            self.accumulator = 0.0;
            return false;
        }

        self.accumulator += dt.max(0.0);
        if self.accumulator < self.tick_seconds {
            return false;
        }

        self.accumulator = 0.0;
        self.step();
        true
    }

    /// Draw requests for every cell in row-major order.
    pub fn sprites(&self) -> impl Iterator<Item = CellSprite> + '_ {
        let hovered = self.hovered_cell();
        self.grid.iter().map(move |(cell, alive)| CellSprite {
            cell,
            center: self.layout.cell_center(cell),
            visual: if hovered == Some(cell) {
                CellVisual::Hovered
            } else if alive {
                CellVisual::Alive
            } else {
                CellVisual::Dead
            },
        })
    }
}
