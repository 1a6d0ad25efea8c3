use glam::Vec2;

use crate::{config::GridConfig, grid::Cell};

/// Geometry of the board inside the window.
///
/// The window is tiled with `cell_side + gutter` blocks. Whatever does not fit
/// is the grid offset, split evenly on both sides so the board sits centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    window_size: Vec2,
    cell_side: u32,
    gutter: u32,
    squares_per_line: usize,
    squares_per_column: usize,
    grid_offset: Vec2,
}

impl GridLayout {
    pub fn new(window_width: u32, window_height: u32, cell_side: u32, gutter: u32) -> Self {
        let pitch = cell_side + gutter;
        let squares = |extent: u32| {
            if pitch == 0 {
                0
            } else {
                extent.saturating_sub(gutter) / pitch
            }
        };
        let squares_per_line = squares(window_width);
        let squares_per_column = squares(window_height);
        let grid_offset = Vec2::new(
            (window_width - squares_per_line * pitch) as f32,
            (window_height - squares_per_column * pitch) as f32,
        );

        Self {
            window_size: Vec2::new(window_width as f32, window_height as f32),
            cell_side,
            gutter,
            squares_per_line: squares_per_line as usize,
            squares_per_column: squares_per_column as usize,
            grid_offset,
        }
    }

    pub fn from_config(window_width: u32, window_height: u32, grid: &GridConfig) -> Self {
        Self::new(window_width, window_height, grid.cell_side, grid.gutter)
    }

    /// Cells along the horizontal axis.
    #[inline]
    pub fn squares_per_line(&self) -> usize {
        self.squares_per_line
    }

    /// Cells along the vertical axis.
    #[inline]
    pub fn squares_per_column(&self) -> usize {
        self.squares_per_column
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        (self.cell_side + self.gutter) as f32
    }

    #[inline]
    pub fn grid_offset(&self) -> Vec2 {
        self.grid_offset
    }

    /// Top left corner of the pitch block owned by `cell`, in window pixels.
    pub fn cell_origin(&self, cell: Cell) -> Vec2 {
        self.grid_offset / 2.0 + Vec2::new(cell.x as f32, cell.y as f32) * self.pitch()
    }

    /// Where the render loop centers the square for `cell`, in window pixels.
    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.pitch() / 2.0)
    }

    /// Maps a cursor position (window pixels, origin top left) to the cell
    /// drawn under it. Positions in the margin or outside the window map to
    /// `None`.
    pub fn find_corresponding_cell(&self, cursor: Vec2) -> Option<Cell> {
        if self.squares_per_line == 0 || self.squares_per_column == 0 {
            return None;
        }

        let index = ((cursor - self.grid_offset / 2.0) / self.pitch()).floor();
        if !index.is_finite() || index.x < 0.0 || index.y < 0.0 {
            return None;
        }

        let (x, y) = (index.x as usize, index.y as usize);
        (x < self.squares_per_line && y < self.squares_per_column).then_some(Cell::new(x, y))
    }

    /// Window pixels to normalized device coordinates (origin at the center, y up).
    pub fn to_ndc(&self, point: Vec2) -> Vec2 {
        let half = self.window_size / 2.0;
        Vec2::new(point.x / half.x - 1.0, 1.0 - point.y / half.y)
    }

    /// Half extent of a drawn square in normalized device coordinates.
    pub fn cell_half_extent_ndc(&self) -> Vec2 {
        let half_side = self.cell_side as f32 / 2.0;
        Vec2::splat(half_side) / (self.window_size / 2.0)
    }
}
