use wgpu::{Backends, PowerPreference, PresentMode};

use crate::grid::Seed;

pub const WINDOW_WIDTH: u32 = 1602;
pub const WINDOW_HEIGHT: u32 = 902;
pub const SQUARE_SIDE: u32 = 10;
pub const SQUARE_GUTTER: u32 = 1;
pub const GENERATIONS_PER_SECOND: f32 = 10.0;
/// Bytes of per-cell push constants the cell pipeline needs.
pub const PUSH_CONSTANT_SIZE: u32 = 32;

/// Configuration of the window, device and board. Everything is fixed at
/// compile time, see [`LifeConfig::default`].
#[derive(Debug, Clone)]
pub struct LifeConfig {
    pub window: WindowConfig,
    pub device: DeviceConfig,
    pub grid: GridConfig,
    pub palette: Palette,
    pub generations_per_second: f32,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            device: DeviceConfig::default(),
            grid: GridConfig::default(),
            palette: Palette::default(),
            generations_per_second: GENERATIONS_PER_SECOND,
        }
    }
}

impl LifeConfig {
    /// Seconds between two generations while running.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.generations_per_second
    }
}

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub exit_on_esc: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Game of life".to_owned(),
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            exit_on_esc: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeviceConfig {
    pub power_preference: PowerPreference,
    pub backends: Backends,
    pub present_mode: PresentMode,
    pub features: wgpu::Features,
    pub limits: wgpu::Limits,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            power_preference: PowerPreference::HighPerformance,
            backends: Backends::all(),
            present_mode: PresentMode::AutoVsync,
            features: wgpu::Features::PUSH_CONSTANTS,
            limits: wgpu::Limits {
                max_push_constant_size: PUSH_CONSTANT_SIZE,
                ..wgpu::Limits::default()
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GridConfig {
    pub cell_side: u32,
    pub gutter: u32,
    pub seed: Seed,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_side: SQUARE_SIDE,
            gutter: SQUARE_GUTTER,
            seed: Seed::Empty,
        }
    }
}

/// Linear RGBA colors used when drawing.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: [f32; 4],
    pub dead: [f32; 4],
    pub alive: [f32; 4],
    pub hovered: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [0.02, 0.02, 0.02, 1.0],
            dead: [0.12, 0.12, 0.12, 1.0],
            alive: [0.95, 0.95, 0.95, 1.0],
            hovered: [0.9, 0.45, 0.1, 1.0],
        }
    }
}
