use std::collections::VecDeque;

use glam::Vec2;
use winit::event::{ElementState, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};

/// Key that flips between running and paused.
pub const RUN_TOGGLE_KEY: VirtualKeyCode = VirtualKeyCode::Space;

/// Input the simulation cares about, already reduced to edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    CursorMoved(Vec2),
    CursorLeft,
    /// Primary button went down over the window.
    CellPressed,
    ToggleRunning,
}

/// Turns pressed/released levels into single press edges. Repeated presses
/// without a release in between (OS key repeat) are swallowed.
#[derive(Debug, Default, Clone, Copy)]
pub struct Latch {
    held: bool,
}

impl Latch {
    /// Returns `true` only on the released -> pressed transition.
    pub fn update(&mut self, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;
        let edge = pressed && !self.held;
        self.held = pressed;
        edge
    }
}

/// Window events collected during one loop iteration, drained by the update
/// step.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
    mouse: Latch,
    run_key: Latch,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::CursorLeft { .. } => self.events.push_back(InputEvent::CursorLeft),
            WindowEvent::MouseInput { button, state, .. } => self.mouse_input(*button, *state),
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state,
                        virtual_keycode: Some(key),
                        ..
                    },
                is_synthetic: false,
                ..
            } => self.keyboard_input(*key, *state),
            WindowEvent::Focused(false) => {
                // Releases are not delivered to an unfocused window
                self.mouse = Latch::default();
                self.run_key = Latch::default();
            }
            _ => (),
        }
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        self.events
            .push_back(InputEvent::CursorMoved(Vec2::new(x, y)));
    }

    pub fn mouse_input(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left && self.mouse.update(state) {
            self.events.push_back(InputEvent::CellPressed);
        }
    }

    pub fn keyboard_input(&mut self, key: VirtualKeyCode, state: ElementState) {
        if key == RUN_TOGGLE_KEY && self.run_key.update(state) {
            self.events.push_back(InputEvent::ToggleRunning);
        }
    }

    /// Removes queued events in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }
}
