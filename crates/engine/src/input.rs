use crate::prelude::*;

use std::collections::{HashSet, VecDeque};
use winit::keyboard::KeyCode;

/// Magnitude at which an axis value reads as a pressed button
pub const BUTTON_PRESS_POINT: f32 = 0.5;

/// Resource that tracks raw keyboard and mouse state
#[derive(Resource)]
pub struct InputState {
    /// Currently pressed keys
    pub keys_pressed: HashSet<KeyCode>,
    /// Mouse delta accumulated during the current frame
    pub mouse_delta: Vector2<f32>,
    /// Whether the pointer is confined for mouse look
    pub cursor_locked: bool,
    pub cursor_visible: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            keys_pressed: HashSet::new(),
            mouse_delta: Vector2::zeros(),
            cursor_locked: false,
            cursor_visible: true,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Reset per-frame state (call at the end of each frame)
    pub fn reset_frame(&mut self) {
        self.mouse_delta = Vector2::zeros();
    }

    pub fn press_key(&mut self, key: KeyCode) {
        self.keys_pressed.insert(key);
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_pressed.remove(&key);
    }

    /// Add mouse delta movement. Ignored while the cursor is free.
    pub fn add_mouse_delta(&mut self, dx: f32, dy: f32) {
        if self.cursor_locked {
            self.mouse_delta.x += dx;
            self.mouse_delta.y += dy;
        }
    }

    /// Confine and hide the pointer
    pub fn lock_cursor(&mut self) {
        if !self.cursor_locked {
            log::info!("Cursor locked");
        }
        self.cursor_locked = true;
        self.cursor_visible = false;
    }

    pub fn unlock_cursor(&mut self) {
        if self.cursor_locked {
            log::info!("Cursor released");
        }
        self.cursor_locked = false;
        self.cursor_visible = true;
        self.mouse_delta = Vector2::zeros();
    }
}

/// Logical actions the host reports to gameplay code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    Move,
    Look,
    Jump,
    Sprint,
    Crouch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionPhase {
    /// Control left its default state
    Started,
    /// Control crossed its trigger point; fired once per press for buttons
    Performed,
    /// Control returned to its default state
    Canceled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActionValue {
    Axis(Vector2<f32>),
    Button(bool),
}

/// Snapshot delivered with each action callback
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionContext {
    pub phase: ActionPhase,
    pub value: ActionValue,
}

impl ActionContext {
    pub fn new(phase: ActionPhase, value: ActionValue) -> Self {
        Self { phase, value }
    }

    pub fn axis(phase: ActionPhase, value: Vector2<f32>) -> Self {
        Self::new(phase, ActionValue::Axis(value))
    }

    pub fn button(phase: ActionPhase, pressed: bool) -> Self {
        Self::new(phase, ActionValue::Button(pressed))
    }

    /// Axis value; buttons read as the zero vector
    pub fn read_vector2(&self) -> Vector2<f32> {
        match self.value {
            ActionValue::Axis(value) => value,
            ActionValue::Button(_) => Vector2::zeros(),
        }
    }

    /// Held state; axes count as pressed past [`BUTTON_PRESS_POINT`]
    pub fn read_as_button(&self) -> bool {
        match self.value {
            ActionValue::Button(pressed) => pressed,
            ActionValue::Axis(value) => value.magnitude() >= BUTTON_PRESS_POINT,
        }
    }

    pub fn started(&self) -> bool {
        self.phase == ActionPhase::Started
    }

    pub fn performed(&self) -> bool {
        self.phase == ActionPhase::Performed
    }

    pub fn canceled(&self) -> bool {
        self.phase == ActionPhase::Canceled
    }
}

/// Queue of action callbacks buffered until gameplay systems consume them
#[derive(Resource, Default)]
pub struct ActionEvents {
    queue: VecDeque<(InputAction, ActionContext)>,
}

impl ActionEvents {
    pub fn push(&mut self, action: InputAction, context: ActionContext) {
        self.queue.push_back((action, context));
    }

    /// Remove every pending event in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = (InputAction, ActionContext)> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Keyboard layout used to derive actions from raw key state
#[derive(Resource, Clone, Debug)]
pub struct InputBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
    pub sprint: KeyCode,
    pub crouch: KeyCode,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
            sprint: KeyCode::ShiftLeft,
            crouch: KeyCode::KeyC,
        }
    }
}

impl InputBindings {
    /// Planar move axis (x = right, y = forward), at most unit length
    pub fn move_axis(&self, input: &InputState) -> Vector2<f32> {
        let axis = |positive: KeyCode, negative: KeyCode| {
            let mut value: f32 = 0.0;
            if input.is_key_pressed(positive) {
                value += 1.0;
            }
            if input.is_key_pressed(negative) {
                value -= 1.0;
            }
            value
        };

        let value = Vector2::new(
            axis(self.right, self.left),
            axis(self.forward, self.back),
        );

        if value.magnitude() > 1.0 {
            value.normalize()
        } else {
            value
        }
    }

    /// Key bound to a button action
    pub fn button(&self, action: InputAction) -> Option<KeyCode> {
        match action {
            InputAction::Jump => Some(self.jump),
            InputAction::Sprint => Some(self.sprint),
            InputAction::Crouch => Some(self.crouch),
            InputAction::Move | InputAction::Look => None,
        }
    }
}
