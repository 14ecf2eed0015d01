use crate::prelude::*;

/// Tunable parameters for first-person locomotion
#[derive(Component, Clone, Debug, PartialEq)]
pub struct LocomotionSettings {
    /// Walking speed in units per second
    pub speed: f32,
    /// Degrees of turn per unit of look input
    pub look_speed: f32,
    pub sprint_multiplier: f32,
    /// Capsule height while crouched
    pub crouch_height: f32,
    pub crouch_speed: f32,
    /// Scales gravity while airborne
    pub gravity_multiplier: f32,
    /// Apex height of a jump in units
    pub jump_power: f32,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            speed: 5.0,
            look_speed: 0.1,
            sprint_multiplier: 2.0,
            crouch_height: 0.5,
            crouch_speed: 2.5,
            gravity_multiplier: 3.0,
            jump_power: 5.0,
        }
    }
}

impl LocomotionSettings {
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}
