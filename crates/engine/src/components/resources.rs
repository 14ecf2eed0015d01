use crate::prelude::*;

use std::time::Duration;

/// Duration of the frame currently being simulated
#[derive(Resource)]
pub struct Time(pub Duration);

/// Index of the frame currently being simulated, starting at zero
#[derive(Resource, Clone, Copy, PartialEq, Eq, Debug)]
pub struct FrameCount(pub u64);

/// Human readable label attached to every entity spawned through the application
#[derive(Component, Clone, Debug)]
pub struct Tag {
    pub label: String,
}
