use crate::prelude::*;

/// Camera entity a player pitches with mouse look, bound once at activation
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerCamera(pub Entity);
