use crate::prelude::*;

/// Kinematic capsule resolved against a flat walkable ground plane.
///
/// The capsule is anchored at its foot point: the owning transform's position
/// is the bottom of the capsule, so changing `height` never moves the feet.
#[derive(Component, Clone, Debug)]
pub struct CapsuleController {
    pub height: f32,
    pub radius: f32,
    /// World Y of the walkable surface
    pub ground_height: f32,
    /// Whether the last move ended resting on the ground
    pub is_grounded: bool,
    /// Displacement actually applied by the last move
    pub last_motion: Vector3<f32>,
}

impl Default for CapsuleController {
    fn default() -> Self {
        Self {
            height: 2.0,
            radius: 0.5,
            ground_height: 0.0,
            is_grounded: false,
            last_motion: Vector3::zeros(),
        }
    }
}

impl CapsuleController {
    pub fn new(height: f32, radius: f32) -> Self {
        Self {
            height,
            radius,
            ..Default::default()
        }
    }

    pub fn with_ground_height(mut self, ground_height: f32) -> Self {
        self.ground_height = ground_height;
        self
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    /// Center of the capsule for a given foot point
    pub fn center(&self, foot: &Point3<f32>) -> Point3<f32> {
        *foot + Vector3::y() * (self.height * 0.5)
    }

    /// Apply `displacement` to the foot point at `position`, stopping on the ground plane
    pub fn move_and_collide(&mut self, position: &mut Point3<f32>, displacement: Vector3<f32>) {
        let mut target = *position + displacement;

        if target.y <= self.ground_height {
            target.y = self.ground_height;
            self.is_grounded = true;
        } else {
            self.is_grounded = false;
        }

        self.last_motion = target - *position;
        *position = target;
    }
}
