use crate::prelude::*;

/// Kinematic capsule that resolves displacements against the scene
pub trait Mover {
    fn height(&self) -> f32;
    fn set_height(&mut self, height: f32);
    /// Whether the capsule rested on walkable ground after its last move
    fn is_grounded(&self) -> bool;
    fn move_by(&mut self, displacement: Vector3<f32>);
}

/// Camera whose local tilt is owned by the controller
pub trait CameraHandle {
    fn local_rotation(&self) -> UnitQuaternion<f32>;
    fn set_local_rotation(&mut self, rotation: UnitQuaternion<f32>);
}

/// Orientation of the controlled body
pub trait TransformHandle {
    /// Unit vector to the body's right in world space
    fn right(&self) -> Vector3<f32>;
    /// Unit vector the body faces in world space
    fn forward(&self) -> Vector3<f32>;
    /// Turn around world up; positive degrees turn right
    fn rotate_yaw(&mut self, degrees: f32);
}
