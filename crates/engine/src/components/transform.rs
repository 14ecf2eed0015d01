use crate::prelude::*;

#[derive(Component, Clone, Debug, PartialEq)]
pub struct Transform {
    pub position: Point3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn from_position(position: Point3<f32>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Direction the entity faces (local -Z)
    pub fn forward(&self) -> Vector3<f32> {
        forward_of(&self.rotation)
    }

    /// Local +X in world space
    pub fn right(&self) -> Vector3<f32> {
        right_of(&self.rotation)
    }

    pub fn up(&self) -> Vector3<f32> {
        self.rotation * Vector3::y()
    }

    /// Turn around world up. Positive degrees turn right.
    pub fn rotate_yaw(&mut self, degrees: f32) {
        self.rotation = yaw_rotation(degrees) * self.rotation;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

pub fn forward_of(rotation: &UnitQuaternion<f32>) -> Vector3<f32> {
    *rotation * -Vector3::z()
}

pub fn right_of(rotation: &UnitQuaternion<f32>) -> Vector3<f32> {
    *rotation * Vector3::x()
}

/// Rotation about world up by `degrees`; positive values turn right
pub fn yaw_rotation(degrees: f32) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -degrees.to_radians())
}
