use crate::prelude::*;

/// Camera attached to a body. Only its local tilt is driven at runtime;
/// heading comes from the body transform it is bound to.
#[derive(Component, Clone, Debug)]
pub struct Camera {
    pub is_main: bool,
    pub local_rotation: UnitQuaternion<f32>,
}

impl Camera {
    pub fn main() -> Self {
        Self {
            is_main: true,
            ..Default::default()
        }
    }

    /// World space view direction when mounted on `body`
    pub fn look_direction(&self, body: &Transform) -> Vector3<f32> {
        body.rotation * self.local_rotation * -Vector3::z()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            is_main: false,
            local_rotation: UnitQuaternion::identity(),
        }
    }
}

/// Tilt about the camera's local X axis; positive degrees look down
pub fn pitch_rotation(degrees: f32) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -degrees.to_radians())
}
