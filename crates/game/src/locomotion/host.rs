use crate::prelude::*;

/// [`Mover`] over a capsule and the foot point of the body that owns it
pub struct CapsuleMover<'a> {
    capsule: &'a mut CapsuleController,
    position: &'a mut Point3<f32>,
}

impl<'a> CapsuleMover<'a> {
    pub fn new(capsule: &'a mut CapsuleController, position: &'a mut Point3<f32>) -> Self {
        Self { capsule, position }
    }
}

impl Mover for CapsuleMover<'_> {
    fn height(&self) -> f32 {
        self.capsule.height
    }

    fn set_height(&mut self, height: f32) {
        self.capsule.set_height(height);
    }

    fn is_grounded(&self) -> bool {
        self.capsule.is_grounded
    }

    fn move_by(&mut self, displacement: Vector3<f32>) {
        self.capsule.move_and_collide(self.position, displacement);
    }
}

/// [`TransformHandle`] over the rotation of a body transform
pub struct BodyOrientation<'a> {
    rotation: &'a mut UnitQuaternion<f32>,
}

impl<'a> BodyOrientation<'a> {
    pub fn new(rotation: &'a mut UnitQuaternion<f32>) -> Self {
        Self { rotation }
    }
}

impl TransformHandle for BodyOrientation<'_> {
    fn right(&self) -> Vector3<f32> {
        right_of(&*self.rotation)
    }

    fn forward(&self) -> Vector3<f32> {
        forward_of(&*self.rotation)
    }

    fn rotate_yaw(&mut self, degrees: f32) {
        *self.rotation = yaw_rotation(degrees) * *self.rotation;
    }
}

impl CameraHandle for Camera {
    fn local_rotation(&self) -> UnitQuaternion<f32> {
        self.local_rotation
    }

    fn set_local_rotation(&mut self, rotation: UnitQuaternion<f32>) {
        self.local_rotation = rotation;
    }
}
