mod camera;
mod capsule;
mod resources;
mod transform;

pub use camera::*;
pub use capsule::*;
pub use resources::*;
pub use transform::*;
