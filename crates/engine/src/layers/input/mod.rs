mod input_layer;
mod input_systems;

pub use input_layer::*;
pub use input_systems::*;
