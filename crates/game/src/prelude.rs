pub use stride_engine::prelude::*;

pub use crate::components::*;
pub use crate::locomotion::*;
pub use crate::systems::*;
