mod locomotion_settings;
mod player_camera;

pub use locomotion_settings::*;
pub use player_camera::*;
