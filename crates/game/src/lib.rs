pub mod components;
pub mod demo;
pub mod locomotion;
pub mod player_layer;
pub mod prelude;
pub mod systems;

pub use player_layer::PlayerLayer;
