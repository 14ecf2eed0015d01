//! First-person locomotion: input handlers, per-frame movement, and the
//! narrow host capabilities it drives.

mod activation;
mod capabilities;
mod controller;
mod host;

pub use activation::*;
pub use capabilities::*;
pub use controller::*;
pub use host::*;
