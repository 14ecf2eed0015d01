mod locomotion;

pub use locomotion::*;
