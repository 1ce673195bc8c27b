pub mod types;
pub mod casing;
pub mod physics;
pub mod loads;
pub mod capacity;

pub use types::*;
