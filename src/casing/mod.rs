//! Casing string definition: grade, geometry and well path

pub mod grade;
pub mod string;
pub mod trajectory;

pub use grade::*;
pub use string::*;
pub use trajectory::*;
