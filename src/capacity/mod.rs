//! Strength envelope and safety factors
//!
//! Rating equations, envelope curves and safety factors are in field units
//! (psi, lbf, in), the units the API formulas are published in.

pub mod collapse;
pub mod envelope;
pub mod safety_factors;
pub mod von_mises;

pub use collapse::*;
pub use envelope::*;
pub use safety_factors::*;
pub use von_mises::*;
