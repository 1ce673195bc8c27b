//! Force and pressure models along the casing string
//!
//! # Internal units
//!
//! Every model in this module works on plain `f64` slices in SI units:
//! depths in meters, pressures in pascals, forces in newtons, densities in kg/m³.
//! Conversion to field units happens when a load case result is produced.
//!
//! # Preconditions
//!
//! Depth series are assumed sorted downwards (TVD non-decreasing with MD). This is
//! not checked; an unsorted series yields a non-monotonic profile.

pub mod axial;
pub mod drag;
pub mod hydrostatics;
pub mod pressure;

pub use axial::*;
pub use drag::*;
pub use hydrostatics::*;
pub use pressure::*;

use std::f64::consts::PI;

/// Pipe body properties in SI units, shared by all force models
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeGeometry {
    /// Outer diameter (m)
    pub od: f64,
    /// Inner diameter (m)
    pub id: f64,
    /// Nominal weight per unit length (kg/m)
    pub weight_per_length: f64,
    /// Young's modulus (Pa)
    pub youngs_modulus: f64,
    /// Poisson's ratio
    pub poisson: f64,
    /// Thermal expansion coefficient (1/°C)
    pub thermal_expansion: f64,
}

impl PipeGeometry {
    /// Area enclosed by the outer diameter (m²)
    pub fn outer_area(&self) -> f64 {
        PI / 4.0 * self.od.powi(2)
    }

    /// Area enclosed by the inner diameter (m²)
    pub fn inner_area(&self) -> f64 {
        PI / 4.0 * self.id.powi(2)
    }

    /// Steel cross-section (m²)
    pub fn steel_area(&self) -> f64 {
        self.outer_area() - self.inner_area()
    }

    /// Equivalent density of the pipe including connections (kg/m³)
    pub fn pipe_density(&self) -> f64 {
        let area = self.steel_area();
        if area > 0.0 {
            self.weight_per_length / area
        } else {
            0.0
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProfileError {
    #[error("Profile length mismatch: expected {expected} samples, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

/// Check that a parallel array matches the depth series length
pub fn ensure_len(expected: usize, profile: &[f64]) -> Result<(), ProfileError> {
    if profile.len() != expected {
        return Err(ProfileError::LengthMismatch {
            expected,
            found: profile.len(),
        });
    }
    Ok(())
}

/// Signed sum of force or pressure contributors sharing one depth series
#[derive(Debug, Clone)]
pub struct Superposition {
    total: Vec<f64>,
}

impl Superposition {
    pub fn new(len: usize) -> Self {
        Self { total: vec![0.0; len] }
    }

    pub fn add(mut self, term: &[f64]) -> Result<Self, ProfileError> {
        ensure_len(self.total.len(), term)?;
        self.total.iter_mut().zip(term).for_each(|(t, x)| *t += x);
        Ok(self)
    }

    pub fn subtract(mut self, term: &[f64]) -> Result<Self, ProfileError> {
        ensure_len(self.total.len(), term)?;
        self.total.iter_mut().zip(term).for_each(|(t, x)| *t -= x);
        Ok(self)
    }

    /// Add a uniform force, e.g. an overpull or hang-off load
    pub fn add_constant(mut self, value: f64) -> Self {
        self.total.iter_mut().for_each(|t| *t += value);
        self
    }

    pub fn finish(self) -> Vec<f64> {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_superposition() {
        let total = Superposition::new(3)
            .add(&[10.0, 5.0, 0.0])
            .unwrap()
            .subtract(&[1.0, 2.0, 3.0])
            .unwrap()
            .add_constant(0.5)
            .finish();
        assert_eq!(total, vec![9.5, 3.5, -2.5]);
    }

    #[test]
    fn test_superposition_length_mismatch() {
        let err = Superposition::new(3).add(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err, ProfileError::LengthMismatch { expected: 3, found: 2 });
    }

    #[test]
    fn test_pipe_areas() {
        let pipe = PipeGeometry {
            od: 0.2032,
            id: 0.18288,
            weight_per_length: 60.0,
            youngs_modulus: 2.0e11,
            poisson: 0.3,
            thermal_expansion: 1.2e-5,
        };
        assert_relative_eq!(pipe.steel_area(), pipe.outer_area() - pipe.inner_area());
        assert!(pipe.pipe_density() > 7000.0);
    }
}
