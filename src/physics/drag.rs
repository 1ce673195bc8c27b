//! Soft-string friction (Johancsik torque and drag model)
//!
//! The string is walked from the shoe up. In each segment the normal force comes from
//! the buoyed weight and from the tension pulled around the curvature; friction opposes
//! the direction of travel.

use serde::{Deserialize, Serialize};

use super::{PipeGeometry, ProfileError, ensure_len};
use crate::types::GRAVITY;

/// Direction the string is moving when drag is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelDirection {
    /// Running in hole; friction reduces hookload
    Lowering,
    /// No movement; no friction
    Static,
    /// Pulling out of hole; friction adds to hookload
    Hoisting,
}

impl TravelDirection {
    fn sign(self) -> f64 {
        match self {
            TravelDirection::Lowering => -1.0,
            TravelDirection::Static => 0.0,
            TravelDirection::Hoisting => 1.0,
        }
    }
}

/// Survey data the drag model needs, one entry per depth sample
#[derive(Debug, Clone, Copy)]
pub struct DragPath<'a> {
    /// Measured depth (m)
    pub md: &'a [f64],
    /// Inclination (degrees)
    pub inclination: &'a [f64],
    /// Azimuth (degrees)
    pub azimuth: &'a [f64],
    /// Density of the fluid around the pipe at each sample (kg/m³)
    pub fluid_density: &'a [f64],
}

impl DragPath<'_> {
    fn check(&self) -> Result<(), ProfileError> {
        let n = self.md.len();
        ensure_len(n, self.inclination)?;
        ensure_len(n, self.azimuth)?;
        ensure_len(n, self.fluid_density)
    }
}

/// Azimuth change folded into [-180°, 180°)
fn azimuth_change(from: f64, to: f64) -> f64 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

/// Cumulative friction force (N) at each sample, signed by the direction of travel.
///
/// The value at a sample is the friction accumulated over the string below it,
/// so the shoe carries zero drag.
pub fn drag(
    path: &DragPath<'_>,
    pipe: &PipeGeometry,
    friction_factor: f64,
    direction: TravelDirection,
) -> Result<Vec<f64>, ProfileError> {
    path.check()?;
    let n = path.md.len();
    let mut profile = vec![0.0; n];

    let sign = direction.sign();
    if sign == 0.0 || n < 2 {
        return Ok(profile);
    }

    let pipe_density = pipe.pipe_density();
    let weight = pipe.weight_per_length * GRAVITY;
    let mut tension = 0.0;
    let mut accumulated = 0.0;

    for i in (1..n).rev() {
        let ds = path.md[i] - path.md[i - 1];
        if ds > 0.0 {
            let inc_top = path.inclination[i - 1].to_radians();
            let inc_bottom = path.inclination[i].to_radians();
            let mean_inc = 0.5 * (inc_top + inc_bottom);
            let d_inc = inc_bottom - inc_top;
            let d_azi = azimuth_change(path.azimuth[i - 1], path.azimuth[i]).to_radians();

            let fluid = 0.5 * (path.fluid_density[i - 1] + path.fluid_density[i]);
            let buoyed_weight = if pipe_density > 0.0 {
                weight * (1.0 - fluid / pipe_density)
            } else {
                weight
            };

            let lateral = tension * d_azi * mean_inc.sin();
            let vertical = tension * d_inc + buoyed_weight * ds * mean_inc.sin();
            let friction = friction_factor * lateral.hypot(vertical);

            tension += buoyed_weight * ds * mean_inc.cos() + sign * friction;
            accumulated += sign * friction;
        }
        profile[i - 1] = accumulated;
    }

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::conversion::{inch_to_m, psi_to_pa};
    use approx::assert_relative_eq;

    fn pipe() -> PipeGeometry {
        PipeGeometry {
            od: inch_to_m(8.0),
            id: inch_to_m(7.2),
            weight_per_length: 64.0,
            youngs_modulus: psi_to_pa(29e6),
            poisson: 0.3,
            thermal_expansion: 17e-6,
        }
    }

    #[test]
    fn test_vertical_well_has_no_drag() {
        let md = vec![0.0, 500.0, 1000.0];
        let zeros = vec![0.0; 3];
        let rho = vec![1200.0; 3];
        let path = DragPath { md: &md, inclination: &zeros, azimuth: &zeros, fluid_density: &rho };

        let d = drag(&path, &pipe(), 0.24, TravelDirection::Lowering).unwrap();
        assert!(d.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_sign_follows_direction() {
        let md = vec![0.0, 300.0, 600.0, 900.0];
        let inc = vec![0.0, 10.0, 30.0, 45.0];
        let azi = vec![0.0, 0.0, 5.0, 10.0];
        let rho = vec![1200.0; 4];
        let path = DragPath { md: &md, inclination: &inc, azimuth: &azi, fluid_density: &rho };

        let down = drag(&path, &pipe(), 0.24, TravelDirection::Lowering).unwrap();
        let up = drag(&path, &pipe(), 0.24, TravelDirection::Hoisting).unwrap();
        let none = drag(&path, &pipe(), 0.24, TravelDirection::Static).unwrap();

        assert_eq!(down[3], 0.0);
        assert!(down[0] < 0.0);
        assert!(up[0] > 0.0);
        assert!(none.iter().all(|&x| x == 0.0));

        // Friction accumulates towards surface
        assert!(up.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_straight_inclined_section() {
        // No curvature: normal force is the buoyed weight component only
        let md = vec![0.0, 100.0];
        let inc = vec![60.0, 60.0];
        let azi = vec![0.0, 0.0];
        let rho = vec![0.0, 0.0];
        let path = DragPath { md: &md, inclination: &inc, azimuth: &azi, fluid_density: &rho };

        let d = drag(&path, &pipe(), 0.3, TravelDirection::Hoisting).unwrap();
        let expected = 0.3 * 64.0 * GRAVITY * 100.0 * 60f64.to_radians().sin();
        assert_relative_eq!(d[0], expected, epsilon = 1e-6);
    }

    #[test]
    fn test_azimuth_wraps() {
        assert_relative_eq!(azimuth_change(350.0, 10.0), 20.0);
        assert_relative_eq!(azimuth_change(10.0, 350.0), -20.0);
    }

    #[test]
    fn test_mismatched_path() {
        let md = vec![0.0, 1.0];
        let short = vec![0.0];
        let path = DragPath { md: &md, inclination: &short, azimuth: &md, fluid_density: &md };
        assert!(drag(&path, &pipe(), 0.2, TravelDirection::Hoisting).is_err());
    }
}
