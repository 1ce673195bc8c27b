//! Axial force contributors
//!
//! Each function returns one force per depth sample in **newtons**, tension positive.
//! Load case recipes combine them with [`Superposition`](super::Superposition).

use serde::{Deserialize, Serialize};

use super::{PipeGeometry, ProfileError, ensure_len};
use crate::types::GRAVITY;
use crate::types::conversion::{in2_to_m2, lbf_to_n, m_to_inch, pa_to_psi};

/// Weight of the pipe in air hanging below each depth
pub fn air_weight(tvd: &[f64], pipe: &PipeGeometry) -> Vec<f64> {
    let bottom = tvd.last().copied().unwrap_or(0.0);
    tvd.iter()
        .map(|&x| pipe.weight_per_length * GRAVITY * (bottom - x))
        .collect()
}

/// Buoyancy from the pressures acting on the pipe ends at each depth
pub fn buoyancy(
    pipe: &PipeGeometry,
    external_pressure: &[f64],
    internal_pressure: &[f64],
) -> Result<Vec<f64>, ProfileError> {
    ensure_len(external_pressure.len(), internal_pressure)?;
    let (a_o, a_i) = (pipe.outer_area(), pipe.inner_area());

    Ok(external_pressure
        .iter()
        .zip(internal_pressure)
        .map(|(p_o, p_i)| a_o * p_o - a_i * p_i)
        .collect())
}

/// Shock load from a sudden stop while running (uniform along the string)
///
/// # Arguments
/// * `samples` - Number of depth samples
/// * `average_speed` - Average running speed (m/s)
/// * `speed_ratio` - Ratio of peak to average speed
pub fn shock_load(samples: usize, pipe: &PipeGeometry, average_speed: f64, speed_ratio: f64) -> Vec<f64> {
    let area = pipe.steel_area();
    let force = speed_ratio
        * average_speed
        * area
        * (pipe.youngs_modulus * pipe.pipe_density()).max(0.0).sqrt();
    vec![force; samples]
}

/// Force from the bending stress induced by dogleg severity.
///
/// `dls` is in degrees per `resolution` meters. The bending stress formula is the
/// usual oilfield one in psi and inches, so the geometry is converted first.
pub fn bending(dls: &[f64], resolution: f64, pipe: &PipeGeometry) -> Vec<f64> {
    if resolution <= 0.0 {
        return vec![0.0; dls.len()];
    }

    let e_psi = pa_to_psi(pipe.youngs_modulus);
    let od_in = m_to_inch(pipe.od);
    let area_in2 = pipe.steel_area() / in2_to_m2(1.0);

    dls.iter()
        .map(|&d| {
            // degrees per 100 ft
            let dls_100ft = d.abs() / resolution * 30.48;
            let stress_psi = std::f64::consts::PI * e_psi * dls_100ft * od_in / 432_000.0;
            lbf_to_n(stress_psi * area_in2)
        })
        .collect()
}

/// Axial force from pressure changes inside and outside the pipe after cementing.
///
/// `md` locates the samples relative to the top of cement; the pressure changes are
/// the operating profile minus the installation profile (Pa). Above the top of cement
/// the pipe is free to move and carries no ballooning load.
pub fn ballooning(
    md: &[f64],
    top_of_cement: f64,
    pipe: &PipeGeometry,
    internal_change: &[f64],
    external_change: &[f64],
) -> Result<Vec<f64>, ProfileError> {
    ensure_len(md.len(), internal_change)?;
    ensure_len(md.len(), external_change)?;
    let (a_o, a_i) = (pipe.outer_area(), pipe.inner_area());

    Ok(md
        .iter()
        .zip(internal_change.iter().zip(external_change))
        .map(|(&x, (dp_i, dp_o))| {
            if x >= top_of_cement {
                2.0 * pipe.poisson * (dp_i * a_i - dp_o * a_o)
            } else {
                0.0
            }
        })
        .collect())
}

/// Undisturbed formation temperature, linear between two reference points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureProfile {
    /// TVD of the upper reference point, usually the seabed (m)
    pub reference_tvd: f64,
    /// Temperature at the upper reference point (°C)
    pub reference_temperature: f64,
    /// TVD of the lower reference point (m)
    pub target_tvd: f64,
    /// Temperature at the lower reference point (°C)
    pub target_temperature: f64,
}

impl TemperatureProfile {
    /// Geothermal gradient (°C/m)
    pub fn gradient(&self) -> f64 {
        let span = self.target_tvd - self.reference_tvd;
        if span == 0.0 {
            return 0.0;
        }
        (self.target_temperature - self.reference_temperature) / span
    }

    /// Undisturbed temperature at a depth (°C)
    pub fn undisturbed(&self, tvd: f64) -> f64 {
        self.reference_temperature + self.gradient() * (tvd - self.reference_tvd)
    }

    /// Temperature while operating with the given wellhead temperature (°C)
    pub fn operating(&self, tvd: f64, wellhead_temperature: f64) -> f64 {
        wellhead_temperature + self.gradient() * (tvd - self.reference_tvd)
    }
}

/// Force from restrained thermal expansion; heating puts the pipe in compression
pub fn thermal(
    tvd: &[f64],
    pipe: &PipeGeometry,
    temperature: &TemperatureProfile,
    wellhead_temperature: f64,
) -> Vec<f64> {
    let stiffness = pipe.youngs_modulus * pipe.steel_area() * pipe.thermal_expansion;
    tvd.iter()
        .map(|&x| {
            let delta_t = temperature.operating(x, wellhead_temperature) - temperature.undisturbed(x);
            -stiffness * delta_t
        })
        .collect()
}

/// End load from a surface pressure test acting on a plug of the given diameter
pub fn pressure_test_load(samples: usize, test_pressure: f64, effective_diameter: f64) -> Vec<f64> {
    let force = test_pressure * std::f64::consts::PI / 4.0 * effective_diameter.powi(2);
    vec![force; samples]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::hydrostatic;
    use crate::types::conversion::{inch_to_m, n_to_lbf, psi_to_pa};
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
    fn test_air_weight() {
        let tvd = vec![0.0, 500.0, 1000.0];
        let w = air_weight(&tvd, &pipe());
        assert_relative_eq!(w[0], 64.0 * GRAVITY * 1000.0, epsilon = 1e-6);
        assert_relative_eq!(w[1], 64.0 * GRAVITY * 500.0, epsilon = 1e-6);
        assert_eq!(w[2], 0.0);
        assert!(air_weight(&[], &pipe()).is_empty());
    }

    #[test]
    fn test_buoyancy_same_fluid_both_sides() {
        let tvd = vec![0.0, 1000.0];
        let p = hydrostatic(&tvd, 1200.0);
        let b = buoyancy(&pipe(), &p, &p).unwrap();

        assert_eq!(b[0], 0.0);
        assert_relative_eq!(b[1], pipe().steel_area() * p[1], epsilon = 1e-6);
    }

    #[test]
    fn test_buoyancy_length_mismatch() {
        assert!(buoyancy(&pipe(), &[0.0, 1.0], &[0.0]).is_err());
    }

    #[test]
    fn test_shock_is_uniform() {
        let s = shock_load(4, &pipe(), 0.3, 1.5);
        assert!(s[0] > 0.0);
        assert!(s.iter().all(|&f| f == s[0]));
    }

    #[test]
    fn test_bending_in_field_units() {
        // 3°/30 m on an 8" pipe: 3°/100ft × 30.48/30
        let f = bending(&[0.0, 3.0], 30.0, &pipe());
        assert_eq!(f[0], 0.0);

        let dls_100ft = 3.0 / 30.0 * 30.48;
        let stress = std::f64::consts::PI * 29e6 * dls_100ft * 8.0 / 432_000.0;
        let area_in2 = std::f64::consts::PI / 4.0 * (8.0_f64.powi(2) - 7.2_f64.powi(2));
        assert_relative_eq!(n_to_lbf(f[1]), stress * area_in2, max_relative = 1e-6);
    }

    #[test]
    fn test_ballooning_only_below_cement() {
        let md = vec![0.0, 500.0, 1000.0];
        let dp_i = vec![1.0e6; 3];
        let dp_o = vec![0.0; 3];
        let f = ballooning(&md, 600.0, &pipe(), &dp_i, &dp_o).unwrap();

        assert_eq!(f[0], 0.0);
        assert_eq!(f[1], 0.0);
        assert_relative_eq!(f[2], 2.0 * 0.3 * 1.0e6 * pipe().inner_area(), epsilon = 1e-6);
    }

    #[test]
    fn test_thermal_heating_is_compressive() {
        let temperature = TemperatureProfile {
            reference_tvd: 500.0,
            reference_temperature: 4.0,
            target_tvd: 1500.0,
            target_temperature: 160.0,
        };
        assert_relative_eq!(temperature.gradient(), 0.156, epsilon = 1e-12);

        let f = thermal(&[500.0, 1000.0], &pipe(), &temperature, 60.0);
        assert!(f.iter().all(|&x| x < 0.0));
        assert_relative_eq!(f[0], f[1], epsilon = 1e-6);
    }

    #[test]
    fn test_pressure_test_load() {
        let f = pressure_test_load(2, 1.0e6, 0.2);
        assert_relative_eq!(f[0], 1.0e6 * std::f64::consts::PI * 0.01, epsilon = 1e-6);
    }
}
