//! Pressure inside the casing for each operational scenario (Pa)

use serde::{Deserialize, Serialize};

use super::dropped_column;
use crate::physics::hydrostatics::{FluidColumn, hydrostatic, pressure_profile};
use crate::types::GRAVITY;

/// Surface test pressure applied on top of a fluid column
pub fn test_pressure(tvd: &[f64], surface_pressure: f64, column: &FluidColumn) -> Vec<f64> {
    pressure_profile(tvd, column, surface_pressure)
}

/// Casing full of a single fluid, open at surface
pub fn fluid_filled(tvd: &[f64], density: f64) -> Vec<f64> {
    hydrostatic(tvd, density)
}

/// Casing emptied to atmospheric pressure
pub fn full_evacuation(tvd: &[f64]) -> Vec<f64> {
    vec![0.0; tvd.len()]
}

/// Fluid column dropped until it balances a depleted zone pressure
pub fn partial_evacuation(tvd: &[f64], density: f64, zone_tvd: f64, zone_pressure: f64) -> Vec<f64> {
    dropped_column(tvd, density, zone_tvd, zone_pressure)
}

/// A fraction of the next section's bottom-hole pressure held at the wellhead.
///
/// The bottom-hole pressure is the mud hydrostatic at `next_section_tvd`; the result
/// is uniform along the string.
pub fn bhp_fraction_at_wellhead(samples: usize, mud_density: f64, next_section_tvd: f64, fraction: f64) -> Vec<f64> {
    let bhp = GRAVITY * mud_density * next_section_tvd;
    vec![fraction * bhp; samples]
}

/// Fracture pressure at the shoe with a fluid gradient above it: gas for an influx,
/// the stored fluid for injection into storage.
///
/// `fracture_gradient` is in Pa/m; the shoe is the deepest sample.
pub fn fracture_at_shoe(tvd: &[f64], fracture_gradient: f64, fluid_density: f64) -> Vec<f64> {
    let shoe = tvd.last().copied().unwrap_or(0.0);
    let p_frac = fracture_gradient * shoe;
    tvd.iter()
        .map(|&x| p_frac - GRAVITY * fluid_density * (shoe - x))
        .collect()
}

/// Casing fully displaced to gas from a reservoir
pub fn displacement_to_gas(tvd: &[f64], reservoir_pressure: f64, gas_density: f64, reservoir_tvd: f64) -> Vec<f64> {
    tvd.iter()
        .map(|&x| reservoir_pressure - GRAVITY * gas_density * (reservoir_tvd - x))
        .collect()
}

/// Inputs for a gas kick circulated out with the driller's method
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasKick {
    /// Mud density (kg/m³)
    pub mud_density: f64,
    /// Kick gas density at bottom-hole conditions (kg/m³)
    pub gas_density: f64,
    /// Reservoir pressure (Pa)
    pub reservoir_pressure: f64,
    /// Reservoir TVD (m)
    pub reservoir_tvd: f64,
    /// Influx volume when the well is shut in (m³)
    pub kick_volume: f64,
    /// Casing inner diameter (m)
    pub casing_id: f64,
    /// Drill pipe outer diameter (m)
    pub drill_pipe_od: f64,
}

/// Internal pressure while circulating a kick, plus the governing kick geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasKickProfile {
    /// Internal pressure at every depth (Pa)
    pub pressure: Vec<f64>,
    /// TVD of the top of the kick when the wellhead pressure peaks (m)
    pub top_of_kick_tvd: f64,
    /// Governing wellhead pressure (Pa)
    pub wellhead_pressure: f64,
    /// Bottom-hole pressure (Pa)
    pub bottom_hole_pressure: f64,
}

impl GasKick {
    /// Bottom-hole pressure: mud hydrostatic plus kick intensity, never below either
    pub fn bottom_hole_pressure(&self) -> f64 {
        let mud = GRAVITY * self.mud_density * self.reservoir_tvd;
        mud.max(self.reservoir_pressure)
    }

    fn annular_area(&self) -> f64 {
        std::f64::consts::PI / 4.0 * (self.casing_id.powi(2) - self.drill_pipe_od.powi(2))
    }

    /// Wellhead pressure and top of kick with the kick base at `base_tvd`
    fn wellhead_pressure_at(&self, base_tvd: f64, bhp: f64, area: f64) -> Option<(f64, f64)> {
        let p_base = bhp - GRAVITY * self.mud_density * (self.reservoir_tvd - base_tvd);
        if p_base <= 0.0 {
            return None;
        }

        let volume = self.kick_volume * bhp / p_base;
        let height = if area > 0.0 { volume / area } else { f64::INFINITY };
        let height = height.min(base_tvd);
        let top = base_tvd - height;
        let kick_density = self.gas_density * self.kick_volume / volume;

        let whp = p_base - GRAVITY * kick_density * height - GRAVITY * self.mud_density * top;
        Some((whp, top))
    }

    /// Walk the kick base from surface to the reservoir and keep the worst wellhead pressure
    pub fn profile(&self, tvd: &[f64]) -> GasKickProfile {
        let bhp = self.bottom_hole_pressure();
        let area = self.annular_area();

        let mut governing: Option<(f64, f64)> = None;
        let bases = tvd
            .iter()
            .copied()
            .filter(|&x| x <= self.reservoir_tvd)
            .chain(std::iter::once(self.reservoir_tvd));

        for base in bases {
            if let Some((whp, top)) = self.wellhead_pressure_at(base, bhp, area) {
                if governing.is_none_or(|(best, _)| whp > best) {
                    governing = Some((whp, top));
                }
            }
        }

        let (whp, top) = governing.unwrap_or((bhp, self.reservoir_tvd));
        let pressure = if self.reservoir_tvd > 0.0 {
            let slope = (bhp - whp) / self.reservoir_tvd;
            tvd.iter().map(|&x| whp + slope * x).collect()
        } else {
            vec![bhp; tvd.len()]
        };

        GasKickProfile {
            pressure,
            top_of_kick_tvd: top,
            wellhead_pressure: whp,
            bottom_hole_pressure: bhp,
        }
    }
}

/// Production annulus pressured up by a tubing leak near the wellhead
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TubingLeak {
    /// Reservoir pressure (Pa)
    pub reservoir_pressure: f64,
    /// Produced fluid density (kg/m³)
    pub production_density: f64,
    /// Perforations TVD (m)
    pub perforations_tvd: f64,
    /// Packer fluid density (kg/m³)
    pub packer_fluid_density: f64,
    /// Packer TVD (m)
    pub packer_tvd: f64,
    /// Mud density below the perforations (kg/m³)
    pub mud_density: f64,
}

impl TubingLeak {
    /// Shut-in tubing pressure transmitted to the annulus at surface (Pa)
    pub fn wellhead_pressure(&self) -> f64 {
        self.reservoir_pressure - GRAVITY * self.production_density * self.perforations_tvd
    }

    /// Packer fluid above the packer, produced fluid down to the perforations, mud below
    pub fn profile(&self, tvd: &[f64]) -> Vec<f64> {
        let whp = self.wellhead_pressure();
        tvd.iter()
            .map(|&x| {
                if x <= self.packer_tvd {
                    whp + GRAVITY * self.packer_fluid_density * x
                } else if x <= self.perforations_tvd {
                    self.reservoir_pressure - GRAVITY * self.production_density * (self.perforations_tvd - x)
                } else {
                    self.reservoir_pressure + GRAVITY * self.mud_density * (x - self.perforations_tvd)
                }
            })
            .collect()
    }
}

/// Tubing leak while stimulating: injection pressure on top of packer fluid above the
/// packer and injection fluid below it
pub fn stimulation_tubing_leak(
    tvd: &[f64],
    wellhead_pressure: f64,
    packer_fluid_density: f64,
    injection_density: f64,
    packer_tvd: f64,
) -> Vec<f64> {
    tvd.iter()
        .map(|&x| {
            let density = if x <= packer_tvd {
                packer_fluid_density
            } else {
                injection_density
            };
            wellhead_pressure + GRAVITY * density * x
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::conversion::{inch_to_m, psi_to_pa};
    use approx::assert_relative_eq;

    fn depths(bottom: f64, step: f64) -> Vec<f64> {
        let n = (bottom / step).round() as usize;
        (0..=n).map(|i| i as f64 * step).collect()
    }

    #[test]
    fn test_pressure_test_profile() {
        let tvd = depths(1500.0, 10.0);
        let p_test = psi_to_pa(3000.0);
        let p = test_pressure(&tvd, p_test, &FluidColumn::single_sg(1.3));

        assert_relative_eq!(p[0], p_test, epsilon = 1e-6);
        assert_relative_eq!(p[150], p_test + GRAVITY * 1300.0 * 1500.0, epsilon = 1e-3);
    }

    #[test]
    fn test_fracture_at_shoe() {
        let tvd = vec![0.0, 1000.0, 2000.0];
        let gradient = 18_000.0; // Pa/m
        let p = fracture_at_shoe(&tvd, gradient, 300.0);

        assert_relative_eq!(p[2], gradient * 2000.0);
        assert_relative_eq!(p[0], gradient * 2000.0 - GRAVITY * 300.0 * 2000.0);
    }

    #[test]
    fn test_displacement_to_gas() {
        let p = displacement_to_gas(&[0.0, 2000.0], 30.0e6, 200.0, 2000.0);
        assert_relative_eq!(p[1], 30.0e6);
        assert_relative_eq!(p[0], 30.0e6 - GRAVITY * 200.0 * 2000.0);
    }

    #[test]
    fn test_bhp_fraction_is_uniform() {
        let p = bhp_fraction_at_wellhead(3, 1400.0, 2500.0, 0.5);
        assert_relative_eq!(p[0], 0.5 * GRAVITY * 1400.0 * 2500.0);
        assert!(p.iter().all(|&x| x == p[0]));
    }

    fn kick() -> GasKick {
        GasKick {
            mud_density: 1200.0,
            gas_density: 500.0,
            reservoir_pressure: psi_to_pa(4200.0),
            reservoir_tvd: 2000.0,
            kick_volume: 20.0,
            casing_id: inch_to_m(7.2),
            drill_pipe_od: inch_to_m(5.0),
        }
    }

    #[test]
    fn test_gas_kick_geometry() {
        let tvd = depths(1500.0, 10.0);
        let result = kick().profile(&tvd);

        assert!(result.top_of_kick_tvd < 2000.0);
        assert!(result.top_of_kick_tvd >= 0.0);
        assert!(result.wellhead_pressure < result.bottom_hole_pressure);
        assert_relative_eq!(result.bottom_hole_pressure, psi_to_pa(4200.0), epsilon = 1e-6);

        // Linear from the wellhead pressure to BHP at the reservoir
        assert_relative_eq!(result.pressure[0], result.wellhead_pressure, epsilon = 1e-6);
        let slope = (result.bottom_hole_pressure - result.wellhead_pressure) / 2000.0;
        assert_relative_eq!(result.pressure[150], result.wellhead_pressure + slope * 1500.0, epsilon = 1e-3);
    }

    #[test]
    fn test_gas_kick_bhp_not_below_mud() {
        let mut heavy = kick();
        heavy.mud_density = 1700.0;
        let mud = GRAVITY * 1700.0 * 2000.0;
        assert_relative_eq!(heavy.bottom_hole_pressure(), mud);
    }

    #[test]
    fn test_tubing_leak_segments() {
        let leak = TubingLeak {
            reservoir_pressure: 30.0e6,
            production_density: 800.0,
            perforations_tvd: 1800.0,
            packer_fluid_density: 1300.0,
            packer_tvd: 1500.0,
            mud_density: 1400.0,
        };
        let p = leak.profile(&[0.0, 1500.0, 1800.0, 2000.0]);
        let whp = 30.0e6 - GRAVITY * 800.0 * 1800.0;

        assert_relative_eq!(p[0], whp);
        assert_relative_eq!(p[1], whp + GRAVITY * 1300.0 * 1500.0);
        assert_relative_eq!(p[2], 30.0e6);
        assert_relative_eq!(p[3], 30.0e6 + GRAVITY * 1400.0 * 200.0);
    }

    #[test]
    fn test_stimulation_leak() {
        let p = stimulation_tubing_leak(&[0.0, 500.0, 1000.0], 1.0e6, 1300.0, 1100.0, 500.0);
        assert_relative_eq!(p[1], 1.0e6 + GRAVITY * 1300.0 * 500.0);
        assert_relative_eq!(p[2], 1.0e6 + GRAVITY * 1100.0 * 1000.0);
    }

    #[test]
    fn test_partial_evacuation_and_empty() {
        assert!(full_evacuation(&[0.0, 1.0]).iter().all(|&p| p == 0.0));

        let p = partial_evacuation(&[0.0, 1500.0, 2000.0], 1000.0, 2000.0, GRAVITY * 1000.0 * 500.0);
        assert_eq!(p[0], 0.0);
        assert_eq!(p[1], 0.0);
        assert_relative_eq!(p[2], GRAVITY * 1000.0 * 500.0, epsilon = 1e-6);
    }
}
