//! Pressure behind the casing (Pa)

use serde::{Deserialize, Serialize};

use super::dropped_column;
use crate::physics::hydrostatics::{FluidColumn, hydrostatic, pressure_profile};
use crate::types::GRAVITY;

/// One fluid behind the casing all the way to surface
pub fn single_fluid(tvd: &[f64], density: f64) -> Vec<f64> {
    hydrostatic(tvd, density)
}

/// Stacked fluids behind the casing, e.g. mud over spacer over cement
pub fn fluid_column(tvd: &[f64], column: &FluidColumn) -> Vec<f64> {
    pressure_profile(tvd, column, 0.0)
}

/// Annulus mud dropped into a depleted zone
pub fn depleted_zone(tvd: &[f64], mud_density: f64, zone_tvd: f64, zone_pressure: f64) -> Vec<f64> {
    dropped_column(tvd, mud_density, zone_tvd, zone_pressure)
}

/// Formation charged by injection below an influenced zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InjectionZone {
    /// Perforations TVD (m)
    pub perforations_tvd: f64,
    /// Surface injection pressure (Pa)
    pub injection_pressure: f64,
    /// Injected fluid density (kg/m³)
    pub injection_density: f64,
    /// TVD below which the formation feels the injection (m)
    pub influenced_tvd: f64,
    /// Fluid left behind the casing above the influenced zone (kg/m³)
    pub fluid_density: f64,
    /// Friction loss while injecting (Pa)
    pub friction_loss: f64,
    /// Formation fluid density (kg/m³)
    pub formation_density: f64,
}

impl InjectionZone {
    /// Bottom-hole injection pressure at the perforations (Pa)
    pub fn perforations_pressure(&self) -> f64 {
        self.injection_pressure + self.injection_density * GRAVITY * self.perforations_tvd - self.friction_loss
    }

    pub fn profile(&self, tvd: &[f64]) -> Vec<f64> {
        let p_perf = self.perforations_pressure();
        tvd.iter()
            .map(|&x| {
                if x <= self.influenced_tvd {
                    self.fluid_density * GRAVITY * x
                } else {
                    p_perf - self.formation_density * GRAVITY * (self.perforations_tvd - x)
                }
            })
            .collect()
    }
}
