//! Internal and external pressure scenarios
//!
//! Pressures are in **pascals**, depths are TVD in **meters**, densities in **kg/m³**.
//! A load case picks one internal and one external profile and takes
//! [`differential`] = internal − external; positive values burst the pipe,
//! negative values collapse it.

pub mod external;
pub mod internal;

use super::{ProfileError, ensure_len};
use crate::types::GRAVITY;

/// Internal minus external pressure at every depth
pub fn differential(internal: &[f64], external: &[f64]) -> Result<Vec<f64>, ProfileError> {
    ensure_len(internal.len(), external)?;
    Ok(internal.iter().zip(external).map(|(i, o)| i - o).collect())
}

/// TVD of the fluid level left when a column drops until it balances a zone pressure
pub fn fluid_level(density: f64, zone_tvd: f64, zone_pressure: f64) -> f64 {
    if density <= 0.0 {
        return zone_tvd;
    }
    zone_tvd - zone_pressure / (GRAVITY * density)
}

/// Column with nothing above its fluid level and a hydrostatic gradient below it
pub(crate) fn dropped_column(tvd: &[f64], density: f64, zone_tvd: f64, zone_pressure: f64) -> Vec<f64> {
    let level = fluid_level(density, zone_tvd, zone_pressure);
    tvd.iter()
        .map(|&x| {
            if x <= level {
                0.0
            } else {
                GRAVITY * density * (x - level)
            }
        })
        .collect()
}
