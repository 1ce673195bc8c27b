//! Hydrostatic pressure profiles for stacked fluid columns
//!
//! # Internal units
//!
//! Depths are TVD in **meters**, densities in **kg/m³**, pressures in **pascals**.
//! Public constructors accept UOM types and convert at the boundary.

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Fluids stacked in a wellbore or annulus, sorted downwards.
///
/// Density `i` applies from reference depth `i - 1` (or surface) down to reference
/// depth `i`. The last density extends to the bottom of whatever profile it is
/// evaluated against, so the density list may be one longer than the depth list.
/// When both lists have equal length the last reference depth is not a boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFluidColumn")]
pub struct FluidColumn {
    /// Reference TVD of each fluid change (meters)
    reference_depths: Vec<f64>,

    /// Fluid densities (kg/m³)
    densities: Vec<f64>,
}

/// Serialized form, checked by [`FluidColumn::from_raw`] before use
#[derive(Deserialize)]
struct RawFluidColumn {
    reference_depths: Vec<f64>,
    densities: Vec<f64>,
}

impl TryFrom<RawFluidColumn> for FluidColumn {
    type Error = FluidColumnError;

    fn try_from(raw: RawFluidColumn) -> Result<Self, Self::Error> {
        Self::from_raw(raw.reference_depths, raw.densities)
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FluidColumnError {
    #[error("Fluid column needs at least one density")]
    NoDensity,

    #[error("{depths} reference depths cannot describe {densities} fluids")]
    LengthMismatch { depths: usize, densities: usize },

    #[error("Reference depths must be sorted downwards (found {previous} m above {next} m)")]
    Unsorted { previous: f64, next: f64 },
}

impl FluidColumn {
    /// Create a column from reference depths and densities
    pub fn new(reference_depths: &[Depth], densities: &[Density]) -> Result<Self, FluidColumnError> {
        Self::from_raw(
            reference_depths.iter().map(|d| to_meters(*d)).collect(),
            densities.iter().map(|r| to_kg_per_m3(*r)).collect(),
        )
    }

    /// Create a column in field units: depths in meters, densities in sg
    pub fn from_sg(reference_depths_m: &[f64], densities_sg: &[f64]) -> Result<Self, FluidColumnError> {
        Self::from_raw(
            reference_depths_m.to_vec(),
            densities_sg.iter().map(|&sg| crate::types::conversion::sg_to_kg_per_m3(sg)).collect(),
        )
    }

    /// A single fluid filling the whole column
    pub fn single(density: Density) -> Self {
        Self {
            reference_depths: Vec::new(),
            densities: vec![to_kg_per_m3(density)],
        }
    }

    /// A single fluid given in sg
    pub fn single_sg(sg: f64) -> Self {
        Self::single(from_sg(sg))
    }

    fn from_raw(reference_depths: Vec<f64>, densities: Vec<f64>) -> Result<Self, FluidColumnError> {
        if densities.is_empty() {
            return Err(FluidColumnError::NoDensity);
        }

        let (d, r) = (reference_depths.len(), densities.len());
        if r != d && r != d + 1 {
            return Err(FluidColumnError::LengthMismatch { depths: d, densities: r });
        }

        if let Some(w) = reference_depths.windows(2).find(|w| w[1] < w[0]) {
            return Err(FluidColumnError::Unsorted { previous: w[0], next: w[1] });
        }

        Ok(Self { reference_depths, densities })
    }

    /// Depths where the active fluid changes (meters)
    fn boundaries(&self) -> &[f64] {
        if self.reference_depths.len() == self.densities.len() {
            &self.reference_depths[..self.reference_depths.len() - 1]
        } else {
            &self.reference_depths
        }
    }

    /// Densities in kg/m³, top fluid first
    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    /// Density of the top fluid in kg/m³
    pub fn top_density(&self) -> f64 {
        self.densities[0]
    }

    /// Number of fluids in the column
    pub fn len(&self) -> usize {
        self.densities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.densities.is_empty()
    }
}

/// Hydrostatic pressure of a single fluid at every depth (Pa)
pub fn hydrostatic(tvd: &[f64], density: f64) -> Vec<f64> {
    tvd.iter().map(|&x| GRAVITY * density * x).collect()
}

/// Build a continuous, piecewise-linear pressure profile (Pa) for a fluid column.
///
/// `surface_pressure` (Pa) is added at depth zero, e.g. a wellhead or test pressure.
/// The depth series is assumed to be sorted downwards.
pub fn pressure_profile(tvd: &[f64], column: &FluidColumn, surface_pressure: f64) -> Vec<f64> {
    let boundaries = column.boundaries();
    let densities = column.densities();

    let mut active = 0;
    let mut base_depth = 0.0;
    let mut base_pressure = surface_pressure;

    tvd.iter()
        .map(|&x| {
            // The boundary belongs to the segment ending there
            while active < boundaries.len() && x >= boundaries[active] {
                let boundary = boundaries[active];
                base_pressure += GRAVITY * densities[active] * (boundary - base_depth);
                base_depth = boundary;
                active += 1;
            }
            base_pressure + GRAVITY * densities[active] * (x - base_depth)
        })
        .collect()
}

/// Active fluid density (kg/m³) at every depth
pub fn density_profile(tvd: &[f64], column: &FluidColumn) -> Vec<f64> {
    let boundaries = column.boundaries();
    let densities = column.densities();
    let mut active = 0;

    tvd.iter()
        .map(|&x| {
            while active < boundaries.len() && x > boundaries[active] {
                active += 1;
            }
            densities[active]
        })
        .collect()
}
