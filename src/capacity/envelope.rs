//! Rated and design strength envelope of a casing body and its connections
//!
//! Limits are signed: burst and tension positive, collapse and compression negative.
//! Curves are stored in field units, axial force in **lbf** and pressure in **psi**,
//! because the API rating equations are written in those units.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::collapse::collapse_pressure;
use super::von_mises::{TriaxialEllipse, interpolate};
use crate::types::*;

/// Points on the collapse-tension interaction curve
const INTERACTION_SAMPLES: usize = 20;

/// Burst rating keeps 87.5 % of the nominal wall (API wall tolerance)
const WALL_TOLERANCE: f64 = 0.875;

/// Factors the rated limits are divided by
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignFactors {
    pub tension: f64,
    pub compression: f64,
    pub burst: f64,
    pub collapse: f64,
    pub triaxial: f64,
}

impl Default for DesignFactors {
    fn default() -> Self {
        Self {
            tension: 1.3,
            compression: 1.3,
            burst: 1.1,
            collapse: 1.1,
            triaxial: 1.25,
        }
    }
}

impl DesignFactors {
    pub(crate) fn invalid(&self) -> Option<(&'static str, f64)> {
        [
            ("tension", self.tension),
            ("compression", self.compression),
            ("burst", self.burst),
            ("collapse", self.collapse),
            ("triaxial", self.triaxial),
        ]
        .into_iter()
        .find(|&(_, v)| v.is_nan() || v <= 0.0)
    }
}

/// Connection strength relative to the pipe body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionFactors {
    pub tension_efficiency: f64,
    pub compression_efficiency: f64,
    pub tension_design_factor: f64,
    pub compression_design_factor: f64,
}

impl Default for ConnectionFactors {
    fn default() -> Self {
        Self {
            tension_efficiency: 0.6,
            compression_efficiency: 0.6,
            tension_design_factor: 1.0,
            compression_design_factor: 1.0,
        }
    }
}

/// Four signed limits of a pipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// psi
    pub burst: f64,
    /// psi, negative
    pub collapse: f64,
    /// lbf
    pub tension: f64,
    /// lbf, negative
    pub compression: f64,
}

impl Limits {
    pub fn burst_pressure(&self) -> Pressure {
        Pressure::new::<psi>(self.burst)
    }

    pub fn collapse_pressure(&self) -> Pressure {
        Pressure::new::<psi>(self.collapse)
    }

    pub fn tension_force(&self) -> Force {
        Force::new::<pound_force>(self.tension)
    }

    pub fn compression_force(&self) -> Force {
        Force::new::<pound_force>(self.compression)
    }
}

/// What the envelope is built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeInputs {
    pub od_in: f64,
    pub id_in: f64,
    pub yield_psi: f64,
    pub design_factors: DesignFactors,
    pub connection: ConnectionFactors,
    /// Reduce collapse resistance under tension along the interaction curve
    pub axial_collapse_correction: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthEnvelope {
    pub rated: Limits,
    pub design: Limits,
    pub connection: Limits,
    /// Collapse-tension interaction, axial force (lbf) ascending from zero
    pub interaction_force: Vec<f64>,
    /// Design collapse along the interaction curve (psi, negative)
    pub interaction_collapse: Vec<f64>,
    /// API rectangle with the interaction curve on its collapse-tension corner
    pub api_polygon: Vec<(f64, f64)>,
    pub triaxial: TriaxialEllipse,
}

impl StrengthEnvelope {
    pub fn new(inputs: &EnvelopeInputs) -> Self {
        let EnvelopeInputs {
            od_in,
            id_in,
            yield_psi,
            design_factors: df,
            connection: conn,
            axial_collapse_correction,
        } = *inputs;

        let thickness = (od_in - id_in) / 2.0;
        let dt = od_in / thickness;
        let area = PI / 4.0 * (od_in.powi(2) - id_in.powi(2));

        let tension = yield_psi * area;
        let rated = Limits {
            burst: WALL_TOLERANCE * 2.0 * yield_psi * thickness / od_in,
            collapse: -collapse_pressure(dt, yield_psi, None),
            tension,
            compression: -tension,
        };

        let design = Limits {
            burst: rated.burst / df.burst,
            collapse: rated.collapse / df.collapse,
            tension: rated.tension / df.tension,
            compression: rated.compression / df.compression,
        };

        let connection = Limits {
            tension: (design.tension * conn.tension_efficiency / conn.tension_design_factor).min(design.tension),
            compression: (design.compression * conn.compression_efficiency / conn.compression_design_factor)
                .max(design.compression),
            ..design
        };

        let step = design.tension / (INTERACTION_SAMPLES - 1) as f64;
        let interaction_force: Vec<f64> = (0..INTERACTION_SAMPLES).map(|i| step * i as f64).collect();
        let interaction_collapse = interaction_force
            .iter()
            .map(|&f| {
                let stress = axial_collapse_correction.then_some(f / area);
                -collapse_pressure(dt, yield_psi, stress) / df.collapse
            })
            .collect::<Vec<_>>();

        let api_polygon = Self::polygon(&design, &interaction_force, &interaction_collapse);
        let triaxial = TriaxialEllipse::new(yield_psi, od_in, id_in, df.triaxial);

        Self {
            rated,
            design,
            connection,
            interaction_force,
            interaction_collapse,
            api_polygon,
            triaxial,
        }
    }

    fn polygon(design: &Limits, force: &[f64], collapse: &[f64]) -> Vec<(f64, f64)> {
        let tension_collapse = collapse.last().copied().unwrap_or(design.collapse);

        let mut points = vec![
            (design.compression, design.burst),
            (design.tension, design.burst),
            (design.tension, design.burst),
            (design.tension, tension_collapse),
        ];
        points.extend(force.iter().copied().zip(collapse.iter().copied()).rev());
        points.extend([
            (0.0, design.collapse),
            (design.compression, design.collapse),
            (design.compression, design.collapse),
            (design.compression, design.burst),
        ]);
        points
    }

    /// Design collapse at an axial force along the interaction curve (psi)
    pub fn interaction_collapse_at(&self, axial_force_lbf: f64) -> f64 {
        if axial_force_lbf <= 0.0 {
            return self.design.collapse;
        }
        interpolate(&self.interaction_force, &self.interaction_collapse, axial_force_lbf)
    }

    /// Collapse limit used by the safety factor check at an axial force (psi).
    ///
    /// In compression the flat design collapse applies; in tension the triaxial
    /// collapse branch does.
    pub fn collapse_limit_at(&self, axial_force_lbf: f64) -> f64 {
        if axial_force_lbf <= 0.0 {
            self.design.collapse
        } else {
            self.triaxial.collapse_at(axial_force_lbf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inputs() -> EnvelopeInputs {
        EnvelopeInputs {
            od_in: 8.0,
            id_in: 7.2,
            yield_psi: 80_000.0,
            design_factors: DesignFactors::default(),
            connection: ConnectionFactors::default(),
            axial_collapse_correction: true,
        }
    }

    #[test]
    fn test_rated_limits() {
        let env = StrengthEnvelope::new(&inputs());
        let area = PI / 4.0 * (64.0 - 51.84);

        assert_relative_eq!(env.rated.burst, 0.875 * 2.0 * 80_000.0 * 0.4 / 8.0, epsilon = 1e-9);
        assert_relative_eq!(env.rated.tension, 80_000.0 * area, epsilon = 1e-6);
        assert_relative_eq!(env.rated.compression, -env.rated.tension);
        assert_relative_eq!(env.rated.collapse, -collapse_pressure(20.0, 80_000.0, None), epsilon = 1e-9);
        assert!(env.rated.collapse < 0.0);
    }

    #[test]
    fn test_design_limits_divide_by_factors() {
        let env = StrengthEnvelope::new(&inputs());
        assert_relative_eq!(env.design.burst, env.rated.burst / 1.1);
        assert_relative_eq!(env.design.collapse, env.rated.collapse / 1.1);
        assert_relative_eq!(env.design.tension, env.rated.tension / 1.3);
        assert_relative_eq!(env.design.compression, env.rated.compression / 1.3);
    }

    #[test]
    fn test_connection_never_stronger_than_body() {
        let env = StrengthEnvelope::new(&inputs());
        assert_relative_eq!(env.connection.tension, env.design.tension * 0.6);
        assert_relative_eq!(env.connection.compression, env.design.compression * 0.6);

        let mut strong = inputs();
        strong.connection.tension_efficiency = 1.5;
        strong.connection.compression_efficiency = 1.5;
        let env = StrengthEnvelope::new(&strong);
        assert_relative_eq!(env.connection.tension, env.design.tension);
        assert_relative_eq!(env.connection.compression, env.design.compression);
    }

    #[test]
    fn test_interaction_curve_starts_at_flat_collapse() {
        let env = StrengthEnvelope::new(&inputs());
        assert_eq!(env.interaction_force.len(), INTERACTION_SAMPLES);
        assert_eq!(env.interaction_force[0], 0.0);
        assert_relative_eq!(env.interaction_collapse[0], env.design.collapse, max_relative = 1e-12);
        assert_relative_eq!(env.interaction_collapse_at(0.0), env.design.collapse);

        // Tension weakens collapse resistance
        let last = env.interaction_collapse[INTERACTION_SAMPLES - 1];
        assert!(last > env.design.collapse);
    }

    #[test]
    fn test_interaction_curve_flat_without_correction() {
        let mut flat = inputs();
        flat.axial_collapse_correction = false;
        let env = StrengthEnvelope::new(&flat);
        assert!(env.interaction_collapse.iter().all(|&p| p == env.design.collapse));
    }

    #[test]
    fn test_polygon_is_closed() {
        let env = StrengthEnvelope::new(&inputs());
        let first = env.api_polygon[0];
        let last = env.api_polygon[env.api_polygon.len() - 1];
        assert_eq!(first, last);
        assert_eq!(env.api_polygon.len(), 8 + INTERACTION_SAMPLES);
    }

    #[test]
    fn test_collapse_limit_switches_on_tension() {
        let env = StrengthEnvelope::new(&inputs());
        assert_eq!(env.collapse_limit_at(-1000.0), env.design.collapse);
        assert_relative_eq!(env.collapse_limit_at(100_000.0), env.triaxial.collapse_at(100_000.0));
    }

    #[test]
    fn test_design_factor_validation() {
        let mut df = DesignFactors::default();
        assert!(df.invalid().is_none());
        df.burst = 0.0;
        assert_eq!(df.invalid(), Some(("burst", 0.0)));
    }
}
