//! API collapse rating
//!
//! The API regime equations are empirical and only hold in **psi**: yield strength,
//! axial stress and the returned collapse pressure are all in psi here.

use serde::{Deserialize, Serialize};

/// Constant of the elastic collapse equation (psi)
const ELASTIC_CONSTANT: f64 = 46.95e6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollapseRegime {
    Yield,
    Plastic,
    Transition,
    Elastic,
}

/// Empirical coefficients of the collapse equations for one yield strength
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollapseCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub f: f64,
    pub g: f64,
}

/// D/t ratios where the governing regime changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeLimits {
    pub yield_plastic: f64,
    pub plastic_transition: f64,
    pub transition_elastic: f64,
}

impl CollapseCoefficients {
    pub fn for_yield(yield_psi: f64) -> Self {
        let y = yield_psi;
        let a = 2.8762 + 0.10679e-5 * y + 0.21301e-10 * y.powi(2) - 0.53132e-16 * y.powi(3);
        let b = 0.026233 + 0.50609e-6 * y;
        let c = -465.93 + 0.030867 * y - 0.10483e-7 * y.powi(2) + 0.36989e-13 * y.powi(3);

        let ba = b / a;
        let r = (3.0 * ba) / (2.0 + ba);
        let f = ELASTIC_CONSTANT * r.powi(3) / (y * (r - ba) * (1.0 - r).powi(2));
        let g = f * ba;

        Self { a, b, c, f, g }
    }

    pub fn regime_limits(&self, yield_psi: f64) -> RegimeLimits {
        let Self { a, b, c, f, g } = *self;
        let y = yield_psi;
        let bc = b + c / y;

        RegimeLimits {
            yield_plastic: (((a - 2.0).powi(2) + 8.0 * bc).sqrt() + (a - 2.0)) / (2.0 * bc),
            plastic_transition: y * (a - f) / (c + y * (b - g)),
            transition_elastic: (2.0 + b / a) / (3.0 * b / a),
        }
    }
}

/// Yield strength reduced by axial stress (tension positive)
pub fn axial_corrected_yield(yield_psi: f64, axial_stress_psi: f64) -> f64 {
    if yield_psi <= 0.0 {
        return 0.0;
    }
    let ratio = axial_stress_psi / yield_psi;
    let root = 1.0 - 0.75 * ratio.powi(2);
    if root < 0.0 {
        return 0.0;
    }
    (root.sqrt() - 0.5 * ratio) * yield_psi
}

/// Regime governing a pipe with wall ratio `dt` and (possibly corrected) yield
pub fn collapse_regime(dt: f64, yield_psi: f64) -> CollapseRegime {
    let limits = CollapseCoefficients::for_yield(yield_psi).regime_limits(yield_psi);

    // A negative or undefined yield/plastic limit means the plastic range vanished
    if limits.yield_plastic.is_nan() || limits.yield_plastic < 0.0 || dt <= limits.yield_plastic {
        CollapseRegime::Yield
    } else if dt <= limits.plastic_transition {
        CollapseRegime::Plastic
    } else if dt <= limits.transition_elastic {
        CollapseRegime::Transition
    } else {
        CollapseRegime::Elastic
    }
}

/// Collapse pressure of one regime equation
pub fn regime_pressure(regime: CollapseRegime, dt: f64, yield_psi: f64, k: &CollapseCoefficients) -> f64 {
    match regime {
        CollapseRegime::Yield => 2.0 * yield_psi * (dt - 1.0) / dt.powi(2),
        CollapseRegime::Plastic => yield_psi * (k.a / dt - k.b) - k.c,
        CollapseRegime::Transition => yield_psi * (k.f / dt - k.g),
        CollapseRegime::Elastic => ELASTIC_CONSTANT / (dt * (dt - 1.0).powi(2)),
    }
}

/// Collapse rating (psi) with its governing regime.
///
/// Degenerate inputs rate zero: no yield, a corrected yield driven to zero, or a
/// wall ratio that is not a finite number above one.
pub fn collapse_rating(dt: f64, yield_psi: f64, axial_stress_psi: Option<f64>) -> (f64, Option<CollapseRegime>) {
    let y = match axial_stress_psi {
        Some(stress) => axial_corrected_yield(yield_psi, stress),
        None => yield_psi,
    };

    if y <= 0.0 || !dt.is_finite() || dt <= 1.0 {
        return (0.0, None);
    }

    let regime = collapse_regime(dt, y);
    let coefficients = CollapseCoefficients::for_yield(y);
    let pressure = regime_pressure(regime, dt, y, &coefficients).max(0.0);
    (pressure, Some(regime))
}

/// Collapse pressure (psi), optionally corrected for axial stress (psi, tension positive)
pub fn collapse_pressure(dt: f64, yield_psi: f64, axial_stress_psi: Option<f64>) -> f64 {
    collapse_rating(dt, yield_psi, axial_stress_psi).0
}
