//! Triaxial (von Mises) design ellipse
//!
//! Axial forces in **lbf**, differential pressures in **psi**.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Samples on each side of zero axial stress
const SAMPLES_PER_SIDE: usize = 300;

/// Closed von Mises envelope in axial force / differential pressure space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriaxialEllipse {
    /// Axial force, ascending (lbf)
    pub axial_force: Vec<f64>,
    /// Upper (burst) branch (psi)
    pub burst: Vec<f64>,
    /// Lower (collapse) branch (psi)
    pub collapse: Vec<f64>,
    pub design_factor: f64,
}

/// Evenly spaced values from `start` to `end`, both included
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Linear interpolation on an ascending grid, clamped at both ends
pub(crate) fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let (Some(&first), Some(&last)) = (xs.first(), xs.last()) else {
        return 0.0;
    };
    if x <= first {
        return ys[0];
    }
    if x >= last {
        return ys[ys.len() - 1];
    }

    let i = xs.partition_point(|&v| v <= x);
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    if x1 == x0 {
        return y0;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

impl TriaxialEllipse {
    /// # Arguments
    /// * `yield_psi` - Minimum yield strength (psi)
    /// * `od_in`, `id_in` - Pipe diameters (in)
    /// * `design_factor` - Triaxial design factor the yield is divided by
    pub fn new(yield_psi: f64, od_in: f64, id_in: f64, design_factor: f64) -> Self {
        let y = yield_psi / design_factor;
        let span = 2.0 / 3f64.sqrt() * y;

        let outer = PI / 4.0 * od_in.powi(2);
        let inner = PI / 4.0 * id_in.powi(2);
        let steel = outer - inner;
        let k = (outer + inner) / steel;

        let mut stress = linspace(-span, 0.0, SAMPLES_PER_SIDE);
        stress.pop();
        stress.extend(linspace(0.0, span, SAMPLES_PER_SIDE));

        let root = |s: f64| (4.0 * y.powi(2) - 3.0 * s.powi(2)).max(0.0).sqrt();

        Self {
            axial_force: stress.iter().map(|s| s * steel).collect(),
            burst: stress.iter().map(|&s| 0.5 * (s + root(s)) / k).collect(),
            collapse: stress.iter().map(|&s| 0.5 * (s - root(s)) / k).collect(),
            design_factor,
        }
    }

    /// Burst branch at an axial force (psi)
    pub fn burst_at(&self, axial_force_lbf: f64) -> f64 {
        interpolate(&self.axial_force, &self.burst, axial_force_lbf)
    }

    /// Collapse branch at an axial force (psi, negative)
    pub fn collapse_at(&self, axial_force_lbf: f64) -> f64 {
        interpolate(&self.axial_force, &self.collapse, axial_force_lbf)
    }

    /// Closed polyline: burst branch left to right, collapse branch right to left
    pub fn outline(&self) -> Vec<(f64, f64)> {
        let upper = self.axial_force.iter().copied().zip(self.burst.iter().copied());
        let lower = self
            .axial_force
            .iter()
            .copied()
            .zip(self.collapse.iter().copied())
            .rev();
        upper.chain(lower).collect()
    }

    pub fn len(&self) -> usize {
        self.axial_force.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axial_force.is_empty()
    }
}
