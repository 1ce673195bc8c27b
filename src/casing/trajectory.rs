//! Depth series the load cases are evaluated on
//!
//! # Internal units
//!
//! MD and TVD in **meters**, inclination and azimuth in **degrees**, dogleg severity
//! in **degrees per `dls_resolution` meters**.

use nalgebra as na;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

use crate::types::*;

/// One sample of the well path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyStation {
    pub md: f64,
    pub tvd: f64,
    pub inclination: f64,
    pub azimuth: f64,
    pub dls: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    stations: Vec<SurveyStation>,
    dls_resolution: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum TrajectoryError {
    #[error("{field} has {found} samples, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Trajectory has no samples")]
    Empty,

    #[error("Invalid sampling step: {0} m")]
    InvalidStep(f64),

    #[error("Failed to read trajectory CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to open trajectory file: {0}")]
    Io(#[from] io::Error),
}

/// Row layout of a trajectory CSV; `dls` is optional
#[derive(Debug, Deserialize)]
struct CsvStation {
    md: f64,
    tvd: f64,
    inclination: f64,
    azimuth: f64,
    #[serde(default)]
    dls: Option<f64>,
}

/// Unit tangent of the well path for an inclination and azimuth in degrees
fn tangent(inclination: f64, azimuth: f64) -> na::Vector3<f64> {
    let (inc, azi) = (inclination.to_radians(), azimuth.to_radians());
    na::Vector3::new(inc.sin() * azi.cos(), inc.sin() * azi.sin(), inc.cos())
}

/// Minimum-curvature dogleg severity between two stations, in degrees per `resolution` m
pub fn dogleg_severity(
    from: (f64, f64),
    to: (f64, f64),
    course_length: f64,
    resolution: f64,
) -> f64 {
    if course_length <= 0.0 {
        return 0.0;
    }
    let cos_dogleg = tangent(from.0, from.1).dot(&tangent(to.0, to.1)).clamp(-1.0, 1.0);
    cos_dogleg.acos().to_degrees() / course_length * resolution
}

impl Trajectory {
    pub const DEFAULT_DLS_RESOLUTION: f64 = 30.0;

    /// Build from parallel arrays; every array must have the length of `md`
    pub fn new(
        md: &[f64],
        tvd: &[f64],
        inclination: &[f64],
        azimuth: &[f64],
        dls: &[f64],
    ) -> Result<Self, TrajectoryError> {
        let n = md.len();
        for (field, values) in [
            ("tvd", tvd),
            ("inclination", inclination),
            ("azimuth", azimuth),
            ("dls", dls),
        ] {
            if values.len() != n {
                return Err(TrajectoryError::LengthMismatch {
                    field,
                    expected: n,
                    found: values.len(),
                });
            }
        }

        let stations = (0..n)
            .map(|i| SurveyStation {
                md: md[i],
                tvd: tvd[i],
                inclination: inclination[i],
                azimuth: azimuth[i],
                dls: dls[i],
            })
            .collect();

        Ok(Self {
            stations,
            dls_resolution: Self::DEFAULT_DLS_RESOLUTION,
        })
    }

    /// Build from survey arrays, deriving dogleg severity by minimum curvature
    pub fn from_survey(
        md: &[f64],
        tvd: &[f64],
        inclination: &[f64],
        azimuth: &[f64],
    ) -> Result<Self, TrajectoryError> {
        let zeros = vec![0.0; md.len()];
        let mut trajectory = Self::new(md, tvd, inclination, azimuth, &zeros)?;
        trajectory.compute_dls();
        Ok(trajectory)
    }

    /// Vertical well sampled every `step` down to `bottom`
    pub fn vertical(bottom: Depth, step: Depth) -> Result<Self, TrajectoryError> {
        let (bottom, step) = (to_meters(bottom), to_meters(step));
        if step.is_nan() || step <= 0.0 {
            return Err(TrajectoryError::InvalidStep(step));
        }

        let mut md: Vec<f64> = (0_u64..)
            .map(|i| i as f64 * step)
            .take_while(|&x| x < bottom)
            .collect();
        md.push(bottom.max(0.0));

        let zeros = vec![0.0; md.len()];
        Self::new(&md, &md, &zeros, &zeros, &zeros)
    }

    /// Read `md,tvd,inclination,azimuth[,dls]` rows with a header line
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self, TrajectoryError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let rows = csv_reader
            .deserialize::<CsvStation>()
            .collect::<Result<Vec<_>, _>>()?;
        if rows.is_empty() {
            return Err(TrajectoryError::Empty);
        }

        let has_dls = rows.iter().all(|r| r.dls.is_some());
        let stations = rows
            .iter()
            .map(|r| SurveyStation {
                md: r.md,
                tvd: r.tvd,
                inclination: r.inclination,
                azimuth: r.azimuth,
                dls: r.dls.unwrap_or(0.0),
            })
            .collect();

        let mut trajectory = Self {
            stations,
            dls_resolution: Self::DEFAULT_DLS_RESOLUTION,
        };
        if !has_dls {
            tracing::debug!(stations = rows.len(), "DLS column missing, using minimum curvature");
            trajectory.compute_dls();
        }
        Ok(trajectory)
    }

    pub fn from_csv_file(path: impl AsRef<Path>) -> Result<Self, TrajectoryError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    /// Change the length over which DLS is expressed, keeping the curvature
    pub fn with_dls_resolution(mut self, resolution: Depth) -> Self {
        let resolution = to_meters(resolution);
        if resolution > 0.0 {
            let scale = resolution / self.dls_resolution;
            self.stations.iter_mut().for_each(|s| s.dls *= scale);
            self.dls_resolution = resolution;
        }
        self
    }

    fn compute_dls(&mut self) {
        let resolution = self.dls_resolution;
        for i in 1..self.stations.len() {
            let (a, b) = (self.stations[i - 1], self.stations[i]);
            self.stations[i].dls = dogleg_severity(
                (a.inclination, a.azimuth),
                (b.inclination, b.azimuth),
                b.md - a.md,
                resolution,
            );
        }
    }

    /// Samples between `top` and `shoe` MD, both inclusive
    pub(crate) fn truncated(&self, top: f64, shoe: f64) -> Self {
        Self {
            stations: self
                .stations
                .iter()
                .copied()
                .filter(|s| s.md <= shoe && s.md >= top)
                .collect(),
            dls_resolution: self.dls_resolution,
        }
    }

    pub fn stations(&self) -> &[SurveyStation] {
        &self.stations
    }

    pub fn dls_resolution(&self) -> f64 {
        self.dls_resolution
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn md(&self) -> Vec<f64> {
        self.stations.iter().map(|s| s.md).collect()
    }

    pub fn tvd(&self) -> Vec<f64> {
        self.stations.iter().map(|s| s.tvd).collect()
    }

    pub fn inclination(&self) -> Vec<f64> {
        self.stations.iter().map(|s| s.inclination).collect()
    }

    pub fn azimuth(&self) -> Vec<f64> {
        self.stations.iter().map(|s| s.azimuth).collect()
    }

    pub fn dls(&self) -> Vec<f64> {
        self.stations.iter().map(|s| s.dls).collect()
    }

    /// Deepest sample, if any
    pub fn bottom(&self) -> Option<&SurveyStation> {
        self.stations.last()
    }
}
