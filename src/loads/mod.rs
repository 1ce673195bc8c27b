//! Load case catalog
//!
//! Each [`LoadCase`] is a fixed recipe that combines axial force contributors and one
//! internal/external pressure pair from [`crate::physics`], parameterized by
//! [`LoadSettings`]. Results are stored as `uom` quantities and read back in lbf and
//! psi by the safety factor check.

pub mod cases;
pub mod export;
pub mod settings;
pub mod validation;

pub use cases::*;
pub use export::*;
pub use settings::*;
pub use validation::*;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::physics::{FluidColumnError, ProfileError};
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadCase {
    Running,
    Overpull,
    GreenCementPressureTest,
    Cementing,
    DisplacementToGas,
    GasKick,
    MudDrop,
    Production,
    ProductionDepletedZone,
    ProductionWithoutPacker,
    Injection,
    FullEvacuation,
    PressureTest,
    DrillingInfluxFracture,
    DrillingInfluxBhpFraction,
    DrillingLosses,
    DrillStemTest,
    InjectionEvacuation,
    FluidStorage,
    FluidStorageDepletedZone,
}

impl LoadCase {
    /// Catalog order; also the order `run_loads` evaluates in
    pub const ALL: [LoadCase; 20] = [
        LoadCase::Running,
        LoadCase::Overpull,
        LoadCase::GreenCementPressureTest,
        LoadCase::Cementing,
        LoadCase::DisplacementToGas,
        LoadCase::GasKick,
        LoadCase::MudDrop,
        LoadCase::Production,
        LoadCase::ProductionDepletedZone,
        LoadCase::ProductionWithoutPacker,
        LoadCase::Injection,
        LoadCase::FullEvacuation,
        LoadCase::PressureTest,
        LoadCase::DrillingInfluxFracture,
        LoadCase::DrillingInfluxBhpFraction,
        LoadCase::DrillingLosses,
        LoadCase::DrillStemTest,
        LoadCase::InjectionEvacuation,
        LoadCase::FluidStorage,
        LoadCase::FluidStorageDepletedZone,
    ];

    pub fn description(self) -> &'static str {
        match self {
            LoadCase::Running => "Running",
            LoadCase::Overpull => "Overpull",
            LoadCase::GreenCementPressureTest => "Green Cement Pressure Test",
            LoadCase::Cementing => "Cementing",
            LoadCase::DisplacementToGas => "Displacement to Gas",
            LoadCase::GasKick => "Gas Kick",
            LoadCase::MudDrop => "Mud Drop",
            LoadCase::Production => "Production",
            LoadCase::ProductionDepletedZone => "Production with Depleted Zone",
            LoadCase::ProductionWithoutPacker => "Production without Packer",
            LoadCase::Injection => "Injection",
            LoadCase::FullEvacuation => "Full Evacuation",
            LoadCase::PressureTest => "Pressure Test",
            LoadCase::DrillingInfluxFracture => "Drilling Influx (Fracture at Shoe)",
            LoadCase::DrillingInfluxBhpFraction => "Drilling Influx (BHP Fraction)",
            LoadCase::DrillingLosses => "Drilling Losses",
            LoadCase::DrillStemTest => "Drill Stem Test",
            LoadCase::InjectionEvacuation => "Injection Evacuation",
            LoadCase::FluidStorage => "Fluid Storage",
            LoadCase::FluidStorageDepletedZone => "Fluid Storage with Depleted Zone",
        }
    }
}

impl fmt::Display for LoadCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Axial force and differential pressure of one load case, one value per depth sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLoadCaseResult")]
pub struct LoadCaseResult {
    pub description: String,
    /// Catalog case that produced the result; `None` for user-supplied loads
    pub case: Option<LoadCase>,
    axial_force: Vec<Force>,
    pressure_differential: Vec<Pressure>,
}

#[derive(Deserialize)]
struct RawLoadCaseResult {
    description: String,
    #[serde(default)]
    case: Option<LoadCase>,
    axial_force: Vec<Force>,
    pressure_differential: Vec<Pressure>,
}

impl TryFrom<RawLoadCaseResult> for LoadCaseResult {
    type Error = ProfileError;

    fn try_from(raw: RawLoadCaseResult) -> Result<Self, Self::Error> {
        let mut result = Self::new(raw.description, raw.axial_force, raw.pressure_differential)?;
        result.case = raw.case;
        Ok(result)
    }
}

impl LoadCaseResult {
    /// A user-supplied load. Both profiles must have the same length.
    pub fn new(
        description: impl Into<String>,
        axial_force: Vec<Force>,
        pressure_differential: Vec<Pressure>,
    ) -> Result<Self, ProfileError> {
        if axial_force.len() != pressure_differential.len() {
            return Err(ProfileError::LengthMismatch {
                expected: axial_force.len(),
                found: pressure_differential.len(),
            });
        }
        Ok(Self {
            description: description.into(),
            case: None,
            axial_force,
            pressure_differential,
        })
    }

    /// Wrap SI profiles (N, Pa) produced by a catalog recipe
    pub fn from_si(case: LoadCase, axial_force_n: &[f64], pressure_pa: &[f64]) -> Result<Self, ProfileError> {
        let mut result = Self::new(
            case.description(),
            axial_force_n.iter().map(|&f| Force::new::<newton>(f)).collect(),
            pressure_pa.iter().map(|&p| Pressure::new::<pascal>(p)).collect(),
        )?;
        result.case = Some(case);
        Ok(result)
    }

    pub fn axial_force(&self) -> &[Force] {
        &self.axial_force
    }

    pub fn pressure_differential(&self) -> &[Pressure] {
        &self.pressure_differential
    }

    pub fn axial_force_lbf(&self) -> Vec<f64> {
        self.axial_force.iter().map(|f| f.get::<pound_force>()).collect()
    }

    pub fn pressure_differential_psi(&self) -> Vec<f64> {
        self.pressure_differential.iter().map(|p| p.get::<psi>()).collect()
    }

    pub fn len(&self) -> usize {
        self.axial_force.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axial_force.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadCaseError {
    #[error("{case}: missing {}", field_list(.missing))]
    MissingInputs {
        case: LoadCase,
        missing: Vec<MissingInput>,
    },

    #[error("No trajectory attached to the casing string")]
    NoTrajectory,

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Fluid column error: {0}")]
    FluidColumn(#[from] FluidColumnError),
}

fn field_list(missing: &[MissingInput]) -> String {
    missing.iter().map(|m| m.field).collect::<Vec<_>>().join(", ")
}

/// Outcome of evaluating the whole catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Cases appended to the load list, in order
    pub evaluated: Vec<LoadCase>,
    /// Inputs that kept cases from running
    pub skipped: Vec<MissingInput>,
    /// Cases that failed for another reason, with the error message
    pub failed: Vec<(LoadCase, String)>,
}

impl RunSummary {
    /// Skipped cases without repeats, in catalog order
    pub fn skipped_cases(&self) -> Vec<LoadCase> {
        let mut cases: Vec<LoadCase> = self.skipped.iter().map(|m| m.case).collect();
        cases.sort();
        cases.dedup();
        cases
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "{} evaluated, {} skipped, {} failed",
            self.evaluated.len(),
            self.skipped_cases().len(),
            self.failed.len()
        )];
        for case in self.skipped_cases() {
            let fields: Vec<&str> = self
                .skipped
                .iter()
                .filter(|m| m.case == case)
                .map(|m| m.field)
                .collect();
            lines.push(format!("  skipped {case}: {}", fields.join(", ")));
        }
        for (case, error) in &self.failed {
            lines.push(format!("  failed {case}: {error}"));
        }
        lines.join("\n")
    }
}
