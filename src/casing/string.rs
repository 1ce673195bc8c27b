use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, info, warn};

use crate::capacity::{
    ConnectionFactors, DesignFactors, EnvelopeInputs, SafetyFactorReport, StrengthEnvelope,
};
use crate::casing::{SteelGrade, Trajectory};
use crate::loads::{
    ExportError, LoadCase, LoadCaseError, LoadCaseResult, LoadSettings, RunSummary, evaluate_case, to_json,
    write_loads_csv,
};
use crate::physics::{PipeGeometry, ProfileError};
use crate::types::conversion::{inch_to_m, psi_to_pa};
use crate::types::*;

/// Steel density used for the plain-end weight when no nominal weight is given (kg/m³)
const STEEL_DENSITY: f64 = 7850.0;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CasingError {
    #[error("Outer diameter must be larger than inner diameter (od {od_in} in, id {id_in} in)")]
    WallThickness { od_in: f64, id_in: f64 },

    #[error("Inner diameter must be positive (got {0} in)")]
    InnerDiameter(f64),

    #[error("Shoe depth {shoe_m} m must be below top depth {top_m} m")]
    Depths { top_m: f64, shoe_m: f64 },

    #[error("Invalid {0} design factor: {1}")]
    DesignFactor(&'static str, f64),

    #[error("Invalid material property {0}: {1}")]
    Material(&'static str, f64),

    #[error("Load does not fit the attached trajectory: {0}")]
    Load(#[from] ProfileError),
}

/// A casing string with its strength envelope, path and evaluated load cases.
///
/// Geometry and material are fixed at construction; the `with_*` builders return
/// a new string with the envelope rebuilt. Only the trajectory and the load list
/// change afterwards. Deserializing runs the same checks and rebuilds the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawCasingString")]
pub struct CasingString {
    od: Length,
    id: Length,
    nominal_weight: LinearMassDensity,
    grade: SteelGrade,
    yield_strength: Pressure,
    youngs_modulus: Pressure,
    poisson: f64,
    /// 1/°C
    thermal_expansion: f64,
    top_depth: Depth,
    shoe_depth: Depth,
    top_of_cement: Depth,
    design_factors: DesignFactors,
    connection: ConnectionFactors,
    axial_collapse_correction: bool,
    envelope: StrengthEnvelope,
    trajectory: Option<Trajectory>,
    loads: Vec<LoadCaseResult>,
}

#[derive(Deserialize)]
struct RawCasingString {
    od: Length,
    id: Length,
    nominal_weight: LinearMassDensity,
    grade: SteelGrade,
    yield_strength: Pressure,
    youngs_modulus: Pressure,
    poisson: f64,
    thermal_expansion: f64,
    top_depth: Depth,
    shoe_depth: Depth,
    top_of_cement: Depth,
    design_factors: DesignFactors,
    connection: ConnectionFactors,
    axial_collapse_correction: bool,
    #[serde(default)]
    trajectory: Option<Trajectory>,
    #[serde(default)]
    loads: Vec<LoadCaseResult>,
}

impl TryFrom<RawCasingString> for CasingString {
    type Error = CasingError;

    fn try_from(raw: RawCasingString) -> Result<Self, Self::Error> {
        let mut casing = Self::new(raw.od, raw.id, raw.shoe_depth, raw.grade)?
            .with_top_depth(raw.top_depth)?
            .with_top_of_cement(raw.top_of_cement)
            .with_nominal_weight(raw.nominal_weight)?
            .with_yield_strength(raw.yield_strength)?
            .with_youngs_modulus(raw.youngs_modulus)?
            .with_poisson(raw.poisson)?
            .with_thermal_expansion(raw.thermal_expansion)?
            .with_design_factors(raw.design_factors)?
            .with_connection(raw.connection)?
            .with_axial_collapse_correction(raw.axial_collapse_correction);

        casing.trajectory = raw.trajectory;
        for load in raw.loads {
            casing.add_load(load)?;
        }
        Ok(casing)
    }
}

impl CasingString {
    /// Create a casing string with default material and design factors.
    ///
    /// Defaults: yield from `grade`, E = 29 000 000 psi, Poisson 0.3,
    /// thermal expansion 17e-6 /°C, plain-end nominal weight, string hung from
    /// surface, top of cement at the top of the string.
    pub fn new(od: Length, id: Length, shoe_depth: Depth, grade: SteelGrade) -> Result<Self, CasingError> {
        let (od_in, id_in) = (od.get::<inch>(), id.get::<inch>());
        if id_in <= 0.0 || id_in.is_nan() {
            return Err(CasingError::InnerDiameter(id_in));
        }
        if od_in <= id_in || od_in.is_nan() {
            return Err(CasingError::WallThickness { od_in, id_in });
        }

        let shoe_m = to_meters(shoe_depth);
        if shoe_m.is_nan() || shoe_m <= 0.0 {
            return Err(CasingError::Depths { top_m: 0.0, shoe_m });
        }

        let steel_area = PI / 4.0 * (od.get::<meter>().powi(2) - id.get::<meter>().powi(2));
        let design_factors = DesignFactors::default();
        let connection = ConnectionFactors::default();
        let yield_strength = grade.minimum_yield();

        let envelope = StrengthEnvelope::new(&EnvelopeInputs {
            od_in,
            id_in,
            yield_psi: yield_strength.get::<psi>(),
            design_factors,
            connection,
            axial_collapse_correction: true,
        });

        Ok(Self {
            od,
            id,
            nominal_weight: LinearMassDensity::new::<kilogram_per_meter>(steel_area * STEEL_DENSITY),
            grade,
            yield_strength,
            youngs_modulus: Pressure::new::<psi>(29.0e6),
            poisson: 0.3,
            thermal_expansion: 17.0e-6,
            top_depth: from_meters(0.0),
            shoe_depth,
            top_of_cement: from_meters(0.0),
            design_factors,
            connection,
            axial_collapse_correction: true,
            envelope,
            trajectory: None,
            loads: Vec::new(),
        })
    }

    fn rebuild_envelope(mut self) -> Self {
        self.envelope = StrengthEnvelope::new(&EnvelopeInputs {
            od_in: self.od.get::<inch>(),
            id_in: self.id.get::<inch>(),
            yield_psi: self.yield_strength.get::<psi>(),
            design_factors: self.design_factors,
            connection: self.connection,
            axial_collapse_correction: self.axial_collapse_correction,
        });
        self
    }

    fn positive(name: &'static str, value: f64) -> Result<f64, CasingError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(CasingError::Material(name, value));
        }
        Ok(value)
    }

    fn non_negative(name: &'static str, value: f64) -> Result<f64, CasingError> {
        if !value.is_finite() || value < 0.0 {
            return Err(CasingError::Material(name, value));
        }
        Ok(value)
    }

    pub fn with_nominal_weight(mut self, weight: LinearMassDensity) -> Result<Self, CasingError> {
        Self::positive("nominal weight", weight.get::<kilogram_per_meter>())?;
        self.nominal_weight = weight;
        Ok(self)
    }

    /// Override the grade's minimum yield.
    ///
    /// Zero is accepted and rates every limit zero.
    pub fn with_yield_strength(mut self, yield_strength: Pressure) -> Result<Self, CasingError> {
        Self::non_negative("yield strength", yield_strength.get::<psi>())?;
        self.yield_strength = yield_strength;
        Ok(self.rebuild_envelope())
    }

    pub fn with_youngs_modulus(mut self, modulus: Pressure) -> Result<Self, CasingError> {
        Self::positive("Young's modulus", modulus.get::<psi>())?;
        self.youngs_modulus = modulus;
        Ok(self)
    }

    pub fn with_poisson(mut self, poisson: f64) -> Result<Self, CasingError> {
        if !(0.0..0.5).contains(&poisson) {
            return Err(CasingError::Material("Poisson's ratio", poisson));
        }
        self.poisson = poisson;
        Ok(self)
    }

    /// Thermal expansion coefficient in 1/°C
    pub fn with_thermal_expansion(mut self, alpha: f64) -> Result<Self, CasingError> {
        self.thermal_expansion = Self::positive("thermal expansion", alpha)?;
        Ok(self)
    }

    /// Hang the string from a depth below surface, e.g. a liner
    pub fn with_top_depth(mut self, top: Depth) -> Result<Self, CasingError> {
        let (top_m, shoe_m) = (to_meters(top), to_meters(self.shoe_depth));
        if top_m.is_nan() || top_m < 0.0 || top_m >= shoe_m {
            return Err(CasingError::Depths { top_m, shoe_m });
        }
        self.top_depth = top;
        if to_meters(self.top_of_cement) < top_m {
            self.top_of_cement = top;
        }
        Ok(self)
    }

    /// Measured depth of the top of cement, clamped to the string
    pub fn with_top_of_cement(mut self, toc: Depth) -> Self {
        let toc_m = to_meters(toc).clamp(to_meters(self.top_depth), to_meters(self.shoe_depth));
        self.top_of_cement = from_meters(toc_m);
        self
    }

    pub fn with_design_factors(mut self, factors: DesignFactors) -> Result<Self, CasingError> {
        if let Some((name, value)) = factors.invalid() {
            return Err(CasingError::DesignFactor(name, value));
        }
        self.design_factors = factors;
        Ok(self.rebuild_envelope())
    }

    pub fn with_connection(mut self, connection: ConnectionFactors) -> Result<Self, CasingError> {
        for (name, value) in [
            ("connection tension efficiency", connection.tension_efficiency),
            ("connection compression efficiency", connection.compression_efficiency),
            ("connection tension", connection.tension_design_factor),
            ("connection compression", connection.compression_design_factor),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(CasingError::DesignFactor(name, value));
            }
        }
        self.connection = connection;
        Ok(self.rebuild_envelope())
    }

    /// Reduce collapse resistance with tension on the interaction curve (on by default)
    pub fn with_axial_collapse_correction(mut self, enabled: bool) -> Self {
        self.axial_collapse_correction = enabled;
        self.rebuild_envelope()
    }

    pub fn od(&self) -> Length {
        self.od
    }

    pub fn id(&self) -> Length {
        self.id
    }

    pub fn thickness(&self) -> Length {
        (self.od - self.id) / 2.0
    }

    /// OD over wall thickness
    pub fn wall_ratio(&self) -> f64 {
        (self.od / self.thickness()).value
    }

    pub fn steel_area(&self) -> Area {
        let (od, id) = (self.od.get::<meter>(), self.id.get::<meter>());
        Area::new::<square_meter>(PI / 4.0 * (od.powi(2) - id.powi(2)))
    }

    pub fn nominal_weight(&self) -> LinearMassDensity {
        self.nominal_weight
    }

    pub fn grade(&self) -> SteelGrade {
        self.grade
    }

    pub fn yield_strength(&self) -> Pressure {
        self.yield_strength
    }

    pub fn youngs_modulus(&self) -> Pressure {
        self.youngs_modulus
    }

    pub fn poisson(&self) -> f64 {
        self.poisson
    }

    pub fn thermal_expansion(&self) -> f64 {
        self.thermal_expansion
    }

    pub fn top_depth(&self) -> Depth {
        self.top_depth
    }

    pub fn shoe_depth(&self) -> Depth {
        self.shoe_depth
    }

    pub fn top_of_cement(&self) -> Depth {
        self.top_of_cement
    }

    pub fn design_factors(&self) -> &DesignFactors {
        &self.design_factors
    }

    pub fn connection(&self) -> &ConnectionFactors {
        &self.connection
    }

    pub fn envelope(&self) -> &StrengthEnvelope {
        &self.envelope
    }

    /// Pipe properties in SI for the force models
    pub fn geometry(&self) -> PipeGeometry {
        PipeGeometry {
            od: inch_to_m(self.od.get::<inch>()),
            id: inch_to_m(self.id.get::<inch>()),
            weight_per_length: self.nominal_weight.get::<kilogram_per_meter>(),
            youngs_modulus: psi_to_pa(self.youngs_modulus.get::<psi>()),
            poisson: self.poisson,
            thermal_expansion: self.thermal_expansion,
        }
    }

    /// Attach the well path, keeping the samples between the top of the string and the shoe.
    ///
    /// Replaces any previous trajectory and clears the loads evaluated on it.
    pub fn attach_trajectory(&mut self, trajectory: &Trajectory) {
        let (top, shoe) = (to_meters(self.top_depth), to_meters(self.shoe_depth));
        let attached = trajectory.truncated(top, shoe);

        if attached.len() < trajectory.len() {
            debug!(
                dropped = trajectory.len() - attached.len(),
                top_m = top,
                shoe_m = shoe,
                "Trajectory truncated to casing string"
            );
        }
        if attached.is_empty() {
            warn!(top_m = top, shoe_m = shoe, "No trajectory samples within the casing string");
        }
        if !self.loads.is_empty() {
            info!(loads = self.loads.len(), "Trajectory replaced, evaluated loads cleared");
            self.loads.clear();
        }

        self.trajectory = Some(attached);
    }

    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.trajectory.as_ref()
    }

    /// Evaluate one load case without storing it
    pub fn evaluate(&self, case: LoadCase, settings: &LoadSettings) -> Result<LoadCaseResult, LoadCaseError> {
        evaluate_case(case, self, settings)
    }

    /// Evaluate one load case and append it to the load list
    pub fn add_load_case(&mut self, case: LoadCase, settings: &LoadSettings) -> Result<&LoadCaseResult, LoadCaseError> {
        let result = self.evaluate(case, settings)?;
        self.loads.push(result);
        Ok(&self.loads[self.loads.len() - 1])
    }

    /// Append an externally computed load; it must have one sample per trajectory station
    pub fn add_load(&mut self, load: LoadCaseResult) -> Result<(), ProfileError> {
        if let Some(trajectory) = &self.trajectory {
            if load.len() != trajectory.len() {
                return Err(ProfileError::LengthMismatch {
                    expected: trajectory.len(),
                    found: load.len(),
                });
            }
        }
        self.loads.push(load);
        Ok(())
    }

    /// Evaluate every catalog case whose inputs are present.
    ///
    /// Cases with missing inputs are skipped and reported; a case that fails for any
    /// other reason is reported without stopping the others.
    pub fn run_loads(&mut self, settings: &LoadSettings) -> Result<RunSummary, LoadCaseError> {
        if self.trajectory.is_none() {
            return Err(LoadCaseError::NoTrajectory);
        }

        let mut summary = RunSummary::default();
        for case in LoadCase::ALL {
            match self.evaluate(case, settings) {
                Ok(result) => {
                    self.loads.push(result);
                    summary.evaluated.push(case);
                }
                Err(LoadCaseError::MissingInputs { missing, .. }) => {
                    debug!(case = %case, missing = missing.len(), "Load case skipped");
                    summary.skipped.extend(missing);
                }
                Err(e) => {
                    warn!(case = %case, error = %e, "Load case failed");
                    summary.failed.push((case, e.to_string()));
                }
            }
        }

        info!(
            evaluated = summary.evaluated.len(),
            skipped = summary.skipped_cases().len(),
            failed = summary.failed.len(),
            "Load cases evaluated"
        );
        Ok(summary)
    }

    pub fn loads(&self) -> &[LoadCaseResult] {
        &self.loads
    }

    pub fn clear_loads(&mut self) {
        self.loads.clear();
    }

    /// Governing safety factors over the current load list
    pub fn safety_factors(&self) -> SafetyFactorReport {
        SafetyFactorReport::new(&self.envelope, &self.loads)
    }

    pub fn summary(&self) -> String {
        let design = &self.envelope.design;
        let connection = &self.envelope.connection;
        format!(
            "Casing {:.3}\" x {:.3}\" {} (D/t {:.1})\n\
             Interval: {} to {}, top of cement {}\n\
             Design burst: {}\n\
             Design collapse: {}\n\
             Connection tension: {}\n\
             Connection compression: {}\n\
             Loads evaluated: {}",
            self.od.get::<inch>(),
            self.id.get::<inch>(),
            self.grade,
            self.wall_ratio(),
            DisplayLength(self.top_depth),
            DisplayLength(self.shoe_depth),
            DisplayLength(self.top_of_cement),
            DisplayPressure(design.burst_pressure()),
            DisplayPressure(design.collapse_pressure()),
            DisplayForce(connection.tension_force()),
            DisplayForce(connection.compression_force()),
            self.loads.len()
        )
    }

    /// Load profiles as CSV against the attached trajectory
    pub fn write_loads_csv<W: std::io::Write>(&self, writer: W) -> Result<(), ExportError> {
        let trajectory = self.trajectory.as_ref().ok_or(ExportError::NoTrajectory)?;
        write_loads_csv(writer, trajectory, &self.loads)
    }

    /// Envelope, loads and safety factors as one JSON document
    pub fn report_json(&self) -> Result<String, ExportError> {
        #[derive(Serialize)]
        struct Report<'a> {
            grade: SteelGrade,
            envelope: &'a StrengthEnvelope,
            loads: &'a [LoadCaseResult],
            safety_factors: SafetyFactorReport,
        }

        to_json(&Report {
            grade: self.grade,
            envelope: &self.envelope,
            loads: &self.loads,
            safety_factors: self.safety_factors(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn casing() -> CasingString {
        CasingString::new(
            Length::new::<inch>(8.0),
            Length::new::<inch>(7.2),
            Depth::new::<meter>(1500.0),
            SteelGrade::L80,
        )
        .unwrap()
    }

    #[test]
    fn test_geometry() {
        let c = casing();
        assert_relative_eq!(c.thickness().get::<inch>(), 0.4, epsilon = 1e-9);
        assert_relative_eq!(c.wall_ratio(), 20.0, epsilon = 1e-9);
        assert_relative_eq!(c.steel_area().get::<square_inch>(), PI / 4.0 * (64.0 - 51.84), epsilon = 1e-9);
        assert_relative_eq!(c.yield_strength().get::<psi>(), 80_000.0, epsilon = 1e-6);
        assert!(c.nominal_weight().get::<kilogram_per_meter>() > 60.0);
    }

    #[test]
    fn test_summary() {
        let summary = casing().summary();
        assert!(summary.contains("L80"));
        assert!(summary.contains("1500.0m"));
        assert!(summary.contains("Loads evaluated: 0"));
    }

    #[test]
    fn test_invalid_geometry() {
        let shoe = Depth::new::<meter>(1000.0);
        let err = CasingString::new(Length::new::<inch>(7.0), Length::new::<inch>(8.0), shoe, SteelGrade::N80);
        assert!(matches!(err, Err(CasingError::WallThickness { .. })));

        let err = CasingString::new(Length::new::<inch>(7.0), Length::new::<inch>(0.0), shoe, SteelGrade::N80);
        assert!(matches!(err, Err(CasingError::InnerDiameter(_))));

        let err = CasingString::new(Length::new::<inch>(7.0), Length::new::<inch>(7.0), shoe, SteelGrade::N80);
        assert!(matches!(err, Err(CasingError::WallThickness { .. })));
    }

    #[test]
    fn test_builders_rebuild_envelope() {
        let base = casing();
        let stronger = casing()
            .with_yield_strength(Pressure::new::<psi>(110_000.0))
            .unwrap();
        assert!(stronger.envelope().design.burst > base.envelope().design.burst);

        let factors = DesignFactors { burst: 1.0, ..DesignFactors::default() };
        let relaxed = casing().with_design_factors(factors).unwrap();
        assert_relative_eq!(relaxed.envelope().design.burst, relaxed.envelope().rated.burst);

        let bad = DesignFactors { tension: 0.0, ..DesignFactors::default() };
        assert_eq!(casing().with_design_factors(bad).unwrap_err(), CasingError::DesignFactor("tension", 0.0));
    }

    #[test]
    fn test_depth_builders() {
        let liner = casing().with_top_depth(Depth::new::<meter>(800.0)).unwrap();
        assert_relative_eq!(liner.top_of_cement().get::<meter>(), 800.0, epsilon = 1e-9);
        assert!(casing().with_top_depth(Depth::new::<meter>(1600.0)).is_err());

        let cemented = casing().with_top_of_cement(Depth::new::<meter>(2000.0));
        assert_relative_eq!(cemented.top_of_cement().get::<meter>(), 1500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_attach_trajectory_truncates() {
        let mut c = casing().with_top_depth(Depth::new::<meter>(200.0)).unwrap();
        let well = Trajectory::vertical(Depth::new::<meter>(2000.0), Depth::new::<meter>(100.0)).unwrap();
        c.attach_trajectory(&well);

        let attached = c.trajectory().unwrap();
        assert_relative_eq!(attached.md()[0], 200.0);
        assert_relative_eq!(attached.bottom().unwrap().md, 1500.0);

        let short = Trajectory::vertical(Depth::new::<meter>(1000.0), Depth::new::<meter>(100.0)).unwrap();
        c.attach_trajectory(&short);
        assert_relative_eq!(c.trajectory().unwrap().bottom().unwrap().md, 1000.0);
    }

    #[test]
    fn test_run_loads_skips_and_aggregates() {
        let mut c = casing();
        let well = Trajectory::vertical(Depth::new::<meter>(1500.0), Depth::new::<meter>(30.0)).unwrap();
        c.attach_trajectory(&well);

        let summary = c.run_loads(&LoadSettings::default()).unwrap();
        assert_eq!(
            summary.evaluated,
            vec![
                LoadCase::Running,
                LoadCase::Overpull,
                LoadCase::GreenCementPressureTest,
                LoadCase::Cementing,
                LoadCase::MudDrop,
                LoadCase::FullEvacuation,
                LoadCase::DrillStemTest,
            ]
        );
        assert!(summary.skipped_cases().contains(&LoadCase::GasKick));
        assert!(summary.failed.is_empty());
        assert_eq!(c.loads().len(), summary.evaluated.len());

        let report = c.safety_factors();
        assert_eq!(report, c.safety_factors());
        let tension = report.check(crate::capacity::LimitType::Tension).unwrap();
        assert!(tension.safety_factor.is_finite());
        assert!(tension.load_case.is_some());
    }

    #[test]
    fn test_exports() {
        let mut c = casing();
        let well = Trajectory::vertical(Depth::new::<meter>(1500.0), Depth::new::<meter>(500.0)).unwrap();
        c.attach_trajectory(&well);
        c.add_load_case(LoadCase::Running, &LoadSettings::default()).unwrap();

        let mut buffer = Vec::new();
        c.write_loads_csv(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 1 + well.len());

        let json: serde_json::Value = serde_json::from_str(&c.report_json().unwrap()).unwrap();
        assert_eq!(json["grade"], "L80");
        assert_eq!(json["loads"][0]["description"], "Running");

        let bare = casing();
        assert!(matches!(bare.write_loads_csv(Vec::new()), Err(ExportError::NoTrajectory)));
    }

    #[test]
    fn test_zero_yield_rates_zero() {
        let mut c = casing().with_yield_strength(Pressure::new::<psi>(0.0)).unwrap();
        let envelope = c.envelope();
        for limits in [envelope.rated, envelope.design, envelope.connection] {
            assert_eq!(limits.burst, 0.0);
            assert_eq!(limits.collapse, 0.0);
            assert_eq!(limits.tension, 0.0);
            assert_eq!(limits.compression, 0.0);
        }
        assert!(envelope.interaction_collapse.iter().all(|&p| p == 0.0));
        assert!(envelope.triaxial.burst.iter().chain(&envelope.triaxial.collapse).all(|&p| p == 0.0));

        let well = Trajectory::vertical(Depth::new::<meter>(1500.0), Depth::new::<meter>(100.0)).unwrap();
        c.attach_trajectory(&well);
        let summary = c.run_loads(&LoadSettings::default()).unwrap();
        assert!(summary.failed.is_empty());

        let tension = c.safety_factors().check(crate::capacity::LimitType::Tension).unwrap().safety_factor;
        assert_eq!(tension, 0.0);

        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(casing().with_yield_strength(Pressure::new::<psi>(bad)).is_err());
        }
    }

    #[test]
    fn test_reattach_clears_loads() {
        let mut c = casing();
        let deep = Trajectory::vertical(Depth::new::<meter>(1500.0), Depth::new::<meter>(500.0)).unwrap();
        c.attach_trajectory(&deep);
        c.add_load_case(LoadCase::Running, &LoadSettings::default()).unwrap();
        assert_eq!(c.loads().len(), 1);

        // Same sample count, different depths
        let shallow = Trajectory::vertical(Depth::new::<meter>(300.0), Depth::new::<meter>(100.0)).unwrap();
        assert_eq!(shallow.len(), deep.len());
        c.attach_trajectory(&shallow);
        assert!(c.loads().is_empty());

        let mut buffer = Vec::new();
        c.write_loads_csv(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_add_load_checks_samples() {
        let mut c = casing();
        let well = Trajectory::vertical(Depth::new::<meter>(1500.0), Depth::new::<meter>(500.0)).unwrap();
        c.attach_trajectory(&well);

        let short = LoadCaseResult::from_si(LoadCase::Running, &[1.0], &[0.0]).unwrap();
        assert_eq!(c.add_load(short), Err(ProfileError::LengthMismatch { expected: 4, found: 1 }));

        let fits = LoadCaseResult::from_si(LoadCase::Running, &[1.0; 4], &[0.0; 4]).unwrap();
        assert!(c.add_load(fits).is_ok());
        assert_eq!(c.loads().len(), 1);
    }

    #[test]
    fn test_deserialize_validates_and_rebuilds() {
        let mut c = casing().with_top_of_cement(Depth::new::<meter>(900.0));
        let well = Trajectory::vertical(Depth::new::<meter>(1500.0), Depth::new::<meter>(500.0)).unwrap();
        c.attach_trajectory(&well);
        c.add_load_case(LoadCase::Running, &LoadSettings::default()).unwrap();

        let json = serde_json::to_string(&c).unwrap();
        let back: CasingString = serde_json::from_str(&json).unwrap();
        assert_relative_eq!(back.envelope().design.burst, c.envelope().design.burst, max_relative = 1e-12);
        assert_relative_eq!(back.top_of_cement().get::<meter>(), 900.0, epsilon = 1e-9);
        assert_eq!(back.loads().len(), 1);

        let mut bad_geometry: serde_json::Value = serde_json::from_str(&json).unwrap();
        bad_geometry["id"] = bad_geometry["od"].clone();
        assert!(serde_json::from_value::<CasingString>(bad_geometry).is_err());

        let mut bad_load: serde_json::Value = serde_json::from_str(&json).unwrap();
        bad_load["loads"][0]["axial_force"] = serde_json::json!([1.0]);
        bad_load["loads"][0]["pressure_differential"] = serde_json::json!([1.0]);
        assert!(serde_json::from_value::<CasingString>(bad_load).is_err());
    }

    #[test]
    fn test_run_loads_needs_trajectory() {
        let mut c = casing();
        assert!(matches!(c.run_loads(&LoadSettings::default()), Err(LoadCaseError::NoTrajectory)));
    }
}
