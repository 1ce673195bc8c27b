//! Scenario parameters for the load case catalog
//!
//! Every section deserializes with defaults, so a TOML file only needs the values
//! that differ. Inputs without a sensible default are `Option`s; a case that needs
//! one of them is reported by [`missing_inputs`](super::validation::missing_inputs).
//!
//! # Field units
//!
//! Densities in **sg**, pressures in **psi**, depths (TVD) in **meters**,
//! temperatures in **°C**, forces in **kN**, diameters in **inches**, speeds in
//! **m/s**, volumes in **m³** and the fracture gradient in **bar/m**.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::physics::{FluidColumn, FluidColumnError, TemperatureProfile};
use crate::types::{DisplayDensity, from_sg};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadSettings {
    #[serde(default)]
    pub densities: DensitySettings,
    #[serde(default)]
    pub tripping: TrippingSettings,
    #[serde(default)]
    pub production: ProductionSettings,
    #[serde(default)]
    pub forces: ForceSettings,
    #[serde(default)]
    pub testing: TestingSettings,
    #[serde(default)]
    pub injection: InjectionSettings,
    #[serde(default)]
    pub temperature: TemperatureSettings,
    #[serde(default)]
    pub kick: KickSettings,
    #[serde(default)]
    pub drilling: DrillingSettings,
    #[serde(default)]
    pub depleted_zone: DepletedZoneSettings,
    #[serde(default)]
    pub models: ModelToggles,
    /// Fluids behind the casing after cementing; one fluid per case when absent
    #[serde(default)]
    pub annulus: Option<FluidColumnSettings>,
}

/// Fluid densities (sg)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensitySettings {
    /// Drilling mud in the hole and behind the casing
    pub mud: f64,
    /// Lighter mud the hole is displaced to in the mud drop case
    pub mud_drop: f64,
    pub cement: f64,
    /// Fluid pumped behind the cement plug
    pub cement_displacing_fluid: f64,
    /// Gas filling the casing or entering as a kick
    pub gas: f64,
    pub completion_fluid: f64,
    /// Injected fluid; required by the injection cases
    pub injection_fluid: Option<f64>,
    /// Fluid injected into storage; required by the fluid storage cases
    pub stored_fluid: Option<f64>,
}

impl Default for DensitySettings {
    fn default() -> Self {
        Self {
            mud: 1.2,
            mud_drop: 1.1,
            cement: 1.8,
            cement_displacing_fluid: 1.3,
            gas: 0.5,
            completion_fluid: 1.8,
            injection_fluid: None,
            stored_fluid: None,
        }
    }
}

/// Fluids stacked in the hole or annulus, top first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluidColumnSettings {
    /// Reference TVD of each fluid change (m)
    pub reference_tvd: Vec<f64>,
    /// Densities (sg)
    pub densities: Vec<f64>,
}

impl FluidColumnSettings {
    pub fn to_column(&self) -> Result<FluidColumn, FluidColumnError> {
        FluidColumn::from_sg(&self.reference_tvd, &self.densities)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrippingSettings {
    pub sliding_friction: f64,
    /// Average running speed (m/s)
    pub speed: f64,
    /// Peak to average running speed
    pub max_speed_ratio: f64,
    /// Fluid column in the hole while running; mud when absent
    pub fluid_column: Option<FluidColumnSettings>,
}

impl Default for TrippingSettings {
    fn default() -> Self {
        Self {
            sliding_friction: 0.24,
            speed: 0.3,
            max_speed_ratio: 1.5,
            fluid_column: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionSettings {
    /// Reservoir pressure (psi)
    pub reservoir_pressure: Option<f64>,
    /// Reservoir TVD (m)
    pub reservoir_tvd: Option<f64>,
    /// Produced fluid density (sg)
    pub fluid_density: f64,
    /// Packer fluid density (sg)
    pub packer_fluid_density: f64,
    /// Packer TVD (m)
    pub packer_tvd: Option<f64>,
    /// Perforations TVD (m)
    pub perforations_tvd: Option<f64>,
}

impl Default for ProductionSettings {
    fn default() -> Self {
        Self {
            reservoir_pressure: None,
            reservoir_tvd: None,
            fluid_density: 0.8,
            packer_fluid_density: 1.3,
            packer_tvd: None,
            perforations_tvd: None,
        }
    }
}

/// Uniform axial loads (kN)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceSettings {
    /// Extra pull while freeing a stuck string
    pub overpull: f64,
    /// Load applied before cement sets
    pub preload: f64,
    /// Hang-off load left in the string after landing
    pub setting: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestingSettings {
    /// Pressure applied to bump the plug on green cement (psi)
    pub cementing_pressure: f64,
    /// Casing pressure test (psi)
    pub test_pressure: Option<f64>,
    /// Fluid in the casing during the pressure test (sg)
    pub test_fluid_density: Option<f64>,
    /// Diameter the test pressure acts on for the end load (in)
    pub pipe_diameter: Option<f64>,
}

impl Default for TestingSettings {
    fn default() -> Self {
        Self {
            cementing_pressure: 1500.0,
            test_pressure: None,
            test_fluid_density: None,
            pipe_diameter: None,
        }
    }
}

/// How far the casing is emptied in the evacuation cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evacuation {
    #[default]
    Full,
    /// Down to the level balancing the depleted zone
    Partial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectionSettings {
    /// Surface injection pressure (psi)
    pub whp: Option<f64>,
    /// Friction loss while injecting (psi)
    pub friction_loss: f64,
    /// Formation fluid density below the influenced zone (sg)
    pub formation_density: f64,
    /// TVD below which the formation feels the injection (m)
    pub influenced_zone_tvd: Option<f64>,
    pub evacuation: Evacuation,
}

impl Default for InjectionSettings {
    fn default() -> Self {
        Self {
            whp: None,
            friction_loss: 0.0,
            formation_density: 1.03,
            influenced_zone_tvd: None,
            evacuation: Evacuation::Full,
        }
    }
}

/// One point of the undisturbed temperature line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperaturePoint {
    /// TVD (m)
    pub tvd: f64,
    /// °C
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureSettings {
    /// Maximum wellhead temperature while operating (°C)
    pub wellhead: f64,
    pub seabed: TemperaturePoint,
    pub target: TemperaturePoint,
}

impl Default for TemperatureSettings {
    fn default() -> Self {
        Self {
            wellhead: 5.0,
            seabed: TemperaturePoint { tvd: 500.0, temp: 4.0 },
            target: TemperaturePoint { tvd: 1500.0, temp: 160.0 },
        }
    }
}

impl TemperatureSettings {
    pub fn profile(&self) -> TemperatureProfile {
        TemperatureProfile {
            reference_tvd: self.seabed.tvd,
            reference_temperature: self.seabed.temp,
            target_tvd: self.target.tvd,
            target_temperature: self.target.temp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KickSettings {
    /// Influx volume when the well is shut in (m³)
    pub volume: f64,
    /// Drill pipe outer diameter (in)
    pub drill_pipe_od: f64,
}

impl Default for KickSettings {
    fn default() -> Self {
        Self {
            volume: 0.05,
            drill_pipe_od: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillingSettings {
    /// Fracture gradient at the shoe (bar/m)
    pub fracture_gradient: Option<f64>,
    /// TVD of the next hole section (m)
    pub next_section_tvd: Option<f64>,
    /// Fraction of the next section's bottom-hole pressure at the wellhead
    pub bhp_fraction: f64,
    /// Evacuation during a drill stem test
    pub dst_evacuation: Evacuation,
}

impl Default for DrillingSettings {
    fn default() -> Self {
        Self {
            fracture_gradient: None,
            next_section_tvd: None,
            bhp_fraction: 0.5,
            dst_evacuation: Evacuation::Full,
        }
    }
}

/// A depleted zone the fluid level can drop into
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DepletedZoneSettings {
    /// TVD (m)
    pub tvd: Option<f64>,
    /// Pore pressure (psi)
    pub pressure: Option<f64>,
}

/// Optional contributions, all enabled by default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelToggles {
    pub ballooning: bool,
    pub thermal: bool,
}

impl Default for ModelToggles {
    fn default() -> Self {
        Self {
            ballooning: true,
            thermal: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Settings I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Settings parse error ({0}): {1}")]
    Parse(String, #[source] toml::de::Error),

    #[error("Settings serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Settings validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl LoadSettings {
    /// Parse and validate settings from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self =
            toml::from_str(text).map_err(|e| ConfigError::Parse("<string>".to_string(), e))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let settings: Self =
            toml::from_str(&text).map_err(|e| ConfigError::Parse(path.display().to_string(), e))?;
        settings.validate()?;
        info!(
            path = %path.display(),
            mud = %DisplayDensity(from_sg(settings.densities.mud)),
            "Loaded load case settings"
        );
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let text = self.to_toml()?;
        std::fs::write(path, text).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        debug!(path = %path.display(), "Load case settings saved");
        Ok(())
    }

    /// Check ranges of the values that are present
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let d = &self.densities;
        for (name, value) in [
            ("densities.mud", Some(d.mud)),
            ("densities.mud_drop", Some(d.mud_drop)),
            ("densities.cement", Some(d.cement)),
            ("densities.cement_displacing_fluid", Some(d.cement_displacing_fluid)),
            ("densities.gas", Some(d.gas)),
            ("densities.completion_fluid", Some(d.completion_fluid)),
            ("densities.injection_fluid", d.injection_fluid),
            ("densities.stored_fluid", d.stored_fluid),
            ("production.fluid_density", Some(self.production.fluid_density)),
            ("production.packer_fluid_density", Some(self.production.packer_fluid_density)),
            ("testing.test_fluid_density", self.testing.test_fluid_density),
            ("injection.formation_density", Some(self.injection.formation_density)),
            ("kick.volume", Some(self.kick.volume)),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    errors.push(format!("{name} must be a positive number (got {v})"));
                }
            }
        }

        for (name, value) in [
            ("tripping.sliding_friction", Some(self.tripping.sliding_friction)),
            ("tripping.speed", Some(self.tripping.speed)),
            ("tripping.max_speed_ratio", Some(self.tripping.max_speed_ratio)),
            ("injection.friction_loss", Some(self.injection.friction_loss)),
            ("kick.drill_pipe_od", Some(self.kick.drill_pipe_od)),
            ("testing.cementing_pressure", Some(self.testing.cementing_pressure)),
            ("testing.test_pressure", self.testing.test_pressure),
            ("testing.pipe_diameter", self.testing.pipe_diameter),
            ("production.reservoir_pressure", self.production.reservoir_pressure),
            ("production.reservoir_tvd", self.production.reservoir_tvd),
            ("production.packer_tvd", self.production.packer_tvd),
            ("production.perforations_tvd", self.production.perforations_tvd),
            ("injection.whp", self.injection.whp),
            ("injection.influenced_zone_tvd", self.injection.influenced_zone_tvd),
            ("drilling.fracture_gradient", self.drilling.fracture_gradient),
            ("drilling.next_section_tvd", self.drilling.next_section_tvd),
            ("depleted_zone.tvd", self.depleted_zone.tvd),
            ("depleted_zone.pressure", self.depleted_zone.pressure),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    errors.push(format!("{name} must not be negative (got {v})"));
                }
            }
        }

        if !(0.0..=1.0).contains(&self.drilling.bhp_fraction) {
            errors.push(format!(
                "drilling.bhp_fraction must be within 0..=1 (got {})",
                self.drilling.bhp_fraction
            ));
        }

        let t = &self.temperature;
        if t.seabed.tvd == t.target.tvd {
            errors.push("temperature.seabed and temperature.target need different TVDs".to_string());
        }

        if let (Some(packer), Some(perforations)) = (self.production.packer_tvd, self.production.perforations_tvd) {
            if packer > perforations {
                errors.push(format!(
                    "production.packer_tvd ({packer}) must not be below perforations_tvd ({perforations})"
                ));
            }
        }

        for (name, column) in [
            ("tripping.fluid_column", &self.tripping.fluid_column),
            ("annulus", &self.annulus),
        ] {
            if let Some(Err(e)) = column.as_ref().map(FluidColumnSettings::to_column) {
                errors.push(format!("{name}: {e}"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_validate() {
        let settings = LoadSettings::default();
        assert!(settings.validate().is_ok());
        assert_relative_eq!(settings.tripping.sliding_friction, 0.24);
        assert_relative_eq!(settings.kick.drill_pipe_od, 5.0);
        assert!(settings.models.ballooning && settings.models.thermal);
    }

    #[test]
    fn test_partial_toml() {
        let text = r#"
            [densities]
            mud = 1.4

            [production]
            reservoir_pressure = 4200.0
            reservoir_tvd = 2000.0

            [drilling]
            dst_evacuation = "partial"
        "#;
        let settings = LoadSettings::from_toml_str(text).unwrap();
        assert_relative_eq!(settings.densities.mud, 1.4);
        assert_relative_eq!(settings.densities.cement, 1.8);
        assert_eq!(settings.production.reservoir_pressure, Some(4200.0));
        assert_eq!(settings.drilling.dst_evacuation, Evacuation::Partial);
        assert!(settings.testing.test_pressure.is_none());
    }

    #[test]
    fn test_validation_errors() {
        let mut settings = LoadSettings::default();
        settings.densities.mud = -1.0;
        settings.drilling.bhp_fraction = 1.5;
        settings.production.packer_tvd = Some(2000.0);
        settings.production.perforations_tvd = Some(1800.0);

        match settings.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors[0].contains("densities.mud"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error() {
        let err = LoadSettings::from_toml_str("[densities]\nmud = \"heavy\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(..)));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loads.toml");

        let mut settings = LoadSettings::default();
        settings.testing.test_pressure = Some(3000.0);
        settings.tripping.fluid_column = Some(FluidColumnSettings {
            reference_tvd: vec![800.0],
            densities: vec![1.2, 1.5],
        });
        settings.save_to_file(&path).unwrap();

        let loaded = LoadSettings::load_from_file(&path).unwrap();
        assert_eq!(loaded, settings);

        let missing = LoadSettings::load_from_file(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(..))));
    }

    #[test]
    fn test_annulus_section() {
        let text = r#"
            [annulus]
            reference_tvd = [1000.0]
            densities = [1.2, 1.8]
        "#;
        let settings = LoadSettings::from_toml_str(text).unwrap();
        let column = settings.annulus.as_ref().unwrap().to_column().unwrap();
        assert_eq!(column.len(), 2);
        assert!(LoadSettings::default().annulus.is_none());

        let unsorted = "[annulus]\nreference_tvd = [900.0, 300.0]\ndensities = [1.0, 1.2, 1.8]";
        match LoadSettings::from_toml_str(unsorted) {
            Err(ConfigError::Validation(errors)) => assert!(errors[0].starts_with("annulus")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_temperature_profile() {
        let profile = TemperatureSettings::default().profile();
        assert_relative_eq!(profile.undisturbed(1000.0), 82.0, epsilon = 1e-9);
    }
}
