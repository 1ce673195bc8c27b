//! Required-input check per load case

use serde::Serialize;

use super::LoadCase;
use super::settings::{Evacuation, LoadSettings};

/// A settings field a load case needs but that is not set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingInput {
    pub case: LoadCase,
    /// Dotted path in the settings file, e.g. `production.reservoir_pressure`
    pub field: &'static str,
    pub description: &'static str,
}

impl MissingInput {
    pub fn new(case: LoadCase, field: &'static str, description: &'static str) -> Self {
        Self { case, field, description }
    }
}

/// Settings fields a case cannot run without, with whether each one is set
fn requirements(case: LoadCase, s: &LoadSettings) -> Vec<(&'static str, &'static str, bool)> {
    let reservoir = [
        ("production.reservoir_pressure", "reservoir pressure", s.production.reservoir_pressure.is_some()),
        ("production.reservoir_tvd", "reservoir TVD", s.production.reservoir_tvd.is_some()),
    ];
    let depleted_zone = [
        ("depleted_zone.tvd", "depleted zone TVD", s.depleted_zone.tvd.is_some()),
        ("depleted_zone.pressure", "depleted zone pressure", s.depleted_zone.pressure.is_some()),
    ];
    let tubing_leak = [
        ("production.reservoir_pressure", "reservoir pressure", s.production.reservoir_pressure.is_some()),
        ("production.packer_tvd", "packer TVD", s.production.packer_tvd.is_some()),
        ("production.perforations_tvd", "perforations TVD", s.production.perforations_tvd.is_some()),
    ];
    let injection = [
        ("injection.whp", "surface injection pressure", s.injection.whp.is_some()),
        ("densities.injection_fluid", "injection fluid density", s.densities.injection_fluid.is_some()),
    ];

    let storage = [
        (
            "drilling.fracture_gradient",
            "fracture gradient at the shoe",
            s.drilling.fracture_gradient.is_some(),
        ),
        ("densities.stored_fluid", "stored fluid density", s.densities.stored_fluid.is_some()),
    ];

    let mut required = Vec::new();
    match case {
        LoadCase::Running
        | LoadCase::Overpull
        | LoadCase::GreenCementPressureTest
        | LoadCase::Cementing
        | LoadCase::MudDrop
        | LoadCase::FullEvacuation => {}
        LoadCase::DisplacementToGas | LoadCase::GasKick => required.extend(reservoir),
        LoadCase::Production => required.extend(tubing_leak),
        LoadCase::ProductionWithoutPacker => {
            required.extend(reservoir);
            required.extend(depleted_zone);
        }
        LoadCase::ProductionDepletedZone => {
            required.extend(tubing_leak);
            required.extend(depleted_zone);
        }
        LoadCase::Injection => required.extend(injection),
        LoadCase::PressureTest => required.extend([
            ("testing.test_pressure", "test pressure", s.testing.test_pressure.is_some()),
            ("testing.test_fluid_density", "test fluid density", s.testing.test_fluid_density.is_some()),
            ("testing.pipe_diameter", "end load diameter", s.testing.pipe_diameter.is_some()),
        ]),
        LoadCase::DrillingInfluxFracture => required.push((
            "drilling.fracture_gradient",
            "fracture gradient at the shoe",
            s.drilling.fracture_gradient.is_some(),
        )),
        LoadCase::DrillingInfluxBhpFraction => required.push((
            "drilling.next_section_tvd",
            "next section TVD",
            s.drilling.next_section_tvd.is_some(),
        )),
        LoadCase::DrillingLosses => required.extend(depleted_zone),
        LoadCase::DrillStemTest => {
            if s.drilling.dst_evacuation == Evacuation::Partial {
                required.extend(depleted_zone);
            }
        }
        LoadCase::InjectionEvacuation => {
            required.extend(injection);
            required.push((
                "production.perforations_tvd",
                "perforations TVD",
                s.production.perforations_tvd.is_some(),
            ));
            required.push((
                "injection.influenced_zone_tvd",
                "influenced zone TVD",
                s.injection.influenced_zone_tvd.is_some(),
            ));
            if s.injection.evacuation == Evacuation::Partial {
                required.push(depleted_zone[1]);
            }
        }
        LoadCase::FluidStorage => required.extend(storage),
        LoadCase::FluidStorageDepletedZone => {
            required.extend(storage);
            required.extend(depleted_zone);
        }
    }
    required
}

/// Inputs `case` needs that are absent from `settings`; empty when the case can run
pub fn missing_inputs(case: LoadCase, settings: &LoadSettings) -> Vec<MissingInput> {
    requirements(case, settings)
        .into_iter()
        .filter(|&(_, _, present)| !present)
        .map(|(field, description, _)| MissingInput::new(case, field, description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_run_the_basic_cases() {
        let settings = LoadSettings::default();
        for case in [
            LoadCase::Running,
            LoadCase::Overpull,
            LoadCase::GreenCementPressureTest,
            LoadCase::Cementing,
            LoadCase::MudDrop,
            LoadCase::FullEvacuation,
            LoadCase::DrillStemTest,
        ] {
            assert!(missing_inputs(case, &settings).is_empty(), "{case}");
        }
    }

    #[test]
    fn test_gas_kick_needs_reservoir() {
        let mut settings = LoadSettings::default();
        let missing = missing_inputs(LoadCase::GasKick, &settings);
        let fields: Vec<_> = missing.iter().map(|m| m.field).collect();
        assert_eq!(fields, vec!["production.reservoir_pressure", "production.reservoir_tvd"]);
        assert!(missing.iter().all(|m| m.case == LoadCase::GasKick));

        settings.production.reservoir_pressure = Some(4200.0);
        settings.production.reservoir_tvd = Some(2000.0);
        assert!(missing_inputs(LoadCase::GasKick, &settings).is_empty());
    }

    #[test]
    fn test_evacuation_mode_changes_requirements() {
        let mut settings = LoadSettings::default();
        settings.drilling.dst_evacuation = Evacuation::Partial;
        assert_eq!(missing_inputs(LoadCase::DrillStemTest, &settings).len(), 2);

        settings.injection.whp = Some(5000.0);
        settings.densities.injection_fluid = Some(1.1);
        settings.production.perforations_tvd = Some(1400.0);
        settings.injection.influenced_zone_tvd = Some(1200.0);
        assert!(missing_inputs(LoadCase::InjectionEvacuation, &settings).is_empty());

        settings.injection.evacuation = Evacuation::Partial;
        let missing = missing_inputs(LoadCase::InjectionEvacuation, &settings);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].field, "depleted_zone.pressure");
    }

    #[test]
    fn test_production_depleted_zone_needs_both() {
        let settings = LoadSettings::default();
        assert_eq!(missing_inputs(LoadCase::Production, &settings).len(), 3);
        assert_eq!(missing_inputs(LoadCase::ProductionDepletedZone, &settings).len(), 5);
        assert_eq!(missing_inputs(LoadCase::ProductionWithoutPacker, &settings).len(), 4);
    }

    #[test]
    fn test_fluid_storage_requirements() {
        let mut settings = LoadSettings::default();
        let fields: Vec<_> = missing_inputs(LoadCase::FluidStorage, &settings)
            .iter()
            .map(|m| m.field)
            .collect();
        assert_eq!(fields, vec!["drilling.fracture_gradient", "densities.stored_fluid"]);
        assert_eq!(missing_inputs(LoadCase::FluidStorageDepletedZone, &settings).len(), 4);

        settings.drilling.fracture_gradient = Some(0.17);
        settings.densities.stored_fluid = Some(0.9);
        assert!(missing_inputs(LoadCase::FluidStorage, &settings).is_empty());
        assert_eq!(missing_inputs(LoadCase::FluidStorageDepletedZone, &settings).len(), 2);
    }
}
