//! Load case recipes
//!
//! Three families share their axial force recipe:
//!
//! - **Tripping** (running, overpull): weight − buoyancy + shock + drag + bending in the
//!   tripping fluid column; no differential pressure.
//! - **Hanging** (cementing, green cement, displacement to gas, gas kick, mud drop): the
//!   string hangs free in the fluids of the case: weight − buoyancy + bending, plus
//!   preload and test end load where they apply.
//! - **Service** (production, injection, evacuation, drilling, storage): the string is cemented
//!   and landed: setting load + ballooning + bending, plus thermal load when the case
//!   heats the well. Ballooning is taken against the installation state: cement
//!   displacing fluid inside, mud outside.
//!
//! Cementing, green cement, pressure test and fluid storage see the `[annulus]` fluid
//! column behind the casing when one is configured.
//!
//! Everything is computed in SI on the attached trajectory.

use tracing::debug;

use super::settings::{Evacuation, LoadSettings};
use super::validation::missing_inputs;
use super::{LoadCase, LoadCaseError, LoadCaseResult, MissingInput};
use crate::casing::{CasingString, Trajectory};
use crate::physics::pressure::{differential, external, internal};
use crate::physics::{
    DragPath, FluidColumn, PipeGeometry, Superposition, TravelDirection, air_weight, ballooning,
    bending, buoyancy, density_profile, drag, hydrostatic, pressure_profile, pressure_test_load,
    shock_load, thermal,
};
use crate::types::conversion::{bar_to_pa, inch_to_m, kn_to_n, psi_to_pa, sg_to_kg_per_m3};

/// Evaluate one catalog case on a casing string with an attached trajectory
pub fn evaluate_case(
    case: LoadCase,
    casing: &CasingString,
    settings: &LoadSettings,
) -> Result<LoadCaseResult, LoadCaseError> {
    let missing = missing_inputs(case, settings);
    if !missing.is_empty() {
        return Err(LoadCaseError::MissingInputs { case, missing });
    }

    let trajectory = casing.trajectory().ok_or(LoadCaseError::NoTrajectory)?;
    let ctx = CaseContext::new(case, casing, trajectory, settings);

    let (axial_force, pressure) = match case {
        LoadCase::Running => ctx.tripping(TravelDirection::Lowering, 0.0)?,
        LoadCase::Overpull => ctx.tripping(TravelDirection::Hoisting, kn_to_n(settings.forces.overpull))?,
        LoadCase::GreenCementPressureTest => ctx.green_cement()?,
        LoadCase::Cementing => ctx.cementing()?,
        LoadCase::DisplacementToGas => ctx.displacement_to_gas()?,
        LoadCase::GasKick => ctx.gas_kick()?,
        LoadCase::MudDrop => ctx.mud_drop()?,
        LoadCase::Production => ctx.production(false)?,
        LoadCase::ProductionDepletedZone => ctx.production(true)?,
        LoadCase::ProductionWithoutPacker => ctx.production_without_packer()?,
        LoadCase::Injection => ctx.injection()?,
        LoadCase::FullEvacuation => {
            let p_int = internal::full_evacuation(&ctx.tvd);
            ctx.service(&p_int, &ctx.mud_behind_casing(), false)?
        }
        LoadCase::PressureTest => ctx.pressure_test()?,
        LoadCase::DrillingInfluxFracture => {
            let gradient = bar_to_pa(ctx.require(settings.drilling.fracture_gradient, "drilling.fracture_gradient")?);
            let p_int = internal::fracture_at_shoe(&ctx.tvd, gradient, ctx.sg(settings.densities.gas));
            ctx.service(&p_int, &ctx.mud_behind_casing(), false)?
        }
        LoadCase::DrillingInfluxBhpFraction => {
            let next_tvd = ctx.require(settings.drilling.next_section_tvd, "drilling.next_section_tvd")?;
            let p_int = internal::bhp_fraction_at_wellhead(
                ctx.tvd.len(),
                ctx.mud(),
                next_tvd,
                settings.drilling.bhp_fraction,
            );
            ctx.service(&p_int, &ctx.mud_behind_casing(), false)?
        }
        LoadCase::DrillingLosses => {
            let p_int = ctx.mud_dropped_to_zone()?;
            ctx.service(&p_int, &ctx.mud_behind_casing(), true)?
        }
        LoadCase::DrillStemTest => {
            let p_int = match settings.drilling.dst_evacuation {
                Evacuation::Full => internal::full_evacuation(&ctx.tvd),
                Evacuation::Partial => ctx.mud_dropped_to_zone()?,
            };
            ctx.service(&p_int, &ctx.mud_behind_casing(), false)?
        }
        LoadCase::InjectionEvacuation => ctx.injection_evacuation()?,
        LoadCase::FluidStorage => ctx.fluid_storage(false)?,
        LoadCase::FluidStorageDepletedZone => ctx.fluid_storage(true)?,
    };

    let result = LoadCaseResult::from_si(case, &axial_force, &pressure)?;
    debug!(case = %case, samples = result.len(), "Load case evaluated");
    Ok(result)
}

type Profiles = (Vec<f64>, Vec<f64>);

/// Depth series and pipe data a recipe works on, all SI
struct CaseContext<'a> {
    case: LoadCase,
    settings: &'a LoadSettings,
    pipe: PipeGeometry,
    top_of_cement: f64,
    md: Vec<f64>,
    tvd: Vec<f64>,
    inclination: Vec<f64>,
    azimuth: Vec<f64>,
    dls: Vec<f64>,
    dls_resolution: f64,
}

impl<'a> CaseContext<'a> {
    fn new(case: LoadCase, casing: &CasingString, trajectory: &Trajectory, settings: &'a LoadSettings) -> Self {
        Self {
            case,
            settings,
            pipe: casing.geometry(),
            top_of_cement: crate::types::to_meters(casing.top_of_cement()),
            md: trajectory.md(),
            tvd: trajectory.tvd(),
            inclination: trajectory.inclination(),
            azimuth: trajectory.azimuth(),
            dls: trajectory.dls(),
            dls_resolution: trajectory.dls_resolution(),
        }
    }

    fn len(&self) -> usize {
        self.tvd.len()
    }

    fn require(&self, value: Option<f64>, field: &'static str) -> Result<f64, LoadCaseError> {
        value.ok_or_else(|| LoadCaseError::MissingInputs {
            case: self.case,
            missing: vec![MissingInput::new(self.case, field, "required input")],
        })
    }

    fn sg(&self, sg: f64) -> f64 {
        sg_to_kg_per_m3(sg)
    }

    fn mud(&self) -> f64 {
        self.sg(self.settings.densities.mud)
    }

    fn mud_behind_casing(&self) -> Vec<f64> {
        external::single_fluid(&self.tvd, self.mud())
    }

    /// The configured annulus column, or a single fluid of `density`
    fn annulus_or(&self, density: f64) -> Result<Vec<f64>, LoadCaseError> {
        Ok(match &self.settings.annulus {
            Some(column) => external::fluid_column(&self.tvd, &column.to_column()?),
            None => external::single_fluid(&self.tvd, density),
        })
    }

    fn bending(&self) -> Vec<f64> {
        bending(&self.dls, self.dls_resolution, &self.pipe)
    }

    /// Fluid around the pipe while running; mud when no column is configured
    fn tripping_column(&self) -> Result<FluidColumn, LoadCaseError> {
        Ok(match &self.settings.tripping.fluid_column {
            Some(column) => FluidColumn::from_sg(&column.reference_tvd, &column.densities)?,
            None => FluidColumn::single_sg(self.settings.densities.mud),
        })
    }

    fn tripping(&self, direction: TravelDirection, extra_pull: f64) -> Result<Profiles, LoadCaseError> {
        let tripping = &self.settings.tripping;
        let column = self.tripping_column()?;
        let pressure = pressure_profile(&self.tvd, &column, 0.0);
        let fluid_density = density_profile(&self.tvd, &column);

        let path = DragPath {
            md: &self.md,
            inclination: &self.inclination,
            azimuth: &self.azimuth,
            fluid_density: &fluid_density,
        };

        let axial = Superposition::new(self.len())
            .add(&air_weight(&self.tvd, &self.pipe))?
            .subtract(&buoyancy(&self.pipe, &pressure, &pressure)?)?
            .add(&shock_load(self.len(), &self.pipe, tripping.speed, tripping.max_speed_ratio))?
            .add(&drag(&path, &self.pipe, tripping.sliding_friction, direction)?)?
            .add(&self.bending())?
            .add_constant(extra_pull)
            .finish();

        Ok((axial, vec![0.0; self.len()]))
    }

    /// Free-hanging string in the given pressure profiles
    fn hanging_in(&self, p_ext: &[f64], p_int: &[f64]) -> Result<Superposition, LoadCaseError> {
        Ok(Superposition::new(self.len())
            .add(&air_weight(&self.tvd, &self.pipe))?
            .subtract(&buoyancy(&self.pipe, p_ext, p_int)?)?
            .add(&self.bending())?)
    }

    /// Free-hanging string with single fluids inside and outside
    fn hanging(&self, external_density: f64, internal_density: f64) -> Result<Superposition, LoadCaseError> {
        let p_ext = hydrostatic(&self.tvd, external_density);
        let p_int = hydrostatic(&self.tvd, internal_density);
        self.hanging_in(&p_ext, &p_int)
    }

    fn cementing(&self) -> Result<Profiles, LoadCaseError> {
        let d = &self.settings.densities;
        let (cement, displacing) = (self.sg(d.cement), self.sg(d.cement_displacing_fluid));

        let p_int = internal::fluid_filled(&self.tvd, displacing);
        let p_ext = self.annulus_or(cement)?;

        let axial = self
            .hanging_in(&p_ext, &p_int)?
            .add_constant(kn_to_n(self.settings.forces.preload))
            .finish();
        Ok((axial, differential(&p_int, &p_ext)?))
    }

    /// Plug bumped on cement that has not set; the test pressure acts on the plug
    fn green_cement(&self) -> Result<Profiles, LoadCaseError> {
        let d = &self.settings.densities;
        let (cement, displacing) = (self.sg(d.cement), self.sg(d.cement_displacing_fluid));
        let test_pressure = psi_to_pa(self.settings.testing.cementing_pressure);
        let p_ext = self.annulus_or(cement)?;

        let axial = self
            .hanging_in(&p_ext, &hydrostatic(&self.tvd, displacing))?
            .add(&pressure_test_load(self.len(), test_pressure, self.pipe.id))?
            .add_constant(kn_to_n(self.settings.forces.preload))
            .finish();

        let p_int = internal::test_pressure(&self.tvd, test_pressure, &FluidColumn::single_sg(d.cement_displacing_fluid));
        Ok((axial, differential(&p_int, &p_ext)?))
    }

    fn displacement_to_gas(&self) -> Result<Profiles, LoadCaseError> {
        let production = &self.settings.production;
        let p_res = psi_to_pa(self.require(production.reservoir_pressure, "production.reservoir_pressure")?);
        let tvd_res = self.require(production.reservoir_tvd, "production.reservoir_tvd")?;
        let gas = self.sg(self.settings.densities.gas);

        let axial = self.hanging(self.mud(), gas)?.finish();
        let p_int = internal::displacement_to_gas(&self.tvd, p_res, gas, tvd_res);
        Ok((axial, differential(&p_int, &self.mud_behind_casing())?))
    }

    fn gas_kick(&self) -> Result<Profiles, LoadCaseError> {
        let production = &self.settings.production;
        let kick = internal::GasKick {
            mud_density: self.mud(),
            gas_density: self.sg(self.settings.densities.gas),
            reservoir_pressure: psi_to_pa(self.require(production.reservoir_pressure, "production.reservoir_pressure")?),
            reservoir_tvd: self.require(production.reservoir_tvd, "production.reservoir_tvd")?,
            kick_volume: self.settings.kick.volume,
            casing_id: self.pipe.id,
            drill_pipe_od: inch_to_m(self.settings.kick.drill_pipe_od),
        };

        let profile = kick.profile(&self.tvd);
        debug!(
            top_of_kick_m = profile.top_of_kick_tvd,
            wellhead_pa = profile.wellhead_pressure,
            bhp_pa = profile.bottom_hole_pressure,
            "Gas kick governing position"
        );

        let axial = self.hanging(kick.mud_density, kick.gas_density)?.finish();
        Ok((axial, differential(&profile.pressure, &self.mud_behind_casing())?))
    }

    fn mud_drop(&self) -> Result<Profiles, LoadCaseError> {
        let dropped = self.sg(self.settings.densities.mud_drop);
        let axial = self.hanging(self.mud(), dropped)?.finish();
        let p_int = internal::fluid_filled(&self.tvd, dropped);
        Ok((axial, differential(&p_int, &self.mud_behind_casing())?))
    }

    fn pressure_test(&self) -> Result<Profiles, LoadCaseError> {
        let testing = &self.settings.testing;
        let test_pressure = psi_to_pa(self.require(testing.test_pressure, "testing.test_pressure")?);
        let fluid = self.require(testing.test_fluid_density, "testing.test_fluid_density")?;
        let diameter = inch_to_m(self.require(testing.pipe_diameter, "testing.pipe_diameter")?);

        let axial = Superposition::new(self.len())
            .add(&pressure_test_load(self.len(), test_pressure, diameter))?
            .add(&self.bending())?
            .finish();

        let p_int = internal::test_pressure(&self.tvd, test_pressure, &FluidColumn::single_sg(fluid));
        Ok((axial, differential(&p_int, &self.annulus_or(self.mud())?)?))
    }

    /// Cemented string with the case's pressures against the installation state
    fn service(&self, p_int: &[f64], p_ext: &[f64], heated: bool) -> Result<Profiles, LoadCaseError> {
        let settings = self.settings;
        let mut axial = Superposition::new(self.len())
            .add_constant(kn_to_n(settings.forces.setting))
            .add(&self.bending())?;

        if settings.models.ballooning {
            let installed_int = hydrostatic(&self.tvd, self.sg(settings.densities.cement_displacing_fluid));
            let installed_ext = hydrostatic(&self.tvd, self.mud());
            let internal_change = differential(p_int, &installed_int)?;
            let external_change = differential(p_ext, &installed_ext)?;
            axial = axial.add(&ballooning(
                &self.md,
                self.top_of_cement,
                &self.pipe,
                &internal_change,
                &external_change,
            )?)?;
        }

        if heated && settings.models.thermal {
            let temperature = settings.temperature.profile();
            axial = axial.add(&thermal(&self.tvd, &self.pipe, &temperature, settings.temperature.wellhead))?;
        }

        Ok((axial.finish(), differential(p_int, p_ext)?))
    }

    fn tubing_leak(&self) -> Result<Vec<f64>, LoadCaseError> {
        let production = &self.settings.production;
        let leak = internal::TubingLeak {
            reservoir_pressure: psi_to_pa(self.require(production.reservoir_pressure, "production.reservoir_pressure")?),
            production_density: self.sg(production.fluid_density),
            perforations_tvd: self.require(production.perforations_tvd, "production.perforations_tvd")?,
            packer_fluid_density: self.sg(production.packer_fluid_density),
            packer_tvd: self.require(production.packer_tvd, "production.packer_tvd")?,
            mud_density: self.mud(),
        };
        Ok(leak.profile(&self.tvd))
    }

    fn depleted_zone(&self) -> Result<(f64, f64), LoadCaseError> {
        let zone = &self.settings.depleted_zone;
        Ok((
            self.require(zone.tvd, "depleted_zone.tvd")?,
            psi_to_pa(self.require(zone.pressure, "depleted_zone.pressure")?),
        ))
    }

    /// Mud inside the casing dropped until it balances the depleted zone
    fn mud_dropped_to_zone(&self) -> Result<Vec<f64>, LoadCaseError> {
        let (zone_tvd, zone_pressure) = self.depleted_zone()?;
        Ok(internal::partial_evacuation(&self.tvd, self.mud(), zone_tvd, zone_pressure))
    }

    fn production(&self, depleted: bool) -> Result<Profiles, LoadCaseError> {
        let p_int = self.tubing_leak()?;
        let p_ext = if depleted {
            let (zone_tvd, zone_pressure) = self.depleted_zone()?;
            external::depleted_zone(&self.tvd, self.mud(), zone_tvd, zone_pressure)
        } else {
            self.mud_behind_casing()
        };
        self.service(&p_int, &p_ext, false)
    }

    /// Gas up to the wellhead with no packer to hold it, mud dropped to a depleted zone outside
    fn production_without_packer(&self) -> Result<Profiles, LoadCaseError> {
        let production = &self.settings.production;
        let p_res = psi_to_pa(self.require(production.reservoir_pressure, "production.reservoir_pressure")?);
        let tvd_res = self.require(production.reservoir_tvd, "production.reservoir_tvd")?;
        let (zone_tvd, zone_pressure) = self.depleted_zone()?;

        let p_int = internal::displacement_to_gas(&self.tvd, p_res, self.sg(self.settings.densities.gas), tvd_res);
        let p_ext = external::depleted_zone(&self.tvd, self.mud(), zone_tvd, zone_pressure);
        self.service(&p_int, &p_ext, false)
    }

    /// Stored fluid at fracture pressure at the shoe
    fn fluid_storage(&self, depleted: bool) -> Result<Profiles, LoadCaseError> {
        let s = self.settings;
        let gradient = bar_to_pa(self.require(s.drilling.fracture_gradient, "drilling.fracture_gradient")?);
        let stored = self.sg(self.require(s.densities.stored_fluid, "densities.stored_fluid")?);

        let p_int = internal::fracture_at_shoe(&self.tvd, gradient, stored);
        let p_ext = if depleted {
            let (zone_tvd, zone_pressure) = self.depleted_zone()?;
            external::depleted_zone(&self.tvd, self.mud(), zone_tvd, zone_pressure)
        } else {
            self.annulus_or(self.mud())?
        };
        self.service(&p_int, &p_ext, false)
    }

    fn injection(&self) -> Result<Profiles, LoadCaseError> {
        let s = self.settings;
        let whp = psi_to_pa(self.require(s.injection.whp, "injection.whp")?);
        let injection_density = self.sg(self.require(s.densities.injection_fluid, "densities.injection_fluid")?);

        let p_int = internal::stimulation_tubing_leak(
            &self.tvd,
            whp,
            self.sg(s.production.packer_fluid_density),
            injection_density,
            s.production.packer_tvd.unwrap_or(0.0),
        );
        self.service(&p_int, &self.mud_behind_casing(), true)
    }

    fn injection_evacuation(&self) -> Result<Profiles, LoadCaseError> {
        let s = self.settings;
        let perforations_tvd = self.require(s.production.perforations_tvd, "production.perforations_tvd")?;

        let zone = external::InjectionZone {
            perforations_tvd,
            injection_pressure: psi_to_pa(self.require(s.injection.whp, "injection.whp")?),
            injection_density: self.sg(self.require(s.densities.injection_fluid, "densities.injection_fluid")?),
            influenced_tvd: self.require(s.injection.influenced_zone_tvd, "injection.influenced_zone_tvd")?,
            fluid_density: self.mud(),
            friction_loss: psi_to_pa(s.injection.friction_loss),
            formation_density: self.sg(s.injection.formation_density),
        };

        let p_int = match s.injection.evacuation {
            Evacuation::Full => internal::full_evacuation(&self.tvd),
            Evacuation::Partial => {
                let zone_pressure = psi_to_pa(self.require(s.depleted_zone.pressure, "depleted_zone.pressure")?);
                internal::partial_evacuation(
                    &self.tvd,
                    self.sg(s.production.packer_fluid_density),
                    perforations_tvd,
                    zone_pressure,
                )
            }
        };

        self.service(&p_int, &zone.profile(&self.tvd), true)
    }
}
