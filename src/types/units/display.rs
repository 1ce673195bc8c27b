use std::fmt;
use uom::si::{
    force::{kilonewton, pound_force},
    length::{foot, meter},
    mass_density::{gram_per_cubic_centimeter, kilogram_per_cubic_meter},
    pressure::{bar, psi},
};

use crate::types::units::*;

#[derive(Debug, Clone, Copy)]
pub struct DisplayForce(pub Force);
#[derive(Debug, Clone, Copy)]
pub struct DisplayPressure(pub Pressure);
#[derive(Debug, Clone, Copy)]
pub struct DisplayLength(pub Length);
#[derive(Debug, Clone, Copy)]
pub struct DisplayDensity(pub MassDensity);

impl fmt::Display for DisplayForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lbf = self.0.get::<pound_force>();
        let kn = self.0.get::<kilonewton>();
        write!(f, "{:.0} lbf ({:.1} kN)", lbf, kn)
    }
}

impl fmt::Display for DisplayPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let psi_f64 = self.0.get::<psi>();
        let bar_f64 = self.0.get::<bar>();

        write!(f, "{:.0}psi ({:.1}bar)", psi_f64, bar_f64)
    }
}

impl fmt::Display for DisplayLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meters = self.0.get::<meter>();
        let feet = self.0.get::<foot>();
        write!(f, "{:.1}m ({:.1}ft)", meters, feet)
    }
}

impl fmt::Display for DisplayDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sg = self.0.get::<gram_per_cubic_centimeter>();
        let kg_m3 = self.0.get::<kilogram_per_cubic_meter>();
        write!(f, "{:.2} sg ({:.0} kg/m³)", sg, kg_m3)
    }
}
