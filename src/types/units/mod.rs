mod display;

pub use uom::si::f64::{Area, Force, Length, LinearMassDensity, MassDensity, Pressure};

pub use uom::si::{
    area::{square_inch, square_meter},
    force::{kilonewton, newton, pound_force},
    length::{inch, meter},
    linear_mass_density::kilogram_per_meter,
    mass_density::{gram_per_cubic_centimeter, kilogram_per_cubic_meter},
    pressure::{bar, pascal, psi},
};

pub use display::{DisplayDensity, DisplayForce, DisplayLength, DisplayPressure};
