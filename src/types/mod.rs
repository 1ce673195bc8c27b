pub mod conversion;
pub mod units;

pub use units::*;

// Type aliases for domain clarity (zero cost)
pub type Depth = Length;
pub type Density = MassDensity;

/// Gravitational acceleration used by every hydrostatic calculation, m/s²
pub const GRAVITY: f64 = 9.81;

// Standard units we use internally (just documentation)
/// Internal standard: meters
pub const INTERNAL_LENGTH_UNIT: &str = "meters";
/// Internal standard: pascals
pub const INTERNAL_PRESSURE_UNIT: &str = "pascals";
/// Internal standard: newtons
pub const INTERNAL_FORCE_UNIT: &str = "newtons";
/// Internal standard: kilograms per cubic meter
pub const INTERNAL_DENSITY_UNIT: &str = "kg/m³";

/// Get a depth in internal units (meters)
#[inline]
pub fn to_meters(depth: Depth) -> f64 {
    depth.get::<meter>()
}

/// Build a depth from internal units (meters)
#[inline]
pub fn from_meters(value: f64) -> Depth {
    Depth::new::<meter>(value)
}

/// Get a density in internal units (kg/m³)
#[inline]
pub fn to_kg_per_m3(density: Density) -> f64 {
    density.get::<kilogram_per_cubic_meter>()
}

/// Build a density from specific gravity
#[inline]
pub fn from_sg(sg: f64) -> Density {
    Density::new::<gram_per_cubic_centimeter>(sg)
}
