//! Field unit conversions
//!
//! Profiles are computed in SI (m, Pa, N, kg/m³) and converted to field units
//! (psi, lbf, sg, in) only at the boundary. Every factor comes from `uom`.

use crate::types::units::*;

#[inline]
pub fn sg_to_kg_per_m3(sg: f64) -> f64 {
    MassDensity::new::<gram_per_cubic_centimeter>(sg).get::<kilogram_per_cubic_meter>()
}

#[inline]
pub fn kg_per_m3_to_sg(kg_m3: f64) -> f64 {
    MassDensity::new::<kilogram_per_cubic_meter>(kg_m3).get::<gram_per_cubic_centimeter>()
}

#[inline]
pub fn psi_to_pa(value: f64) -> f64 {
    Pressure::new::<psi>(value).get::<pascal>()
}

#[inline]
pub fn pa_to_psi(value: f64) -> f64 {
    Pressure::new::<pascal>(value).get::<psi>()
}

#[inline]
pub fn bar_to_pa(value: f64) -> f64 {
    Pressure::new::<bar>(value).get::<pascal>()
}

#[inline]
pub fn pa_to_bar(value: f64) -> f64 {
    Pressure::new::<pascal>(value).get::<bar>()
}

#[inline]
pub fn psi_to_bar(value: f64) -> f64 {
    Pressure::new::<psi>(value).get::<bar>()
}

#[inline]
pub fn inch_to_m(value: f64) -> f64 {
    Length::new::<inch>(value).get::<meter>()
}

#[inline]
pub fn m_to_inch(value: f64) -> f64 {
    Length::new::<meter>(value).get::<inch>()
}

#[inline]
pub fn in2_to_m2(value: f64) -> f64 {
    Area::new::<square_inch>(value).get::<square_meter>()
}

#[inline]
pub fn n_to_lbf(value: f64) -> f64 {
    Force::new::<newton>(value).get::<pound_force>()
}

#[inline]
pub fn lbf_to_n(value: f64) -> f64 {
    Force::new::<pound_force>(value).get::<newton>()
}

#[inline]
pub fn kn_to_n(value: f64) -> f64 {
    Force::new::<kilonewton>(value).get::<newton>()
}

#[inline]
pub fn kn_to_lbf(value: f64) -> f64 {
    Force::new::<kilonewton>(value).get::<pound_force>()
}
