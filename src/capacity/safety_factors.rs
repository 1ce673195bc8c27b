//! Governing design factors across evaluated load cases
//!
//! Loads are read in field units (lbf, psi) to match the envelope.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::envelope::StrengthEnvelope;
use crate::loads::LoadCaseResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimitType {
    Burst,
    Collapse,
    Tension,
    Compression,
}

impl LimitType {
    pub const ALL: [LimitType; 4] = [
        LimitType::Burst,
        LimitType::Collapse,
        LimitType::Tension,
        LimitType::Compression,
    ];
}

impl fmt::Display for LimitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LimitType::Burst => "Burst",
            LimitType::Collapse => "Collapse",
            LimitType::Tension => "Tension",
            LimitType::Compression => "Compression",
        };
        write!(f, "{name}")
    }
}

/// Extreme loads of one load case
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadExtremes {
    /// Largest positive axial force (lbf)
    pub tension: Option<f64>,
    /// Most negative axial force (lbf)
    pub compression: Option<f64>,
    /// Largest positive differential pressure (psi)
    pub burst: Option<f64>,
    /// Most negative differential pressure (psi)
    pub collapse: Option<f64>,
    /// Axial force where the collapse extreme occurs (lbf)
    pub axial_at_collapse: Option<f64>,
}

impl LoadExtremes {
    pub fn from_profiles(axial_lbf: &[f64], pressure_psi: &[f64]) -> Self {
        let tension = axial_lbf.iter().copied().filter(|&f| f > 0.0).reduce(f64::max);
        let compression = axial_lbf.iter().copied().filter(|&f| f < 0.0).reduce(f64::min);
        let burst = pressure_psi.iter().copied().filter(|&p| p > 0.0).reduce(f64::max);

        // First sample wins a tie for the collapse extreme
        let collapse_at = pressure_psi
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p < 0.0)
            .fold(None::<(usize, f64)>, |best, (i, &p)| match best {
                Some((_, q)) if q <= p => best,
                _ => Some((i, p)),
            });

        Self {
            tension,
            compression,
            burst,
            collapse: collapse_at.map(|(_, p)| p),
            axial_at_collapse: collapse_at.and_then(|(i, _)| axial_lbf.get(i).copied()),
        }
    }

    pub fn value(&self, limit: LimitType) -> Option<f64> {
        match limit {
            LimitType::Burst => self.burst,
            LimitType::Collapse => self.collapse,
            LimitType::Tension => self.tension,
            LimitType::Compression => self.compression,
        }
    }
}

fn ratio(limit: f64, load: Option<f64>) -> f64 {
    match load {
        Some(load) if load != 0.0 => limit.abs() / load.abs(),
        _ => f64::INFINITY,
    }
}

/// Design factors of one load case against the envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSafetyFactors {
    pub description: String,
    pub extremes: LoadExtremes,
    pub burst: f64,
    pub collapse: f64,
    pub tension: f64,
    pub compression: f64,
}

impl CaseSafetyFactors {
    pub fn evaluate(envelope: &StrengthEnvelope, load: &LoadCaseResult) -> Self {
        let extremes = LoadExtremes::from_profiles(&load.axial_force_lbf(), &load.pressure_differential_psi());

        let collapse_base = envelope.collapse_limit_at(extremes.axial_at_collapse.unwrap_or(0.0));

        Self {
            description: load.description.clone(),
            extremes,
            burst: ratio(envelope.design.burst, extremes.burst),
            collapse: ratio(collapse_base, extremes.collapse),
            tension: ratio(envelope.connection.tension, extremes.tension),
            compression: ratio(envelope.connection.compression, extremes.compression),
        }
    }

    pub fn factor(&self, limit: LimitType) -> f64 {
        match limit {
            LimitType::Burst => self.burst,
            LimitType::Collapse => self.collapse,
            LimitType::Tension => self.tension,
            LimitType::Compression => self.compression,
        }
    }
}

/// Governing case for one limit type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitCheck {
    pub limit: LimitType,
    /// `None` when no case loads the pipe in this direction
    pub load_case: Option<String>,
    /// Infinite when no case loads the pipe in this direction
    pub safety_factor: f64,
    /// Extreme load of the governing case (lbf or psi)
    pub max_load: Option<f64>,
}

impl LimitCheck {
    pub fn passes(&self) -> bool {
        self.safety_factor >= 1.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyFactorReport {
    pub checks: Vec<LimitCheck>,
    pub cases: Vec<CaseSafetyFactors>,
}

impl SafetyFactorReport {
    /// Reduce every load case to the governing one per limit type.
    ///
    /// Ties keep the earlier case.
    pub fn new<'a>(envelope: &StrengthEnvelope, loads: impl IntoIterator<Item = &'a LoadCaseResult>) -> Self {
        let cases: Vec<CaseSafetyFactors> = loads
            .into_iter()
            .map(|load| CaseSafetyFactors::evaluate(envelope, load))
            .collect();

        let checks = LimitType::ALL
            .into_iter()
            .map(|limit| {
                let mut check = LimitCheck {
                    limit,
                    load_case: None,
                    safety_factor: f64::INFINITY,
                    max_load: None,
                };
                for case in &cases {
                    let sf = case.factor(limit);
                    if sf < check.safety_factor {
                        check.safety_factor = sf;
                        check.load_case = Some(case.description.clone());
                        check.max_load = case.extremes.value(limit);
                    }
                }
                check
            })
            .collect();

        Self { checks, cases }
    }

    pub fn check(&self, limit: LimitType) -> Option<&LimitCheck> {
        self.checks.iter().find(|c| c.limit == limit)
    }

    /// Lowest design factor over all limit types
    pub fn minimum(&self) -> Option<&LimitCheck> {
        self.checks
            .iter()
            .filter(|c| c.safety_factor.is_finite())
            .min_by(|a, b| a.safety_factor.total_cmp(&b.safety_factor))
    }

    pub fn all_pass(&self) -> bool {
        self.checks.iter().all(LimitCheck::passes)
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!("{:<12} {:>8}  {}", "Limit", "SF", "Load case")];
        for check in &self.checks {
            let sf = if check.safety_factor.is_finite() {
                format!("{:.2}", check.safety_factor)
            } else {
                "-".to_string()
            };
            let status = if check.passes() { "" } else { "  FAIL" };
            lines.push(format!(
                "{:<12} {:>8}  {}{}",
                check.limit.to_string(),
                sf,
                check.load_case.as_deref().unwrap_or("-"),
                status
            ));
        }
        lines.join("\n")
    }
}
