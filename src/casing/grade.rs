use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::*;

/// API casing grades and line-pipe X-grades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SteelGrade {
    H40,
    J55,
    K55,
    N80,
    L80,
    C90,
    T95,
    P110,
    Q125,
    X45,
    X50,
    X52,
    X56,
    X60,
    X65,
    X70,
    X80,
    X90,
    X100,
    X120,
}

impl SteelGrade {
    pub const ALL: [SteelGrade; 20] = [
        SteelGrade::H40,
        SteelGrade::J55,
        SteelGrade::K55,
        SteelGrade::N80,
        SteelGrade::L80,
        SteelGrade::C90,
        SteelGrade::T95,
        SteelGrade::P110,
        SteelGrade::Q125,
        SteelGrade::X45,
        SteelGrade::X50,
        SteelGrade::X52,
        SteelGrade::X56,
        SteelGrade::X60,
        SteelGrade::X65,
        SteelGrade::X70,
        SteelGrade::X80,
        SteelGrade::X90,
        SteelGrade::X100,
        SteelGrade::X120,
    ];

    /// Specified minimum yield strength in ksi
    fn yield_ksi(self) -> f64 {
        match self {
            SteelGrade::H40 => 40.0,
            SteelGrade::J55 | SteelGrade::K55 => 55.0,
            SteelGrade::N80 | SteelGrade::L80 => 80.0,
            SteelGrade::C90 => 90.0,
            SteelGrade::T95 => 95.0,
            SteelGrade::P110 => 110.0,
            SteelGrade::Q125 => 125.0,
            SteelGrade::X45 => 45.0,
            SteelGrade::X50 => 50.0,
            SteelGrade::X52 => 52.0,
            SteelGrade::X56 => 56.0,
            SteelGrade::X60 => 60.0,
            SteelGrade::X65 => 65.0,
            SteelGrade::X70 => 70.0,
            SteelGrade::X80 => 80.0,
            SteelGrade::X90 => 90.0,
            SteelGrade::X100 => 100.0,
            SteelGrade::X120 => 120.0,
        }
    }

    pub fn minimum_yield(self) -> Pressure {
        Pressure::new::<psi>(self.yield_ksi() * 1000.0)
    }

    pub fn name(self) -> &'static str {
        match self {
            SteelGrade::H40 => "H40",
            SteelGrade::J55 => "J55",
            SteelGrade::K55 => "K55",
            SteelGrade::N80 => "N80",
            SteelGrade::L80 => "L80",
            SteelGrade::C90 => "C90",
            SteelGrade::T95 => "T95",
            SteelGrade::P110 => "P110",
            SteelGrade::Q125 => "Q125",
            SteelGrade::X45 => "X-45",
            SteelGrade::X50 => "X-50",
            SteelGrade::X52 => "X-52",
            SteelGrade::X56 => "X-56",
            SteelGrade::X60 => "X-60",
            SteelGrade::X65 => "X-65",
            SteelGrade::X70 => "X-70",
            SteelGrade::X80 => "X-80",
            SteelGrade::X90 => "X-90",
            SteelGrade::X100 => "X-100",
            SteelGrade::X120 => "X-120",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("Unknown steel grade: {0}")]
pub struct UnknownGrade(pub String);

impl FromStr for SteelGrade {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "X-80", "x80" and "X 80" all name the same grade
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | ' ' | '_'))
            .collect::<String>()
            .to_ascii_uppercase();

        SteelGrade::ALL
            .into_iter()
            .find(|g| g.name().replace('-', "") == key)
            .ok_or_else(|| UnknownGrade(s.to_string()))
    }
}

impl TryFrom<String> for SteelGrade {
    type Error = UnknownGrade;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SteelGrade> for String {
    fn from(grade: SteelGrade) -> Self {
        grade.name().to_string()
    }
}

impl fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_grades() {
        assert_eq!("N80".parse::<SteelGrade>(), Ok(SteelGrade::N80));
        assert_eq!("x-80".parse::<SteelGrade>(), Ok(SteelGrade::X80));
        assert_eq!("X 100".parse::<SteelGrade>(), Ok(SteelGrade::X100));
        assert!("Z99".parse::<SteelGrade>().is_err());
    }

    #[test]
    fn test_minimum_yield() {
        assert_relative_eq!(SteelGrade::L80.minimum_yield().get::<psi>(), 80_000.0, epsilon = 1e-6);
        assert_relative_eq!(SteelGrade::X120.minimum_yield().get::<psi>(), 120_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_names_round_trip() {
        for grade in SteelGrade::ALL {
            assert_eq!(grade.name().parse::<SteelGrade>(), Ok(grade));
        }
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&SteelGrade::P110).unwrap();
        assert_eq!(json, "\"P110\"");
        let back: SteelGrade = serde_json::from_str("\"X-65\"").unwrap();
        assert_eq!(back, SteelGrade::X65);
    }
}
