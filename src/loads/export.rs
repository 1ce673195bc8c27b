//! CSV and JSON output of evaluated loads
//!
//! Load profiles are written one row per case and depth sample in field units:
//! `case,md,tvd,axial_force_lbf,pressure_differential_psi`.

use serde::Serialize;
use std::io;
use std::path::Path;
use tracing::info;

use super::LoadCaseResult;
use crate::casing::Trajectory;
use crate::physics::{ProfileError, ensure_len};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to create output file: {0}")]
    Io(#[from] io::Error),

    #[error("Load does not match the trajectory: {0}")]
    Profile(#[from] ProfileError),

    #[error("No trajectory to export loads against")]
    NoTrajectory,
}

#[derive(Debug, Serialize)]
struct LoadRow<'a> {
    case: &'a str,
    md: f64,
    tvd: f64,
    axial_force_lbf: f64,
    pressure_differential_psi: f64,
}

/// Write loads against `trajectory`, which must be the path they were evaluated on.
///
/// Only sample counts are checked here; [`CasingString`](crate::casing::CasingString)
/// clears its loads when its trajectory is replaced.
pub fn write_loads_csv<W: io::Write>(
    writer: W,
    trajectory: &Trajectory,
    loads: &[LoadCaseResult],
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for load in loads {
        let (axial, pressure) = (load.axial_force_lbf(), load.pressure_differential_psi());
        ensure_len(trajectory.len(), &axial)?;

        for ((station, f), p) in trajectory.stations().iter().zip(axial).zip(pressure) {
            csv_writer.serialize(LoadRow {
                case: &load.description,
                md: station.md,
                tvd: station.tvd,
                axial_force_lbf: f,
                pressure_differential_psi: p,
            })?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_loads_csv_file(
    path: &Path,
    trajectory: &Trajectory,
    loads: &[LoadCaseResult],
) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_loads_csv(file, trajectory, loads)?;
    info!(path = %path.display(), loads = loads.len(), "Load profiles exported");
    Ok(())
}

/// Pretty JSON of an envelope, report or load list
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::LoadCase;
    use crate::types::*;

    fn trajectory() -> Trajectory {
        Trajectory::vertical(Depth::new::<meter>(100.0), Depth::new::<meter>(50.0)).unwrap()
    }

    #[test]
    fn test_csv_rows() {
        let load = LoadCaseResult::from_si(LoadCase::Running, &[10.0, 5.0, 0.0], &[0.0, 0.0, 0.0]).unwrap();
        let mut buffer = Vec::new();
        write_loads_csv(&mut buffer, &trajectory(), &[load]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "case,md,tvd,axial_force_lbf,pressure_differential_psi");
        assert_eq!(lines.len(), 4);
        assert!(lines[3].starts_with("Running,100.0,100.0,0.0,"));
    }

    #[test]
    fn test_csv_length_mismatch() {
        let load = LoadCaseResult::from_si(LoadCase::Running, &[10.0], &[0.0]).unwrap();
        let err = write_loads_csv(Vec::new(), &trajectory(), &[load]);
        assert!(matches!(err, Err(ExportError::Profile(_))));
    }

    #[test]
    fn test_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loads.csv");
        let load = LoadCaseResult::from_si(LoadCase::Cementing, &[1.0, 2.0, 3.0], &[0.0, -1.0, -2.0]).unwrap();
        write_loads_csv_file(&path, &trajectory(), &[load]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("Cementing"));
    }

    #[test]
    fn test_json() {
        let load = LoadCaseResult::from_si(LoadCase::MudDrop, &[1.0], &[2.0]).unwrap();
        let json = to_json(&[load]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["description"], "Mud Drop");
        assert_eq!(value[0]["case"], "mud_drop");
    }
}
