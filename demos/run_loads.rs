use std::error::Error;
use std::path::Path;

use casing_core::casing::{CasingString, SteelGrade, Trajectory};
use casing_core::loads::LoadSettings;
use casing_core::types::*;

/// Vertical to 500 m, build at 6°/100 m to 30°, then hold
const SURVEY: &str = "\
md,tvd,inclination,azimuth
0,0,0,45
100,100,0,45
200,200,0,45
300,300,0,45
400,400,0,45
500,500,0,45
600,599.86,6,45
700,698.63,12,45
800,795.22,18,45
900,888.58,24,45
1000,977.68,30,45
1100,1064.28,30,45
1200,1150.89,30,45
1300,1237.49,30,45
1400,1324.09,30,45
1500,1410.70,30,45
1600,1497.30,30,45
";

const SETTINGS: &str = r#"
[densities]
mud = 1.2

[production]
reservoir_pressure = 4200.0
reservoir_tvd = 1500.0
packer_tvd = 1250.0
perforations_tvd = 1400.0

[testing]
test_pressure = 3000.0
test_fluid_density = 1.3
pipe_diameter = 7.2

[drilling]
fracture_gradient = 0.17
next_section_tvd = 2000.0

[depleted_zone]
tvd = 1300.0
pressure = 1500.0

[annulus]
reference_tvd = [900.0]
densities = [1.2, 1.8]
"#;

/// Usage: run_loads [survey.csv] [settings.toml]
fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let trajectory = match args.first() {
        Some(path) => Trajectory::from_csv_file(path)?,
        None => Trajectory::from_csv_reader(SURVEY.as_bytes())?,
    };
    let settings = match args.get(1) {
        Some(path) => LoadSettings::load_from_file(Path::new(path))?,
        None => LoadSettings::from_toml_str(SETTINGS)?,
    };

    let mut casing = CasingString::new(
        Length::new::<inch>(9.625),
        Length::new::<inch>(8.681),
        Depth::new::<meter>(1500.0),
        SteelGrade::L80,
    )?
    .with_top_of_cement(Depth::new::<meter>(900.0));
    casing.attach_trajectory(&trajectory);

    println!("=== Casing Load Cases ===\n");
    println!("{}\n", casing.summary());

    let run = casing.run_loads(&settings)?;
    println!("{}\n", run.summary());

    let s = "-".repeat(50);
    println!("Governing safety factors");
    println!("{}", s);
    let report = casing.safety_factors();
    println!("{}", report.summary());

    match report.minimum() {
        Some(check) => println!(
            "\nLowest: {} {:.2} ({})",
            check.limit,
            check.safety_factor,
            check.load_case.as_deref().unwrap_or("-")
        ),
        None => println!("\nNo load case loads the string"),
    }
    println!("All limits pass: {}", report.all_pass());

    Ok(())
}
