use super::contour::NozzleContour;
use crate::errors::NozzleError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes the upper wall as a two-column `x,r` table for CAD import.
pub fn write_point_table<W: Write>(
    contour: &NozzleContour,
    writer: &mut W,
) -> Result<usize, NozzleError> {
    writeln!(writer, "x,r")?;

    let profile = contour.upper_profile();
    for point in &profile {
        writeln!(writer, "{},{}", point.x, point.y)?;
    }
    writer.flush()?;

    Ok(profile.len())
}

pub fn export_point_table<P: AsRef<Path>>(
    contour: &NozzleContour,
    path: P,
) -> Result<usize, NozzleError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    let rows = write_point_table(contour, &mut writer)?;

    info!(path = %path.display(), rows, "nozzle point table exported");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nozzle_system::contour::bell_nozzle;

    #[test]
    fn test_point_table_layout() {
        let nozzle = bell_nozzle(1.22, 50.0, 200.0, 80).unwrap();
        let mut buffer = Vec::new();

        let rows = write_point_table(&nozzle.contour, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(rows, 300);
        assert_eq!(lines.len(), rows + 1);
        assert_eq!(lines[0], "x,r");

        let last: Vec<f64> = lines[rows]
            .split(',')
            .map(|value| value.parse().unwrap())
            .collect();
        assert_eq!(last, vec![nozzle.exit_position(), nozzle.exit_radius()]);
    }

    #[test]
    fn test_export_to_file() {
        let nozzle = bell_nozzle(1.22, 20.0, 10.0, 60).unwrap();
        let path = std::env::temp_dir().join(format!("nozzle_points_{}.csv", std::process::id()));

        let rows = export_point_table(&nozzle.contour, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(text.lines().count(), rows + 1);
    }
}
