use crate::constants::CONICAL_HALF_ANGLE_DEG;
use crate::errors::NozzleError;
use crate::utils::interpolation::{interpolate, nearest_index};
use tracing::{debug, warn};

/// Area ratios at which the wall angles were tabulated.
pub const AREA_RATIOS: [f64; 8] = [4.0, 5.0, 10.0, 20.0, 30.0, 40.0, 50.0, 100.0];

struct AngleTable {
    theta_n: [f64; 8], // degrees
    theta_e: [f64; 8], // degrees
}

const ANGLES_60: AngleTable = AngleTable {
    theta_n: [26.5, 28.0, 32.0, 35.0, 36.2, 37.1, 35.0, 40.0],
    theta_e: [20.5, 20.5, 16.0, 14.5, 14.0, 13.5, 13.0, 11.2],
};

const ANGLES_80: AngleTable = AngleTable {
    theta_n: [21.5, 23.0, 26.3, 28.8, 30.0, 31.0, 31.5, 33.5],
    theta_e: [14.0, 13.0, 11.0, 9.0, 8.5, 8.0, 7.5, 7.0],
};

const ANGLES_90: AngleTable = AngleTable {
    theta_n: [20.0, 21.0, 24.0, 27.0, 28.5, 29.5, 30.2, 32.0],
    theta_e: [11.5, 10.5, 8.0, 7.0, 6.5, 6.0, 6.0, 6.0],
};

/// Bell length as a fraction of the equivalent 15° cone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthPercentage {
    Sixty,
    #[default]
    Eighty,
    Ninety,
}

impl LengthPercentage {
    /// Unsupported percentages fall back to 80%.
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            60 => LengthPercentage::Sixty,
            80 => LengthPercentage::Eighty,
            90 => LengthPercentage::Ninety,
            other => {
                warn!(percent = other, "unsupported nozzle length percentage, using 80%");
                LengthPercentage::Eighty
            }
        }
    }

    pub fn percent(&self) -> u32 {
        match self {
            LengthPercentage::Sixty => 60,
            LengthPercentage::Eighty => 80,
            LengthPercentage::Ninety => 90,
        }
    }

    pub fn fraction(&self) -> f64 {
        self.percent() as f64 / 100.0
    }

    fn angle_table(&self) -> &'static AngleTable {
        match self {
            LengthPercentage::Sixty => &ANGLES_60,
            LengthPercentage::Eighty => &ANGLES_80,
            LengthPercentage::Ninety => &ANGLES_90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NozzleAngles {
    pub length: f64,  // same unit as the throat radius
    pub theta_n: f64, // rad, wall angle at the start of the bell
    pub theta_e: f64, // rad, wall angle at the exit
}

/// Length of a 15° half-angle cone with the same throat and exit radii.
pub fn conical_length(expansion_ratio: f64, throat_radius: f64) -> f64 {
    (expansion_ratio.sqrt() - 1.0) * throat_radius / CONICAL_HALF_ANGLE_DEG.to_radians().tan()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn wall_angles(
    expansion_ratio: f64,
    throat_radius: f64,
    length_percentage: LengthPercentage,
) -> Result<NozzleAngles, NozzleError> {
    let table = length_percentage.angle_table();
    let length = length_percentage.fraction() * conical_length(expansion_ratio, throat_radius);

    let index = nearest_index(&AREA_RATIOS, expansion_ratio).ok_or_else(|| {
        NozzleError::Configuration("wall angle table has no area ratios".to_string())
    })?;

    if round_to_tenth(AREA_RATIOS[index]) == round_to_tenth(expansion_ratio) {
        return Ok(NozzleAngles {
            length,
            theta_n: table.theta_n[index].to_radians(),
            theta_e: table.theta_e[index].to_radians(),
        });
    }

    // Interpolate over up to four entries around the nearest one
    let start = index.saturating_sub(2);
    let end = (index + 2).min(AREA_RATIOS.len());
    let window = &AREA_RATIOS[start..end];

    let theta_n = interpolate(window, &table.theta_n[start..end], expansion_ratio)?;
    let theta_e = interpolate(window, &table.theta_e[start..end], expansion_ratio)?;
    debug!(
        expansion_ratio,
        theta_n, theta_e, start, end, "wall angles interpolated"
    );

    Ok(NozzleAngles {
        length,
        theta_n: theta_n.to_radians(),
        theta_e: theta_e.to_radians(),
    })
}
