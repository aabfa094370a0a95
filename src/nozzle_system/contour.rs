use super::wall_angles::{conical_length, wall_angles, LengthPercentage, NozzleAngles};
use crate::constants::{
    DEFAULT_POINTS_PER_SECTION, ENTRANT_ANGLE_DEG, ENTRANT_RADIUS_FACTOR, EXIT_ARC_RADIUS_FACTOR,
};
use crate::errors::NozzleError;
use crate::utils::interpolation::linspace;
use crate::utils::vector2d::Vector2D;
use std::f64::consts::FRAC_PI_2;
use tracing::debug;

/// One labelled piece of the wall with its reflection across the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourSection {
    pub upper: Vec<Vector2D>,
    pub lower: Vec<Vector2D>,
}

impl ContourSection {
    fn from_upper(upper: Vec<Vector2D>) -> Self {
        let lower = upper.iter().map(Vector2D::mirrored).collect();
        ContourSection { upper, lower }
    }

    pub fn first(&self) -> Option<&Vector2D> {
        self.upper.first()
    }

    pub fn last(&self) -> Option<&Vector2D> {
        self.upper.last()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NozzleContour {
    pub throat_entrant: ContourSection,
    pub throat_exit: ContourSection,
    pub bell: ContourSection,
}

impl NozzleContour {
    pub fn sections(&self) -> [(&'static str, &ContourSection); 3] {
        [
            ("throat entrant", &self.throat_entrant),
            ("throat exit", &self.throat_exit),
            ("bell", &self.bell),
        ]
    }

    /// Upper wall from the converging arc to the exit plane.
    pub fn upper_profile(&self) -> Vec<Vector2D> {
        self.sections()
            .iter()
            .flat_map(|(_, section)| section.upper.iter().copied())
            .collect()
    }

    pub fn lower_profile(&self) -> Vec<Vector2D> {
        self.sections()
            .iter()
            .flat_map(|(_, section)| section.lower.iter().copied())
            .collect()
    }
}

/// Thrust-optimised parabolic (bell) nozzle for a single expansion ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct BellNozzle {
    pub specific_heat_ratio: f64,
    pub expansion_ratio: f64,
    pub throat_radius: f64,
    pub length_percentage: LengthPercentage,
    pub angles: NozzleAngles,
    pub contour: NozzleContour,
}

impl BellNozzle {
    pub fn new(
        specific_heat_ratio: f64,
        expansion_ratio: f64,
        throat_radius: f64,
        length_percentage: LengthPercentage,
    ) -> Result<Self, NozzleError> {
        Self::with_resolution(
            specific_heat_ratio,
            expansion_ratio,
            throat_radius,
            length_percentage,
            DEFAULT_POINTS_PER_SECTION,
        )
    }

    pub fn with_resolution(
        specific_heat_ratio: f64,
        expansion_ratio: f64,
        throat_radius: f64,
        length_percentage: LengthPercentage,
        points_per_section: usize,
    ) -> Result<Self, NozzleError> {
        if points_per_section < 2 {
            return Err(NozzleError::Configuration(format!(
                "contour sections need at least 2 points, got {}",
                points_per_section
            )));
        }

        let angles = wall_angles(expansion_ratio, throat_radius, length_percentage)?;

        let throat_entrant = throat_entrant_arc(throat_radius, points_per_section);
        let throat_exit = throat_exit_arc(throat_radius, angles.theta_n, points_per_section);
        let bell = bell_curve(
            expansion_ratio,
            throat_radius,
            length_percentage,
            &angles,
            points_per_section,
        )?;

        debug!(
            expansion_ratio,
            throat_radius,
            length = angles.length,
            theta_n = angles.theta_n.to_degrees(),
            theta_e = angles.theta_e.to_degrees(),
            "bell nozzle contour generated"
        );

        Ok(BellNozzle {
            specific_heat_ratio,
            expansion_ratio,
            throat_radius,
            length_percentage,
            angles,
            contour: NozzleContour {
                throat_entrant: ContourSection::from_upper(throat_entrant),
                throat_exit: ContourSection::from_upper(throat_exit),
                bell: ContourSection::from_upper(bell),
            },
        })
    }

    pub fn exit_radius(&self) -> f64 {
        self.contour.bell.last().map_or(0.0, |point| point.y)
    }

    pub fn exit_position(&self) -> f64 {
        self.contour.bell.last().map_or(0.0, |point| point.x)
    }
}

/// Builds the bell nozzle for a length percentage given as 60, 80 or 90;
/// any other value is treated as 80.
pub fn bell_nozzle(
    specific_heat_ratio: f64,
    expansion_ratio: f64,
    throat_radius: f64,
    length_percent: u32,
) -> Result<BellNozzle, NozzleError> {
    BellNozzle::new(
        specific_heat_ratio,
        expansion_ratio,
        throat_radius,
        LengthPercentage::from_percent(length_percent),
    )
}

fn circular_arc(
    center: Vector2D,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    points: usize,
) -> Vec<Vector2D> {
    linspace(start_angle, end_angle, points)
        .into_iter()
        .map(|angle| Vector2D::on_circle(center, radius, angle))
        .collect()
}

// Converging arc, tangent to the axis-parallel line r = Rt at x = 0.
fn throat_entrant_arc(throat_radius: f64, points: usize) -> Vec<Vector2D> {
    let radius = ENTRANT_RADIUS_FACTOR * throat_radius;
    circular_arc(
        Vector2D::new(0.0, radius + throat_radius),
        radius,
        ENTRANT_ANGLE_DEG.to_radians(),
        -FRAC_PI_2,
        points,
    )
}

fn throat_exit_center(throat_radius: f64) -> (Vector2D, f64) {
    let radius = EXIT_ARC_RADIUS_FACTOR * throat_radius;
    (Vector2D::new(0.0, radius + throat_radius), radius)
}

fn throat_exit_arc(throat_radius: f64, theta_n: f64, points: usize) -> Vec<Vector2D> {
    let (center, radius) = throat_exit_center(throat_radius);
    circular_arc(center, radius, -FRAC_PI_2, theta_n - FRAC_PI_2, points)
}

fn bell_curve(
    expansion_ratio: f64,
    throat_radius: f64,
    length_percentage: LengthPercentage,
    angles: &NozzleAngles,
    points: usize,
) -> Result<Vec<Vector2D>, NozzleError> {
    let (center, radius) = throat_exit_center(throat_radius);
    let start = Vector2D::on_circle(center, radius, angles.theta_n - FRAC_PI_2);

    let exit = Vector2D::new(
        length_percentage.fraction() * conical_length(expansion_ratio, throat_radius),
        expansion_ratio.sqrt() * throat_radius,
    );

    let control = Vector2D::line_intersection(
        start,
        angles.theta_n.tan(),
        exit,
        angles.theta_e.tan(),
    )
    .ok_or_else(|| {
        NozzleError::Configuration(format!(
            "bell tangents are parallel (theta_n = {}, theta_e = {})",
            angles.theta_n, angles.theta_e
        ))
    })?;

    // Quadratic Bézier from the end of the throat arc to the exit lip
    Ok(linspace(0.0, 1.0, points)
        .into_iter()
        .map(|t| {
            let s = 1.0 - t;
            s.powi(2) * start + 2.0 * s * t * control + t.powi(2) * exit
        })
        .collect())
}
