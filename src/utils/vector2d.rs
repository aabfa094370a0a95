use std::ops::{Add, Mul, Sub};

/// Point in the nozzle meridian plane: `x` axial position, `y` radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Point on a circle of `radius` around `center` at `angle` (radians).
    pub fn on_circle(center: Vector2D, radius: f64, angle: f64) -> Self {
        Vector2D::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    }

    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }

    pub fn distance(&self, other: &Vector2D) -> f64 {
        (*self - *other).magnitude()
    }

    /// Reflection across the nozzle axis.
    pub fn mirrored(&self) -> Self {
        Vector2D::new(self.x, -self.y)
    }

    /// Intersection of the line through `p1` with slope `m1` and the line
    /// through `p2` with slope `m2`. `None` for parallel lines.
    pub fn line_intersection(p1: Vector2D, m1: f64, p2: Vector2D, m2: f64) -> Option<Self> {
        let denominator = m1 - m2;
        if denominator == 0.0 || !denominator.is_finite() {
            return None;
        }

        let c1 = p1.y - m1 * p1.x;
        let c2 = p2.y - m2 * p2.x;
        Some(Vector2D::new(
            (c2 - c1) / denominator,
            (m1 * c2 - m2 * c1) / denominator,
        ))
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Vector2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }
}

impl Mul<Vector2D> for f64 {
    type Output = Vector2D;

    fn mul(self, vector: Vector2D) -> Vector2D {
        Vector2D::new(self * vector.x, self * vector.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_line_intersection() {
        let point = Vector2D::line_intersection(
            Vector2D::new(0.0, 0.0),
            1.0,
            Vector2D::new(0.0, 2.0),
            -1.0,
        )
        .unwrap();

        assert_abs_diff_eq!(point.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(point.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parallel_lines_do_not_intersect() {
        let point =
            Vector2D::line_intersection(Vector2D::new(0.0, 0.0), 0.5, Vector2D::new(1.0, 3.0), 0.5);
        assert!(point.is_none());
    }

    #[test]
    fn test_on_circle_and_mirror() {
        let point = Vector2D::on_circle(Vector2D::new(0.0, 2.0), 1.0, -std::f64::consts::FRAC_PI_2);

        assert_abs_diff_eq!(point.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(point.y, 1.0, epsilon = 1e-12);
        assert_eq!(point.mirrored(), Vector2D::new(point.x, -point.y));
    }
}
