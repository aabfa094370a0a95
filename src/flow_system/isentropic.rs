use crate::constants::{
    FALLBACK_MACH_SEED, MACH_LOWER_BOUND, MACH_UPPER_BOUND, SOLVER_MAX_ITERATIONS,
    SOLVER_TOLERANCE,
};
use crate::errors::NozzleError;
use tracing::{debug, warn};

/// Which branch of the Mach solver produced the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverPath {
    Bracketed,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSolution {
    pub exit_mach: f64,
    pub pressure_ratio: f64, // P_exit / P_chamber
    pub path: SolverPath,
}

/// Isentropic area ratio A/A* at Mach `mach`.
pub fn area_ratio(mach: f64, k: f64) -> f64 {
    let throat_term = (k + 1.0) / 2.0;
    let flow_term = 1.0 + (k - 1.0) / 2.0 * mach.powi(2);
    let exponent = (k + 1.0) / (2.0 * (k - 1.0));

    (1.0 / mach) * (flow_term / throat_term).powf(exponent)
}

fn area_ratio_derivative(mach: f64, k: f64) -> f64 {
    let flow_term = 2.0 + (k - 1.0) * mach.powi(2);
    area_ratio(mach, k) * (-1.0 / mach + (k + 1.0) * mach / flow_term)
}

/// Static-to-stagnation pressure ratio at Mach `mach`.
pub fn mach_pressure_ratio(mach: f64, k: f64) -> f64 {
    (1.0 + (k - 1.0) / 2.0 * mach.powi(2)).powf(-k / (k - 1.0))
}

/// Supersonic exit flow for expansion ratio `epsilon`.
///
/// Brent's method over the supersonic bracket first; if the residual does not
/// change sign there, Newton's method from `FALLBACK_MACH_SEED`. Domain checks
/// on `epsilon` and `k` are left to the caller, a root below
/// `MACH_LOWER_BOUND` is reported as a convergence failure.
pub fn solve_exit_flow(epsilon: f64, k: f64) -> Result<FlowSolution, NozzleError> {
    let residual = |mach: f64| epsilon - area_ratio(mach, k);

    let (exit_mach, path) = match brent(residual, MACH_LOWER_BOUND, MACH_UPPER_BOUND) {
        Some(mach) => (mach, SolverPath::Bracketed),
        None => {
            warn!(
                epsilon,
                k, "no sign change on supersonic bracket, falling back to Newton iteration"
            );
            let mach = newton(
                residual,
                |mach: f64| -area_ratio_derivative(mach, k),
                FALLBACK_MACH_SEED,
            )?;
            (mach, SolverPath::Fallback)
        }
    };

    if !(exit_mach >= MACH_LOWER_BOUND) {
        return Err(NozzleError::NumericalConvergence(format!(
            "no supersonic exit Mach for epsilon = {}, k = {} (root at M = {})",
            epsilon, k, exit_mach
        )));
    }

    let pressure_ratio = mach_pressure_ratio(exit_mach, k);
    debug!(epsilon, k, exit_mach, pressure_ratio, ?path, "exit flow solved");

    Ok(FlowSolution {
        exit_mach,
        pressure_ratio,
        path,
    })
}

pub fn pressure_ratio(epsilon: f64, k: f64) -> Result<f64, NozzleError> {
    Ok(solve_exit_flow(epsilon, k)?.pressure_ratio)
}

fn brent<F: Fn(f64) -> f64>(f: F, lower: f64, upper: f64) -> Option<f64> {
    let (mut a, mut b) = (lower, upper);
    let (mut fa, mut fb) = (f(a), f(b));

    if !fa.is_finite() || !fb.is_finite() || fa * fb > 0.0 {
        return None;
    }
    if fa == 0.0 {
        return Some(a);
    }

    let (mut c, mut fc) = (b, fb);
    let mut d = b - a;
    let mut e = d;

    for _ in 0..SOLVER_MAX_ITERATIONS {
        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * SOLVER_TOLERANCE;
        let midpoint = 0.5 * (c - b);
        if midpoint.abs() <= tol || fb == 0.0 {
            return Some(b);
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            // Inverse quadratic interpolation, or secant when only two points differ
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * midpoint * s, 1.0 - s)
            } else {
                let qa = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * midpoint * qa * (qa - r) - (b - a) * (r - 1.0)),
                    (qa - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let limit = (3.0 * midpoint * q - (tol * q).abs()).min((e * q).abs());
            if 2.0 * p < limit {
                e = d;
                d = p / q;
            } else {
                d = midpoint;
                e = d;
            }
        } else {
            d = midpoint;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(midpoint) };
        fb = f(b);
    }

    None
}

fn newton<F, D>(f: F, derivative: D, seed: f64) -> Result<f64, NozzleError>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let mut x = seed;

    for iteration in 0..SOLVER_MAX_ITERATIONS {
        let fx = f(x);
        let slope = derivative(x);

        if !fx.is_finite() || !slope.is_finite() || slope == 0.0 {
            return Err(NozzleError::NumericalConvergence(format!(
                "Newton iteration degenerated at M = {} (iteration {})",
                x, iteration
            )));
        }

        let mut next = x - fx / slope;
        if next <= 0.0 {
            next = 0.5 * x;
        }

        if (next - x).abs() <= SOLVER_TOLERANCE * x.abs().max(1.0) {
            debug!(iterations = iteration + 1, mach = next, "Newton iteration converged");
            return Ok(next);
        }
        x = next;
    }

    Err(NozzleError::NumericalConvergence(format!(
        "Newton iteration did not converge in {} iterations (last M = {})",
        SOLVER_MAX_ITERATIONS, x
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_mach_two_air() {
        // A/A* = 1.6875 at M = 2 for k = 1.4
        let solution = solve_exit_flow(1.6875, 1.4).unwrap();

        assert_eq!(solution.path, SolverPath::Bracketed);
        assert_relative_eq!(solution.exit_mach, 2.0, max_relative = 1e-8);
        assert_relative_eq!(solution.pressure_ratio, 0.127_804_525, max_relative = 1e-6);
    }

    #[test]
    fn test_root_satisfies_area_relation() {
        let k = 1.22;
        let solution = solve_exit_flow(50.0, k).unwrap();

        assert!(solution.exit_mach > 1.0);
        assert_relative_eq!(area_ratio(solution.exit_mach, k), 50.0, max_relative = 1e-9);
        assert!(solution.pressure_ratio > 0.0 && solution.pressure_ratio < 1.0);
    }

    #[test]
    fn test_unit_expansion_ratio_rejected() {
        let result = pressure_ratio(1.0, 1.22);
        assert!(
            matches!(result, Err(NozzleError::NumericalConvergence(_))),
            "epsilon = 1 has no supersonic solution, got {:?}",
            result
        );
    }

    #[test]
    fn test_subsonic_expansion_ratio_rejected() {
        assert!(pressure_ratio(0.5, 1.22).is_err());
    }

    #[test]
    fn test_pressure_ratio_decreases_with_epsilon() {
        let k = 1.22;
        let mut previous = pressure_ratio(1.5, k).unwrap();

        for epsilon in [2.0, 5.0, 10.0, 50.0, 100.0, 300.0, 1000.0] {
            let ratio = pressure_ratio(epsilon, k).unwrap();
            assert!(
                ratio < previous,
                "ratio should drop with epsilon: {} !< {} at {}",
                ratio,
                previous,
                epsilon
            );
            previous = ratio;
        }
    }

    #[test]
    fn test_fallback_beyond_bracket() {
        // Area ratio at M = 20 for k = 1.4 is about 1.5e4
        let epsilon = 20_000.0;
        let solution = solve_exit_flow(epsilon, 1.4).unwrap();

        assert_eq!(solution.path, SolverPath::Fallback);
        assert!(solution.exit_mach > MACH_UPPER_BOUND);
        assert_relative_eq!(area_ratio(solution.exit_mach, 1.4), epsilon, max_relative = 1e-8);
    }

    #[test]
    fn test_area_ratio_derivative_matches_finite_difference() {
        let (mach, k, h) = (3.0, 1.22, 1e-6);
        let numeric = (area_ratio(mach + h, k) - area_ratio(mach - h, k)) / (2.0 * h);
        assert_relative_eq!(area_ratio_derivative(mach, k), numeric, max_relative = 1e-6);
    }

    #[test]
    fn test_sonic_pressure_ratio() {
        // Critical pressure ratio (2 / (k + 1))^(k / (k - 1))
        let k: f64 = 1.22;
        let critical = (2.0 / (k + 1.0)).powf(k / (k - 1.0));
        assert_relative_eq!(mach_pressure_ratio(1.0, k), critical, max_relative = 1e-12);
    }
}
