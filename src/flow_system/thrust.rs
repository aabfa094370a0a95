/// Thrust of a nozzle with fixed chamber and exit conditions.
///
/// Inputs are not validated: `chamber_pressure <= 0` or `k <= 1` give NaN or
/// otherwise meaningless values, checking them is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrustModel {
    pub chamber_pressure: f64, // Pa
    pub throat_area: f64,      // m²
    pub k: f64,
    pub exit_pressure: f64, // Pa
    pub expansion_ratio: f64,
    momentum_thrust: f64, // N
}

impl ThrustModel {
    pub fn new(
        chamber_pressure: f64,
        throat_area: f64,
        k: f64,
        exit_pressure: f64,
        expansion_ratio: f64,
    ) -> Self {
        ThrustModel {
            chamber_pressure,
            throat_area,
            k,
            exit_pressure,
            expansion_ratio,
            momentum_thrust: momentum_thrust(chamber_pressure, throat_area, k, exit_pressure),
        }
    }

    pub fn momentum_thrust(&self) -> f64 {
        self.momentum_thrust
    }

    pub fn pressure_thrust(&self, ambient_pressure: f64) -> f64 {
        (self.exit_pressure - ambient_pressure) * self.expansion_ratio * self.throat_area
    }

    pub fn thrust(&self, ambient_pressure: f64) -> f64 {
        self.momentum_thrust + self.pressure_thrust(ambient_pressure)
    }

    pub fn thrust_profile(&self, ambient_pressures: &[f64]) -> Vec<f64> {
        ambient_pressures
            .iter()
            .map(|&ambient_pressure| self.thrust(ambient_pressure))
            .collect()
    }
}

fn momentum_thrust(chamber_pressure: f64, throat_area: f64, k: f64, exit_pressure: f64) -> f64 {
    let velocity_term = (2.0 * k.powi(2) / (k - 1.0))
        * (2.0 / (k + 1.0)).powf((k + 1.0) / (k - 1.0))
        * (1.0 - (exit_pressure / chamber_pressure).powf((k - 1.0) / k));

    throat_area * chamber_pressure * velocity_term.sqrt()
}

pub fn thrust(
    chamber_pressure: f64,
    throat_area: f64,
    k: f64,
    exit_pressure: f64,
    ambient_pressure: f64,
    expansion_ratio: f64,
) -> f64 {
    ThrustModel::new(chamber_pressure, throat_area, k, exit_pressure, expansion_ratio)
        .thrust(ambient_pressure)
}
