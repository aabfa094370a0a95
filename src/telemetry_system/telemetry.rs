use crate::control::environment::AtmosphereProfile;
use crate::control::flight_profile::FlightProfile;
use crate::control::launch_stages::StageBreakpoint;
use crate::nozzle_system::contour::BellNozzle;

/// Collects human-readable result blocks and prints them in order.
pub struct Telemetry {
    pub log: Vec<String>,
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry { log: Vec::new() }
    }

    pub fn format_altitude(altitude: f64) -> String {
        if altitude >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    pub fn format_pressure(pressure: f64) -> String {
        if pressure >= 1.0e6 {
            format!("{:.2} MPa", pressure / 1.0e6)
        } else if pressure >= 1.0e3 {
            format!("{:.2} kPa", pressure / 1.0e3)
        } else {
            format!("{:.4} Pa", pressure)
        }
    }

    pub fn format_force(force: f64) -> String {
        if force.abs() >= 1.0e6 {
            format!("{:.3} MN", force / 1.0e6)
        } else if force.abs() >= 1.0e3 {
            format!("{:.3} kN", force / 1.0e3)
        } else {
            format!("{:.3} N", force)
        }
    }

    pub fn record_atmosphere(&mut self, altitudes: &[f64], profile: &AtmosphereProfile) {
        let mut block = String::from("--- Standard Atmosphere ---\n");
        for (i, altitude) in altitudes.iter().enumerate().take(profile.len()) {
            block.push_str(&format!(
                "{:>12} | P = {:>14} | T = {:>7.2} K | rho = {:.6} kg/m³\n",
                Self::format_altitude(*altitude),
                Self::format_pressure(profile.pressure[i]),
                profile.temperature[i],
                profile.density[i]
            ));
        }
        self.log.push(block);
    }

    pub fn record_profile(&mut self, profile: &FlightProfile) {
        let mut block = String::from("--- Flight Profile ---\n");
        for sample in &profile.samples {
            block.push_str(&format!(
                "[{}] eps = {:>6.1} | {:>10} | P_amb = {:>14} | P_exit = {:>12} | F = {:>11} | Isp = {:.1} s\n",
                sample.segment,
                sample.expansion_ratio,
                Self::format_altitude(sample.altitude),
                Self::format_pressure(sample.ambient_pressure),
                Self::format_pressure(sample.exit_pressure),
                Self::format_force(sample.thrust),
                sample.specific_impulse
            ));
        }

        if let (Some(max), Some(min)) = (profile.max_thrust(), profile.min_thrust()) {
            block.push_str(&format!(
                "Max Thrust: {} at {}\nMin Thrust: {} at {}\n",
                Self::format_force(max.thrust),
                Self::format_altitude(max.altitude),
                Self::format_force(min.thrust),
                Self::format_altitude(min.altitude)
            ));
        }
        self.log.push(block);
    }

    pub fn record_nozzle(&mut self, nozzle: &BellNozzle) {
        self.log.push(format!(
            "--- Bell Nozzle (eps = {}) ---\n\
             Length ({}%): {:.3}\n\
             Throat Radius: {:.3}\n\
             Exit Radius: {:.3}\n\
             Theta N: {:.2}°\n\
             Theta E: {:.2}°\n\
             Contour Points: {}\n",
            nozzle.expansion_ratio,
            nozzle.length_percentage.percent(),
            nozzle.angles.length,
            nozzle.throat_radius,
            nozzle.exit_radius(),
            nozzle.angles.theta_n.to_degrees(),
            nozzle.angles.theta_e.to_degrees(),
            nozzle.contour.upper_profile().len()
        ));
    }

    pub fn record_breakpoints(&mut self, breakpoints: &[StageBreakpoint]) {
        let mut block = String::from("--- Stage Breakpoints ---\n");
        if breakpoints.is_empty() {
            block.push_str("No altitude met the exit pressure tolerance\n");
        }
        for (i, breakpoint) in breakpoints.iter().enumerate() {
            block.push_str(&format!(
                "Stage {}: from {} use eps = {:.1}\n",
                i + 1,
                Self::format_altitude(breakpoint.altitude),
                breakpoint.expansion_ratio
            ));
        }
        self.log.push(block);
    }

    pub fn display_data(&self) {
        for entry in &self.log {
            println!("{}", entry);
        }
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nozzle_system::contour::bell_nozzle;

    #[test]
    fn test_format_altitude() {
        assert_eq!(Telemetry::format_altitude(500.0), "500.00 m");
        assert_eq!(Telemetry::format_altitude(30_000.0), "30.00 km");
    }

    #[test]
    fn test_format_pressure_and_force() {
        assert_eq!(Telemetry::format_pressure(30.0e6), "30.00 MPa");
        assert_eq!(Telemetry::format_pressure(101_400.0), "101.40 kPa");
        assert_eq!(Telemetry::format_pressure(0.5), "0.5000 Pa");
        assert_eq!(Telemetry::format_force(6.469e6), "6.469 MN");
        assert_eq!(Telemetry::format_force(-2_500.0), "-2.500 kN");
    }

    #[test]
    fn test_breakpoint_block() {
        let mut telemetry = Telemetry::new();
        telemetry.record_breakpoints(&[
            StageBreakpoint {
                altitude: 0.0,
                expansion_ratio: 38.9,
            },
            StageBreakpoint {
                altitude: 2_809.4,
                expansion_ratio: 50.9,
            },
        ]);

        assert_eq!(telemetry.log.len(), 1);
        assert!(telemetry.log[0].contains("Stage 1: from 0.00 m use eps = 38.9"));
        assert!(telemetry.log[0].contains("Stage 2: from 2.81 km use eps = 50.9"));
    }

    #[test]
    fn test_empty_breakpoints_reported() {
        let mut telemetry = Telemetry::new();
        telemetry.record_breakpoints(&[]);
        assert!(telemetry.log[0].contains("No altitude"));
    }

    #[test]
    fn test_nozzle_block() {
        let nozzle = bell_nozzle(1.22, 50.0, 200.0, 80).unwrap();
        let mut telemetry = Telemetry::new();
        telemetry.record_nozzle(&nozzle);

        assert!(telemetry.log[0].contains("Theta N: 31.50°"));
        assert!(telemetry.log[0].contains("Contour Points: 300"));
    }
}
