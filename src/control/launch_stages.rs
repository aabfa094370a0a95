use super::environment::StandardAtmosphere;
use crate::constants::{
    DEFAULT_ALTITUDE_SAMPLES, DEFAULT_EPSILON_MAX, DEFAULT_EPSILON_MIN, DEFAULT_EPSILON_SAMPLES,
    DEFAULT_PRESSURE_TOLERANCE, DEFAULT_STAGE_CHANGE_THRESHOLD, DEFAULT_TARGET_PRESSURE_FRACTION,
};
use crate::errors::NozzleError;
use crate::flow_system::isentropic::pressure_ratio;
use crate::utils::interpolation::linspace;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageBreakpoint {
    pub altitude: f64, // m
    pub expansion_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    pub altitude_samples: usize,
    pub epsilon_min: f64,
    pub epsilon_max: f64,
    pub epsilon_samples: usize,
    /// Exit pressure the search aims for, as a fraction of ambient.
    pub target_pressure_fraction: f64,
    /// Largest accepted relative miss of the target exit pressure.
    pub pressure_tolerance: f64,
    /// Relative change in expansion ratio that opens a new stage.
    pub change_threshold: f64,
}

impl Default for StagingConfig {
    fn default() -> Self {
        StagingConfig {
            altitude_samples: DEFAULT_ALTITUDE_SAMPLES,
            epsilon_min: DEFAULT_EPSILON_MIN,
            epsilon_max: DEFAULT_EPSILON_MAX,
            epsilon_samples: DEFAULT_EPSILON_SAMPLES,
            target_pressure_fraction: DEFAULT_TARGET_PRESSURE_FRACTION,
            pressure_tolerance: DEFAULT_PRESSURE_TOLERANCE,
            change_threshold: DEFAULT_STAGE_CHANGE_THRESHOLD,
        }
    }
}

pub struct StageOptimizer {
    pub config: StagingConfig,
    atmosphere: StandardAtmosphere,
}

impl StageOptimizer {
    pub fn new(config: StagingConfig) -> Self {
        StageOptimizer {
            config,
            atmosphere: StandardAtmosphere::new(),
        }
    }

    /// Best expansion ratio for every sampled altitude that meets the tolerance.
    pub fn optimal_expansion_ratios(
        &self,
        k: f64,
        chamber_pressure: f64,
        max_altitude: f64,
    ) -> Result<Vec<(f64, f64)>, NozzleError> {
        // Exit pressure does not depend on altitude, resolve every candidate once
        let candidates = linspace(
            self.config.epsilon_min,
            self.config.epsilon_max,
            self.config.epsilon_samples,
        )
        .into_iter()
        .map(|epsilon| Ok((epsilon, chamber_pressure * pressure_ratio(epsilon, k)?)))
        .collect::<Result<Vec<_>, NozzleError>>()?;

        let altitudes = linspace(0.0, max_altitude, self.config.altitude_samples);
        let ambient = self.atmosphere.evaluate(&altitudes).pressure;

        let mut optimal = Vec::with_capacity(altitudes.len());
        for (&altitude, &ambient_pressure) in altitudes.iter().zip(ambient.iter()) {
            let target = self.config.target_pressure_fraction * ambient_pressure;

            let mut best: Option<f64> = None;
            let mut min_error = f64::INFINITY;
            for &(epsilon, exit_pressure) in &candidates {
                let error = (exit_pressure - target).abs() / target;
                if error < min_error {
                    min_error = error;
                    best = Some(epsilon);
                }
            }

            match best {
                Some(epsilon) if min_error <= self.config.pressure_tolerance => {
                    optimal.push((altitude, epsilon))
                }
                _ => debug!(altitude, min_error, "no expansion ratio within tolerance"),
            }
        }

        debug!(
            sampled = altitudes.len(),
            accepted = optimal.len(),
            "optimal expansion ratio scan finished"
        );
        Ok(optimal)
    }

    pub fn find_breakpoints(
        &self,
        k: f64,
        chamber_pressure: f64,
        throat_area: f64,
        max_altitude: f64,
    ) -> Result<Vec<StageBreakpoint>, NozzleError> {
        let optimal = self.optimal_expansion_ratios(k, chamber_pressure, max_altitude)?;

        let mut breakpoints = Vec::new();
        if let Some(&(_, first_epsilon)) = optimal.first() {
            let mut current = first_epsilon;
            breakpoints.push(StageBreakpoint {
                altitude: 0.0,
                expansion_ratio: current,
            });

            for &(altitude, epsilon) in &optimal {
                if (epsilon - current).abs() / current > self.config.change_threshold {
                    breakpoints.push(StageBreakpoint {
                        altitude,
                        expansion_ratio: epsilon,
                    });
                    current = epsilon;
                }
            }
        }

        info!(
            k,
            chamber_pressure,
            throat_area,
            max_altitude,
            stages = breakpoints.len(),
            "stage breakpoints found"
        );
        Ok(breakpoints)
    }
}

impl Default for StageOptimizer {
    fn default() -> Self {
        Self::new(StagingConfig::default())
    }
}

/// Breakpoint search with the default sampling and thresholds. The throat area
/// does not change the exit pressure and is only recorded.
pub fn find_breakpoints(
    k: f64,
    chamber_pressure: f64,
    throat_area: f64,
    max_altitude: f64,
) -> Result<Vec<StageBreakpoint>, NozzleError> {
    StageOptimizer::default().find_breakpoints(k, chamber_pressure, throat_area, max_altitude)
}
