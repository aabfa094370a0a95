use super::environment::StandardAtmosphere;
use super::propulsion::Engine;
use crate::errors::NozzleError;
use crate::utils::interpolation::linspace;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Altitude band flown with a single fixed expansion ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSegment {
    pub start_altitude: f64, // m
    pub end_altitude: f64,   // m
    pub samples: usize,
    pub expansion_ratio: f64,
}

impl FlightSegment {
    pub fn new(
        start_altitude: f64,
        end_altitude: f64,
        samples: usize,
        expansion_ratio: f64,
    ) -> Self {
        FlightSegment {
            start_altitude,
            end_altitude,
            samples,
            expansion_ratio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSample {
    pub segment: usize,
    pub altitude: f64,
    pub expansion_ratio: f64,
    pub ambient_pressure: f64, // Pa
    pub exit_pressure: f64,    // Pa
    pub thrust: f64,           // N
    pub specific_impulse: f64, // s
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightProfile {
    pub samples: Vec<ProfileSample>,
}

impl FlightProfile {
    /// Thrust along consecutive segments, each flown with its own nozzle.
    pub fn evaluate(
        engine: &Engine,
        atmosphere: &StandardAtmosphere,
        segments: &[FlightSegment],
    ) -> Result<Self, NozzleError> {
        let mut samples = Vec::with_capacity(segments.iter().map(|s| s.samples).sum());

        for (index, segment) in segments.iter().enumerate() {
            let model = engine.thrust_model(segment.expansion_ratio)?;
            let altitudes = linspace(segment.start_altitude, segment.end_altitude, segment.samples);
            let ambient = atmosphere.evaluate(&altitudes).pressure;
            let thrusts = model.thrust_profile(&ambient);

            debug!(
                segment = index,
                expansion_ratio = segment.expansion_ratio,
                exit_pressure = model.exit_pressure,
                samples = altitudes.len(),
                "flight segment evaluated"
            );

            for ((&altitude, &ambient_pressure), &thrust) in
                altitudes.iter().zip(ambient.iter()).zip(thrusts.iter())
            {
                samples.push(ProfileSample {
                    segment: index,
                    altitude,
                    expansion_ratio: segment.expansion_ratio,
                    ambient_pressure,
                    exit_pressure: model.exit_pressure,
                    thrust,
                    specific_impulse: engine.specific_impulse(thrust),
                });
            }
        }

        Ok(FlightProfile { samples })
    }

    pub fn max_thrust(&self) -> Option<&ProfileSample> {
        self.samples
            .iter()
            .max_by(|a, b| a.thrust.total_cmp(&b.thrust))
    }

    pub fn min_thrust(&self) -> Option<&ProfileSample> {
        self.samples
            .iter()
            .min_by(|a, b| a.thrust.total_cmp(&b.thrust))
    }

    pub fn segment(&self, index: usize) -> impl Iterator<Item = &ProfileSample> {
        self.samples.iter().filter(move |sample| sample.segment == index)
    }
}
