use crate::constants::{
    DEFAULT_LENGTH_PERCENTAGE, DEFAULT_POINTS_PER_SECTION, ENGINE_CHAMBER_PRESSURE,
    ENGINE_CHAMBER_TEMPERATURE, ENGINE_GAS_CONSTANT, ENGINE_SPECIFIC_HEAT_RATIO,
    ENGINE_THROAT_AREA,
};
use crate::control::flight_profile::FlightSegment;
use crate::control::launch_stages::StagingConfig;
use crate::control::propulsion::{Engine, GasProperties};
use crate::errors::NozzleError;
use crate::nozzle_system::wall_angles::LengthPercentage;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub specific_heat_ratio: f64,
    pub gas_constant: f64,        // J/(kg⋅K)
    pub chamber_pressure: f64,    // Pa
    pub chamber_temperature: f64, // K
    pub throat_area: f64,         // m²
}

impl EngineConfig {
    pub fn engine(&self) -> Engine {
        Engine::new(
            GasProperties::new(self.specific_heat_ratio, self.gas_constant),
            self.chamber_pressure,
            self.chamber_temperature,
            self.throat_area,
        )
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            specific_heat_ratio: ENGINE_SPECIFIC_HEAT_RATIO,
            gas_constant: ENGINE_GAS_CONSTANT,
            chamber_pressure: ENGINE_CHAMBER_PRESSURE,
            chamber_temperature: ENGINE_CHAMBER_TEMPERATURE,
            throat_area: ENGINE_THROAT_AREA,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    pub length_percentage: u32,
    pub points_per_section: usize,
}

impl ContourConfig {
    pub fn length(&self) -> LengthPercentage {
        LengthPercentage::from_percent(self.length_percentage)
    }
}

impl Default for ContourConfig {
    fn default() -> Self {
        ContourConfig {
            length_percentage: DEFAULT_LENGTH_PERCENTAGE,
            points_per_section: DEFAULT_POINTS_PER_SECTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub engine: EngineConfig,
    pub segments: Vec<FlightSegment>,
    pub contour: ContourConfig,
    pub staging: StagingConfig,
}

impl Default for MissionConfig {
    fn default() -> Self {
        MissionConfig {
            engine: EngineConfig::default(),
            segments: vec![
                FlightSegment::new(0.0, 30_000.0, 50, 50.0), // dense air, low expansion
                FlightSegment::new(30_000.0, 80_000.0, 50, 200.0),
                FlightSegment::new(80_000.0, 120_000.0, 100, 600.0), // near vacuum
            ],
            contour: ContourConfig::default(),
            staging: StagingConfig::default(),
        }
    }
}

impl MissionConfig {
    pub fn from_json(text: &str) -> Result<Self, NozzleError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, NozzleError> {
        let path = path.as_ref();
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        info!(path = %path.display(), segments = config.segments.len(), "mission config loaded");
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, NozzleError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
