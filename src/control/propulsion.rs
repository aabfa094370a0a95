use crate::constants::STANDARD_GRAVITY;
use crate::errors::NozzleError;
use crate::flow_system::isentropic::pressure_ratio;
use crate::flow_system::thrust::ThrustModel;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasProperties {
    pub specific_heat_ratio: f64,
    pub gas_constant: f64, // J/(kg⋅K)
}

impl GasProperties {
    pub fn new(specific_heat_ratio: f64, gas_constant: f64) -> Self {
        GasProperties {
            specific_heat_ratio,
            gas_constant,
        }
    }
}

/// Chamber and throat conditions shared by every nozzle the engine is fitted with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Engine {
    pub gas: GasProperties,
    pub chamber_pressure: f64,    // Pa
    pub chamber_temperature: f64, // K
    pub throat_area: f64,         // m²
}

impl Engine {
    pub fn new(
        gas: GasProperties,
        chamber_pressure: f64,
        chamber_temperature: f64,
        throat_area: f64,
    ) -> Self {
        Engine {
            gas,
            chamber_pressure,
            chamber_temperature,
            throat_area,
        }
    }

    pub fn throat_radius(&self) -> f64 {
        (self.throat_area / PI).sqrt()
    }

    /// Choked mass flow through the throat.
    pub fn mass_flow_rate(&self) -> f64 {
        let k = self.gas.specific_heat_ratio;
        self.chamber_pressure
            * self.throat_area
            * (k / (self.gas.gas_constant * self.chamber_temperature)).sqrt()
            * (2.0 / (k + 1.0)).powf((k + 1.0) / (2.0 * (k - 1.0)))
    }

    pub fn exit_pressure(&self, expansion_ratio: f64) -> Result<f64, NozzleError> {
        Ok(self.chamber_pressure * pressure_ratio(expansion_ratio, self.gas.specific_heat_ratio)?)
    }

    pub fn thrust_model(&self, expansion_ratio: f64) -> Result<ThrustModel, NozzleError> {
        Ok(ThrustModel::new(
            self.chamber_pressure,
            self.throat_area,
            self.gas.specific_heat_ratio,
            self.exit_pressure(expansion_ratio)?,
            expansion_ratio,
        ))
    }

    pub fn specific_impulse(&self, thrust: f64) -> f64 {
        thrust / (self.mass_flow_rate() * STANDARD_GRAVITY)
    }
}
