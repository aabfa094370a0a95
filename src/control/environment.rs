use crate::constants::{
    AIR_GAS_CONSTANT, ATMOSPHERE_TOP, SEA_LEVEL_PRESSURE, SEA_LEVEL_TEMPERATURE, STANDARD_GRAVITY,
};
use tracing::debug;

/// One band of the layered standard atmosphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerDefinition {
    pub base_altitude: f64,    // m
    pub base_temperature: f64, // K
    pub lapse_rate: f64,       // K/m
}

impl LayerDefinition {
    const fn new(base_altitude: f64, base_temperature: f64, lapse_rate: f64) -> Self {
        LayerDefinition {
            base_altitude,
            base_temperature,
            lapse_rate,
        }
    }

    pub fn is_isothermal(&self) -> bool {
        self.lapse_rate == 0.0
    }
}

/// US standard atmosphere bands up to 120 km. The last band is isothermal and
/// is also used to extrapolate above `ATMOSPHERE_TOP`.
pub const STANDARD_LAYERS: [LayerDefinition; 8] = [
    LayerDefinition::new(0.0, 288.15, -0.0065),      // Troposphere
    LayerDefinition::new(11_000.0, 216.65, 0.0),     // Tropopause
    LayerDefinition::new(20_000.0, 216.65, 0.001),   // Lower stratosphere
    LayerDefinition::new(32_000.0, 228.65, 0.0028),  // Upper stratosphere
    LayerDefinition::new(47_000.0, 270.65, 0.0),     // Stratopause
    LayerDefinition::new(51_000.0, 270.65, -0.0028), // Lower mesosphere
    LayerDefinition::new(71_000.0, 214.65, -0.002),  // Upper mesosphere
    LayerDefinition::new(84_852.0, 186.95, 0.0),     // Mesopause, up to 120 km
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphericState {
    pub pressure: f64,    // Pa
    pub temperature: f64, // K
    pub density: f64,     // kg/m³
}

/// Index-aligned batch result of [`StandardAtmosphere::evaluate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtmosphereProfile {
    pub pressure: Vec<f64>,
    pub temperature: Vec<f64>,
    pub density: Vec<f64>,
}

impl AtmosphereProfile {
    pub fn len(&self) -> usize {
        self.pressure.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pressure.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct LayerBase {
    base_altitude: f64,
    temperature: f64,
    pressure: f64,
    lapse_rate: f64,
}

impl LayerBase {
    fn conditions_at(&self, altitude: f64) -> (f64, f64) {
        let height_diff = altitude - self.base_altitude;

        if self.lapse_rate == 0.0 {
            let pressure = self.pressure
                * (-STANDARD_GRAVITY * height_diff / (AIR_GAS_CONSTANT * self.temperature)).exp();
            (self.temperature, pressure)
        } else {
            let temperature = self.temperature + self.lapse_rate * height_diff;
            let pressure = self.pressure
                * (temperature / self.temperature)
                    .powf(-STANDARD_GRAVITY / (AIR_GAS_CONSTANT * self.lapse_rate));
            (temperature, pressure)
        }
    }
}

/// Layered standard atmosphere with base conditions resolved once at construction.
#[derive(Debug, Clone)]
pub struct StandardAtmosphere {
    layers: Vec<LayerBase>,
}

impl StandardAtmosphere {
    pub fn new() -> Self {
        let mut layers = Vec::with_capacity(STANDARD_LAYERS.len());
        let mut temperature = SEA_LEVEL_TEMPERATURE;
        let mut pressure = SEA_LEVEL_PRESSURE;

        for (i, layer) in STANDARD_LAYERS.iter().enumerate() {
            let base = LayerBase {
                base_altitude: layer.base_altitude,
                temperature,
                pressure,
                lapse_rate: layer.lapse_rate,
            };
            layers.push(base);

            // Carry conditions at this layer's top into the next one
            if let Some(next) = STANDARD_LAYERS.get(i + 1) {
                let (top_temperature, top_pressure) = base.conditions_at(next.base_altitude);
                temperature = top_temperature;
                pressure = top_pressure;
            }
        }

        debug!(
            layers = layers.len(),
            top = ATMOSPHERE_TOP,
            "standard atmosphere base conditions resolved"
        );

        StandardAtmosphere { layers }
    }

    fn layer_for(&self, altitude: f64) -> &LayerBase {
        // Lower bound inclusive; below 0 uses the first band, above the top the last.
        let index = self
            .layers
            .partition_point(|layer| layer.base_altitude <= altitude)
            .saturating_sub(1);
        &self.layers[index]
    }

    pub fn state_at(&self, altitude: f64) -> AtmosphericState {
        let (temperature, pressure) = self.layer_for(altitude).conditions_at(altitude);

        AtmosphericState {
            pressure,
            temperature,
            density: pressure / (AIR_GAS_CONSTANT * temperature),
        }
    }

    pub fn pressure_at(&self, altitude: f64) -> f64 {
        self.state_at(altitude).pressure
    }

    pub fn evaluate(&self, altitudes: &[f64]) -> AtmosphereProfile {
        let mut profile = AtmosphereProfile {
            pressure: Vec::with_capacity(altitudes.len()),
            temperature: Vec::with_capacity(altitudes.len()),
            density: Vec::with_capacity(altitudes.len()),
        };

        for &altitude in altitudes {
            let state = self.state_at(altitude);
            profile.pressure.push(state.pressure);
            profile.temperature.push(state.temperature);
            profile.density.push(state.density);
        }

        profile
    }

    /// Base temperature actually used by each band after carrying conditions forward.
    pub fn base_temperatures(&self) -> Vec<f64> {
        self.layers.iter().map(|layer| layer.temperature).collect()
    }
}

impl Default for StandardAtmosphere {
    fn default() -> Self {
        Self::new()
    }
}
