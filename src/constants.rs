// Physical Constants
pub const STANDARD_GRAVITY: f64 = 9.80665; // m/s²
pub const AIR_GAS_CONSTANT: f64 = 287.05; // J/(kg⋅K)

// Atmosphere Reference
pub const SEA_LEVEL_PRESSURE: f64 = 101325.0; // Pa
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15; // K
pub const ATMOSPHERE_TOP: f64 = 120_000.0; // m

// Isentropic Solver
pub const MACH_LOWER_BOUND: f64 = 1.001;
pub const MACH_UPPER_BOUND: f64 = 20.0;
pub const FALLBACK_MACH_SEED: f64 = 2.0;
pub const SOLVER_TOLERANCE: f64 = 1e-12;
pub const SOLVER_MAX_ITERATIONS: usize = 200;

// Nozzle Geometry
pub const ENTRANT_ANGLE_DEG: f64 = -135.0;
pub const ENTRANT_RADIUS_FACTOR: f64 = 1.5; // × Rt
pub const EXIT_ARC_RADIUS_FACTOR: f64 = 0.382; // × Rt
pub const CONICAL_HALF_ANGLE_DEG: f64 = 15.0; // reference 15° cone
pub const DEFAULT_LENGTH_PERCENTAGE: u32 = 80;
pub const DEFAULT_POINTS_PER_SECTION: usize = 100;

// Stage Optimizer
pub const DEFAULT_ALTITUDE_SAMPLES: usize = 300;
pub const DEFAULT_EPSILON_MIN: f64 = 5.0;
pub const DEFAULT_EPSILON_MAX: f64 = 1000.0;
pub const DEFAULT_EPSILON_SAMPLES: usize = 500;
pub const DEFAULT_TARGET_PRESSURE_FRACTION: f64 = 0.6;
pub const DEFAULT_PRESSURE_TOLERANCE: f64 = 0.05;
pub const DEFAULT_STAGE_CHANGE_THRESHOLD: f64 = 0.3;

// Reference Engine
pub const ENGINE_SPECIFIC_HEAT_RATIO: f64 = 1.22;
pub const ENGINE_GAS_CONSTANT: f64 = 518.0; // J/(kg⋅K)
pub const ENGINE_CHAMBER_PRESSURE: f64 = 30.0e6; // Pa
pub const ENGINE_CHAMBER_TEMPERATURE: f64 = 3300.0; // K
pub const ENGINE_THROAT_AREA: f64 = 0.126; // m²
