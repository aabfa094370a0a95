pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod flow_system;
pub mod nozzle_system;
pub mod telemetry_system;
pub mod utils;

pub use config::{ContourConfig, EngineConfig, MissionConfig};
pub use constants::*;
pub use control::environment::{AtmosphereProfile, AtmosphericState, StandardAtmosphere};
pub use control::flight_profile::{FlightProfile, FlightSegment, ProfileSample};
pub use control::launch_stages::{find_breakpoints, StageBreakpoint, StageOptimizer, StagingConfig};
pub use control::propulsion::{Engine, GasProperties};
pub use errors::NozzleError;

// Re-export commonly used items from flow_system
pub use flow_system::isentropic::{pressure_ratio, solve_exit_flow, FlowSolution, SolverPath};
pub use flow_system::thrust::{thrust, ThrustModel};

// Re-export commonly used items from nozzle_system
pub use nozzle_system::contour::{bell_nozzle, BellNozzle, ContourSection, NozzleContour};
pub use nozzle_system::export::{export_point_table, write_point_table};
pub use nozzle_system::wall_angles::{LengthPercentage, NozzleAngles};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::Telemetry;

// Re-export commonly used utilities
pub use utils::interpolation::interpolate;
pub use utils::vector2d::Vector2D;
