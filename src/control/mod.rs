pub mod environment;
pub mod flight_profile;
pub mod launch_stages;
pub mod propulsion;
