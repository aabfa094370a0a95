pub mod isentropic;
pub mod thrust;
