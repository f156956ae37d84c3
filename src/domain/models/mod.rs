pub mod envelope;
pub mod password;
pub mod planner;
pub mod transport;
