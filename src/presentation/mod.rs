pub mod cli;
pub mod relative_time;
