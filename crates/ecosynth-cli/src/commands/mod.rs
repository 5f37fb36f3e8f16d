//! CLI command implementations

pub mod doctor;
pub mod map;
pub mod run;
