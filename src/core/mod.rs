//! Value types shared by the simulator.

pub mod debt;
pub mod snapshot;
