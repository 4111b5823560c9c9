//! Single-elevator dispatch simulation.
//!
//! One call generator thread per floor posts random calls into a shared
//! call table, the dispatcher sweeps the building serving them, and a run
//! timer ends the run and reports wait and turnaround averages.

pub mod modules;
pub mod utilities;
